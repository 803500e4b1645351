//! Edge-reached tracker
//!
//! Observes one scroll source and derives whether its start and end edges have
//! been reached. The live flags are recomputed on every notification and every
//! render pass; a second, frame-synchronized copy (the snapshot) follows them
//! one frame boundary later and is what the fade targets are computed from.
//! That lag turns rapid edge toggles into a single fade instead of flicker.
//!
//! # Usage
//!
//! ```ignore
//! let scheduler = Rc::new(FrameScheduler::new());
//! let mut tracker = EdgeTracker::mount(None, scheduler.clone());
//!
//! // every frame
//! let targets = tracker.render_pass(&ScrollContext::default());
//! draw(targets);
//! scheduler.run_frame_callbacks();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::scheduler::FrameScheduler;
use crate::source::{
    source_eq, ListenerId, ScrollController, ScrollExtentSample, ScrollListener, SharedSource,
};

/// One end of the scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top for vertical scrolling, left for horizontal
    Start,
    /// Bottom for vertical scrolling, right for horizontal
    End,
}

impl Edge {
    pub const BOTH: [Edge; 2] = [Edge::Start, Edge::End];
}

/// Discrete opacity target for one fade overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    Hidden = 0,
    Shown = 1,
}

impl Opacity {
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Opacity::Hidden => 0.0,
            Opacity::Shown => 1.0,
        }
    }
}

/// Opacity targets for both overlays, produced once per render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTargets {
    pub start: Opacity,
    pub end: Opacity,
}

impl EdgeTargets {
    pub fn get(&self, edge: Edge) -> Opacity {
        match edge {
            Edge::Start => self.start,
            Edge::End => self.end,
        }
    }
}

/// Ambient values available to a render pass
#[derive(Clone, Default)]
pub struct ScrollContext {
    /// Source provided by an enclosing scrollable, if any
    pub ambient: Option<SharedSource>,
}

impl ScrollContext {
    pub fn with_ambient(source: SharedSource) -> Self {
        Self {
            ambient: Some(source),
        }
    }
}

/// Where the tracker's source comes from
pub enum SourceBinding {
    /// Created by the tracker at mount; disposed with it
    Owned(Rc<ScrollController>),
    /// Supplied by the host; never disposed by the tracker
    Shared(SharedSource),
}

#[derive(Debug)]
struct EdgeState {
    reached_start: bool,
    reached_end: bool,
    reached_start_snap: bool,
    reached_end_snap: bool,
    start_commit_pending: bool,
    end_commit_pending: bool,
    refresh_count: u64,
    disposed: bool,
}

impl Default for EdgeState {
    fn default() -> Self {
        Self {
            reached_start: false,
            reached_end: false,
            // Matches "nothing to scroll yet" at mount
            reached_start_snap: true,
            reached_end_snap: false,
            start_commit_pending: false,
            end_commit_pending: false,
            refresh_count: 0,
            disposed: false,
        }
    }
}

impl EdgeState {
    fn live(&self, edge: Edge) -> bool {
        match edge {
            Edge::Start => self.reached_start,
            Edge::End => self.reached_end,
        }
    }

    fn snapshot(&self, edge: Edge) -> bool {
        match edge {
            Edge::Start => self.reached_start_snap,
            Edge::End => self.reached_end_snap,
        }
    }

    fn snapshot_mut(&mut self, edge: Edge) -> &mut bool {
        match edge {
            Edge::Start => &mut self.reached_start_snap,
            Edge::End => &mut self.reached_end_snap,
        }
    }

    fn pending_mut(&mut self, edge: Edge) -> &mut bool {
        match edge {
            Edge::Start => &mut self.start_commit_pending,
            Edge::End => &mut self.end_commit_pending,
        }
    }
}

struct Binding {
    source: SharedSource,
    listener: ListenerId,
}

/// Tracks edge-reached state for one decorated scrollable
pub struct EdgeTracker {
    state: Rc<RefCell<EdgeState>>,
    scheduler: Rc<FrameScheduler>,
    origin: SourceBinding,
    binding: Option<Binding>,
}

impl std::fmt::Debug for EdgeTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeTracker")
            .field("state", &*self.state.borrow())
            .field("owned", &matches!(self.origin, SourceBinding::Owned(_)))
            .field("bound", &self.binding.is_some())
            .finish()
    }
}

impl EdgeTracker {
    /// Create a tracker. Without an explicit source a private controller is
    /// created and used whenever no ambient source is available.
    pub fn mount(explicit: Option<SharedSource>, scheduler: Rc<FrameScheduler>) -> Self {
        let origin = match explicit {
            Some(source) => SourceBinding::Shared(source),
            None => SourceBinding::Owned(ScrollController::shared()),
        };
        debug!(
            owned = matches!(origin, SourceBinding::Owned(_)),
            "edge tracker mounted"
        );
        Self {
            state: Rc::new(RefCell::new(EdgeState::default())),
            scheduler,
            origin,
            binding: None,
        }
    }

    /// The privately owned controller, if the tracker created one
    pub fn owned_controller(&self) -> Option<&Rc<ScrollController>> {
        match &self.origin {
            SourceBinding::Owned(controller) => Some(controller),
            SourceBinding::Shared(_) => None,
        }
    }

    /// Pick the source for this pass: explicit, then ambient, then owned.
    pub fn resolve_source(&self, ctx: &ScrollContext) -> SharedSource {
        match &self.origin {
            SourceBinding::Shared(source) => source.clone(),
            SourceBinding::Owned(controller) => match &ctx.ambient {
                Some(ambient) => ambient.clone(),
                None => controller.clone(),
            },
        }
    }

    /// Subscribe to `source`, moving the listener off the previous one.
    /// Binding the already bound source is a no-op.
    pub fn bind_source(&mut self, source: &SharedSource) {
        if self.is_disposed() {
            return;
        }
        if self.is_bound_to(source) {
            return;
        }
        if let Some(old) = self.binding.take() {
            old.source.remove_listener(old.listener);
            debug!("edge tracker detached from previous scroll source");
        }
        let listener = source.add_listener(self.listener_for(source));
        self.binding = Some(Binding {
            source: source.clone(),
            listener,
        });
        debug!("edge tracker bound to scroll source");
    }

    pub fn is_bound_to(&self, source: &SharedSource) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| source_eq(&binding.source, source))
    }

    pub fn bound_source(&self) -> Option<&SharedSource> {
        self.binding.as_ref().map(|binding| &binding.source)
    }

    /// Recompute the live flags from the bound source and schedule snapshot
    /// commits for any flag that diverged.
    pub fn refresh(&self) {
        refresh_state(&self.state, self.sample(), &self.scheduler);
    }

    /// Resolve, bind, refresh and return the opacity targets for this frame
    pub fn render_pass(&mut self, ctx: &ScrollContext) -> EdgeTargets {
        let source = self.resolve_source(ctx);
        self.bind_source(&source);
        self.refresh();
        self.targets()
    }

    /// Current sample of the bound source
    pub fn sample(&self) -> ScrollExtentSample {
        match &self.binding {
            Some(binding) if !self.is_disposed() => binding.source.sample(),
            _ => ScrollExtentSample::DETACHED,
        }
    }

    /// True when the bound source overflows in at least one direction
    pub fn shadow_visible(&self) -> bool {
        self.sample().shadow_visible()
    }

    pub fn reached_start(&self) -> bool {
        self.state.borrow().reached_start
    }

    pub fn reached_end(&self) -> bool {
        self.state.borrow().reached_end
    }

    /// Last committed value of an edge flag
    pub fn snapshot(&self, edge: Edge) -> bool {
        self.state.borrow().snapshot(edge)
    }

    /// Opacity targets from the snapshot flags and current visibility.
    /// An edge is hidden when reached or when there is no overflow at all.
    pub fn targets(&self) -> EdgeTargets {
        let visible = self.shadow_visible();
        let state = self.state.borrow();
        let target = |edge| {
            if state.snapshot(edge) || !visible {
                Opacity::Hidden
            } else {
                Opacity::Shown
            }
        };
        EdgeTargets {
            start: target(Edge::Start),
            end: target(Edge::End),
        }
    }

    /// Number of refreshes performed, from render passes and notifications
    pub fn refresh_count(&self) -> u64 {
        self.state.borrow().refresh_count
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }

    /// Release the subscription and, if owned, the controller.
    ///
    /// Commits already queued on the scheduler become no-ops.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.state.borrow_mut().disposed = true;
        if let Some(binding) = self.binding.take() {
            binding.source.remove_listener(binding.listener);
        }
        if let SourceBinding::Owned(controller) = &self.origin {
            controller.dispose();
        }
        debug!("edge tracker disposed");
    }

    fn listener_for(&self, source: &SharedSource) -> ScrollListener {
        let state = Rc::downgrade(&self.state);
        let source = Rc::downgrade(source);
        let scheduler = Rc::downgrade(&self.scheduler);
        Rc::new(move || {
            let (Some(state), Some(source), Some(scheduler)) =
                (state.upgrade(), source.upgrade(), scheduler.upgrade())
            else {
                return;
            };
            trace!("scroll notification");
            refresh_state(&state, source.sample(), &scheduler);
        })
    }
}

impl Drop for EdgeTracker {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn refresh_state(
    state: &Rc<RefCell<EdgeState>>,
    sample: ScrollExtentSample,
    scheduler: &Rc<FrameScheduler>,
) {
    {
        let mut s = state.borrow_mut();
        if s.disposed {
            return;
        }
        s.reached_start = sample.reached_start();
        s.reached_end = sample.reached_end();
        s.refresh_count += 1;
    }
    schedule_commit(state, scheduler);
}

/// Queue at most one commit per diverged edge. The commit reads the live value
/// when it runs, so flips in between collapse into whatever is current then.
fn schedule_commit(state: &Rc<RefCell<EdgeState>>, scheduler: &Rc<FrameScheduler>) {
    for edge in Edge::BOTH {
        {
            let mut s = state.borrow_mut();
            if s.live(edge) == s.snapshot(edge) || *s.pending_mut(edge) {
                continue;
            }
            *s.pending_mut(edge) = true;
        }
        let weak_state = Rc::downgrade(state);
        let weak_scheduler = Rc::downgrade(scheduler);
        scheduler.schedule(move || commit_edge(&weak_state, &weak_scheduler, edge));
    }
}

fn commit_edge(state: &Weak<RefCell<EdgeState>>, scheduler: &Weak<FrameScheduler>, edge: Edge) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut s = state.borrow_mut();
    *s.pending_mut(edge) = false;
    if s.disposed {
        return;
    }
    let live = s.live(edge);
    if s.snapshot(edge) == live {
        return;
    }
    *s.snapshot_mut(edge) = live;
    debug!(?edge, reached = live, "edge snapshot committed");
    if let Some(scheduler) = scheduler.upgrade() {
        scheduler.request_redraw();
    }
}
