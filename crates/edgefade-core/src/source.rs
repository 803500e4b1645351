//! Scroll-position sources
//!
//! A source reports how far the viewport is from either end of its content and
//! notifies registered listeners whenever that changes. [`ScrollController`] is
//! the concrete source used by the terminal widgets; anything else can plug in
//! by implementing [`ScrollSource`].

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{trace, warn};

/// Instantaneous extents read from a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollExtentSample {
    /// Distance from the viewport's leading edge to the start of the content
    pub extent_before: f64,
    /// Distance from the viewport's trailing edge to the end of the content
    pub extent_after: f64,
    /// Whether the source currently has an attached, measured position
    pub has_position: bool,
}

impl ScrollExtentSample {
    /// Sample of a source with nothing attached
    pub const DETACHED: Self = Self {
        extent_before: 0.0,
        extent_after: 0.0,
        has_position: false,
    };

    pub fn attached(extent_before: f64, extent_after: f64) -> Self {
        Self {
            extent_before: extent_before.max(0.0),
            extent_after: extent_after.max(0.0),
            has_position: true,
        }
    }

    #[inline]
    pub fn reached_start(&self) -> bool {
        self.has_position && self.extent_before == 0.0
    }

    #[inline]
    pub fn reached_end(&self) -> bool {
        self.has_position && self.extent_after == 0.0
    }

    /// True when there is overflow in at least one direction
    #[inline]
    pub fn shadow_visible(&self) -> bool {
        self.has_position && (self.extent_before > 0.0 || self.extent_after > 0.0)
    }
}

/// Callback invoked after a source's extents change
pub type ScrollListener = Rc<dyn Fn()>;

/// Handle returned by [`ScrollSource::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Something that can be observed for scroll extent changes
pub trait ScrollSource {
    /// Current extents
    fn sample(&self) -> ScrollExtentSample;

    /// Register a change listener
    fn add_listener(&self, listener: ScrollListener) -> ListenerId;

    /// Unregister a listener. Returns false if it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Number of registered listeners
    fn listener_count(&self) -> usize;
}

/// A source shared between the host and any number of trackers
pub type SharedSource = Rc<dyn ScrollSource>;

/// Identity comparison of two shared sources
#[inline]
pub fn source_eq(a: &SharedSource, b: &SharedSource) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

#[derive(Default)]
struct ControllerState {
    attached: bool,
    disposed: bool,
    content_extent: f64,
    viewport_extent: f64,
    offset: f64,
    listeners: Vec<(ListenerId, ScrollListener)>,
    next_listener_id: u64,
}

impl ControllerState {
    fn max_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    fn sample(&self) -> ScrollExtentSample {
        if !self.attached {
            return ScrollExtentSample::DETACHED;
        }
        ScrollExtentSample::attached(self.offset, self.max_offset() - self.offset)
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

/// Concrete scroll source backed by a content extent, a viewport extent and
/// an offset.
///
/// All mutators clamp the offset to `[0, max_offset]` and notify listeners only
/// when the resulting sample differs from the previous one.
#[derive(Default)]
pub struct ScrollController {
    state: RefCell<ControllerState>,
}

impl std::fmt::Debug for ScrollController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ScrollController")
            .field("attached", &state.attached)
            .field("disposed", &state.disposed)
            .field("content_extent", &state.content_extent)
            .field("viewport_extent", &state.viewport_extent)
            .field("offset", &state.offset)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in an `Rc` so it can be handed to trackers
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Attach a measured position. The current offset is kept and re-clamped.
    pub fn attach(&self, content_extent: f64, viewport_extent: f64) {
        self.mutate(|state| {
            state.attached = true;
            state.content_extent = content_extent.max(0.0);
            state.viewport_extent = viewport_extent.max(0.0);
            state.clamp_offset();
        });
    }

    /// Drop the attached position; the offset resets to the start
    pub fn detach(&self) {
        self.mutate(|state| {
            state.attached = false;
            state.offset = 0.0;
        });
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    /// Content length changed (layout measurement)
    pub fn set_content_extent(&self, extent: f64) {
        self.mutate(|state| {
            state.content_extent = extent.max(0.0);
            state.clamp_offset();
        });
    }

    /// Viewport length changed (layout measurement)
    pub fn set_viewport_extent(&self, extent: f64) {
        self.mutate(|state| {
            state.viewport_extent = extent.max(0.0);
            state.clamp_offset();
        });
    }

    pub fn jump_to(&self, offset: f64) {
        self.mutate(|state| {
            state.offset = offset;
            state.clamp_offset();
        });
    }

    /// Scroll by a delta (positive moves toward the end)
    pub fn scroll_by(&self, delta: f64) {
        self.mutate(|state| {
            state.offset += delta;
            state.clamp_offset();
        });
    }

    pub fn scroll_to_start(&self) {
        self.jump_to(0.0);
    }

    pub fn scroll_to_end(&self) {
        self.jump_to(f64::MAX);
    }

    pub fn offset(&self) -> f64 {
        self.state.borrow().offset
    }

    pub fn max_offset(&self) -> f64 {
        self.state.borrow().max_offset()
    }

    pub fn content_extent(&self) -> f64 {
        self.state.borrow().content_extent
    }

    pub fn viewport_extent(&self) -> f64 {
        self.state.borrow().viewport_extent
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }

    /// Release all listeners. The controller ignores every later mutation.
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        if state.disposed {
            return;
        }
        state.disposed = true;
        state.attached = false;
        state.listeners.clear();
        trace!("scroll controller disposed");
    }

    /// Apply a mutation and notify listeners if the sample changed.
    ///
    /// The borrow is released before listeners run so they can read the
    /// controller again.
    fn mutate(&self, apply: impl FnOnce(&mut ControllerState)) {
        let listeners: Vec<ScrollListener> = {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                warn!("ignoring mutation of a disposed scroll controller");
                return;
            }
            let before = state.sample();
            apply(&mut *state);
            let after = state.sample();
            if before == after {
                return;
            }
            trace!(
                extent_before = after.extent_before,
                extent_after = after.extent_after,
                has_position = after.has_position,
                "scroll extents changed"
            );
            state.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        for listener in listeners {
            listener();
        }
    }
}

impl ScrollSource for ScrollController {
    fn sample(&self) -> ScrollExtentSample {
        self.state.borrow().sample()
    }

    fn add_listener(&self, listener: ScrollListener) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_listener_id);
        state.next_listener_id += 1;
        if state.disposed {
            warn!("listener registered on a disposed scroll controller will never fire");
            return id;
        }
        state.listeners.push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(existing, _)| *existing != id);
        state.listeners.len() != before
    }

    fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}
