//! Scroll shadow decorator
//!
//! Binds an [`EdgeTracker`] to two [`OpacityAnimator`]s and paints the fade
//! bands over a scrollable child. Render the child first (it measures the
//! layout and updates its controller), then the shadow over the same area.

use std::rc::Rc;
use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use tracing::debug;

use edgefade_core::{
    Edge, EdgeTargets, EdgeTracker, FadeConfig, FrameScheduler, ScrollContext, ScrollController,
    SharedSource,
};

use crate::anim::OpacityAnimator;
use crate::theme::{fade_color, Theme};
use crate::widgets::edge_fade::{band_rect, FadeOverlay};

pub struct ScrollShadow {
    tracker: EdgeTracker,
    config: FadeConfig,
    color: Color,
    theme: Theme,
    start: OpacityAnimator,
    end: OpacityAnimator,
    last_area: Rect,
    last_targets: Option<EdgeTargets>,
}

impl ScrollShadow {
    /// Mount a decorator. `controller` is the explicit source; without one the
    /// ambient source of each pass is used, or a private controller.
    pub fn mount(
        config: FadeConfig,
        controller: Option<SharedSource>,
        scheduler: Rc<FrameScheduler>,
    ) -> Self {
        let color = fade_color(&config);
        let start = OpacityAnimator::new(config.duration(), config.curve);
        let end = OpacityAnimator::new(config.duration(), config.curve);
        Self {
            tracker: EdgeTracker::mount(controller, scheduler),
            config,
            color,
            theme: Theme::default(),
            start,
            end,
            last_area: Rect::default(),
            last_targets: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn config(&self) -> &FadeConfig {
        &self.config
    }

    pub fn tracker(&self) -> &EdgeTracker {
        &self.tracker
    }

    /// Controller created at mount when no explicit one was given
    pub fn owned_controller(&self) -> Option<&Rc<ScrollController>> {
        self.tracker.owned_controller()
    }

    /// Run a render pass and feed the targets to the animators
    pub fn build(&mut self, ctx: &ScrollContext) -> EdgeTargets {
        self.build_at(ctx, Instant::now())
    }

    pub fn build_at(&mut self, ctx: &ScrollContext, now: Instant) -> EdgeTargets {
        let targets = self.tracker.render_pass(ctx);
        match self.last_targets {
            // First frame shows the initial state without fading in
            None => {
                self.start.set(targets.start);
                self.end.set(targets.end);
            }
            Some(previous) if previous != targets => {
                debug!(start = ?targets.start, end = ?targets.end, "fade targets changed");
                self.start.retarget_at(targets.start, now);
                self.end.retarget_at(targets.end, now);
            }
            Some(_) => {}
        }
        self.last_targets = Some(targets);
        self.start.update_at(now);
        self.end.update_at(now);
        targets
    }

    /// Build and paint the fade bands over `area`
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &ScrollContext) -> EdgeTargets {
        self.render_at(area, buf, ctx, Instant::now())
    }

    pub fn render_at(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        ctx: &ScrollContext,
        now: Instant,
    ) -> EdgeTargets {
        let targets = self.build_at(ctx, now);
        self.last_area = area;
        for edge in Edge::BOTH {
            FadeOverlay::new(edge, self.config.scroll_direction, self.config.size, self.color)
                .opacity(self.opacity(edge))
                .base(&self.theme)
                .render(area, buf);
        }
        targets
    }

    /// Current animated opacity of one band
    pub fn opacity(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Start => self.start.current(),
            Edge::End => self.end.current(),
        }
    }

    /// True while either band is still fading
    pub fn needs_update(&self) -> bool {
        self.start.is_animating() || self.end.is_animating()
    }

    /// Whether a pointer at this cell lands on a visible band. Always false
    /// when the decorator ignores interaction.
    pub fn hit_test(&self, column: u16, row: u16) -> bool {
        if self.config.ignore_interaction {
            return false;
        }
        Edge::BOTH.into_iter().any(|edge| {
            self.opacity(edge) > 0.0
                && band_rect(self.last_area, self.config.scroll_direction, edge, self.config.size)
                    .contains((column, row).into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgefade_core::{Opacity, ScrollDirection};
    use ratatui::style::Style;
    use std::time::Duration;

    fn config(size: u16) -> FadeConfig {
        FadeConfig {
            size,
            color: "#ffffff".to_string(),
            duration_ms: 100,
            ..Default::default()
        }
    }

    fn black(area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(Color::Rgb(0, 0, 0)));
        buf
    }

    #[test]
    fn test_first_frame_does_not_animate() {
        let scheduler = Rc::new(FrameScheduler::new());
        let controller = ScrollController::shared();
        controller.attach(100.0, 10.0);
        let mut shadow = ScrollShadow::mount(config(2), Some(controller), scheduler);

        let area = Rect::new(0, 0, 4, 10);
        let mut buf = black(area);
        let targets = shadow.render(area, &mut buf, &ScrollContext::default());

        assert_eq!(targets.start, Opacity::Hidden);
        assert_eq!(targets.end, Opacity::Shown);
        assert!(!shadow.needs_update());
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0, 9)].bg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_scrolling_fades_in_start_band() {
        let scheduler = Rc::new(FrameScheduler::new());
        let controller = ScrollController::shared();
        controller.attach(100.0, 10.0);
        let mut shadow = ScrollShadow::mount(config(2), Some(controller.clone()), scheduler.clone());
        let ctx = ScrollContext::default();
        let t0 = Instant::now();
        shadow.build_at(&ctx, t0);

        controller.jump_to(50.0);
        shadow.build_at(&ctx, t0);
        assert_eq!(shadow.opacity(Edge::Start), 0.0);

        scheduler.run_frame_callbacks();
        let targets = shadow.build_at(&ctx, t0);
        assert_eq!(targets.start, Opacity::Shown);
        assert!(shadow.needs_update());

        shadow.build_at(&ctx, t0 + Duration::from_millis(100));
        assert_eq!(shadow.opacity(Edge::Start), 1.0);
        assert_eq!(shadow.opacity(Edge::End), 1.0);
        assert!(!shadow.needs_update());
    }

    #[test]
    fn test_owned_controller_drives_shadow() {
        let scheduler = Rc::new(FrameScheduler::new());
        let mut shadow = ScrollShadow::mount(config(1), None, scheduler);
        let owned = shadow.owned_controller().cloned().unwrap();
        owned.attach(5.0, 10.0);

        let targets = shadow.build(&ScrollContext::default());
        assert_eq!(targets.start, Opacity::Hidden);
        assert_eq!(targets.end, Opacity::Hidden);
    }

    #[test]
    fn test_hit_test_respects_ignore_interaction() {
        let scheduler = Rc::new(FrameScheduler::new());
        let controller = ScrollController::shared();
        controller.attach(100.0, 10.0);
        let area = Rect::new(0, 0, 4, 10);

        let mut passive = ScrollShadow::mount(config(2), Some(controller.clone()), scheduler.clone());
        passive.render(area, &mut black(area), &ScrollContext::default());
        assert!(!passive.hit_test(0, 9));

        let interactive = FadeConfig {
            ignore_interaction: false,
            scroll_direction: ScrollDirection::Vertical,
            ..config(2)
        };
        let mut active = ScrollShadow::mount(interactive, Some(controller), scheduler);
        active.render(area, &mut black(area), &ScrollContext::default());
        assert!(active.hit_test(0, 9));
        assert!(active.hit_test(3, 8));
        assert!(!active.hit_test(0, 5));
        // Start band is hidden at the top
        assert!(!active.hit_test(0, 0));
    }
}
