use std::rc::Rc;

use anyhow::{anyhow, Result};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info};

use edgefade_core::{
    AppConfig, Edge, FrameScheduler, ScrollContext, ScrollController, ScrollDirection, SharedSource,
};

use crate::input::Action;
use crate::shadow::ScrollShadow;
use crate::theme::Theme;
use crate::widgets::ScrollList;

/// Where the demo's scroll controller comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// The decorator creates its own controller
    Owned,
    /// The demo passes a controller explicitly
    Explicit,
    /// The demo publishes a controller through the render context
    Ambient,
}

/// Items added or removed per '+' / '-' press
const ITEM_STEP: usize = 10;

/// Demo application state
pub struct DemoApp {
    pub items: Vec<String>,
    pub direction: ScrollDirection,
    pub mode: SourceMode,
    pub scheduler: Rc<FrameScheduler>,
    pub shadow: ScrollShadow,
    pub theme: Theme,
    pub should_quit: bool,
    /// Controller that scrolls the list: the decorator's own in owned mode,
    /// otherwise the one handed to it or published as ambient
    controller: Rc<ScrollController>,
    /// Viewport length along the scroll axis from the last draw
    viewport: u16,
}

impl DemoApp {
    pub fn new(config: &AppConfig, mode: SourceMode) -> Result<Self> {
        config.fade.validate(mode != SourceMode::Owned)?;

        let scheduler = Rc::new(FrameScheduler::new());
        let host_controller = match mode {
            SourceMode::Owned => None,
            SourceMode::Explicit | SourceMode::Ambient => Some(ScrollController::shared()),
        };
        let explicit: Option<SharedSource> = match mode {
            SourceMode::Explicit => host_controller.clone().map(|c| c as SharedSource),
            SourceMode::Owned | SourceMode::Ambient => None,
        };
        let theme = Theme::default();
        let shadow = ScrollShadow::mount(config.fade.clone(), explicit, scheduler.clone())
            .with_theme(theme.clone());
        let controller = match host_controller {
            Some(controller) => controller,
            None => shadow
                .owned_controller()
                .cloned()
                .ok_or_else(|| anyhow!("scroll shadow mounted without a controller"))?,
        };

        info!(?mode, direction = ?config.fade.scroll_direction, "demo mounted");

        let mut app = Self {
            items: Vec::new(),
            direction: config.fade.scroll_direction,
            mode,
            scheduler,
            shadow,
            theme,
            should_quit: false,
            controller,
            viewport: 0,
        };
        app.resize_items(config.ui.demo_items);
        Ok(app)
    }

    /// Controller that scrolls the list this frame
    pub fn controller(&self) -> Rc<ScrollController> {
        self.controller.clone()
    }

    /// Render context for this frame
    pub fn context(&self) -> ScrollContext {
        match self.mode {
            SourceMode::Ambient => ScrollContext::with_ambient(self.controller.clone()),
            SourceMode::Owned | SourceMode::Explicit => ScrollContext::default(),
        }
    }

    fn resize_items(&mut self, count: usize) {
        let horizontal = self.direction == ScrollDirection::Horizontal;
        self.items = (0..count)
            .map(|i| {
                if horizontal {
                    format!("{:>3} {}", i, "=".repeat(i * 2))
                } else {
                    format!("{:>3}  row {}", i, i)
                }
            })
            .collect();
        debug!(count, "demo content resized");
    }

    /// Apply an input action
    pub fn apply(&mut self, action: Action) {
        let controller = self.controller();
        let page = self.viewport.max(1) as f64;
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollBy(delta) => controller.scroll_by(delta as f64),
            Action::ScrollHalfPageDown => controller.scroll_by((page / 2.0).max(1.0).floor()),
            Action::ScrollHalfPageUp => controller.scroll_by(-(page / 2.0).max(1.0).floor()),
            Action::ScrollPageDown => controller.scroll_by(page),
            Action::ScrollPageUp => controller.scroll_by(-page),
            Action::JumpToStart => controller.scroll_to_start(),
            Action::JumpToEnd => controller.scroll_to_end(),
            Action::AddItems => self.resize_items(self.items.len() + ITEM_STEP),
            Action::RemoveItems => self.resize_items(self.items.len().saturating_sub(ITEM_STEP)),
            Action::None => {}
        }
    }

    /// Mouse press: only reaches the list if no fade band captures it
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let captured = self.shadow.hit_test(column, row);
        debug!(column, row, captured, "click");
        captured
    }

    /// Draw one frame: list first, then the shadow over the same area
    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        let block = Block::default()
            .title(format!(" edgefade: {:?} / {:?} ", self.direction, self.mode))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.bg).fg(self.theme.fg));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        self.viewport = match self.direction {
            ScrollDirection::Vertical => inner.height,
            ScrollDirection::Horizontal => inner.width,
        };

        let controller = self.controller();
        let list = ScrollList::new(&self.items, &controller)
            .direction(self.direction)
            .style(Style::default().bg(self.theme.bg).fg(self.theme.fg));
        frame.render_widget(list, inner);

        let ctx = self.context();
        self.shadow.render(inner, frame.buffer_mut(), &ctx);

        self.draw_status(frame, chunks[1]);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let tracker = self.shadow.tracker();
        let sample = tracker.sample();
        let flag = |on: bool| if on { "y" } else { "n" };
        let text = format!(
            " before {:>4.0} after {:>4.0} | reached {}/{} snap {}/{} | opacity {:.2}/{:.2} ",
            sample.extent_before,
            sample.extent_after,
            flag(tracker.reached_start()),
            flag(tracker.reached_end()),
            flag(tracker.snapshot(Edge::Start)),
            flag(tracker.snapshot(Edge::End)),
            self.shadow.opacity(Edge::Start),
            self.shadow.opacity(Edge::End),
        );
        let hint = " q:quit j/k:scroll g/G:ends +/-:items ";
        let line = Line::from(vec![
            Span::styled(text, Style::default().fg(self.theme.fg)),
            Span::styled(hint, Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Run deferred commits after the frame has been drawn.
    ///
    /// Returns true when another frame is needed.
    pub fn end_frame(&mut self) -> bool {
        self.scheduler.run_frame_callbacks();
        self.scheduler.take_redraw_request() || self.shadow.needs_update()
    }
}
