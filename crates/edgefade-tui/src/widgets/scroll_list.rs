use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use edgefade_core::{ScrollController, ScrollDirection};

/// Plain list of lines scrolled by a [`ScrollController`].
///
/// Rendering measures the content and viewport along the scroll axis and
/// pushes both into the controller before drawing the visible slice, so any
/// listener sees the layout of the frame being drawn.
pub struct ScrollList<'a> {
    items: &'a [String],
    controller: &'a ScrollController,
    direction: ScrollDirection,
    style: Style,
}

impl<'a> ScrollList<'a> {
    pub fn new(items: &'a [String], controller: &'a ScrollController) -> Self {
        Self {
            items,
            controller,
            direction: ScrollDirection::Vertical,
            style: Style::default(),
        }
    }

    pub fn direction(mut self, direction: ScrollDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Content and viewport extents along the scroll axis
    pub fn extents(&self, area: Rect) -> (f64, f64) {
        match self.direction {
            ScrollDirection::Vertical => (self.items.len() as f64, area.height as f64),
            ScrollDirection::Horizontal => {
                let widest = self
                    .items
                    .iter()
                    .map(|item| Line::raw(item.as_str()).width())
                    .max()
                    .unwrap_or(0);
                (widest as f64, area.width as f64)
            }
        }
    }
}

impl Widget for ScrollList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (content, viewport) = self.extents(area);
        self.controller.attach(content, viewport);

        let offset = self.controller.offset().round().min(u16::MAX as f64) as u16;
        let scroll = match self.direction {
            ScrollDirection::Vertical => (offset, 0),
            ScrollDirection::Horizontal => (0, offset),
        };

        let lines: Vec<Line> = self.items.iter().map(|item| Line::raw(item.as_str())).collect();
        Paragraph::new(lines)
            .style(self.style)
            .scroll(scroll)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgefade_core::ScrollSource;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item {i}")).collect()
    }

    #[test]
    fn test_render_measures_vertical_extents() {
        let items = items(20);
        let controller = ScrollController::new();
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        ScrollList::new(&items, &controller).render(area, &mut buf);

        let sample = controller.sample();
        assert!(sample.has_position);
        assert_eq!(sample.extent_before, 0.0);
        assert_eq!(sample.extent_after, 15.0);
        assert_eq!(buf[(0, 0)].symbol(), "i");
        assert_eq!(buf[(5, 4)].symbol(), "4");
    }

    #[test]
    fn test_render_uses_controller_offset() {
        let items = items(20);
        let controller = ScrollController::new();
        controller.attach(20.0, 5.0);
        controller.jump_to(10.0);

        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        ScrollList::new(&items, &controller).render(area, &mut buf);

        assert_eq!(buf[(5, 0)].symbol(), "1");
        assert_eq!(buf[(6, 0)].symbol(), "0");
    }

    #[test]
    fn test_horizontal_extents_use_widest_line() {
        let items = vec!["short".to_string(), "a much longer line".to_string()];
        let controller = ScrollController::new();
        let area = Rect::new(0, 0, 8, 2);
        let mut buf = Buffer::empty(area);
        ScrollList::new(&items, &controller)
            .direction(ScrollDirection::Horizontal)
            .render(area, &mut buf);

        assert_eq!(controller.content_extent(), 18.0);
        assert_eq!(controller.viewport_extent(), 8.0);
        assert_eq!(controller.sample().extent_after, 10.0);
    }

    #[test]
    fn test_content_that_fits_has_no_overflow() {
        let items = items(3);
        let controller = ScrollController::new();
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        ScrollList::new(&items, &controller).render(area, &mut buf);
        assert!(!controller.sample().shadow_visible());
    }
}
