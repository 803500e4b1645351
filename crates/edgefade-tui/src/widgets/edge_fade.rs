use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use edgefade_core::{Edge, ScrollDirection};

use crate::anim::timing::lerp_u8;
use crate::theme::{rgb, Theme};

/// Gradient band painted over one edge of already-rendered content.
///
/// The line touching the edge is blended fully toward the fade color (scaled
/// by opacity); lines further in blend less, reaching the untouched content at
/// the far side of the band.
#[derive(Debug, Clone)]
pub struct FadeOverlay {
    edge: Edge,
    direction: ScrollDirection,
    size: u16,
    color: Color,
    opacity: f64,
    base_bg: Color,
    base_fg: Color,
}

impl FadeOverlay {
    pub fn new(edge: Edge, direction: ScrollDirection, size: u16, color: Color) -> Self {
        let theme = Theme::default();
        Self {
            edge,
            direction,
            size,
            color,
            opacity: 1.0,
            base_bg: theme.bg,
            base_fg: theme.fg,
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Colors assumed for cells without an RGB foreground/background
    pub fn base(mut self, theme: &Theme) -> Self {
        self.base_bg = theme.bg;
        self.base_fg = theme.fg;
        self
    }
}

/// Thickness of a band inside `area`: at most half the scroll-axis length
pub fn band_thickness(area: Rect, direction: ScrollDirection, size: u16) -> u16 {
    let axis_len = match direction {
        ScrollDirection::Vertical => area.height,
        ScrollDirection::Horizontal => area.width,
    };
    size.min(axis_len / 2)
}

/// Area covered by the band for `edge`
pub fn band_rect(area: Rect, direction: ScrollDirection, edge: Edge, size: u16) -> Rect {
    let thickness = band_thickness(area, direction, size);
    match (direction, edge) {
        (ScrollDirection::Vertical, Edge::Start) => {
            Rect::new(area.x, area.y, area.width, thickness)
        }
        (ScrollDirection::Vertical, Edge::End) => Rect::new(
            area.x,
            area.bottom() - thickness,
            area.width,
            thickness,
        ),
        (ScrollDirection::Horizontal, Edge::Start) => {
            Rect::new(area.x, area.y, thickness, area.height)
        }
        (ScrollDirection::Horizontal, Edge::End) => Rect::new(
            area.right() - thickness,
            area.y,
            thickness,
            area.height,
        ),
    }
}

fn blend(from: Color, fallback: Color, to: (u8, u8, u8), t: f64) -> Color {
    let Some((r, g, b)) = rgb(from).or_else(|| rgb(fallback)) else {
        return from;
    };
    Color::Rgb(
        lerp_u8(r, to.0, t),
        lerp_u8(g, to.1, t),
        lerp_u8(b, to.2, t),
    )
}

impl Widget for FadeOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(target) = rgb(self.color) else {
            return;
        };
        let area = area.intersection(buf.area);
        let thickness = band_thickness(area, self.direction, self.size);
        if self.opacity <= 0.0 || thickness == 0 {
            return;
        }

        for i in 0..thickness {
            let strength = self.opacity * (1.0 - i as f64 / thickness as f64);
            let line = match (self.direction, self.edge) {
                (ScrollDirection::Vertical, Edge::Start) => Rect::new(area.x, area.y + i, area.width, 1),
                (ScrollDirection::Vertical, Edge::End) => {
                    Rect::new(area.x, area.bottom() - 1 - i, area.width, 1)
                }
                (ScrollDirection::Horizontal, Edge::Start) => Rect::new(area.x + i, area.y, 1, area.height),
                (ScrollDirection::Horizontal, Edge::End) => {
                    Rect::new(area.right() - 1 - i, area.y, 1, area.height)
                }
            };
            for position in line.positions() {
                if let Some(cell) = buf.cell_mut(position) {
                    let bg = blend(cell.bg, self.base_bg, target, strength);
                    let fg = blend(cell.fg, self.base_fg, target, strength);
                    cell.set_bg(bg).set_fg(fg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    const WHITE: Color = Color::Rgb(255, 255, 255);

    fn black_buffer(width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(Color::Rgb(0, 0, 0)).fg(Color::Rgb(0, 0, 0)));
        buf
    }

    #[test]
    fn test_vertical_start_gradient() {
        let mut buf = black_buffer(4, 10);
        FadeOverlay::new(Edge::Start, ScrollDirection::Vertical, 4, WHITE).render(buf.area, &mut buf);

        assert_eq!(buf[(0, 0)].bg, WHITE);
        assert_eq!(buf[(0, 1)].bg, Color::Rgb(191, 191, 191));
        assert_eq!(buf[(0, 2)].bg, Color::Rgb(128, 128, 128));
        assert_eq!(buf[(3, 3)].bg, Color::Rgb(64, 64, 64));
        assert_eq!(buf[(0, 4)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_vertical_end_gradient() {
        let mut buf = black_buffer(2, 10);
        FadeOverlay::new(Edge::End, ScrollDirection::Vertical, 2, WHITE).render(buf.area, &mut buf);

        assert_eq!(buf[(0, 9)].bg, WHITE);
        assert_eq!(buf[(1, 8)].bg, Color::Rgb(128, 128, 128));
        assert_eq!(buf[(0, 7)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_horizontal_edges() {
        let mut buf = black_buffer(10, 2);
        FadeOverlay::new(Edge::Start, ScrollDirection::Horizontal, 1, WHITE).render(buf.area, &mut buf);
        FadeOverlay::new(Edge::End, ScrollDirection::Horizontal, 1, WHITE).render(buf.area, &mut buf);

        assert_eq!(buf[(0, 1)].bg, WHITE);
        assert_eq!(buf[(9, 0)].bg, WHITE);
        assert_eq!(buf[(5, 0)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_opacity_scales_blend() {
        let mut buf = black_buffer(2, 4);
        FadeOverlay::new(Edge::Start, ScrollDirection::Vertical, 1, WHITE)
            .opacity(0.5)
            .render(buf.area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_zero_opacity_paints_nothing() {
        let mut buf = black_buffer(3, 6);
        let before = buf.clone();
        FadeOverlay::new(Edge::Start, ScrollDirection::Vertical, 3, WHITE)
            .opacity(0.0)
            .render(buf.area, &mut buf);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_band_clamped_to_half_the_axis() {
        let area = Rect::new(0, 0, 20, 6);
        assert_eq!(band_thickness(area, ScrollDirection::Vertical, 15), 3);
        assert_eq!(band_thickness(area, ScrollDirection::Horizontal, 15), 10);
        assert_eq!(
            band_rect(area, ScrollDirection::Vertical, Edge::End, 15),
            Rect::new(0, 3, 20, 3)
        );
    }

    #[test]
    fn test_reset_background_uses_theme_base() {
        let area = Rect::new(0, 0, 1, 2);
        let mut buf = Buffer::empty(area);
        FadeOverlay::new(Edge::Start, ScrollDirection::Vertical, 1, WHITE).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, WHITE);
    }
}
