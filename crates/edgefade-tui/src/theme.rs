use ratatui::style::Color;
use tracing::warn;

use edgefade_core::FadeConfig;

/// Neutral gray used when the configured fade color cannot be parsed
pub const NEUTRAL_GRAY: Color = Color::Rgb(0x9e, 0x9e, 0x9e);

/// Colors used by the demo and as the blend base for fades
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background assumed for cells that carry no RGB background
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg: Color::Rgb(0x28, 0x28, 0x28),
            fg: Color::Rgb(0xd4, 0xbe, 0x98),
            muted: Color::Rgb(0x92, 0x83, 0x74),
            border: Color::Rgb(0x50, 0x49, 0x45),
        }
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        // Full form: RRGGBB
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Resolve the configured fade color
pub fn fade_color(config: &FadeConfig) -> Color {
    parse_hex_color(&config.color).unwrap_or_else(|| {
        warn!(color = %config.color, "invalid fade color, using neutral gray");
        NEUTRAL_GRAY
    })
}

/// Split a color into RGB channels, if it has them
pub fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::White => Some((0xff, 0xff, 0xff)),
        Color::Gray => Some((0xc0, 0xc0, 0xc0)),
        Color::DarkGray => Some((0x80, 0x80, 0x80)),
        _ => None,
    }
}
