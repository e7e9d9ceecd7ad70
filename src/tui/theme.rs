use ratatui::style::Color;

use crate::model::DEFAULT_CATEGORY_COLOR;

/// Colors for the picker and console report
#[derive(Debug, Clone)]
pub struct Theme {
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    /// Used when a category's color identifier does not parse
    pub category_fallback: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            text: Color::Reset,
            text_bright: Color::White,
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::DarkGray,
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            category_fallback: parse_color(DEFAULT_CATEGORY_COLOR).unwrap_or(Color::Cyan),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Parse a front matter color identifier: `#RRGGBB` or a terminal color
/// name (`red`, `light-blue`, `dark_gray`, ...), case-insensitive.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex_color(value);
    }
    let name = value.to_ascii_lowercase().replace(['-', '_', ' '], "");
    let color = match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "white" => Color::White,
        _ => return None,
    };
    Some(color)
}

impl Theme {
    /// Resolve a category's color identifier, falling back to the default
    pub fn category_color(&self, identifier: &str) -> Color {
        parse_color(identifier).unwrap_or(self.category_fallback)
    }
}
