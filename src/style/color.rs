//! Color values.

use std::fmt;

use serde::Deserialize;

/// A stroke or fill color.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// RGB with components 0-255.
    Rgb(u8, u8, u8),
    /// A CSS color name or `#rrggbb` string, passed through to the
    /// backend.
    Named(String),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(214, 39, 40);
    pub const BLUE: Color = Color::Rgb(31, 119, 180);
    pub const GREEN: Color = Color::Rgb(44, 160, 44);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);

    /// Parse a `#rrggbb` hex triplet.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }

    /// CSS-compatible string for the backend.
    pub fn css(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            Color::Named(name) => name.clone(),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::from_hex(s).unwrap_or_else(|| Color::Named(s.to_string()))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// The default plot color cycle (the usual ten-color palette).
pub fn cycle_color(index: usize) -> Color {
    const CYCLE: [(u8, u8, u8); 10] = [
        (31, 119, 180),
        (255, 127, 14),
        (44, 160, 44),
        (214, 39, 40),
        (148, 103, 189),
        (140, 86, 75),
        (227, 119, 194),
        (127, 127, 127),
        (188, 189, 34),
        (23, 190, 207),
    ];
    let (r, g, b) = CYCLE[index % CYCLE.len()];
    Color::Rgb(r, g, b)
}
