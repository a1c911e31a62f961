//! Text styling.

use serde::Deserialize;

use super::color::Color;
use crate::backend::{Renderer, StyleValue};

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    pub fn name(&self) -> &'static str {
        match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        }
    }
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VAlign {
    pub fn name(&self) -> &'static str {
        match self {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Bottom => "bottom",
        }
    }
}

/// Style for a piece of drawn text. `size` is in device units by the
/// time it reaches the renderer; relative sizing happens in the layout
/// code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Rotation in degrees, counterclockwise.
    pub angle: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            color: Color::BLACK,
            size: 12.0,
            halign: HAlign::Center,
            valign: VAlign::Center,
            angle: 0.0,
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn halign(mut self, halign: HAlign) -> Self {
        self.halign = halign;
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Push this style into the renderer's attribute state.
    pub fn apply(&self, r: &mut dyn Renderer) {
        r.set("color", StyleValue::Color(self.color.clone()));
        r.set("fontsize", StyleValue::Num(self.size));
        r.set("texthalign", StyleValue::Str(self.halign.name().to_string()));
        r.set("textvalign", StyleValue::Str(self.valign.name().to_string()));
        r.set("textangle", StyleValue::Num(self.angle));
    }
}
