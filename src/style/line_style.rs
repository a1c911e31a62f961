//! Line stroke styling.

use serde::Deserialize;

use super::color::Color;
use crate::backend::{Renderer, StyleValue};

/// Dash pattern for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashPattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DotDashed,
}

impl DashPattern {
    /// Canonical attribute name understood by backends.
    pub fn name(&self) -> &'static str {
        match self {
            DashPattern::Solid => "solid",
            DashPattern::Dashed => "dashed",
            DashPattern::Dotted => "dotted",
            DashPattern::DotDashed => "dotdashed",
        }
    }
}

/// Stroke style for lines, curves and outlines.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub dash: DashPattern,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::BLACK,
            width: 1.0,
            dash: DashPattern::Solid,
        }
    }
}

impl LineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    /// Push this style into the renderer's attribute state.
    pub fn apply(&self, r: &mut dyn Renderer) {
        r.set("color", StyleValue::Color(self.color.clone()));
        r.set("linewidth", StyleValue::Num(self.width));
        r.set("linetype", StyleValue::Str(self.dash.name().to_string()));
    }
}
