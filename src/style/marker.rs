//! Marker symbols for scatter plots and line-plot points.

use serde::Deserialize;

use crate::backend::{Renderer, StyleValue};

/// Symbol drawn at data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    #[default]
    Circle,
    FilledCircle,
    Square,
    FilledSquare,
    Diamond,
    Triangle,
    Cross,
    Plus,
    Dot,
}

impl Marker {
    /// Canonical symbol-type attribute name.
    pub fn name(&self) -> &'static str {
        match self {
            Marker::Circle => "circle",
            Marker::FilledCircle => "filled circle",
            Marker::Square => "square",
            Marker::FilledSquare => "filled square",
            Marker::Diamond => "diamond",
            Marker::Triangle => "triangle",
            Marker::Cross => "cross",
            Marker::Plus => "plus",
            Marker::Dot => "dot",
        }
    }

    /// Push marker attributes into the renderer's state.
    pub fn apply(&self, size: f64, r: &mut dyn Renderer) {
        r.set("symboltype", StyleValue::Str(self.name().to_string()));
        r.set("symbolsize", StyleValue::Num(size));
    }
}
