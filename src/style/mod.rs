//! Styling types: colors, line styles, text styles, markers.
//!
//! Style structs are the user-facing configuration; at draw time each is
//! applied to the renderer's attribute state (see [`crate::backend`])
//! rather than being interpreted by the drawing code itself.

pub mod color;
pub mod line_style;
pub mod marker;
pub mod text_style;

pub use color::{cycle_color, Color};
pub use line_style::{DashPattern, LineStyle};
pub use marker::Marker;
pub use text_style::{HAlign, TextStyle, VAlign};
