//! Plot components that render data through a geometry.

mod contour_plot;
mod line;
mod scatter;

pub use contour_plot::{ContourPlot, Levels};
pub use line::LinePlot;
pub use scatter::ScatterPlot;

use crate::backend::Renderer;
use crate::error::PlotResult;
use crate::geom::BoundingBox;
use crate::style::{Color, LineStyle, Marker};
use crate::transform::Geometry;

/// A renderable data component owned by an axes.
pub trait Plot {
    /// Data-space extent of this component, or `None` when it carries
    /// no points.
    fn bounds(&self) -> Option<BoundingBox>;

    /// Label for the legend, if any.
    fn label(&self) -> Option<&str> {
        None
    }

    /// Line style for this component's legend sample, if it draws
    /// lines.
    fn legend_line(&self) -> Option<&LineStyle> {
        None
    }

    /// Marker, size, and color for this component's legend sample, if
    /// it draws symbols.
    fn legend_marker(&self) -> Option<(Marker, f64, Color)> {
        None
    }

    /// Draw the component. `geom` maps data coordinates onto the axes
    /// interior. Implementations open their own attribute scope so
    /// style settings do not leak between components.
    fn render(&self, geom: &dyn Geometry, r: &mut dyn Renderer) -> PlotResult<()>;
}
