//! Minimal 2D scientific plotting with SVG output.
//!
//! Plots are composed of data components (lines, scatters, contour
//! level sets) framed by self-sizing axes. The frame's decorations are
//! measured in relative units of the plot interior, and the interior
//! itself is solved by fixed-point iteration so everything fits the
//! requested region exactly.
//!
//! ```no_run
//! use miniplot::prelude::*;
//!
//! let mut fig = Figure::new(640.0, 480.0);
//! fig.gca()
//!     .set_title("damped oscillation")
//!     .set_xlabel("t")
//!     .plot(
//!         (0..200).map(|i| i as f64 * 0.05).collect::<Vec<_>>(),
//!         (0..200)
//!             .map(|i| {
//!                 let t = i as f64 * 0.05;
//!                 (-t / 3.0).exp() * t.sin()
//!             })
//!             .collect::<Vec<_>>(),
//!     );
//! fig.save("oscillation.svg").unwrap();
//! ```

pub mod axis;
pub mod backend;
pub mod config;
pub mod contour;
pub mod data;
pub mod error;
pub mod figure;
pub mod geom;
pub mod layout;
pub mod plot;
pub mod style;
pub mod ticks;
pub mod transform;

pub use backend::{Renderer, StyleValue, SvgBackend};
pub use config::PlotConfig;
pub use data::IntoPlotData;
pub use error::{Axis, PlotError, PlotResult};
pub use figure::{Axes, Figure};
pub use geom::{BoundingBox, Point};
pub use plot::{ContourPlot, Levels, LinePlot, Plot, ScatterPlot};
pub use style::{Color, DashPattern, HAlign, LineStyle, Marker, TextStyle, VAlign};
pub use transform::{AffineTransform, Geometry, PlotGeometry};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::axis::{AxisConfig, TickSpec};
    pub use crate::config::PlotConfig;
    pub use crate::data::IntoPlotData;
    pub use crate::error::{PlotError, PlotResult};
    pub use crate::figure::{Axes, Figure};
    pub use crate::geom::BoundingBox;
    pub use crate::plot::{ContourPlot, Levels, LinePlot, ScatterPlot};
    pub use crate::style::{Color, DashPattern, LineStyle, Marker, TextStyle};
}
