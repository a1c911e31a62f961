//! Contour plot component.

use crate::backend::Renderer;
use crate::contour::{contour_segments, trace_segments};
use crate::data::IntoPlotData;
use crate::error::{PlotError, PlotResult};
use crate::geom::BoundingBox;
use crate::plot::Plot;
use crate::style::{Color, DashPattern, LineStyle};
use crate::transform::Geometry;

/// Which level sets to draw.
#[derive(Debug, Clone)]
pub enum Levels {
    /// `n` levels spaced evenly strictly inside the data range:
    /// `zlo + i * (zhi - zlo) / (n + 1)` for `i` in `1..=n`.
    Count(usize),
    /// Exactly these z values.
    Explicit(Vec<f64>),
}

impl Default for Levels {
    fn default() -> Self {
        Levels::Count(10)
    }
}

/// Level curves of a function sampled on a rectilinear grid.
///
/// `z[i][j]` is the sample at `(x[i], y[j])`.
#[derive(Debug, Clone)]
pub struct ContourPlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
    pub levels: Levels,
    pub line_style: LineStyle,
    pub label: Option<String>,
}

impl ContourPlot {
    pub fn new(x: impl IntoPlotData, y: impl IntoPlotData, z: Vec<Vec<f64>>) -> Self {
        ContourPlot {
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            z,
            levels: Levels::default(),
            line_style: LineStyle::default(),
            label: None,
        }
    }

    pub fn levels(mut self, levels: Levels) -> Self {
        self.levels = levels;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.line_style.color = color.into();
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.line_style.width = width;
        self
    }

    pub fn linestyle(mut self, dash: DashPattern) -> Self {
        self.line_style.dash = dash;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Resolve the level specification against the sampled z range.
    fn level_values(&self) -> PlotResult<Vec<f64>> {
        match &self.levels {
            Levels::Explicit(values) => Ok(values.clone()),
            Levels::Count(n) => {
                let mut zlo = f64::INFINITY;
                let mut zhi = f64::NEG_INFINITY;
                for row in &self.z {
                    for &v in row {
                        zlo = zlo.min(v);
                        zhi = zhi.max(v);
                    }
                }
                if !zlo.is_finite() || !zhi.is_finite() {
                    return Err(PlotError::EmptyData);
                }
                let step = (zhi - zlo) / (*n as f64 + 1.0);
                Ok((1..=*n).map(|i| zlo + i as f64 * step).collect())
            }
        }
    }
}

impl Plot for ContourPlot {
    fn bounds(&self) -> Option<BoundingBox> {
        let bb = BoundingBox::of_coords(&self.x, &self.y);
        if bb.is_null() {
            None
        } else {
            Some(bb)
        }
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn legend_line(&self) -> Option<&LineStyle> {
        Some(&self.line_style)
    }

    fn render(&self, geom: &dyn Geometry, r: &mut dyn Renderer) -> PlotResult<()> {
        let levels = self.level_values()?;
        r.save_state();
        self.line_style.apply(r);
        for level in levels {
            let segments = contour_segments(&self.x, &self.y, &self.z, level)?;
            for line in trace_segments(&segments) {
                let (dx, dy): (Vec<f64>, Vec<f64>) = line.into_iter().unzip();
                let (u, v) = geom.map_vec(&dx, &dy);
                r.curve(&u, &v);
            }
        }
        r.restore_state();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SvgBackend;
    use crate::transform::PlotGeometry;

    fn ramp_plot() -> ContourPlot {
        // z = x on a 3x3 grid over [0,2]^2.
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 2.0];
        let z = x
            .iter()
            .map(|&xi| y.iter().map(|_| xi).collect())
            .collect();
        ContourPlot::new(x, y, z)
    }

    #[test]
    fn test_counted_levels_stay_inside_range() {
        let p = ramp_plot().levels(Levels::Count(3));
        let levels = p.level_values().unwrap();
        assert_eq!(levels, vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_explicit_levels_pass_through() {
        let p = ramp_plot().levels(Levels::Explicit(vec![0.25, 1.75]));
        assert_eq!(p.level_values().unwrap(), vec![0.25, 1.75]);
    }

    #[test]
    fn test_render_draws_level_curves() {
        let src = BoundingBox::from_points((0.0, 0.0), (2.0, 2.0));
        let dest = BoundingBox::from_points((0.0, 0.0), (100.0, 100.0));
        let geom = PlotGeometry::new(&src, &dest, false, false).unwrap();

        let p = ramp_plot().levels(Levels::Explicit(vec![0.5]));
        let mut r = SvgBackend::new(100.0, 100.0);
        p.render(&geom, &mut r).unwrap();
        let svg = r.render();
        // z = x crosses 0.5 along the vertical line x = 0.5, device x = 25.
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("25.00"), "{}", svg);
    }

    #[test]
    fn test_grid_mismatch_propagates() {
        let src = BoundingBox::from_points((0.0, 0.0), (2.0, 2.0));
        let dest = BoundingBox::from_points((0.0, 0.0), (100.0, 100.0));
        let geom = PlotGeometry::new(&src, &dest, false, false).unwrap();

        let p = ContourPlot::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![vec![0.0, 1.0]])
            .levels(Levels::Explicit(vec![0.5]));
        let mut r = SvgBackend::new(100.0, 100.0);
        assert!(matches!(
            p.render(&geom, &mut r),
            Err(PlotError::InvalidData(_))
        ));
    }
}
