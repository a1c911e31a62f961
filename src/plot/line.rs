//! Line plot component.

use crate::backend::Renderer;
use crate::data::IntoPlotData;
use crate::error::{PlotError, PlotResult};
use crate::geom::BoundingBox;
use crate::plot::Plot;
use crate::style::{Color, DashPattern, LineStyle, Marker};
use crate::transform::Geometry;

/// Path subdivision for non-rectilinear geometries.
const GEODESIC_DIVISIONS: usize = 100;

/// Connects successive data points with line segments, optionally
/// marking each point with a symbol.
#[derive(Debug, Clone)]
pub struct LinePlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line_style: LineStyle,
    pub marker: Option<Marker>,
    pub marker_size: f64,
    pub label: Option<String>,
}

impl LinePlot {
    pub fn new(x: impl IntoPlotData, y: impl IntoPlotData) -> Self {
        LinePlot {
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            line_style: LineStyle::default(),
            marker: None,
            marker_size: 2.0,
            label: None,
        }
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

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn markersize(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Plot for LinePlot {
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

    fn legend_marker(&self) -> Option<(Marker, f64, Color)> {
        self.marker
            .map(|m| (m, self.marker_size, self.line_style.color.clone()))
    }

    fn render(&self, geom: &dyn Geometry, r: &mut dyn Renderer) -> PlotResult<()> {
        if self.x.len() != self.y.len() {
            return Err(PlotError::InvalidData(format!(
                "coordinate length mismatch: {} x values, {} y values",
                self.x.len(),
                self.y.len()
            )));
        }
        if self.x.is_empty() {
            return Err(PlotError::EmptyData);
        }
        r.save_state();
        self.line_style.apply(r);
        for (xg, yg) in geom.geodesic(&self.x, &self.y, GEODESIC_DIVISIONS) {
            let (u, v) = geom.map_vec(&xg, &yg);
            r.curve(&u, &v);
        }
        if let Some(marker) = self.marker {
            marker.apply(self.marker_size, r);
            r.set(
                "color",
                crate::backend::StyleValue::Color(self.line_style.color.clone()),
            );
            let (u, v) = geom.map_vec(&self.x, &self.y);
            r.symbols(&u, &v);
        }
        r.restore_state();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SvgBackend;
    use crate::geom::BoundingBox;
    use crate::transform::PlotGeometry;

    fn unit_geometry() -> PlotGeometry {
        let src = BoundingBox::from_points((0.0, 0.0), (1.0, 1.0));
        let dest = BoundingBox::from_points((0.0, 0.0), (100.0, 100.0));
        PlotGeometry::new(&src, &dest, false, false).unwrap()
    }

    #[test]
    fn test_bounds_cover_data() {
        let p = LinePlot::new(vec![0.0, 2.0, 1.0], vec![-1.0, 0.0, 3.0]);
        let bb = p.bounds().unwrap();
        assert_eq!(bb.xrange(), Some((0.0, 2.0)));
        assert_eq!(bb.yrange(), Some((-1.0, 3.0)));
    }

    #[test]
    fn test_empty_data_is_an_error() {
        let p = LinePlot::new(Vec::<f64>::new(), Vec::<f64>::new());
        assert!(p.bounds().is_none());
        let mut r = SvgBackend::new(100.0, 100.0);
        assert!(matches!(
            p.render(&unit_geometry(), &mut r),
            Err(PlotError::EmptyData)
        ));
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let p = LinePlot::new(vec![0.0, 1.0], vec![0.0]);
        let mut r = SvgBackend::new(100.0, 100.0);
        assert!(matches!(
            p.render(&unit_geometry(), &mut r),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn test_render_emits_a_path() {
        let p = LinePlot::new(vec![0.0, 1.0], vec![0.0, 1.0]).color("red");
        let mut r = SvgBackend::new(100.0, 100.0);
        p.render(&unit_geometry(), &mut r).unwrap();
        let svg = r.render();
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("red"));
    }
}
