//! Scatter plot component.

use crate::backend::{Renderer, StyleValue};
use crate::data::IntoPlotData;
use crate::error::{PlotError, PlotResult};
use crate::geom::BoundingBox;
use crate::plot::Plot;
use crate::style::{Color, Marker};
use crate::transform::Geometry;

/// Draws one symbol per data point.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker: Marker,
    pub size: f64,
    pub color: Color,
    pub label: Option<String>,
}

impl ScatterPlot {
    pub fn new(x: impl IntoPlotData, y: impl IntoPlotData) -> Self {
        ScatterPlot {
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            marker: Marker::default(),
            size: 2.0,
            color: Color::BLACK,
            label: None,
        }
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Plot for ScatterPlot {
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

    fn legend_marker(&self) -> Option<(Marker, f64, Color)> {
        Some((self.marker, self.size, self.color.clone()))
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
        self.marker.apply(self.size, r);
        r.set("color", StyleValue::Color(self.color.clone()));
        let (u, v) = geom.map_vec(&self.x, &self.y);
        r.symbols(&u, &v);
        r.restore_state();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SvgBackend;
    use crate::transform::PlotGeometry;

    #[test]
    fn test_render_one_symbol_per_point() {
        let src = BoundingBox::from_points((0.0, 0.0), (10.0, 10.0));
        let dest = BoundingBox::from_points((0.0, 0.0), (100.0, 100.0));
        let geom = PlotGeometry::new(&src, &dest, false, false).unwrap();

        let p = ScatterPlot::new(vec![1.0, 5.0, 9.0], vec![2.0, 4.0, 6.0])
            .marker(Marker::Cross)
            .color("blue");
        let mut r = SvgBackend::new(100.0, 100.0);
        p.render(&geom, &mut r).unwrap();
        let svg = r.render();
        assert_eq!(svg.matches("<path").count(), 3);
    }

    #[test]
    fn test_empty_data_is_an_error() {
        let p = ScatterPlot::new(Vec::<f64>::new(), Vec::<f64>::new());
        let src = BoundingBox::from_points((0.0, 0.0), (1.0, 1.0));
        let dest = BoundingBox::from_points((0.0, 0.0), (10.0, 10.0));
        let geom = PlotGeometry::new(&src, &dest, false, false).unwrap();
        let mut r = SvgBackend::new(10.0, 10.0);
        assert!(matches!(p.render(&geom, &mut r), Err(PlotError::EmptyData)));
    }
}
