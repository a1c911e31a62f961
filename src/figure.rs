//! Figures and axes: plot composition, frame layout, and output.

use std::cell::RefCell;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::axis::{AxisConfig, AxisPainter, AxisSide};
use crate::backend::{Renderer, StyleValue, SvgBackend};
use crate::config::PlotConfig;
use crate::data::IntoPlotData;
use crate::error::{PlotError, PlotResult};
use crate::geom::BoundingBox;
use crate::layout::{fontsize_relative, size_relative, solve_interior, LayoutOptions};
use crate::plot::{ContourPlot, LinePlot, Plot, ScatterPlot};
use crate::style::{cycle_color, HAlign, TextStyle, VAlign};
use crate::transform::PlotGeometry;

/// Resolve an axis range: explicit limits win over data bounds, and a
/// zero-extent range is expanded rather than rejected.
fn effective_range(limits: Option<(f64, f64)>, data: Option<(f64, f64)>, log: bool) -> (f64, f64) {
    let fallback = if log { (1.0, 10.0) } else { (0.0, 1.0) };
    let (lo, hi) = limits.or(data).unwrap_or(fallback);
    if lo == hi {
        if log {
            // Keep the expanded range strictly positive.
            (lo / 10.0, hi * 10.0)
        } else {
            (lo - 1.0, hi + 1.0)
        }
    } else {
        (lo, hi)
    }
}

/// One framed plot region: data components plus the frame drawn around
/// them.
pub struct Axes {
    /// Page-box fractions: left, right, bottom, top.
    position: (f64, f64, f64, f64),
    plots: Vec<Box<dyn Plot>>,
    pub x: AxisConfig,
    pub y: AxisConfig,
    xlog: bool,
    ylog: bool,
    xrange: Option<(f64, f64)>,
    yrange: Option<(f64, f64)>,
    title: Option<String>,
    aspect_ratio: Option<f64>,
    legend: Option<(f64, f64)>,
}

impl Axes {
    pub fn new() -> Self {
        Axes {
            position: (0.0, 1.0, 0.0, 1.0),
            plots: Vec::new(),
            x: AxisConfig::default(),
            y: AxisConfig::default(),
            xlog: false,
            ylog: false,
            xrange: None,
            yrange: None,
            title: None,
            aspect_ratio: None,
            legend: None,
        }
    }

    pub fn set_position(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    ) -> &mut Self {
        self.position = (left, right, bottom, top);
        self
    }

    /// Add any plot component.
    pub fn add(&mut self, plot: impl Plot + 'static) -> &mut Self {
        self.plots.push(Box::new(plot));
        self
    }

    /// Add a line plot, cycling through the default palette.
    pub fn plot(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> &mut Self {
        let color = cycle_color(self.plots.len());
        self.add(LinePlot::new(x, y).color(color))
    }

    /// Add a scatter plot, cycling through the default palette.
    pub fn scatter(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> &mut Self {
        let color = cycle_color(self.plots.len());
        self.add(ScatterPlot::new(x, y).color(color))
    }

    /// Add a contour plot of gridded samples, `z[i][j]` at
    /// `(x[i], y[j])`.
    pub fn contour(
        &mut self,
        x: impl IntoPlotData,
        y: impl IntoPlotData,
        z: Vec<Vec<f64>>,
    ) -> &mut Self {
        self.add(ContourPlot::new(x, y, z))
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.x.label = Some(label.into());
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.y.label = Some(label.into());
        self
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.xrange = Some((lo, hi));
        self
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.yrange = Some((lo, hi));
        self
    }

    pub fn set_xlog(&mut self, log: bool) -> &mut Self {
        self.xlog = log;
        self
    }

    pub fn set_ylog(&mut self, log: bool) -> &mut Self {
        self.ylog = log;
        self
    }

    pub fn grid(&mut self, visible: bool) -> &mut Self {
        self.x.draw_grid = visible;
        self.y.draw_grid = visible;
        self
    }

    pub fn set_aspect_ratio(&mut self, ratio: f64) -> &mut Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Show a legend of the labeled components, anchored at the given
    /// interior fractions, `(0, 0)` bottom left to `(1, 1)` top right.
    pub fn legend(&mut self, x: f64, y: f64) -> &mut Self {
        self.legend = Some((x, y));
        self
    }

    /// Union of the data extents of every component.
    fn data_bounds(&self) -> BoundingBox {
        let mut bb = BoundingBox::null();
        for plot in &self.plots {
            if let Some(b) = plot.bounds() {
                bb.union(&b);
            }
        }
        bb
    }

    fn ranges(&self) -> ((f64, f64), (f64, f64)) {
        let data = self.data_bounds();
        (
            effective_range(self.xrange, data.xrange(), self.xlog),
            effective_range(self.yrange, data.yrange(), self.ylog),
        )
    }

    /// The four frame edges. Tick labels and axis titles go on the
    /// bottom and left edges only.
    fn painters(&self, xr: (f64, f64), yr: (f64, f64)) -> [AxisPainter<'_>; 4] {
        [
            AxisPainter {
                config: &self.x,
                side: AxisSide::Bottom,
                range: xr,
                cross: yr.0,
                log: self.xlog,
                labeled: true,
            },
            AxisPainter {
                config: &self.x,
                side: AxisSide::Top,
                range: xr,
                cross: yr.1,
                log: self.xlog,
                labeled: false,
            },
            AxisPainter {
                config: &self.y,
                side: AxisSide::Left,
                range: yr,
                cross: xr.0,
                log: self.ylog,
                labeled: true,
            },
            AxisPainter {
                config: &self.y,
                side: AxisSide::Right,
                range: yr,
                cross: xr.1,
                log: self.ylog,
                labeled: false,
            },
        ]
    }

    /// Draw the legend inside the interior: one entry per labeled
    /// component, a line or marker sample beside each label, stepping
    /// downward from the anchor.
    fn render_legend(
        &self,
        r: &mut dyn Renderer,
        interior: &BoundingBox,
        device_bbox: &BoundingBox,
        config: &PlotConfig,
    ) {
        let (fx, fy) = match self.legend {
            Some(anchor) => anchor,
            None => return,
        };
        let (x0, y0) = match interior.lowerleft() {
            Some(corner) => corner,
            None => return,
        };
        let width = size_relative(config.key_width, interior);
        let height = size_relative(config.key_height, interior);
        let hsep = size_relative(config.key_hsep, interior);
        let vsep = size_relative(config.key_vsep, interior);
        let fontsize =
            fontsize_relative(config.key_size, interior, device_bbox, config.fontsize_min);

        let mut pos = (
            x0 + fx * interior.width(),
            y0 + fy * interior.height(),
        );
        for plot in &self.plots {
            let label = match plot.label() {
                Some(label) => label,
                None => continue,
            };
            if let Some(style) = plot.legend_line() {
                r.save_state();
                style.apply(r);
                r.line((pos.0 - width / 2.0, pos.1), (pos.0 + width / 2.0, pos.1));
                r.restore_state();
            }
            if let Some((marker, size, color)) = plot.legend_marker() {
                r.save_state();
                marker.apply(size, r);
                r.set("color", StyleValue::Color(color));
                r.symbols(&[pos.0], &[pos.1]);
                r.restore_state();
            }
            r.save_state();
            TextStyle::new()
                .size(fontsize)
                .halign(HAlign::Left)
                .apply(r);
            r.text((pos.0 + width / 2.0 + hsep, pos.1), label);
            r.restore_state();
            pos.1 -= vsep + height;
        }
    }

    /// Compose this axes into `region`: solve for the interior, then
    /// draw grid, contents, frame, legend, and title.
    pub fn compose(
        &self,
        r: &mut dyn Renderer,
        region: &BoundingBox,
        config: &PlotConfig,
    ) -> PlotResult<()> {
        let device_bbox = r.bbox();
        let (xr, yr) = self.ranges();
        let data_bbox = BoundingBox::from_points((xr.0, yr.0), (xr.1, yr.1));

        // Reserve room for the title before solving.
        let mut exterior = *region;
        if self.title.is_some() {
            let offset = size_relative(config.title_offset, &exterior);
            let fontsize = fontsize_relative(
                config.title_size,
                &exterior,
                &device_bbox,
                config.fontsize_min,
            );
            exterior.deform(-offset - fontsize, 0.0, 0.0, 0.0);
        }

        // Surface range errors before the solver runs; the measurement
        // callback cannot propagate them.
        PlotGeometry::new(&data_bbox, &exterior, self.xlog, self.ylog)?;

        let options = LayoutOptions {
            max_iterations: config.max_layout_iterations,
            tolerance: config.layout_tolerance,
            aspect_ratio: self.aspect_ratio,
        };
        let cell = RefCell::new(r);
        let interior = solve_interior(
            &exterior,
            |interior| {
                let geom = match PlotGeometry::new(&data_bbox, interior, self.xlog, self.ylog) {
                    Ok(geom) => geom,
                    // A degenerate candidate measures as itself; the
                    // damping steps away from it.
                    Err(_) => return *interior,
                };
                let mut rr = cell.borrow_mut();
                let mut bb = *interior;
                for painter in self.painters(xr, yr) {
                    bb.union(&painter.bounds(
                        &geom,
                        interior,
                        &device_bbox,
                        config.fontsize_min,
                        &mut **rr,
                    ));
                }
                bb
            },
            &options,
        )?;
        let r = cell.into_inner();

        let geom = PlotGeometry::new(&data_bbox, &interior, self.xlog, self.ylog)?;

        for painter in self.painters(xr, yr) {
            if painter.labeled {
                painter.render_grid(&geom, &interior, r);
            }
        }
        for plot in &self.plots {
            plot.render(&geom, r)?;
        }
        let mut frame_bb = interior;
        for painter in self.painters(xr, yr) {
            painter.render(&geom, &interior, &device_bbox, config.fontsize_min, r);
            frame_bb.union(&painter.bounds(&geom, &interior, &device_bbox, config.fontsize_min, r));
        }

        self.render_legend(r, &interior, &device_bbox, config);

        if let Some(title) = &self.title {
            let offset = size_relative(config.title_offset, &interior);
            let fontsize = fontsize_relative(
                config.title_size,
                &interior,
                &device_bbox,
                config.fontsize_min,
            );
            if let (Some(center), Some((_, top))) = (interior.center(), frame_bb.yrange()) {
                r.save_state();
                TextStyle::new()
                    .size(fontsize)
                    .valign(VAlign::Bottom)
                    .apply(r);
                r.text((center.0, top + offset), title);
                r.restore_state();
            }
        }
        Ok(())
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

/// A page holding one or more axes.
pub struct Figure {
    pub width: f64,
    pub height: f64,
    pub config: PlotConfig,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(width: f64, height: f64) -> Self {
        Figure {
            width,
            height,
            config: PlotConfig::default(),
            axes: Vec::new(),
        }
    }

    /// 640x640, matching the historical default window.
    pub fn default_size() -> Self {
        Self::new(640.0, 640.0)
    }

    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a subplot in a `rows` x `cols` grid, 1-based `index` counted
    /// row-major from the top left.
    pub fn add_subplot(&mut self, rows: usize, cols: usize, index: usize) -> &mut Axes {
        let index = index.saturating_sub(1);
        let row = index / cols;
        let col = index % cols;

        let gutter = 0.05;
        let cell_w = 1.0 / cols as f64;
        let cell_h = 1.0 / rows as f64;
        let left = (col as f64 + gutter) * cell_w;
        let right = (col as f64 + 1.0 - gutter) * cell_w;
        let bottom = ((rows - 1 - row) as f64 + gutter) * cell_h;
        let top = ((rows - row) as f64 - gutter) * cell_h;

        let mut axes = Axes::new();
        axes.position = (left, right, bottom, top);
        self.axes.push(axes);
        self.axes.last_mut().unwrap()
    }

    /// The current axes, created on demand.
    pub fn gca(&mut self) -> &mut Axes {
        if self.axes.is_empty() {
            self.add_subplot(1, 1, 1);
        }
        self.axes.last_mut().unwrap()
    }

    pub fn get_axes(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    /// Render the figure to an SVG document.
    pub fn render(&self) -> PlotResult<String> {
        if self.axes.is_empty() {
            return Err(PlotError::EmptyData);
        }
        let mut backend = SvgBackend::new(self.width, self.height);
        let mut page = backend.bbox();
        page.expand(-self.config.page_margin);
        let (px, py) = page.lowerleft().ok_or(PlotError::EmptyData)?;
        let (pw, ph) = (page.width(), page.height());

        for axes in &self.axes {
            let (l, r, b, t) = axes.position;
            let slot = BoundingBox::from_points(
                (px + l * pw, py + b * ph),
                (px + r * pw, py + t * ph),
            );
            axes.compose(&mut backend, &slot, &self.config)?;
        }
        Ok(backend.render())
    }

    /// Render and write to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let svg = self.render()?;
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::TickSpec;
    use crate::plot::Levels;

    #[test]
    fn test_effective_range_expansion() {
        assert_eq!(effective_range(None, Some((3.0, 3.0)), false), (2.0, 4.0));
        assert_eq!(effective_range(None, Some((100.0, 100.0)), true), (10.0, 1000.0));
        assert_eq!(effective_range(Some((0.0, 5.0)), Some((3.0, 4.0)), false), (0.0, 5.0));
        assert_eq!(effective_range(None, None, false), (0.0, 1.0));
    }

    #[test]
    fn test_empty_figure_is_an_error() {
        let fig = Figure::new(100.0, 100.0);
        assert!(matches!(fig.render(), Err(PlotError::EmptyData)));
    }

    #[test]
    fn test_axes_without_plots_still_render_a_frame() {
        let mut fig = Figure::new(400.0, 400.0);
        fig.gca();
        let svg = fig.render().unwrap();
        assert!(svg.contains("<line"), "frame spines expected");
        assert!(svg.contains("<text"), "tick labels expected");
    }

    #[test]
    fn test_line_plot_renders_inside_frame() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut fig = Figure::new(400.0, 400.0);
        fig.gca()
            .set_title("response")
            .set_xlabel("time")
            .set_ylabel("signal")
            .plot(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]);
        let svg = fig.render().unwrap();
        assert!(svg.contains("<polyline"));
        assert!(svg.contains(">response<"));
        assert!(svg.contains(">time<"));
        assert!(svg.contains(">signal<"));
    }

    #[test]
    fn test_log_axis_rejects_nonpositive_range() {
        let mut fig = Figure::new(400.0, 400.0);
        fig.gca()
            .set_ylog(true)
            .plot(vec![0.0, 1.0], vec![-1.0, 1.0]);
        assert!(matches!(
            fig.render(),
            Err(PlotError::NonPositiveLogRange { .. })
        ));
    }

    #[test]
    fn test_explicit_limits_override_data() {
        let mut fig = Figure::new(400.0, 400.0);
        fig.gca()
            .set_xlim(0.0, 100.0)
            .plot(vec![0.0, 1.0], vec![0.0, 1.0]);
        let svg = fig.render().unwrap();
        // Ticks over [0, 100] label 20 40 60 80 rather than fractions.
        assert!(svg.contains(">20<") || svg.contains(">50<"), "{}", svg);
    }

    #[test]
    fn test_zero_tick_count_still_renders() {
        let mut fig = Figure::new(400.0, 400.0);
        let axes = fig.gca();
        axes.x.ticks = TickSpec::Count(0);
        axes.y.ticks = TickSpec::Count(1);
        axes.plot(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]);
        let svg = fig.render().unwrap();
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_ticks_beyond_explicit_labels_stay_unlabeled() {
        let mut fig = Figure::new(400.0, 400.0);
        let axes = fig.gca();
        axes.x.ticks = TickSpec::Explicit(vec![0.0, 5.0, 10.0]);
        axes.x.ticklabels = Some(vec!["lo".to_string(), "hi".to_string()]);
        axes.set_xlim(0.0, 10.0)
            .set_ylim(0.0, 1.0)
            .plot(vec![0.0, 10.0], vec![0.0, 1.0]);
        let svg = fig.render().unwrap();
        assert!(svg.contains(">lo<"));
        assert!(svg.contains(">hi<"));
        assert!(!svg.contains(">10<"), "third tick should carry no label");
    }

    #[test]
    fn test_legend_lists_labeled_plots() {
        let mut fig = Figure::new(400.0, 400.0);
        let axes = fig.gca();
        axes.add(
            LinePlot::new(vec![0.0, 1.0], vec![0.0, 1.0])
                .color("red")
                .label("ramp"),
        );
        axes.add(ScatterPlot::new(vec![0.0, 1.0], vec![1.0, 0.0]).label("points"));
        axes.legend(0.6, 0.9);
        let svg = fig.render().unwrap();
        assert!(svg.contains(">ramp<"));
        assert!(svg.contains(">points<"));
    }

    #[test]
    fn test_labels_only_show_with_a_legend() {
        let mut fig = Figure::new(400.0, 400.0);
        fig.gca()
            .add(LinePlot::new(vec![0.0, 1.0], vec![0.0, 1.0]).label("ramp"));
        let svg = fig.render().unwrap();
        assert!(!svg.contains(">ramp<"));
    }

    #[test]
    fn test_subplots_render_independent_frames() {
        let mut fig = Figure::new(600.0, 400.0);
        fig.add_subplot(1, 2, 1).plot(vec![0.0, 1.0], vec![0.0, 1.0]);
        fig.add_subplot(1, 2, 2)
            .scatter(vec![0.0, 1.0], vec![1.0, 0.0]);
        let svg = fig.render().unwrap();
        assert!(svg.matches("<polyline").count() >= 1);
        assert!(svg.matches("<circle").count() >= 2);
    }

    #[test]
    fn test_contour_convenience() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 2.0];
        let z: Vec<Vec<f64>> = x
            .iter()
            .map(|&xi| y.iter().map(|&yi| xi + yi).collect())
            .collect();
        let mut fig = Figure::new(400.0, 400.0);
        fig.gca().contour(x, y, z);
        let svg = fig.render().unwrap();
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_explicit_contour_levels() {
        let x = vec![0.0, 1.0, 2.0];
        let y = vec![0.0, 1.0, 2.0];
        let z: Vec<Vec<f64>> = x
            .iter()
            .map(|&xi| y.iter().map(|_| xi).collect())
            .collect();
        let mut fig = Figure::new(400.0, 400.0);
        fig.gca()
            .add(ContourPlot::new(x, y, z).levels(Levels::Explicit(vec![0.5, 1.5])));
        let svg = fig.render().unwrap();
        assert_eq!(svg.matches("<polyline").count(), 2);
    }
}
