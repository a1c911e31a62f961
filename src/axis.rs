//! Frame axes: spines, ticks, tick labels, and axis titles.

use log::warn;

use crate::backend::{Renderer, StyleValue};
use crate::geom::{pt_add, pt_mul, BoundingBox, Point};
use crate::layout::{fontsize_relative, size_relative};
use crate::style::{DashPattern, HAlign, LineStyle, TextStyle, VAlign};
use crate::ticks::{
    format_tick_label, linear_subticks, linear_ticks, linear_ticks_n, log_subticks, log_ticks,
    log_ticks_n,
};
use crate::transform::Geometry;

/// Major tick placement.
#[derive(Debug, Clone, Default)]
pub enum TickSpec {
    /// Nice-number placement from the axis range.
    #[default]
    Auto,
    /// Exactly this many evenly spaced ticks, endpoints included.
    /// Counts below 2 are treated as 2.
    Count(usize),
    /// Exactly these data values.
    Explicit(Vec<f64>),
}

/// Per-axis decoration settings.
///
/// All sizes and offsets are relative, in percent of the interior
/// yardstick, so decorations scale with the plot.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    pub draw_spine: bool,
    pub draw_ticks: bool,
    pub draw_subticks: bool,
    pub draw_ticklabels: bool,
    pub draw_grid: bool,
    pub ticks: TickSpec,
    /// Subdivisions between major ticks; `None` picks a default from
    /// the tick spacing.
    pub subticks: Option<usize>,
    /// Overrides the formatted tick labels.
    pub ticklabels: Option<Vec<String>>,
    pub label: Option<String>,
    /// Tick direction: negative points into the interior.
    pub tickdir: f64,
    pub ticks_size: f64,
    pub subticks_size: f64,
    pub ticklabels_offset: f64,
    pub ticklabels_size: f64,
    pub label_offset: f64,
    pub label_size: f64,
    pub spine_style: LineStyle,
    pub ticks_style: LineStyle,
    pub grid_style: LineStyle,
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            draw_spine: true,
            draw_ticks: true,
            draw_subticks: true,
            draw_ticklabels: true,
            draw_grid: false,
            ticks: TickSpec::Auto,
            subticks: None,
            ticklabels: None,
            label: None,
            tickdir: -1.0,
            ticks_size: 1.5,
            subticks_size: 0.75,
            ticklabels_offset: 1.5,
            ticklabels_size: 3.0,
            label_offset: 1.0,
            label_size: 3.0,
            spine_style: LineStyle::default(),
            ticks_style: LineStyle::default(),
            grid_style: LineStyle::default().dash(DashPattern::Dotted),
        }
    }
}

impl AxisConfig {
    /// Major tick values for the given range, unfiltered.
    pub fn tick_values(&self, lo: f64, hi: f64, log: bool) -> Vec<f64> {
        match &self.ticks {
            TickSpec::Auto => {
                if log {
                    log_ticks(lo, hi)
                } else {
                    linear_ticks(lo, hi)
                }
            }
            TickSpec::Count(n) => {
                if log {
                    log_ticks_n(lo, hi, *n)
                } else {
                    linear_ticks_n(lo, hi, *n)
                }
            }
            TickSpec::Explicit(values) => values.clone(),
        }
    }

    /// Minor tick values between the given major ticks.
    pub fn subtick_values(&self, lo: f64, hi: f64, log: bool, ticks: &[f64]) -> Vec<f64> {
        if log {
            log_subticks(lo, hi, ticks, self.subticks)
        } else {
            linear_subticks(lo, hi, ticks, self.subticks)
        }
    }

    /// Label strings for the given ticks, explicit labels taking
    /// precedence over formatting. Explicit labels beyond the tick
    /// count are unused; ticks beyond the label count stay unlabeled.
    pub fn label_strings(&self, ticks: &[f64]) -> Vec<String> {
        if let Some(labels) = &self.ticklabels {
            if labels.len() != ticks.len() {
                warn!(
                    "axis: {} explicit tick labels for {} ticks",
                    labels.len(),
                    ticks.len()
                );
            }
            return labels.clone();
        }
        let range = match (
            ticks.iter().cloned().reduce(f64::min),
            ticks.iter().cloned().reduce(f64::max),
        ) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        };
        ticks.iter().map(|&t| format_tick_label(t, range)).collect()
    }
}

/// Which edge of the interior an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Bottom,
    Top,
    Left,
    Right,
}

impl AxisSide {
    fn horizontal(self) -> bool {
        matches!(self, AxisSide::Bottom | AxisSide::Top)
    }

    /// Unit vector pointing away from the interior.
    fn outward(self) -> Point {
        match self {
            AxisSide::Bottom => (0.0, -1.0),
            AxisSide::Top => (0.0, 1.0),
            AxisSide::Left => (-1.0, 0.0),
            AxisSide::Right => (1.0, 0.0),
        }
    }
}

/// Device-space sizes for one axis against a candidate interior.
struct AxisMetrics {
    tick_len: f64,
    subtick_len: f64,
    ticklabel_offset: f64,
    ticklabel_fontsize: f64,
    label_offset: f64,
    label_fontsize: f64,
}

/// One frame edge bound to a data range, able to both measure its
/// decoration footprint and draw itself.
///
/// Measurement and drawing share the same position arithmetic so the
/// layout solver sees exactly what rendering will produce.
pub struct AxisPainter<'a> {
    pub config: &'a AxisConfig,
    pub side: AxisSide,
    /// Data range along this axis.
    pub range: (f64, f64),
    /// Data coordinate on the perpendicular axis where this edge sits.
    pub cross: f64,
    pub log: bool,
    /// Whether this edge carries tick labels and the axis title.
    pub labeled: bool,
}

impl AxisPainter<'_> {
    fn pos(&self, geom: &dyn Geometry, t: f64) -> Point {
        if self.side.horizontal() {
            geom.map(t, self.cross)
        } else {
            geom.map(self.cross, t)
        }
    }

    fn metrics(
        &self,
        interior: &BoundingBox,
        device_bbox: &BoundingBox,
        fontsize_min: f64,
    ) -> AxisMetrics {
        let c = self.config;
        AxisMetrics {
            tick_len: size_relative(c.ticks_size, interior),
            subtick_len: size_relative(c.subticks_size, interior),
            ticklabel_offset: size_relative(c.ticklabels_offset, interior),
            ticklabel_fontsize: fontsize_relative(
                c.ticklabels_size,
                interior,
                device_bbox,
                fontsize_min,
            ),
            label_offset: size_relative(c.label_offset, interior),
            label_fontsize: fontsize_relative(c.label_size, interior, device_bbox, fontsize_min),
        }
    }

    /// Major ticks restricted to the visible range.
    fn visible_ticks(&self) -> Vec<f64> {
        let (lo, hi) = self.range;
        let (rlo, rhi) = (lo.min(hi), lo.max(hi));
        let tol = 1e-9 * (rhi - rlo).abs().max(1.0);
        let mut ticks = self.config.tick_values(lo, hi, self.log);
        ticks.retain(|&t| t >= rlo - tol && t <= rhi + tol);
        ticks
    }

    fn visible_subticks(&self, ticks: &[f64]) -> Vec<f64> {
        let (lo, hi) = self.range;
        let (rlo, rhi) = (lo.min(hi), lo.max(hi));
        let tol = 1e-9 * (rhi - rlo).abs().max(1.0);
        let mut subticks = self.config.subtick_values(lo, hi, self.log, ticks);
        subticks.retain(|&t| t >= rlo - tol && t <= rhi + tol);
        subticks
    }

    /// Outward distance from the spine to the near edge of the tick
    /// labels. Outward-pointing ticks push the labels out with them.
    fn ticklabel_setback(&self, m: &AxisMetrics) -> f64 {
        let mut setback = m.ticklabel_offset;
        if self.config.draw_ticks && self.config.tickdir > 0.0 {
            setback += m.tick_len;
        }
        setback
    }

    /// Text extent at an explicit font size, measured through the
    /// renderer inside a throwaway attribute scope.
    fn text_extent(r: &mut dyn Renderer, s: &str, fontsize: f64) -> (f64, f64) {
        r.save_state();
        r.set("fontsize", StyleValue::Num(fontsize));
        let extent = (r.text_width(s), r.text_height(s));
        r.restore_state();
        extent
    }

    /// Axis-aligned box of one tick label anchored at `base` and pushed
    /// outward by `setback`.
    fn ticklabel_box(&self, base: Point, setback: f64, w: f64, h: f64) -> BoundingBox {
        let anchor = pt_add(base, pt_mul(setback, self.side.outward()));
        let (x, y) = anchor;
        match self.side {
            AxisSide::Bottom => BoundingBox::from_points((x - w / 2.0, y - h), (x + w / 2.0, y)),
            AxisSide::Top => BoundingBox::from_points((x - w / 2.0, y), (x + w / 2.0, y + h)),
            AxisSide::Left => BoundingBox::from_points((x - w, y - h / 2.0), (x, y + h / 2.0)),
            AxisSide::Right => BoundingBox::from_points((x, y - h / 2.0), (x + w, y + h / 2.0)),
        }
    }

    /// Box of the rotated axis title placed outside `group`, the union
    /// of everything this edge has already laid out.
    fn label_box(&self, group: &BoundingBox, m: &AxisMetrics, w: f64, h: f64) -> BoundingBox {
        // Vertical axis titles run rotated a quarter turn, swapping the
        // text extents.
        let (bw, bh) = if self.side.horizontal() { (w, h) } else { (h, w) };
        let center = match group.center() {
            Some(c) => c,
            None => return BoundingBox::null(),
        };
        let (x0, y0) = group.lowerleft().unwrap_or(center);
        let (x1, y1) = group.upperright().unwrap_or(center);
        let d = m.label_offset;
        match self.side {
            AxisSide::Bottom => {
                BoundingBox::from_points((center.0 - bw / 2.0, y0 - d - bh), (center.0 + bw / 2.0, y0 - d))
            }
            AxisSide::Top => {
                BoundingBox::from_points((center.0 - bw / 2.0, y1 + d), (center.0 + bw / 2.0, y1 + d + bh))
            }
            AxisSide::Left => {
                BoundingBox::from_points((x0 - d - bw, center.1 - bh / 2.0), (x0 - d, center.1 + bh / 2.0))
            }
            AxisSide::Right => {
                BoundingBox::from_points((x1 + d, center.1 - bh / 2.0), (x1 + d + bw, center.1 + bh / 2.0))
            }
        }
    }

    /// Everything this edge would occupy: the spine along the interior
    /// plus outward-reaching ticks and text.
    pub fn bounds(
        &self,
        geom: &dyn Geometry,
        interior: &BoundingBox,
        device_bbox: &BoundingBox,
        fontsize_min: f64,
        r: &mut dyn Renderer,
    ) -> BoundingBox {
        let m = self.metrics(interior, device_bbox, fontsize_min);
        let (lo, hi) = self.range;
        let mut bb = BoundingBox::from_points(self.pos(geom, lo), self.pos(geom, hi));

        let ticks = self.visible_ticks();
        if self.config.draw_ticks && self.config.tickdir > 0.0 {
            for &t in &ticks {
                bb.add_point(pt_add(
                    self.pos(geom, t),
                    pt_mul(m.tick_len, self.side.outward()),
                ));
            }
        }

        if self.labeled && self.config.draw_ticklabels {
            let setback = self.ticklabel_setback(&m);
            let labels = self.config.label_strings(&ticks);
            for (&t, label) in ticks.iter().zip(labels.iter()) {
                let (w, h) = Self::text_extent(r, label, m.ticklabel_fontsize);
                bb.union(&self.ticklabel_box(self.pos(geom, t), setback, w, h));
            }
        }

        if self.labeled {
            if let Some(label) = &self.config.label {
                let (w, h) = Self::text_extent(r, label, m.label_fontsize);
                bb.union(&self.label_box(&bb, &m, w, h));
            }
        }

        bb
    }

    /// Grid lines across the interior at each major tick. Drawn in a
    /// separate pass so the grid sits under the plot contents.
    pub fn render_grid(&self, geom: &dyn Geometry, interior: &BoundingBox, r: &mut dyn Renderer) {
        if !self.config.draw_grid {
            return;
        }
        let (ilo, ihi) = match if self.side.horizontal() {
            interior.yrange()
        } else {
            interior.xrange()
        } {
            Some(range) => range,
            None => return,
        };
        r.save_state();
        self.config.grid_style.apply(r);
        for &t in &self.visible_ticks() {
            let p = self.pos(geom, t);
            if self.side.horizontal() {
                r.line((p.0, ilo), (p.0, ihi));
            } else {
                r.line((ilo, p.1), (ihi, p.1));
            }
        }
        r.restore_state();
    }

    fn render_comb(
        &self,
        geom: &dyn Geometry,
        positions: &[f64],
        len: f64,
        style: &LineStyle,
        r: &mut dyn Renderer,
    ) {
        if positions.is_empty() {
            return;
        }
        let tip = pt_mul(self.config.tickdir.signum() * len, self.side.outward());
        r.save_state();
        style.apply(r);
        for &t in positions {
            let base = self.pos(geom, t);
            r.line(base, pt_add(base, tip));
        }
        r.restore_state();
    }

    /// Draw the spine, ticks, tick labels, and axis title.
    pub fn render(
        &self,
        geom: &dyn Geometry,
        interior: &BoundingBox,
        device_bbox: &BoundingBox,
        fontsize_min: f64,
        r: &mut dyn Renderer,
    ) {
        let m = self.metrics(interior, device_bbox, fontsize_min);
        let (lo, hi) = self.range;
        let ticks = self.visible_ticks();

        if self.config.draw_subticks {
            let subticks = self.visible_subticks(&ticks);
            self.render_comb(geom, &subticks, m.subtick_len, &self.config.ticks_style, r);
        }
        if self.config.draw_ticks {
            self.render_comb(geom, &ticks, m.tick_len, &self.config.ticks_style, r);
        }
        if self.config.draw_spine {
            r.save_state();
            self.config.spine_style.apply(r);
            r.line(self.pos(geom, lo), self.pos(geom, hi));
            r.restore_state();
        }

        let mut group = BoundingBox::from_points(self.pos(geom, lo), self.pos(geom, hi));

        if self.labeled && self.config.draw_ticklabels {
            let setback = self.ticklabel_setback(&m);
            let labels = self.config.label_strings(&ticks);
            let (halign, valign) = match self.side {
                AxisSide::Bottom => (HAlign::Center, VAlign::Top),
                AxisSide::Top => (HAlign::Center, VAlign::Bottom),
                AxisSide::Left => (HAlign::Right, VAlign::Center),
                AxisSide::Right => (HAlign::Left, VAlign::Center),
            };
            r.save_state();
            TextStyle::new()
                .size(m.ticklabel_fontsize)
                .halign(halign)
                .valign(valign)
                .apply(r);
            for (&t, label) in ticks.iter().zip(labels.iter()) {
                let anchor = pt_add(self.pos(geom, t), pt_mul(setback, self.side.outward()));
                r.text(anchor, label);
                let (w, h) = Self::text_extent(r, label, m.ticklabel_fontsize);
                group.union(&self.ticklabel_box(self.pos(geom, t), setback, w, h));
            }
            r.restore_state();
        }

        if self.labeled {
            if let Some(label) = &self.config.label {
                let (w, h) = Self::text_extent(r, label, m.label_fontsize);
                let bb = self.label_box(&group, &m, w, h);
                if let Some(center) = bb.center() {
                    let angle = if self.side.horizontal() { 0.0 } else { 90.0 };
                    r.save_state();
                    TextStyle::new().size(m.label_fontsize).angle(angle).apply(r);
                    r.text(center, label);
                    r.restore_state();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SvgBackend;
    use crate::transform::PlotGeometry;

    fn painter_geom() -> (BoundingBox, BoundingBox, PlotGeometry) {
        let data = BoundingBox::from_points((0.0, 0.0), (10.0, 10.0));
        let interior = BoundingBox::from_points((100.0, 100.0), (300.0, 300.0));
        let geom = PlotGeometry::new(&data, &interior, false, false).unwrap();
        (data, interior, geom)
    }

    #[test]
    fn test_tick_values_follow_placement_mode() {
        let mut config = AxisConfig::default();
        assert_eq!(config.tick_values(0.0, 47.0, false), vec![0.0, 10.0, 20.0, 30.0, 40.0]);

        config.ticks = TickSpec::Explicit(vec![1.0, 2.0]);
        assert_eq!(config.tick_values(0.0, 47.0, false), vec![1.0, 2.0]);
    }

    #[test]
    fn test_explicit_labels_take_precedence() {
        let mut config = AxisConfig::default();
        config.ticklabels = Some(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.label_strings(&[0.0, 1.0]), vec!["a", "b"]);
    }

    #[test]
    fn test_inward_ticks_add_no_footprint() {
        let (_, interior, geom) = painter_geom();
        let device = BoundingBox::from_points((0.0, 0.0), (400.0, 400.0));
        let config = AxisConfig {
            draw_ticklabels: false,
            label: None,
            ..AxisConfig::default()
        };
        let painter = AxisPainter {
            config: &config,
            side: AxisSide::Bottom,
            range: (0.0, 10.0),
            cross: 0.0,
            log: false,
            labeled: true,
        };
        let mut r = SvgBackend::new(400.0, 400.0);
        let bb = painter.bounds(&geom, &interior, &device, 1.25, &mut r);
        // Only the spine along the bottom edge.
        assert_eq!(bb.yrange(), Some((100.0, 100.0)));
    }

    #[test]
    fn test_ticklabels_extend_below_bottom_axis() {
        let (_, interior, geom) = painter_geom();
        let device = BoundingBox::from_points((0.0, 0.0), (400.0, 400.0));
        let config = AxisConfig::default();
        let painter = AxisPainter {
            config: &config,
            side: AxisSide::Bottom,
            range: (0.0, 10.0),
            cross: 0.0,
            log: false,
            labeled: true,
        };
        let mut r = SvgBackend::new(400.0, 400.0);
        let bb = painter.bounds(&geom, &interior, &device, 1.25, &mut r);
        let (ylo, yhi) = bb.yrange().unwrap();
        assert_eq!(yhi, 100.0);
        assert!(ylo < 100.0, "labels should reach below the spine");
    }

    #[test]
    fn test_axis_title_widens_left_footprint() {
        let (_, interior, geom) = painter_geom();
        let device = BoundingBox::from_points((0.0, 0.0), (400.0, 400.0));
        let mut with_label = AxisConfig::default();
        with_label.label = Some("voltage".to_string());
        let without_label = AxisConfig::default();

        let mut r = SvgBackend::new(400.0, 400.0);
        let measure = |config: &AxisConfig, r: &mut SvgBackend| {
            AxisPainter {
                config,
                side: AxisSide::Left,
                range: (0.0, 10.0),
                cross: 0.0,
                log: false,
                labeled: true,
            }
            .bounds(&geom, &interior, &device, 1.25, r)
        };
        let bb_with = measure(&with_label, &mut r);
        let bb_without = measure(&without_label, &mut r);
        assert!(bb_with.xrange().unwrap().0 < bb_without.xrange().unwrap().0);
    }

    #[test]
    fn test_render_emits_spine_ticks_and_labels() {
        let (_, interior, geom) = painter_geom();
        let device = BoundingBox::from_points((0.0, 0.0), (400.0, 400.0));
        let config = AxisConfig::default();
        let painter = AxisPainter {
            config: &config,
            side: AxisSide::Bottom,
            range: (0.0, 10.0),
            cross: 0.0,
            log: false,
            labeled: true,
        };
        let mut r = SvgBackend::new(400.0, 400.0);
        painter.render(&geom, &interior, &device, 1.25, &mut r);
        let svg = r.render();
        assert!(svg.matches("<line").count() > 5, "spine plus ticks");
        assert!(svg.contains(">0</text>") || svg.contains(">0<"), "{}", svg);
    }
}
