//! Coordinate transforms: data space to device space.
//!
//! [`rectilinear_map`] builds the scale-and-translate map between two
//! bounding boxes; [`PlotGeometry`] layers optional per-axis log10
//! transforms on top and is the single point through which every data
//! coordinate becomes a device coordinate.

use crate::error::{Axis, PlotError, PlotResult};
use crate::geom::{BoundingBox, Point};

/// A general affine map `p -> t + m·p`. Immutable after construction;
/// the scalar and vectorized forms share one formula.
#[derive(Debug, Clone, Copy)]
pub struct AffineTransform {
    t: Point,
    m: [[f64; 2]; 2],
}

impl AffineTransform {
    pub fn identity() -> Self {
        AffineTransform {
            t: (0.0, 0.0),
            m: [[1.0, 0.0], [0.0, 1.0]],
        }
    }

    pub fn map(&self, x: f64, y: f64) -> Point {
        (
            self.t.0 + self.m[0][0] * x + self.m[0][1] * y,
            self.t.1 + self.m[1][0] * x + self.m[1][1] * y,
        )
    }

    pub fn map_vec(&self, x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
        x.iter()
            .zip(y.iter())
            .map(|(&x0, &y0)| self.map(x0, y0))
            .unzip()
    }

    /// `self ∘ other`: apply `other` first.
    pub fn compose(&self, other: &AffineTransform) -> AffineTransform {
        let m = [
            [
                self.m[0][0] * other.m[0][0] + self.m[0][1] * other.m[1][0],
                self.m[0][0] * other.m[0][1] + self.m[0][1] * other.m[1][1],
            ],
            [
                self.m[1][0] * other.m[0][0] + self.m[1][1] * other.m[1][0],
                self.m[1][0] * other.m[0][1] + self.m[1][1] * other.m[1][1],
            ],
        ];
        AffineTransform {
            t: self.map(other.t.0, other.t.1),
            m,
        }
    }
}

/// The axis-independent scale+translate map taking `src` onto `dest`.
///
/// Fails on a null or zero-extent `src` or `dest`; callers must expand
/// degenerate ranges before building a map.
pub fn rectilinear_map(src: &BoundingBox, dest: &BoundingBox) -> PlotResult<AffineTransform> {
    let (sx0, sx1) = src
        .xrange()
        .ok_or_else(|| PlotError::InvalidData("null source box".to_string()))?;
    let (sy0, sy1) = src.yrange().unwrap();
    let p = dest
        .lowerleft()
        .ok_or_else(|| PlotError::InvalidData("null destination box".to_string()))?;
    if sx1 == sx0 {
        return Err(PlotError::DegenerateRange {
            axis: Axis::X,
            lo: sx0,
            hi: sx1,
        });
    }
    if sy1 == sy0 {
        return Err(PlotError::DegenerateRange {
            axis: Axis::Y,
            lo: sy0,
            hi: sy1,
        });
    }
    let sx = dest.width() / src.width();
    let sy = dest.height() / src.height();
    let q = src.lowerleft().unwrap();
    Ok(AffineTransform {
        t: (p.0 - sx * q.0, p.1 - sy * q.1),
        m: [[sx, 0.0], [0.0, sy]],
    })
}

/// A geometry maps data coordinates into device coordinates.
///
/// `geodesic` is the seam for non-rectilinear geometries (sky-projection
/// style maps) that may split a segment into several device-space
/// sub-paths where it crosses a projection discontinuity. Implementations
/// must keep `map` and `map_vec` exactly consistent.
pub trait Geometry {
    fn map(&self, x: f64, y: f64) -> Point;

    fn map_vec(&self, x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>);

    /// Split a data-space path into sub-paths that are each safe to map
    /// as one device-space curve. The rectilinear default returns the
    /// whole path unchanged and ignores `divisions`.
    fn geodesic(&self, x: &[f64], y: &[f64], divisions: usize) -> Vec<(Vec<f64>, Vec<f64>)> {
        let _ = divisions;
        vec![(x.to_vec(), y.to_vec())]
    }
}

/// Rectilinear geometry with optional independent log10 axes.
#[derive(Debug, Clone)]
pub struct PlotGeometry {
    aff: AffineTransform,
    xlog: bool,
    ylog: bool,
}

impl PlotGeometry {
    /// Build the map from a data-space `src` box onto a device-space
    /// `dest` box. Axes flagged logarithmic must cover a strictly
    /// positive range.
    pub fn new(src: &BoundingBox, dest: &BoundingBox, xlog: bool, ylog: bool) -> PlotResult<Self> {
        let (mut a, mut b) = src
            .lowerleft()
            .ok_or_else(|| PlotError::InvalidData("null source box".to_string()))?;
        let (mut c, mut d) = src.upperright().unwrap();
        if xlog {
            if a <= 0.0 {
                return Err(PlotError::NonPositiveLogRange {
                    axis: Axis::X,
                    lo: a,
                    hi: c,
                });
            }
            a = a.log10();
            c = c.log10();
        }
        if ylog {
            if b <= 0.0 {
                return Err(PlotError::NonPositiveLogRange {
                    axis: Axis::Y,
                    lo: b,
                    hi: d,
                });
            }
            b = b.log10();
            d = d.log10();
        }
        let fsrc = BoundingBox::from_points((a, b), (c, d));
        Ok(PlotGeometry {
            aff: rectilinear_map(&fsrc, dest)?,
            xlog,
            ylog,
        })
    }

    pub fn xlog(&self) -> bool {
        self.xlog
    }

    pub fn ylog(&self) -> bool {
        self.ylog
    }
}

impl Geometry for PlotGeometry {
    fn map(&self, x: f64, y: f64) -> Point {
        let u = if self.xlog { x.log10() } else { x };
        let v = if self.ylog { y.log10() } else { y };
        self.aff.map(u, v)
    }

    fn map_vec(&self, x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
        x.iter()
            .zip(y.iter())
            .map(|(&x0, &y0)| self.map(x0, y0))
            .unzip()
    }
}
