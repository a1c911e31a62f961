//! Point helpers and the axis-aligned bounding box.
//!
//! Points are plain `(f64, f64)` tuples; a handful of free functions cover
//! the vector algebra the layout and transform code needs.

/// A point in data or device space.
pub type Point = (f64, f64);

pub fn pt_add(u: Point, v: Point) -> Point {
    (u.0 + v.0, u.1 + v.1)
}

pub fn pt_sub(u: Point, v: Point) -> Point {
    (u.0 - v.0, u.1 - v.1)
}

pub fn pt_mul(a: f64, u: Point) -> Point {
    (a * u.0, a * u.1)
}

pub fn pt_rot(u: Point, angle: f64) -> Point {
    let (s, c) = angle.sin_cos();
    (c * u.0 - s * u.1, s * u.0 + c * u.1)
}

pub fn pt_len(u: Point) -> f64 {
    u.0.hypot(u.1)
}

fn pt_min(a: Point, b: Point) -> Point {
    (a.0.min(b.0), a.1.min(b.1))
}

fn pt_max(a: Point, b: Point) -> Point {
    (a.0.max(b.0), a.1.max(b.1))
}

/// An axis-aligned rectangle in data or device space.
///
/// A box starts *null* (no points accumulated) and grows monotonically
/// under [`union`](BoundingBox::union). When non-null the corners satisfy
/// `p0.x <= p1.x` and `p0.y <= p1.y`. Boxes are plain values; every layout
/// stage works on its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    corners: Option<(Point, Point)>,
}

impl BoundingBox {
    /// A null box containing nothing.
    pub fn null() -> Self {
        BoundingBox { corners: None }
    }

    /// The minimal box containing two points (in any order).
    pub fn from_points(p: Point, q: Point) -> Self {
        BoundingBox {
            corners: Some((pt_min(p, q), pt_max(p, q))),
        }
    }

    /// The minimal box containing every point in the slice. Empty input
    /// gives a null box.
    pub fn of_points(points: &[Point]) -> Self {
        let mut bb = BoundingBox::null();
        for &p in points {
            bb.add_point(p);
        }
        bb
    }

    /// The minimal box containing the paired coordinate slices.
    pub fn of_coords(x: &[f64], y: &[f64]) -> Self {
        let mut bb = BoundingBox::null();
        for (&x0, &y0) in x.iter().zip(y.iter()) {
            bb.add_point((x0, y0));
        }
        bb
    }

    pub fn is_null(&self) -> bool {
        self.corners.is_none()
    }

    /// Grow to include a single point.
    pub fn add_point(&mut self, p: Point) {
        self.corners = match self.corners {
            None => Some((p, p)),
            Some((p0, p1)) => Some((pt_min(p0, p), pt_max(p1, p))),
        };
    }

    /// Grow to the minimal box containing both operands. A null operand
    /// is absorbing: `null.union(b) == b`, and null ∪ null stays null.
    /// Commutative and associative.
    pub fn union(&mut self, other: &BoundingBox) {
        self.corners = match (self.corners, other.corners) {
            (a, None) => a,
            (None, b) => b,
            (Some((a0, a1)), Some((b0, b1))) => Some((pt_min(a0, b0), pt_max(a1, b1))),
        };
    }

    pub fn lowerleft(&self) -> Option<Point> {
        self.corners.map(|(p0, _)| p0)
    }

    pub fn upperright(&self) -> Option<Point> {
        self.corners.map(|(_, p1)| p1)
    }

    pub fn upperleft(&self) -> Option<Point> {
        self.corners.map(|(p0, p1)| (p0.0, p1.1))
    }

    pub fn lowerright(&self) -> Option<Point> {
        self.corners.map(|(p0, p1)| (p1.0, p0.1))
    }

    pub fn width(&self) -> f64 {
        self.corners.map_or(0.0, |(p0, p1)| p1.0 - p0.0)
    }

    pub fn height(&self) -> f64 {
        self.corners.map_or(0.0, |(p0, p1)| p1.1 - p0.1)
    }

    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// height / width.
    pub fn aspect_ratio(&self) -> f64 {
        self.height() / self.width()
    }

    pub fn xrange(&self) -> Option<(f64, f64)> {
        self.corners.map(|(p0, p1)| (p0.0, p1.0))
    }

    pub fn yrange(&self) -> Option<(f64, f64)> {
        self.corners.map(|(p0, p1)| (p0.1, p1.1))
    }

    pub fn center(&self) -> Option<Point> {
        self.corners
            .map(|(p0, p1)| ((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0))
    }

    /// Inclusive on all four edges. A null box contains nothing.
    pub fn contains(&self, q: Point) -> bool {
        match self.corners {
            None => false,
            Some((p0, p1)) => p0.0 <= q.0 && q.0 <= p1.0 && p0.1 <= q.1 && q.1 <= p1.1,
        }
    }

    /// Asymmetric margin change: move each side outward by the given
    /// amount (negative values contract). No-op on a null box.
    pub fn deform(&mut self, dtop: f64, dbottom: f64, dleft: f64, dright: f64) {
        if let Some((p0, p1)) = self.corners {
            self.corners = Some((
                pt_sub(p0, (dleft, dbottom)),
                pt_add(p1, (dright, dtop)),
            ));
        }
    }

    /// Translate both corners.
    pub fn shift(&mut self, dp: Point) {
        if let Some((p0, p1)) = self.corners {
            self.corners = Some((pt_add(p0, dp), pt_add(p1, dp)));
        }
    }

    /// Symmetric growth about the center by `factor/2` of each dimension.
    /// Negative factors shrink.
    pub fn expand(&mut self, factor: f64) {
        if let Some((p0, p1)) = self.corners {
            let dp = pt_mul(factor / 2.0, (self.width(), self.height()));
            self.corners = Some((pt_sub(p0, dp), pt_add(p1, dp)));
        }
    }

    /// Replace with the axis-aligned box of the four corners rotated by
    /// `angle` about `p`.
    pub fn rotate(&mut self, angle: f64, p: Point) {
        if self.corners.is_some() {
            let rot =
                |q: Point| pt_add(pt_rot(pt_sub(q, p), angle), p);
            let a = rot(self.lowerleft().unwrap());
            let b = rot(self.lowerright().unwrap());
            let c = rot(self.upperleft().unwrap());
            let d = rot(self.upperright().unwrap());
            self.corners = Some((
                pt_min(a, pt_min(b, pt_min(c, d))),
                pt_max(a, pt_max(b, pt_max(c, d))),
            ));
        }
    }

    /// Shrink the larger dimension so height/width hits `ratio`, anchored
    /// at the center.
    pub fn make_aspect_ratio(&mut self, ratio: f64) {
        if let Some((p0, p1)) = self.corners {
            if ratio < self.aspect_ratio() {
                let dh = self.height() - ratio * self.width();
                self.corners = Some(((p0.0, p0.1 + dh / 2.0), (p1.0, p1.1 - dh / 2.0)));
            } else {
                let dw = self.width() - self.height() / ratio;
                self.corners = Some(((p0.0 + dw / 2.0, p0.1), (p1.0 - dw / 2.0, p1.1)));
            }
        }
    }
}
