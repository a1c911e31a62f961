//! Iso-line extraction and contour stitching.
//!
//! [`contour_segments`] walks every grid cell and emits the level
//! crossings as unordered segments; because crossings are interpolated
//! from the shared cell edges, segments from adjacent cells carry exactly
//! equal endpoint coordinates. [`trace_segments`] relies on that contract
//! to stitch the pile of segments into continuous polylines by exact
//! endpoint matching.

use log::warn;

use crate::error::{PlotError, PlotResult};
use crate::geom::Point;

/// An unordered pair of endpoints on one iso-line.
pub type Segment = (Point, Point);

/// An ordered chain of points; closed when first == last.
pub type Polyline = Vec<Point>;

/// Whether a traced polyline closes on itself.
pub fn is_closed(line: &Polyline) -> bool {
    line.len() > 2 && line.first() == line.last()
}

/// Zero crossing of the field between two weighted points, if any.
/// `p` and `q` are `(x, y, z - level)` triples.
fn find_zero(p: [f64; 3], q: [f64; 3]) -> Option<Point> {
    if p[2] == 0.0 {
        return Some((p[0], p[1]));
    }
    if p[2] * q[2] < 0.0 {
        let a = p[2] / (p[2] - q[2]);
        return Some((p[0] + a * (q[0] - p[0]), p[1] + a * (q[1] - p[1])));
    }
    None
}

/// Extract the `level` crossings of the scalar field `z` sampled at
/// `x[i]`, `y[j]` (so `z[i][j]` pairs with `(x[i], y[j])`).
///
/// Each cell is split into four triangles against the cell-center
/// average; every triangle producing exactly two edge crossings emits one
/// segment. The output is unordered; feed it to [`trace_segments`].
pub fn contour_segments(
    x: &[f64],
    y: &[f64],
    z: &[Vec<f64>],
    level: f64,
) -> PlotResult<Vec<Segment>> {
    if z.len() != x.len() || z.iter().any(|row| row.len() != y.len()) {
        return Err(PlotError::InvalidData(
            "grid dimensions do not match coordinate arrays".to_string(),
        ));
    }
    if x.len() < 2 || y.len() < 2 {
        return Err(PlotError::InvalidData(
            "contour grid needs at least 2 points per axis".to_string(),
        ));
    }

    let mut segs = Vec::new();
    for i in 0..x.len() - 1 {
        for j in 0..y.len() - 1 {
            // Cell corners counterclockwise plus the center average.
            let mut p = [[0.0f64; 3]; 5];
            for (k, corner) in p.iter_mut().take(4).enumerate() {
                let ii = i + (k / 2 % 2);
                let jj = j + ((k + 1) / 2 % 2);
                *corner = [x[ii], y[jj], z[ii][jj] - level];
            }
            for l in 0..3 {
                p[4][l] = 0.25 * (p[0][l] + p[1][l] + p[2][l] + p[3][l]);
            }

            for k in 0..4 {
                let kk = (k + 1) % 4;
                let mut zeros = [(0.0, 0.0); 3];
                let mut nz = 0;
                for crossing in [
                    find_zero(p[4], p[k]),
                    find_zero(p[k], p[kk]),
                    find_zero(p[kk], p[4]),
                ]
                .into_iter()
                .flatten()
                {
                    zeros[nz] = crossing;
                    nz += 1;
                }
                if nz == 2 {
                    segs.push((zeros[0], zeros[1]));
                }
            }
        }
    }
    Ok(segs)
}

/// One endpoint match found while scanning open polylines.
struct EndpointMatch {
    line: usize,
    /// 0 = matched the first point, 1 = matched the last point.
    end: usize,
    /// The segment's other point, to be attached at the matched end.
    other: Point,
}

/// Stitch unordered segments into the minimal set of polylines.
///
/// Points match only when exactly equal; the extractor guarantees shared
/// endpoints between adjacent cells. Open chains come first in the
/// result, closed loops after. A point where more than two chain ends
/// meet is topologically ambiguous; the offending segment is reported and
/// dropped, leaving that level's polylines incomplete rather than wrong.
pub fn trace_segments(segments: &[Segment]) -> Vec<Polyline> {
    let mut open: Vec<Polyline> = Vec::new();
    let mut closed: Vec<Polyline> = Vec::new();

    for &(a, b) in segments {
        if open.is_empty() {
            open.push(vec![a, b]);
            continue;
        }

        let mut matches = Vec::new();
        for (i, line) in open.iter().enumerate() {
            let begin = *line.first().unwrap();
            let end = *line.last().unwrap();
            if a == begin {
                matches.push(EndpointMatch { line: i, end: 0, other: b });
            } else if a == end {
                matches.push(EndpointMatch { line: i, end: 1, other: b });
            }
            if b == begin {
                matches.push(EndpointMatch { line: i, end: 0, other: a });
            } else if b == end {
                matches.push(EndpointMatch { line: i, end: 1, other: a });
            }
        }

        match matches.len() {
            0 => open.push(vec![a, b]),
            1 => {
                let m = &matches[0];
                if m.end == 0 {
                    open[m.line].insert(0, m.other);
                } else {
                    open[m.line].push(m.other);
                }
            }
            2 => {
                let (m0, m1) = (&matches[0], &matches[1]);
                if m0.line == m1.line {
                    // The segment bridges one polyline's two ends.
                    let mut line = open.remove(m0.line);
                    let first = line[0];
                    line.push(first);
                    closed.push(line);
                } else {
                    let merged = merge_chains(&mut open, m0.line, m0.end, m1.line, m1.end);
                    open.push(merged);
                }
            }
            n => {
                warn!(
                    "contour: segment ({:?})-({:?}) touches {} chain ends, dropping it",
                    a, b, n
                );
            }
        }
    }

    open.extend(closed);
    open
}

/// Remove two open chains and join them, reversing as needed so the
/// matched ends are adjacent.
fn merge_chains(
    open: &mut Vec<Polyline>,
    i0: usize,
    end0: usize,
    i1: usize,
    end1: usize,
) -> Polyline {
    // Remove the higher index first so the lower stays valid.
    let (mut l0, mut l1) = if i0 < i1 {
        let l1 = open.remove(i1);
        let l0 = open.remove(i0);
        (l0, l1)
    } else {
        let l0 = open.remove(i0);
        let l1 = open.remove(i1);
        (l0, l1)
    };

    match (end0, end1) {
        (1, 0) => {
            l0.extend(l1);
            l0
        }
        (0, 1) => {
            l1.extend(l0);
            l1
        }
        (0, 0) => {
            l0.reverse();
            l0.extend(l1);
            l0
        }
        _ => {
            l1.reverse();
            l0.extend(l1);
            l0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Point = (0.0, 0.0);
    const B: Point = (1.0, 0.0);
    const C: Point = (0.5, 1.0);
    const D: Point = (2.0, 2.0);

    fn rotations_equal(a: &Polyline, b: &Polyline) -> bool {
        // Closed loops compare equal up to starting point and direction.
        assert!(is_closed(a) && is_closed(b));
        let core_a = &a[..a.len() - 1];
        let core_b = &b[..b.len() - 1];
        if core_a.len() != core_b.len() {
            return false;
        }
        let mut fwd: Vec<Point> = core_b.to_vec();
        for _ in 0..core_b.len() {
            fwd.rotate_left(1);
            if fwd == core_a {
                return true;
            }
        }
        let mut rev: Vec<Point> = core_b.to_vec();
        rev.reverse();
        for _ in 0..core_b.len() {
            rev.rotate_left(1);
            if rev == core_a {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_open_chain() {
        let lines = trace_segments(&[(A, B), (B, C)]);
        assert_eq!(lines, vec![vec![A, B, C]]);
    }

    #[test]
    fn test_closed_triangle() {
        let lines = trace_segments(&[(A, B), (B, C), (C, A)]);
        assert_eq!(lines, vec![vec![A, B, C, A]]);
        assert!(is_closed(&lines[0]));
    }

    #[test]
    fn test_order_invariance_for_closed_loop() {
        let reference = trace_segments(&[(A, B), (B, C), (C, A)]);
        let permuted = trace_segments(&[(B, C), (C, A), (A, B)]);
        assert_eq!(reference.len(), 1);
        assert_eq!(permuted.len(), 1);
        assert!(rotations_equal(&reference[0], &permuted[0]));
    }

    #[test]
    fn test_disjoint_segments_stay_separate() {
        let lines = trace_segments(&[(A, B), (C, D)]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_two_chains_merge() {
        // (A,B) and (C,D) are far apart until (B,C) bridges them.
        let lines = trace_segments(&[(A, B), (C, D), (B, C)]);
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.len(), 4);
        // One traversal order or its reverse.
        let fwd = vec![A, B, C, D];
        let mut rev = fwd.clone();
        rev.reverse();
        assert!(line == &fwd || line == &rev);
    }

    #[test]
    fn test_self_touching_point_splits_chains() {
        // Four segments meeting at p (a saddle-like self-touch). Once p
        // becomes an interior point of the first chain, later segments
        // through p start a separate chain instead of guessing at the
        // crossing topology.
        let p: Point = (5.0, 5.0);
        let lines = trace_segments(&[(A, p), (B, p), (C, p), (D, p)]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![A, p, B]);
        assert_eq!(lines[1], vec![C, p, D]);
    }

    #[test]
    fn test_extractor_dimension_mismatch() {
        let bad = contour_segments(&[0.0, 1.0], &[0.0, 1.0], &[vec![0.0, 1.0]], 0.5);
        assert!(bad.is_err());
    }

    #[test]
    fn test_extractor_ramp_stitches_to_single_chain() {
        // z = x on a 3x3 grid; the 0.5 contour is the vertical line
        // x = 0.5 crossing both rows of cells.
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];
        let z: Vec<Vec<f64>> = x.iter().map(|&xv| vec![xv; 3]).collect();
        let segs = contour_segments(&x, &y, &z, 0.5).unwrap();
        assert!(!segs.is_empty());
        let lines = trace_segments(&segs);
        assert_eq!(lines.len(), 1, "expected one chain, got {:?}", lines);
        let line = &lines[0];
        for &(px, _) in line {
            assert!((px - 0.5).abs() < 1e-12);
        }
        // Spans the full y extent of the grid.
        let ys: Vec<f64> = line.iter().map(|p| p.1).collect();
        let lo = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!((lo, hi), (0.0, 2.0));
    }
}
