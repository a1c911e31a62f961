//! Interior-region layout.
//!
//! A container's rendered exterior is its interior drawing region plus
//! decorations (tick labels, axis titles, the plot title) whose sizes are
//! themselves fractions of the interior's yardstick. The solver finds the
//! self-consistent interior by damped fixed-point iteration.

use log::debug;

use crate::error::{PlotError, PlotResult};
use crate::geom::{pt_add, pt_len, pt_mul, pt_sub, BoundingBox};

/// Size metric combining a region's width and height.
pub fn yardstick(bbox: &BoundingBox) -> f64 {
    let w = bbox.width();
    let h = bbox.height();
    8.0_f64.sqrt() * w * h / (w + h)
}

/// Device-space size of a relative size given in percent of the region's
/// yardstick.
pub fn size_relative(relsize: f64, bbox: &BoundingBox) -> f64 {
    (relsize / 100.0) * yardstick(bbox)
}

/// Relative font size against `bbox`, clamped below by `min_relsize`
/// taken against the whole device region.
pub fn fontsize_relative(
    relsize: f64,
    bbox: &BoundingBox,
    device_bbox: &BoundingBox,
    min_relsize: f64,
) -> f64 {
    size_relative(relsize, bbox).max(size_relative(min_relsize, device_bbox))
}

/// Solver knobs. The iteration cap and tolerance are empirical; the
/// defaults reproduce the historical behavior.
#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    /// Maximum fixed-point iterations before giving up.
    pub max_iterations: usize,
    /// Residual tolerance as a fraction of the exterior diagonal.
    pub tolerance: f64,
    /// Optional height/width ratio applied to the converged interior.
    pub aspect_ratio: Option<f64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            max_iterations: 10,
            tolerance: 0.005,
            aspect_ratio: None,
        }
    }
}

/// Solve for the interior region whose measured exterior matches the
/// target `exterior`.
///
/// `measure` is the container's decoration callback: given a candidate
/// interior it returns the bounding box the container would actually
/// occupy. It must be deterministic; the iteration assumes it is
/// continuous enough to converge for reasonable style configurations.
///
/// Non-convergence within the iteration cap is fatal for the composition
/// in progress: a non-converged interior has no correctness guarantee, so
/// no partial result is returned.
pub fn solve_interior<F>(
    exterior: &BoundingBox,
    measure: F,
    options: &LayoutOptions,
) -> PlotResult<BoundingBox>
where
    F: Fn(&BoundingBox) -> BoundingBox,
{
    if exterior.is_null() {
        return Err(PlotError::InvalidData("null exterior region".to_string()));
    }
    let mut interior = *exterior;
    let region_diagonal = exterior.diagonal();

    for i in 0..options.max_iterations {
        let bb = measure(&interior);

        let dll = pt_sub(exterior.lowerleft().unwrap(), bb.lowerleft().unwrap());
        let dur = pt_sub(exterior.upperright().unwrap(), bb.upperright().unwrap());

        let sll = pt_len(dll) / region_diagonal;
        let sur = pt_len(dur) / region_diagonal;
        debug!("layout iteration {}: residuals {:.5} {:.5}", i, sll, sur);

        if sll < options.tolerance && sur < options.tolerance {
            if let Some(ratio) = options.aspect_ratio {
                interior.make_aspect_ratio(ratio);
            }
            return Ok(interior);
        }

        // Damping: rescale the corner corrections by the ratio of the
        // current interior diagonal to the measured exterior diagonal.
        let scale = interior.diagonal() / bb.diagonal();
        interior = BoundingBox::from_points(
            pt_add(interior.lowerleft().unwrap(), pt_mul(scale, dll)),
            pt_add(interior.upperright().unwrap(), pt_mul(scale, dur)),
        );
    }

    Err(PlotError::LayoutDidNotConverge {
        iterations: options.max_iterations,
    })
}
