//! # Linear Extrusion
//!
//! Sweeps a region along the Z axis from `z = 0` to `z = height`.
//!
//! - **Bottom caps**: each convex sub-area lifted onto `z = 0`, reversed so
//!   it faces −Z
//! - **Top caps**: each bottom cap mapped through
//!   `(x, y, z) -> (x·scale, y·scale, height)` and reversed again to face +Z
//! - **Sides**: one quad per boundary segment
//!   `[p0, p1, lift(p1), lift(p0)]`
//!
//! Cap and side vertices are produced by the same lift, so shared edges
//! match exactly.

use glam::DVec3;
use rayon::prelude::*;

use crate::error::{DegenerateCheck, KernelError, KernelResult};
use crate::plane::EmbeddingPlane;
use crate::polygon::Face;
use crate::precision::Precision;
use crate::region::{BoundarySegment, PlanarRegion};
use crate::solid::Solid;
use crate::transform::{scale_and_lift, PointTransform};

/// Parameters for linear extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearExtrudeParams {
    /// Extrusion height along Z axis
    pub height: f64,
    /// Scale factor applied to the top cap
    pub scale: f64,
}

impl Default for LinearExtrudeParams {
    fn default() -> Self {
        Self {
            height: 1.0,
            scale: 1.0,
        }
    }
}

/// Extrudes a region along the Z axis.
///
/// # Errors
///
/// - `InvalidParameter` for a negative or non-finite height, or a
///   non-finite scale
/// - `DegenerateGeometry` for a zero height, or whenever a cap or side face
///   fails validation (e.g. `scale = 0` collapses the top cap)
/// - Any error of the region's decomposition
///
/// # Example
///
/// ```rust
/// use brep_sweep::ops::extrude::{linear_extrude, LinearExtrudeParams};
/// use brep_sweep::{Polygon2D, Precision};
/// use glam::DVec2;
///
/// let precision = Precision::default();
/// let square = Polygon2D::square(DVec2::splat(10.0), true, precision).unwrap();
/// let params = LinearExtrudeParams {
///     height: 20.0,
///     ..Default::default()
/// };
/// let solid = linear_extrude(&square, &params, &precision).unwrap();
/// assert_eq!(solid.face_count(), 6);
/// ```
pub fn linear_extrude<R>(region: &R, params: &LinearExtrudeParams, precision: &Precision) -> KernelResult<Solid>
where
    R: PlanarRegion + ?Sized,
{
    let LinearExtrudeParams { height, scale } = *params;
    if !height.is_finite() || height < 0.0 {
        return Err(KernelError::invalid_parameter(
            "height",
            format!("must be finite and non-negative, got {height}"),
        ));
    }
    if !scale.is_finite() {
        return Err(KernelError::invalid_parameter("scale", format!("must be finite, got {scale}")));
    }
    if precision.eq_zero(height) {
        return Err(KernelError::degenerate(
            DegenerateCheck::CoincidentVertices,
            "side faces of a zero-height extrusion collapse onto their base edges",
        ));
    }

    let plane = EmbeddingPlane::xy(*precision);
    let lift = scale_and_lift(scale, height);

    let areas = region.convex_sub_areas()?;
    let caps = areas
        .par_iter()
        .map(|area| {
            let bottom = plane.embed_area(area)?.reverse();
            let top = bottom.transform(&lift, precision)?.reverse();
            Ok((bottom, top))
        })
        .collect::<KernelResult<Vec<(Face, Face)>>>()?;

    let segments: Vec<BoundarySegment> = region
        .boundary_paths()
        .iter()
        .flat_map(|path| path.segments().iter().copied())
        .collect();
    let sides = segments
        .par_iter()
        .map(|segment| side_quad(segment, &plane, &lift, precision))
        .collect::<KernelResult<Vec<Face>>>()?;

    let (bottoms, tops): (Vec<Face>, Vec<Face>) = caps.into_iter().unzip();
    tracing::debug!(
        height,
        scale,
        caps = bottoms.len(),
        sides = sides.len(),
        "linear extrusion"
    );

    Ok(bottoms.into_iter().chain(tops).chain(sides).collect())
}

/// The side face swept by one boundary segment.
fn side_quad<T>(segment: &BoundarySegment, plane: &EmbeddingPlane, lift: &T, precision: &Precision) -> KernelResult<Face>
where
    T: PointTransform<DVec3>,
{
    let p0 = plane.to_space(segment.start);
    let p1 = plane.to_space(segment.end);
    Face::from_vertices(vec![p0, p1, lift.apply(p1), lift.apply(p0)], precision)
}
