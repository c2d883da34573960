//! # Rotate Extrusion
//!
//! Revolves a region around the Y axis: a profile point `(x, y)` at angle
//! `θ` lands on `(x·cos θ, y, x·sin θ)`.
//!
//! ## Algorithm
//!
//! 1. The profile must lie at `x >= 0` (within tolerance)
//! 2. Each boundary segment sweeps one band of `segments` faces
//! 3. Partial revolutions close the band with a start cap at `θ = 0`
//!    (facing −Z) and an end cap at `θ = angle`
//!
//! A band face is a trapezoid (both swept edges are parallel), so it is
//! planar for any profile segment. An endpoint on the axis sweeps to a single
//! point and turns its faces into triangles; a segment lying on the axis
//! sweeps nothing.

use config::constants::{DEFAULT_SEGMENTS, FULL_REVOLUTION_DEGREES, MAX_SEGMENTS, MIN_SEGMENTS};
use glam::{DVec2, DVec3};
use rayon::prelude::*;

use crate::error::{KernelError, KernelResult};
use crate::plane::EmbeddingPlane;
use crate::polygon::Face;
use crate::precision::Precision;
use crate::region::{BoundarySegment, PlanarRegion};
use crate::solid::Solid;
use crate::transform::forward_3d;

/// Parameters for rotate extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateExtrudeParams {
    /// Rotation angle in degrees; 360 or more is a full revolution
    pub angle: f64,
    /// Number of segments around the revolution
    pub segments: u32,
}

impl Default for RotateExtrudeParams {
    fn default() -> Self {
        Self {
            angle: FULL_REVOLUTION_DEGREES,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Revolves a region around the Y axis.
///
/// The segment count may not exceed [`MAX_SEGMENTS`]; use
/// [`Extruder`](super::Extruder) for a different budget.
///
/// # Errors
///
/// - `InvalidParameter` for an angle that is not positive and finite, a
///   segment count outside the budget, or a profile reaching `x < 0`
/// - `DegenerateGeometry` if a cap or band face fails validation
///
/// # Example
///
/// ```rust
/// use brep_sweep::ops::extrude::{rotate_extrude, RotateExtrudeParams};
/// use brep_sweep::{Polygon2D, Precision};
/// use glam::DVec2;
///
/// let precision = Precision::default();
/// // A square profile two units off the axis makes a square torus.
/// let mut profile = Polygon2D::square(DVec2::ONE, false, precision).unwrap();
/// profile.translate(DVec2::new(2.0, 0.0));
///
/// let params = RotateExtrudeParams { angle: 360.0, segments: 16 };
/// let torus = rotate_extrude(&profile, &params, &precision).unwrap();
/// assert_eq!(torus.face_count(), 4 * 16);
/// ```
pub fn rotate_extrude<R>(region: &R, params: &RotateExtrudeParams, precision: &Precision) -> KernelResult<Solid>
where
    R: PlanarRegion + ?Sized,
{
    rotate_extrude_within(region, params, MAX_SEGMENTS, precision)
}

/// [`rotate_extrude`] with a caller-chosen segment budget.
pub(super) fn rotate_extrude_within<R>(
    region: &R,
    params: &RotateExtrudeParams,
    max_segments: u32,
    precision: &Precision,
) -> KernelResult<Solid>
where
    R: PlanarRegion + ?Sized,
{
    let RotateExtrudeParams { angle, segments } = *params;
    if !angle.is_finite() || angle <= 0.0 {
        return Err(KernelError::invalid_parameter(
            "angle",
            format!("must be positive and finite, got {angle}"),
        ));
    }
    if segments < MIN_SEGMENTS || segments > max_segments {
        return Err(KernelError::invalid_parameter(
            "segments",
            format!("must be in {MIN_SEGMENTS}..={max_segments}, got {segments}"),
        ));
    }

    let paths = region.boundary_paths();
    let segments_2d: Vec<BoundarySegment> = paths.iter().flat_map(|p| p.segments().iter().copied()).collect();
    if let Some(bad) = segments_2d
        .iter()
        .flat_map(|s| [s.start, s.end])
        .find(|p| p.x < -precision.epsilon())
    {
        return Err(KernelError::invalid_parameter(
            "region",
            format!("profile point {bad} lies on the negative side of the rotation axis"),
        ));
    }

    let full = angle >= FULL_REVOLUTION_DEGREES;
    let sweep = Sweep::new(if full { FULL_REVOLUTION_DEGREES } else { angle }, segments, full);

    let caps = if full {
        Vec::new()
    } else {
        end_caps(region, &sweep, precision)?
    };

    let bands = segments_2d
        .par_iter()
        .map(|segment| band(segment, &sweep, precision))
        .collect::<KernelResult<Vec<Vec<Face>>>>()?;
    let sides: Vec<Face> = bands.into_iter().flatten().collect();

    tracing::debug!(
        angle,
        segments,
        full,
        caps = caps.len(),
        sides = sides.len(),
        "rotational extrusion"
    );

    Ok(caps.into_iter().chain(sides).collect())
}

/// Start caps for every sub-area, then end caps for every sub-area.
fn end_caps<R>(region: &R, sweep: &Sweep, precision: &Precision) -> KernelResult<Vec<Face>>
where
    R: PlanarRegion + ?Sized,
{
    let plane = EmbeddingPlane::xy(*precision);
    let (cos, sin) = sweep.steps[sweep.steps.len() - 1];
    let to_end = forward_3d(move |v: DVec3| DVec3::new(v.x * cos, v.y, v.x * sin));

    let areas = region.convex_sub_areas()?;
    let pairs = areas
        .par_iter()
        .map(|area| {
            let lifted = plane.embed_area(area)?;
            let end = lifted.transform(&to_end, precision)?;
            Ok((lifted.reverse(), end))
        })
        .collect::<KernelResult<Vec<(Face, Face)>>>()?;

    let (starts, ends): (Vec<Face>, Vec<Face>) = pairs.into_iter().unzip();
    Ok(starts.into_iter().chain(ends).collect())
}

/// The faces swept by one boundary segment.
fn band(segment: &BoundarySegment, sweep: &Sweep, precision: &Precision) -> KernelResult<Vec<Face>> {
    let (p0, p1) = (segment.start, segment.end);
    let axis0 = precision.eq_zero(p0.x);
    let axis1 = precision.eq_zero(p1.x);
    if axis0 && axis1 {
        return Ok(Vec::new());
    }

    (0..sweep.count())
        .map(|i| {
            let mut vertices = Vec::with_capacity(4);
            vertices.push(sweep.point(p0, i));
            vertices.push(sweep.point(p1, i));
            if !axis1 {
                vertices.push(sweep.point(p1, i + 1));
            }
            if !axis0 {
                vertices.push(sweep.point(p0, i + 1));
            }
            Face::from_vertices(vertices, precision)
        })
        .collect()
}

/// Precomputed `(cos, sin)` of every step angle.
///
/// Step `0` is exactly `θ = 0`. The last step is exactly the sweep angle,
/// or wraps back to step `0` for a full revolution, so neighbouring faces
/// share bitwise identical vertices.
struct Sweep {
    steps: Vec<(f64, f64)>,
}

impl Sweep {
    fn new(degrees: f64, segments: u32, full: bool) -> Self {
        let n = segments as usize;
        let steps = (0..=n)
            .map(|i| {
                let theta = if i == n {
                    if full {
                        0.0
                    } else {
                        degrees.to_radians()
                    }
                } else {
                    (degrees * i as f64 / n as f64).to_radians()
                };
                (theta.cos(), theta.sin())
            })
            .collect();
        Self { steps }
    }

    /// Number of bands.
    fn count(&self) -> usize {
        self.steps.len() - 1
    }

    fn point(&self, p: DVec2, step: usize) -> DVec3 {
        let (cos, sin) = self.steps[step];
        DVec3::new(p.x * cos, p.y, p.x * sin)
    }
}
