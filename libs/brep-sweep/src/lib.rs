//! # B-rep Sweep
//!
//! Closed boundary representations built by sweeping planar regions.
//!
//! ## Architecture
//!
//! ```text
//! PlanarRegion ─┬─ convex sub-areas ──→ caps ──┐
//!               └─ boundary paths ───→ sides ──┴→ Solid ─→ triangles ─→ STL
//! ```
//!
//! Every face is a [`ConvexPolygon`] that passed the validating builder
//! under one explicit [`Precision`]. A sweep either returns a complete,
//! closed [`Solid`] or the first error; it never returns part of one.
//!
//! ## Sweeps
//!
//! - **Linear**: along +Z to a height, with an optional scale of the top cap
//! - **Rotational**: around the Y axis, full or partial, in a given number
//!   of steps
//!
//! ## Usage
//!
//! ```rust
//! use brep_sweep::{extrude, extrude_rotate, stl, Polygon2D, Precision};
//! use glam::DVec2;
//!
//! let precision = Precision::default();
//! let square = Polygon2D::square(DVec2::ONE, false, precision).unwrap();
//!
//! let cube = extrude(&square, 1.0, 1.0).unwrap();
//! assert_eq!(cube.face_count(), 6);
//!
//! let mut profile = square.clone();
//! profile.translate(DVec2::new(2.0, 0.0));
//! let ring = extrude_rotate(&profile, 360.0, 24).unwrap();
//! assert!(ring.is_closed(&precision));
//!
//! let (text, report) = stl::render_stl(&cube.triangulate()).unwrap();
//! assert_eq!(report.written, 12);
//! assert!(text.ends_with("endsolid Solid\n"));
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod error;
pub mod ops;
pub mod plane;
pub mod polygon;
pub mod precision;
pub mod region;
pub mod scene;
pub mod solid;
pub mod stl;
pub mod transform;

pub use error::{DegenerateCheck, KernelError, KernelResult};
pub use ops::extrude::{linear_extrude, rotate_extrude, Extruder, LinearExtrudeParams, RotateExtrudeParams};
pub use plane::{Classification, EmbeddingPlane, Plane};
pub use polygon::{ConvexPolygon, Face};
pub use precision::Precision;
pub use region::{BoundaryPath, BoundarySegment, ConvexArea, PlanarRegion, Polygon2D};
pub use scene::{Form, RenderTarget, SceneTransform};
pub use solid::Solid;
pub use transform::PointTransform;

/// Linear sweep with default settings.
///
/// See [`Extruder::extrude`].
pub fn extrude<R>(region: &R, height: f64, scale: f64) -> KernelResult<Solid>
where
    R: PlanarRegion + ?Sized,
{
    Extruder::default().extrude(region, height, scale)
}

/// Rotational sweep with default settings.
///
/// See [`Extruder::extrude_rotate`].
pub fn extrude_rotate<R>(region: &R, angle: f64, segments: u32) -> KernelResult<Solid>
where
    R: PlanarRegion + ?Sized,
{
    Extruder::default().extrude_rotate(region, angle, segments)
}
