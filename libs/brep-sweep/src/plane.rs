//! # Planes
//!
//! Oriented planes with point classification, and embedding planes that lift
//! 2D region coordinates into 3D.

use glam::{DVec2, DVec3};

use crate::error::{DegenerateCheck, KernelError, KernelResult};
use crate::polygon::ConvexPolygon;
use crate::precision::Precision;
use crate::region::ConvexArea;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Point is in front of plane (positive side).
    Front,
    /// Point is behind plane (negative side).
    Back,
    /// Point is on the plane within tolerance.
    Coplanar,
}

// =============================================================================
// PLANE
// =============================================================================

/// An oriented plane defined by a unit normal and distance from origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (unit length).
    normal: DVec3,
    /// Distance from origin along normal.
    w: f64,
}

impl Plane {
    /// Creates a plane through `point` facing `normal`.
    ///
    /// The normal is normalized; a normal of (near) zero length is rejected.
    pub fn from_normal_and_point(normal: DVec3, point: DVec3, precision: &Precision) -> KernelResult<Self> {
        let length = normal.length();
        if !length.is_finite() || precision.eq_zero(length) {
            return Err(KernelError::degenerate(
                DegenerateCheck::ZeroArea,
                "plane normal has zero length",
            ));
        }
        let normal = normal / length;
        Ok(Self {
            normal,
            w: normal.dot(point),
        })
    }

    /// Creates a plane from three points in counter-clockwise order when
    /// viewed from the front.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3, precision: &Precision) -> KernelResult<Self> {
        Self::from_normal_and_point((b - a).cross(c - a), a, precision)
    }

    /// Unit normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Signed distance of the origin's projection along the normal.
    pub fn w(&self) -> f64 {
        self.w
    }

    /// The point of the plane closest to the origin.
    pub fn origin(&self) -> DVec3 {
        self.normal * self.w
    }

    /// Same plane, facing the other way.
    pub fn reverse(&self) -> Plane {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Signed distance from point to plane.
    ///
    /// Positive = front, negative = back, zero = on plane.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point relative to this plane.
    pub fn classify_point(&self, point: DVec3, precision: &Precision) -> Classification {
        match precision.sign(self.signed_distance(point)) {
            1 => Classification::Front,
            -1 => Classification::Back,
            _ => Classification::Coplanar,
        }
    }

    /// True when the point lies on the plane within tolerance.
    pub fn contains(&self, point: DVec3, precision: &Precision) -> bool {
        self.classify_point(point, precision) == Classification::Coplanar
    }
}

// =============================================================================
// EMBEDDING PLANE
// =============================================================================

/// A coordinate frame mapping 2D points onto a plane in 3D.
///
/// # Examples
/// ```
/// use brep_sweep::{EmbeddingPlane, Precision};
/// use glam::{DVec2, DVec3};
///
/// let plane = EmbeddingPlane::xy(Precision::default());
/// assert_eq!(plane.to_space(DVec2::new(2.0, 3.0)), DVec3::new(2.0, 3.0, 0.0));
/// assert_eq!(plane.to_subspace(DVec3::new(2.0, 3.0, 7.0)), DVec2::new(2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddingPlane {
    origin: DVec3,
    u: DVec3,
    v: DVec3,
    normal: DVec3,
    precision: Precision,
}

impl EmbeddingPlane {
    /// Creates a frame from an origin and two basis vectors.
    ///
    /// Both basis vectors must be unit length and mutually orthogonal within
    /// tolerance.
    pub fn new(origin: DVec3, u: DVec3, v: DVec3, precision: Precision) -> KernelResult<Self> {
        if !precision.eq(u.length(), 1.0) {
            return Err(KernelError::invalid_parameter("u", format!("basis vector {u} is not unit length")));
        }
        if !precision.eq(v.length(), 1.0) {
            return Err(KernelError::invalid_parameter("v", format!("basis vector {v} is not unit length")));
        }
        if !precision.eq_zero(u.dot(v)) {
            return Err(KernelError::invalid_parameter("v", format!("basis vectors {u} and {v} are not orthogonal")));
        }
        Ok(Self {
            origin,
            u,
            v,
            normal: u.cross(v),
            precision,
        })
    }

    /// The canonical frame: `(x, y) -> (x, y, 0)`.
    pub fn xy(precision: Precision) -> Self {
        Self {
            origin: DVec3::ZERO,
            u: DVec3::X,
            v: DVec3::Y,
            normal: DVec3::Z,
            precision,
        }
    }

    /// Frame origin.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// First basis vector (image of the 2D x axis).
    pub fn u(&self) -> DVec3 {
        self.u
    }

    /// Second basis vector (image of the 2D y axis).
    pub fn v(&self) -> DVec3 {
        self.v
    }

    /// `u × v`; counter-clockwise 2D loops face this way once lifted.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// The precision context this frame was built with.
    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    /// The oriented plane spanned by the frame.
    pub fn plane(&self) -> Plane {
        Plane {
            normal: self.normal,
            w: self.normal.dot(self.origin),
        }
    }

    /// Lifts a 2D point into 3D.
    pub fn to_space(&self, point: DVec2) -> DVec3 {
        self.origin + self.u * point.x + self.v * point.y
    }

    /// Projects a 3D point onto the frame's 2D coordinates.
    pub fn to_subspace(&self, point: DVec3) -> DVec2 {
        let offset = point - self.origin;
        DVec2::new(offset.dot(self.u), offset.dot(self.v))
    }

    /// Builds the face covering a convex sub-area, lifted into this plane.
    ///
    /// The face keeps the area's counter-clockwise winding, so it faces
    /// [`EmbeddingPlane::normal`].
    pub fn embed_area(&self, area: &ConvexArea) -> KernelResult<ConvexPolygon> {
        let vertices = area.vertices().iter().map(|p| self.to_space(*p)).collect();
        ConvexPolygon::from_vertices(vertices, &self.precision)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_plane_from_points() {
        let precision = Precision::default();
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y, &precision).unwrap();

        assert_abs_diff_eq!(plane.normal().z, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(plane.normal().x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(plane.w(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_plane_rejects_collinear_points() {
        let precision = Precision::default();
        let result = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, &precision);
        assert!(result.is_err());
    }

    #[test]
    fn test_plane_classify_point() {
        let precision = Precision::default();
        let plane = Plane::from_normal_and_point(DVec3::Z, DVec3::ZERO, &precision).unwrap();

        assert_eq!(plane.classify_point(DVec3::Z, &precision), Classification::Front);
        assert_eq!(plane.classify_point(-DVec3::Z, &precision), Classification::Back);
        assert_eq!(plane.classify_point(DVec3::new(1.0, 1.0, 1e-9), &precision), Classification::Coplanar);
        assert!(plane.contains(DVec3::new(5.0, -2.0, 0.0), &precision));
    }

    #[test]
    fn test_plane_reverse() {
        let precision = Precision::default();
        let plane = Plane::from_normal_and_point(DVec3::Z * 3.0, DVec3::new(0.0, 0.0, 5.0), &precision).unwrap();
        let reversed = plane.reverse();

        assert_abs_diff_eq!(reversed.normal().z, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(reversed.w(), -5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(reversed.origin().z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_embedding_plane_validates_basis() {
        let precision = Precision::default();
        assert!(EmbeddingPlane::new(DVec3::ZERO, DVec3::X * 2.0, DVec3::Y, precision).is_err());
        assert!(EmbeddingPlane::new(DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0).normalize(), precision).is_err());
        assert!(EmbeddingPlane::new(DVec3::ZERO, DVec3::X, DVec3::Z, precision).is_ok());
    }

    #[test]
    fn test_embedding_plane_round_trip_on_tilted_frame() {
        let precision = Precision::default();
        let frame = EmbeddingPlane::new(DVec3::new(1.0, 2.0, 3.0), DVec3::Y, DVec3::Z, precision).unwrap();
        let lifted = frame.to_space(DVec2::new(4.0, 5.0));

        assert_eq!(lifted, DVec3::new(1.0, 6.0, 8.0));
        assert_eq!(frame.normal(), DVec3::X);
        assert!(frame.plane().contains(lifted, &precision));
        assert_abs_diff_eq!(frame.to_subspace(lifted).x, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(frame.to_subspace(lifted).y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_embed_area_faces_normal() {
        let precision = Precision::default();
        let area = ConvexArea::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 2.0),
        ]);
        let face = EmbeddingPlane::xy(precision).embed_area(&area).unwrap();

        assert_eq!(face.vertex_count(), 3);
        assert_abs_diff_eq!(face.normal().z, 1.0, epsilon = 1e-12);
    }
}
