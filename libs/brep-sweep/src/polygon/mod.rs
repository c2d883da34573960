//! # Convex Polygon Faces
//!
//! Planar convex polygons with an associated plane. Every face in a
//! [`Solid`](crate::Solid) is one of these; the only way to obtain one is the
//! validating builder [`ConvexPolygon::from_vertices`].

use std::f64::consts::TAU;

use config::constants::TURNING_TOLERANCE;
use glam::DVec3;

use crate::error::{DegenerateCheck, KernelError, KernelResult};
use crate::plane::Plane;
use crate::precision::Precision;
use crate::stl::Triangle;
use crate::transform::PointTransform;


/// A planar convex face.
///
/// The winding order defines the outward normal by the right-hand rule.
/// Faces are values: [`reverse`](Self::reverse) and
/// [`transform`](Self::transform) return new faces.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    /// Vertices in counter-clockwise order seen from the front.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
}

/// A boundary face of a solid.
pub type Face = ConvexPolygon;

impl ConvexPolygon {
    /// Builds a face from an ordered vertex loop.
    ///
    /// The loop must have at least three vertices, no two consecutive
    /// vertices may coincide, it must enclose area, lie on one plane and turn
    /// the same way at every vertex. Straight (180°) vertices are accepted.
    ///
    /// # Examples
    /// ```
    /// use brep_sweep::{ConvexPolygon, DegenerateCheck, Precision};
    /// use glam::DVec3;
    ///
    /// let precision = Precision::default();
    /// let face = ConvexPolygon::from_vertices(vec![DVec3::ZERO, DVec3::X, DVec3::Y], &precision).unwrap();
    /// assert_eq!(face.normal(), DVec3::Z);
    ///
    /// let err = ConvexPolygon::from_vertices(vec![DVec3::ZERO, DVec3::X, DVec3::X * 2.0], &precision)
    ///     .unwrap_err();
    /// assert_eq!(err.degenerate_check(), Some(DegenerateCheck::ZeroArea));
    /// ```
    pub fn from_vertices(vertices: Vec<DVec3>, precision: &Precision) -> KernelResult<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(KernelError::degenerate(
                DegenerateCheck::TooFewVertices,
                format!("{n} vertices, need at least 3"),
            ));
        }
        if let Some(bad) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(KernelError::invalid_parameter(
                "vertices",
                format!("vertex {bad} is not finite: {}", vertices[bad]),
            ));
        }

        for i in 0..n {
            let j = (i + 1) % n;
            if precision.points_eq(vertices[i], vertices[j]) {
                return Err(KernelError::degenerate(
                    DegenerateCheck::CoincidentVertices,
                    format!("vertices {i} and {j} coincide at {}", vertices[i]),
                ));
            }
        }

        let newell = newell_normal(&vertices);
        let longest = (0..n)
            .map(|i| vertices[i].distance(vertices[(i + 1) % n]))
            .fold(0.0, f64::max);
        if precision.is_sliver(newell.length(), longest) {
            return Err(KernelError::degenerate(
                DegenerateCheck::ZeroArea,
                format!("{n} vertices enclose no area"),
            ));
        }

        let plane = Plane::from_normal_and_point(newell, centroid_of(&vertices), precision)?;
        for (i, v) in vertices.iter().enumerate() {
            if !plane.contains(*v, precision) {
                return Err(KernelError::degenerate(
                    DegenerateCheck::NonCoplanar,
                    format!("vertex {i} is {:e} off the face plane", plane.signed_distance(*v)),
                ));
            }
        }

        check_convex(&vertices, plane.normal(), precision)?;

        Ok(Self { vertices, plane })
    }

    /// Face vertices in winding order.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The plane containing the face, facing along the outward normal.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Unit outward normal.
    pub fn normal(&self) -> DVec3 {
        self.plane.normal()
    }

    /// Average of the vertices.
    pub fn centroid(&self) -> DVec3 {
        centroid_of(&self.vertices)
    }

    /// Enclosed area.
    pub fn area(&self) -> f64 {
        newell_normal(&self.vertices).length() * 0.5
    }

    /// Directed edges `(start, end)` in winding order, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (DVec3, DVec3)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// The same face with opposite winding and normal.
    pub fn reverse(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self {
            vertices,
            plane: self.plane.reverse(),
        }
    }

    /// Maps every vertex through `transform` and validates the result.
    ///
    /// Vertex order is kept when the transform preserves orientation and
    /// reversed otherwise, so the face keeps facing outward.
    pub fn transform<T>(&self, transform: &T, precision: &Precision) -> KernelResult<Self>
    where
        T: PointTransform<DVec3> + ?Sized,
    {
        let mut vertices: Vec<DVec3> = self.vertices.iter().map(|v| transform.apply(*v)).collect();
        if !transform.preserves_orientation() {
            vertices.reverse();
        }
        Self::from_vertices(vertices, precision)
    }

    /// Splits the face into a fan of triangles around the first vertex.
    ///
    /// Every triangle carries the face normal.
    pub fn triangulate(&self) -> Vec<Triangle> {
        let normal = self.normal();
        let first = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(|pair| Triangle::new(first, pair[0], pair[1], normal))
            .collect()
    }
}

/// Area-weighted normal of a vertex loop (twice the enclosed area in length).
fn newell_normal(vertices: &[DVec3]) -> DVec3 {
    let origin = vertices[0];
    let n = vertices.len();
    (1..n - 1).fold(DVec3::ZERO, |acc, i| {
        acc + (vertices[i] - origin).cross(vertices[i + 1] - origin)
    })
}

fn centroid_of(vertices: &[DVec3]) -> DVec3 {
    vertices.iter().copied().sum::<DVec3>() / vertices.len() as f64
}

/// Every turn must go the same way as `normal`, and the loop must turn
/// exactly once.
fn check_convex(vertices: &[DVec3], normal: DVec3, precision: &Precision) -> KernelResult<()> {
    let n = vertices.len();
    let mut turning = 0.0;
    for i in 0..n {
        let prev = vertices[(i + n - 1) % n];
        let cur = vertices[i];
        let next = vertices[(i + 1) % n];
        let e1 = cur - prev;
        let e2 = next - cur;
        let lengths = e1.length() * e2.length();
        let sin = e1.cross(e2).dot(normal) / lengths;
        let cos = e1.dot(e2) / lengths;

        if sin < -precision.epsilon() {
            return Err(KernelError::degenerate(
                DegenerateCheck::NonConvex,
                format!("reflex turn at vertex {i}"),
            ));
        }
        if precision.eq_zero(sin) && cos < 0.0 {
            return Err(KernelError::degenerate(
                DegenerateCheck::NonConvex,
                format!("loop folds back on itself at vertex {i}"),
            ));
        }
        turning += sin.atan2(cos);
    }

    if turning > TAU + TURNING_TOLERANCE {
        return Err(KernelError::degenerate(
            DegenerateCheck::NonConvex,
            format!("loop winds {:.3} times around its normal", turning / TAU),
        ));
    }
    Ok(())
}
