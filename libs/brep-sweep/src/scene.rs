//! # Scene Nodes
//!
//! Placement of solids in a host scene. A [`SceneTransform`] is plain data
//! composed in one fixed order:
//!
//! ```text
//! M = T · Rz · Ry · Rx · S
//! ```
//!
//! so a point is scaled first, then rotated about X, Y and Z, then
//! translated. The order is not commutative and is kept as is.
//!
//! Hosts draw a [`Form`] by implementing [`RenderTarget`]; the kernel does
//! not depend on any UI toolkit.

use glam::{DMat4, DVec3};

use crate::error::{KernelError, KernelResult};
use crate::polygon::Face;
use crate::precision::Precision;
use crate::solid::Solid;
use crate::transform::PointTransform;

/// Compound placement: translation, rotations in degrees and a per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransform {
    /// Translation applied last.
    pub translate: DVec3,
    /// Rotation about X in degrees.
    pub rotate_x: f64,
    /// Rotation about Y in degrees.
    pub rotate_y: f64,
    /// Rotation about Z in degrees.
    pub rotate_z: f64,
    /// Per-axis scale applied first.
    pub scale: DVec3,
}

impl Default for SceneTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl SceneTransform {
    /// No translation, no rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            translate: DVec3::ZERO,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            scale: DVec3::ONE,
        }
    }

    /// Composes `T · Rz · Ry · Rx · S`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_sweep::scene::SceneTransform;
    /// use glam::DVec3;
    ///
    /// let node = SceneTransform {
    ///     translate: DVec3::new(10.0, 0.0, 0.0),
    ///     scale: DVec3::splat(2.0),
    ///     ..SceneTransform::identity()
    /// };
    /// // Scaled first, then moved.
    /// assert_eq!(node.apply(DVec3::X), DVec3::new(12.0, 0.0, 0.0));
    /// ```
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translate)
            * DMat4::from_rotation_z(self.rotate_z.to_radians())
            * DMat4::from_rotation_y(self.rotate_y.to_radians())
            * DMat4::from_rotation_x(self.rotate_x.to_radians())
            * DMat4::from_scale(self.scale)
    }

    /// Maps one point through the composed matrix.
    pub fn apply(&self, point: DVec3) -> DVec3 {
        self.to_matrix().transform_point3(point)
    }

    /// The inverse matrix.
    ///
    /// # Errors
    ///
    /// `Unsupported` when the determinant is zero within `precision`: the
    /// placement flattens space and has no inverse.
    pub fn inverse_matrix(&self, precision: &Precision) -> KernelResult<DMat4> {
        let matrix = self.to_matrix();
        let determinant = matrix.determinant();
        if !determinant.is_finite() || precision.eq_zero(determinant) {
            return Err(KernelError::unsupported(format!(
                "scene transform with scale {} has determinant {determinant:e} and no inverse",
                self.scale
            )));
        }
        Ok(matrix.inverse())
    }

    /// Places every face of `solid`.
    pub fn apply_to_solid(&self, solid: &Solid, precision: &Precision) -> KernelResult<Solid> {
        solid.transform(self, precision)
    }
}

impl PointTransform<DVec3> for SceneTransform {
    fn apply(&self, point: DVec3) -> DVec3 {
        SceneTransform::apply(self, point)
    }

    /// An odd number of negative scale components mirrors space.
    fn preserves_orientation(&self) -> bool {
        self.scale.x * self.scale.y * self.scale.z > 0.0
    }
}

/// A host surface that can draw faces.
pub trait RenderTarget {
    /// Draws one face, already in world coordinates.
    fn draw_face(&mut self, face: &Face);
}

/// A scene node: one placement shared by its attached solids.
#[derive(Debug, Clone, Default)]
pub struct Form {
    /// Placement of every attached solid.
    pub transform: SceneTransform,
    solids: Vec<Solid>,
}

impl Form {
    /// Creates an empty node.
    pub fn new(transform: SceneTransform) -> Self {
        Self {
            transform,
            solids: Vec::new(),
        }
    }

    /// Attaches a solid in local coordinates.
    pub fn attach(&mut self, solid: Solid) {
        self.solids.push(solid);
    }

    /// Attached solids, in local coordinates.
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// Every face of every attached solid, placed by the node transform.
    pub fn world_faces(&self, precision: &Precision) -> KernelResult<Vec<Face>> {
        let mut faces = Vec::new();
        for solid in &self.solids {
            faces.extend(self.transform.apply_to_solid(solid, precision)?.into_faces());
        }
        Ok(faces)
    }

    /// Hands every placed face to `target`.
    ///
    /// Nothing is drawn if any face fails to place.
    pub fn draw<T>(&self, target: &mut T, precision: &Precision) -> KernelResult<usize>
    where
        T: RenderTarget + ?Sized,
    {
        let faces = self.world_faces(precision)?;
        for face in &faces {
            target.draw_face(face);
        }
        Ok(faces.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::extrude::{linear_extrude, LinearExtrudeParams};
    use crate::region::Polygon2D;
    use approx::assert_abs_diff_eq;
    use glam::DVec2;

    fn cube() -> Solid {
        let square = Polygon2D::square(DVec2::ONE, false, Precision::default()).unwrap();
        linear_extrude(&square, &LinearExtrudeParams::default(), &Precision::default()).unwrap()
    }

    #[derive(Default)]
    struct Collector {
        faces: Vec<Face>,
    }

    impl RenderTarget for Collector {
        fn draw_face(&mut self, face: &Face) {
            self.faces.push(face.clone());
        }
    }

    #[test]
    fn test_identity() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(SceneTransform::identity().apply(p), p);
        assert_eq!(SceneTransform::default().to_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn test_order_scale_rotate_translate() {
        let node = SceneTransform {
            translate: DVec3::new(0.0, 0.0, 5.0),
            rotate_z: 90.0,
            scale: DVec3::new(2.0, 1.0, 1.0),
            ..SceneTransform::identity()
        };
        // (1, 0, 0) -> scale (2, 0, 0) -> rotZ (0, 2, 0) -> translate (0, 2, 5)
        let p = node.apply(DVec3::X);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotations_apply_x_first() {
        let node = SceneTransform {
            rotate_x: 90.0,
            rotate_z: 90.0,
            ..SceneTransform::identity()
        };
        // Y -> rotX -> Z -> rotZ -> Z
        let p = node.apply(DVec3::Y);
        assert_abs_diff_eq!(p.z, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_round_trip() {
        let node = SceneTransform {
            translate: DVec3::new(1.0, -2.0, 3.0),
            rotate_y: 30.0,
            scale: DVec3::new(2.0, 3.0, 0.5),
            ..SceneTransform::identity()
        };
        let p = DVec3::new(0.3, 0.7, -1.1);
        let back = node.inverse_matrix(&Precision::default()).unwrap().transform_point3(node.apply(p));
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-12);
        assert_abs_diff_eq!(back.z, p.z, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_scale_has_no_inverse() {
        let node = SceneTransform {
            scale: DVec3::new(1.0, 0.0, 1.0),
            ..SceneTransform::identity()
        };
        assert!(matches!(
            node.inverse_matrix(&Precision::default()),
            Err(KernelError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_near_flat_scale_has_no_inverse() {
        let precision = Precision::default();
        let node = SceneTransform {
            rotate_z: 45.0,
            scale: DVec3::new(1.0, 1e-12, 1.0),
            ..SceneTransform::identity()
        };
        assert!(matches!(node.inverse_matrix(&precision), Err(KernelError::Unsupported { .. })));

        let small = SceneTransform {
            scale: DVec3::splat(0.01),
            ..SceneTransform::identity()
        };
        assert!(small.inverse_matrix(&precision).is_ok());
    }

    #[test]
    fn test_mirror_keeps_faces_outward() {
        let mirror = SceneTransform {
            scale: DVec3::new(-1.0, 1.0, 1.0),
            ..SceneTransform::identity()
        };
        assert!(!PointTransform::preserves_orientation(&mirror));

        let placed = mirror.apply_to_solid(&cube(), &Precision::default()).unwrap();
        assert_abs_diff_eq!(placed.volume(), 1.0, epsilon = 1e-12);
        assert!(placed.is_closed(&Precision::default()));
    }

    #[test]
    fn test_form_draws_world_faces() {
        let mut form = Form::new(SceneTransform {
            translate: DVec3::new(10.0, 0.0, 0.0),
            ..SceneTransform::identity()
        });
        form.attach(cube());
        form.attach(cube());

        let mut target = Collector::default();
        let drawn = form.draw(&mut target, &Precision::default()).unwrap();

        assert_eq!(drawn, 12);
        assert_eq!(form.solids().len(), 2);
        assert!(target.faces.iter().all(|f| f.centroid().x >= 10.0));
    }
}
