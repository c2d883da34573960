//! # Pointwise Transforms
//!
//! Forward-only point mappings used to bake relocated or scaled copies of
//! geometry.
//!
//! A [`PointTransform`] only maps points forward. It has no inverse: nothing
//! in the kernel ever undoes a transform, so the trait does not offer one.

use glam::{DVec2, DVec3};

/// A mapping from points to points.
pub trait PointTransform<P> {
    /// Maps one point.
    fn apply(&self, point: P) -> P;

    /// Whether the mapping keeps the handedness of space.
    ///
    /// Faces mapped through a transform that does not are reversed so they
    /// keep facing outward.
    fn preserves_orientation(&self) -> bool {
        true
    }
}

impl<P, T> PointTransform<P> for &T
where
    T: PointTransform<P> + ?Sized,
{
    fn apply(&self, point: P) -> P {
        (**self).apply(point)
    }

    fn preserves_orientation(&self) -> bool {
        (**self).preserves_orientation()
    }
}

/// A transform backed by a caller-supplied closure.
///
/// Always reports that it preserves orientation.
#[derive(Clone, Copy)]
pub struct FnTransform<F> {
    func: F,
}

impl<F> std::fmt::Debug for FnTransform<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTransform").finish_non_exhaustive()
    }
}

impl<P, F> PointTransform<P> for FnTransform<F>
where
    F: Fn(P) -> P,
{
    fn apply(&self, point: P) -> P {
        (self.func)(point)
    }
}

/// Wraps a closure as a forward-only transform.
///
/// # Examples
/// ```
/// use brep_sweep::transform::{forward, PointTransform};
/// use glam::DVec3;
///
/// let shift = forward(|v: DVec3| v + DVec3::X);
/// assert_eq!(shift.apply(DVec3::ZERO), DVec3::X);
/// assert!(shift.preserves_orientation());
/// ```
pub fn forward<P, F>(func: F) -> FnTransform<F>
where
    F: Fn(P) -> P,
{
    FnTransform { func }
}

/// [`forward`] pinned to 2D points, for closures whose argument type would
/// otherwise need an annotation.
pub fn forward_2d<F>(func: F) -> FnTransform<F>
where
    F: Fn(DVec2) -> DVec2,
{
    FnTransform { func }
}

/// [`forward`] pinned to 3D points.
pub fn forward_3d<F>(func: F) -> FnTransform<F>
where
    F: Fn(DVec3) -> DVec3,
{
    FnTransform { func }
}

/// The linear sweep's top-cap mapping `(x, y, z) -> (x·scale, y·scale, height)`.
///
/// # Examples
/// ```
/// use brep_sweep::transform::{scale_and_lift, PointTransform};
/// use glam::DVec3;
///
/// let lift = scale_and_lift(0.5, 10.0);
/// assert_eq!(lift.apply(DVec3::new(2.0, 4.0, 0.0)), DVec3::new(1.0, 2.0, 10.0));
/// ```
pub fn scale_and_lift(scale: f64, height: f64) -> impl PointTransform<DVec3> + Copy + Send + Sync {
    forward_3d(move |v: DVec3| DVec3::new(v.x * scale, v.y * scale, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_2d_applies_closure() {
        let mirror = forward_2d(|p| DVec2::new(p.y, p.x));
        assert_eq!(mirror.apply(DVec2::new(1.0, 2.0)), DVec2::new(2.0, 1.0));
        // Closure transforms always claim to keep orientation.
        assert!(mirror.preserves_orientation());
    }

    #[test]
    fn test_reference_forwards() {
        let lift = scale_and_lift(2.0, 3.0);
        let by_ref: &dyn PointTransform<DVec3> = &lift;
        assert_eq!(by_ref.apply(DVec3::new(1.0, 1.0, 9.0)), DVec3::new(2.0, 2.0, 3.0));
        assert!((&by_ref).preserves_orientation());
    }

    #[test]
    fn test_scale_and_lift_flattens_z() {
        let lift = scale_and_lift(1.0, 0.0);
        assert_eq!(lift.apply(DVec3::new(4.0, 5.0, 6.0)), DVec3::new(4.0, 5.0, 0.0));
    }
}
