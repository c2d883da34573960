//! # Precision Context
//!
//! The single tolerance every predicate in the kernel compares against.
//!
//! A `Precision` is an immutable `Copy` value. It is handed to each
//! constructor or operation explicitly, so kernels with different tolerances
//! can run side by side.

use std::cmp::Ordering;

use config::constants::{approx_equal, approx_zero, KernelSettings, DEFAULT_TOLERANCE};
use glam::{DVec2, DVec3};

use crate::error::{KernelError, KernelResult};

/// Tolerance-based comparison policy for coordinates and points.
///
/// # Examples
/// ```
/// use brep_sweep::Precision;
/// use glam::DVec3;
///
/// let precision = Precision::default();
/// assert!(precision.eq(1.0, 1.0 + 1e-9));
/// assert!(precision.points_eq(DVec3::ZERO, DVec3::splat(1e-9)));
/// assert!(!precision.points_eq(DVec3::ZERO, DVec3::X));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    epsilon: f64,
}

impl Precision {
    /// Creates a precision context with the given epsilon.
    ///
    /// Fails when `epsilon` is not a positive finite number.
    pub fn new(epsilon: f64) -> KernelResult<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(KernelError::invalid_parameter(
                "epsilon",
                format!("must be positive and finite, got {epsilon}"),
            ));
        }
        Ok(Self { epsilon })
    }

    /// Takes the tolerance of an already validated settings snapshot.
    pub fn from_settings(settings: &KernelSettings) -> KernelResult<Self> {
        Self::new(settings.tolerance)
    }

    /// The tolerance value.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `|a - b| <= epsilon`.
    #[inline]
    pub fn eq(&self, a: f64, b: f64) -> bool {
        approx_equal(a, b, self.epsilon)
    }

    /// `|value| <= epsilon`.
    #[inline]
    pub fn eq_zero(&self, value: f64) -> bool {
        approx_zero(value, self.epsilon)
    }

    /// Orders two values, treating values within tolerance as equal.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        if self.eq(a, b) {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Sign of `value` with a dead zone of `epsilon` around zero.
    pub fn sign(&self, value: f64) -> i8 {
        match self.compare(value, 0.0) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Component-wise equality of two 2D points.
    #[inline]
    pub fn points_eq_2d(&self, a: DVec2, b: DVec2) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y)
    }

    /// Component-wise equality of two 3D points.
    #[inline]
    pub fn points_eq(&self, a: DVec3, b: DVec3) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y) && self.eq(a.z, b.z)
    }

    /// True when the turn `a -> b -> c` is straight within tolerance.
    ///
    /// The test uses the sine of the turning angle, so it does not depend on
    /// edge lengths. Coincident points count as collinear.
    pub fn collinear_2d(&self, a: DVec2, b: DVec2, c: DVec2) -> bool {
        let e1 = b - a;
        let e2 = c - b;
        let (l1, l2) = (e1.length(), e2.length());
        if self.eq_zero(l1) || self.eq_zero(l2) {
            return true;
        }
        self.eq_zero(e1.perp_dot(e2) / (l1 * l2))
    }

    /// True when a loop is thinner than tolerance.
    ///
    /// `twice_area` is the doubled enclosed area and `longest_edge` the
    /// longest edge length; their ratio is the loop's height over that edge,
    /// a length comparable with `epsilon`.
    pub fn is_sliver(&self, twice_area: f64, longest_edge: f64) -> bool {
        if self.eq_zero(longest_edge) {
            return true;
        }
        self.eq_zero(twice_area.abs() / longest_edge)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_TOLERANCE,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
