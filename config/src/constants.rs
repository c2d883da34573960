//! # Configuration Constants
//!
//! Centralized constants for the sweep kernel. All geometric tolerances,
//! sweep resolution limits and serializer settings are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Default and maximum sweep segment counts
//! - **Output**: Text serializer layout
//! - **Settings**: Validated snapshot handed to geometry kernels

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Default tolerance for every geometric predicate.
///
/// Two coordinates closer than this are considered equal; a vertex farther
/// than this from a plane is considered off the plane.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_TOLERANCE;
///
/// fn same_coordinate(a: f64, b: f64) -> bool {
///     (a - b).abs() <= DEFAULT_TOLERANCE
/// }
///
/// assert!(same_coordinate(1.0, 1.0 + 1e-9));
/// assert!(!same_coordinate(1.0, 1.0 + 1e-6));
/// ```
pub const DEFAULT_TOLERANCE: f64 = 1e-8;

/// Angular tolerance (radians) when summing the turning of a polygon loop.
///
/// A convex loop turns by exactly one revolution; this bounds the rounding
/// noise accepted on that sum.
pub const TURNING_TOLERANCE: f64 = 1e-6;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Degrees in a full revolution.
///
/// Rotational sweeps with an angle at or above this value are closed and
/// carry no caps.
pub const FULL_REVOLUTION_DEGREES: f64 = 360.0;

/// Default number of segments for a rotational sweep.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_SEGMENTS;
///
/// let requested: Option<u32> = None;
/// assert_eq!(requested.unwrap_or(DEFAULT_SEGMENTS), 32);
/// ```
pub const DEFAULT_SEGMENTS: u32 = 32;

/// Minimum number of segments accepted by a rotational sweep.
pub const MIN_SEGMENTS: u32 = 1;

/// Maximum number of segments for a rotational sweep.
///
/// Caller-level budget that bounds the face count of a single call.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_SEGMENTS;
///
/// let requested = 100_000;
/// assert!(requested > MAX_SEGMENTS);
/// ```
pub const MAX_SEGMENTS: u32 = 1000;

// =============================================================================
// OUTPUT CONSTANTS
// =============================================================================

/// Digits written after the decimal point for every number in text output.
pub const STL_DECIMALS: usize = 4;

/// Name written on the `solid` / `endsolid` lines of text output.
pub const STL_SOLID_NAME: &str = "Solid";

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are equal within `tolerance`.
///
/// # Example
///
/// ```rust
/// use config::constants::{approx_equal, DEFAULT_TOLERANCE};
///
/// assert!(approx_equal(1.0, 1.0 + 1e-9, DEFAULT_TOLERANCE));
/// assert!(!approx_equal(1.0, 1.1, DEFAULT_TOLERANCE));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Checks if a f64 value is zero within `tolerance`.
///
/// # Example
///
/// ```rust
/// use config::constants::{approx_zero, DEFAULT_TOLERANCE};
///
/// assert!(approx_zero(1e-9, DEFAULT_TOLERANCE));
/// assert!(!approx_zero(0.1, DEFAULT_TOLERANCE));
/// ```
#[inline]
pub fn approx_zero(value: f64, tolerance: f64) -> bool {
    value.abs() <= tolerance
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Immutable snapshot of kernel settings that can be shared between crates
/// and threads.
///
/// # Examples
/// ```
/// use config::constants::KernelSettings;
/// let settings = KernelSettings::default();
/// assert!(settings.tolerance > 0.0);
/// assert!(settings.default_segments <= settings.max_segments);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelSettings {
    /// Numeric tolerance propagated into geometry predicates.
    pub tolerance: f64,
    /// Segment count used when a caller does not pick one.
    pub default_segments: u32,
    /// Largest segment count a single rotational sweep may request.
    pub max_segments: u32,
}

impl KernelSettings {
    /// Builds settings enforcing strict validation of every field.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, KernelSettings};
    /// let settings = KernelSettings::new(1.0e-6, 24, 256).expect("valid settings");
    /// assert_eq!(settings.max_segments, 256);
    ///
    /// assert_eq!(
    ///     KernelSettings::new(1.0e-6, 512, 256).unwrap_err(),
    ///     ConfigError::SegmentsOverBudget { segments: 512, max: 256 }
    /// );
    /// ```
    pub fn new(tolerance: f64, default_segments: u32, max_segments: u32) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if max_segments < MIN_SEGMENTS {
            return Err(ConfigError::InvalidSegments(max_segments));
        }
        if default_segments < MIN_SEGMENTS {
            return Err(ConfigError::InvalidSegments(default_segments));
        }
        if default_segments > max_segments {
            return Err(ConfigError::SegmentsOverBudget {
                segments: default_segments,
                max: max_segments,
            });
        }
        Ok(Self {
            tolerance,
            default_segments,
            max_segments,
        })
    }

    /// Returns a copy with a different tolerance, validated like [`KernelSettings::new`].
    pub fn with_tolerance(self, tolerance: f64) -> Result<Self, ConfigError> {
        Self::new(tolerance, self.default_segments, self.max_segments)
    }
}

impl Default for KernelSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            default_segments: DEFAULT_SEGMENTS,
            max_segments: MAX_SEGMENTS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when a segment count is below [`MIN_SEGMENTS`].
    InvalidSegments(u32),
    /// Raised when the default segment count exceeds the budget.
    SegmentsOverBudget { segments: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "segments must be >= {MIN_SEGMENTS}: {value}")
            }
            ConfigError::SegmentsOverBudget { segments, max } => {
                write!(f, "default segments {segments} exceed the budget of {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
