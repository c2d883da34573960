//! # Kernel Errors
//!
//! Error types for face construction, sweeps and serialization.
//!
//! ## Error Policy
//!
//! - Degenerate geometry fails fast and is propagated unchanged; a sweep
//!   never returns a partially built solid
//! - Only the serializer recovers locally (skip, log, report) and only for
//!   a single facet

use std::fmt;

use config::constants::ConfigError;
use thiserror::Error;

// =============================================================================
// DEGENERATE CHECKS
// =============================================================================

/// Which face validation check rejected a vertex loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegenerateCheck {
    /// Fewer than three vertices.
    TooFewVertices,
    /// Two consecutive vertices coincide within tolerance.
    CoincidentVertices,
    /// The loop encloses no area (e.g. collinear vertices).
    ZeroArea,
    /// Some vertex lies off the face plane.
    NonCoplanar,
    /// The loop turns the wrong way, folds back or winds more than once.
    NonConvex,
}

impl fmt::Display for DegenerateCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DegenerateCheck::TooFewVertices => "too few vertices",
            DegenerateCheck::CoincidentVertices => "coincident vertices",
            DegenerateCheck::ZeroArea => "zero area",
            DegenerateCheck::NonCoplanar => "non-coplanar",
            DegenerateCheck::NonConvex => "non-convex",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the sweep kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    /// A face could not be built from the given vertices.
    #[error("Degenerate geometry ({check}): {message}")]
    DegenerateGeometry {
        /// The validation check that failed.
        check: DegenerateCheck,
        /// What was being built and why it failed.
        message: String,
    },

    /// The requested operation does not exist for this value.
    #[error("Unsupported: {message}")]
    Unsupported {
        /// Description of the refused operation.
        message: String,
    },

    /// A numeric argument is out of range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// A planar region could not be constructed or decomposed.
    #[error("Invalid region: {message}")]
    InvalidRegion {
        /// Why the region was rejected.
        message: String,
    },

    /// A face set is not a closed two-manifold boundary.
    #[error("Not a closed boundary: {message}")]
    NonManifold {
        /// The first offending edge.
        message: String,
    },

    /// One facet could not be serialized.
    #[error("Facet {index} could not be serialized: {message}")]
    SerializationFace {
        /// Position of the facet in the input.
        index: usize,
        /// Why the facet was skipped.
        message: String,
    },

    /// The output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Kernel settings failed validation.
    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
}

impl KernelError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(check: DegenerateCheck, message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            check,
            message: message.into(),
        }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates an invalid region error.
    pub fn invalid_region(message: impl Into<String>) -> Self {
        Self::InvalidRegion {
            message: message.into(),
        }
    }

    /// Creates a non-manifold error.
    pub fn non_manifold(message: impl Into<String>) -> Self {
        Self::NonManifold {
            message: message.into(),
        }
    }

    /// Returns the failed check if this is a degenerate geometry error.
    pub fn degenerate_check(&self) -> Option<DegenerateCheck> {
        match self {
            Self::DegenerateGeometry { check, .. } => Some(*check),
            _ => None,
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

// =============================================================================
// TESTS
// =============================================================================
