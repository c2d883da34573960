//! # Extrusion Operations
//!
//! Sweeps that build a closed face set from a planar region:
//! - **linear_extrude**: Sweep the region along +Z with an optional top scale
//! - **rotate_extrude**: Revolve the region around the Y axis
//!
//! Both work on any [`PlanarRegion`]: caps come from its convex sub-areas,
//! side faces from its boundary segments. Faces are built independently on
//! the rayon pool and concatenated in a fixed order (caps, then sides).

mod linear;
mod rotate;


pub use linear::{linear_extrude, LinearExtrudeParams};
pub use rotate::{rotate_extrude, RotateExtrudeParams};

use config::constants::KernelSettings;

use crate::error::KernelResult;
use crate::precision::Precision;
use crate::region::PlanarRegion;
use crate::solid::Solid;

/// Sweep entry point bound to one precision context and segment budget.
///
/// # Example
///
/// ```rust
/// use brep_sweep::{Extruder, Polygon2D};
/// use config::constants::KernelSettings;
/// use glam::DVec2;
///
/// let settings = KernelSettings::new(1e-6, 16, 64).unwrap();
/// let extruder = Extruder::new(&settings).unwrap();
/// let profile = Polygon2D::square(DVec2::ONE, false, *extruder.precision()).unwrap();
///
/// let prism = extruder.extrude(&profile, 2.0, 1.0).unwrap();
/// assert_eq!(prism.face_count(), 6);
///
/// // Over the budget.
/// assert!(extruder.extrude_rotate(&profile, 90.0, 65).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extruder {
    precision: Precision,
    default_segments: u32,
    max_segments: u32,
}

impl Extruder {
    /// Builds an extruder from a settings snapshot.
    ///
    /// The snapshot is re-validated, since its fields are public.
    pub fn new(settings: &KernelSettings) -> KernelResult<Self> {
        let settings = KernelSettings::new(settings.tolerance, settings.default_segments, settings.max_segments)?;
        Ok(Self {
            precision: Precision::from_settings(&settings)?,
            default_segments: settings.default_segments,
            max_segments: settings.max_segments,
        })
    }

    /// Uses `precision` with the default segment settings.
    pub fn with_precision(precision: Precision) -> Self {
        let settings = KernelSettings::default();
        Self {
            precision,
            default_segments: settings.default_segments,
            max_segments: settings.max_segments,
        }
    }

    /// The precision every face is validated with.
    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    /// Segment count used by [`revolve`](Self::revolve).
    pub fn default_segments(&self) -> u32 {
        self.default_segments
    }

    /// Largest segment count accepted by a rotational sweep.
    pub fn max_segments(&self) -> u32 {
        self.max_segments
    }

    /// Linear sweep to `height`, scaling the top cap by `scale`.
    pub fn extrude<R>(&self, region: &R, height: f64, scale: f64) -> KernelResult<Solid>
    where
        R: PlanarRegion + ?Sized,
    {
        linear_extrude(region, &LinearExtrudeParams { height, scale }, &self.precision)
    }

    /// Rotational sweep by `angle` degrees in `segments` steps.
    pub fn extrude_rotate<R>(&self, region: &R, angle: f64, segments: u32) -> KernelResult<Solid>
    where
        R: PlanarRegion + ?Sized,
    {
        rotate::rotate_extrude_within(
            region,
            &RotateExtrudeParams { angle, segments },
            self.max_segments,
            &self.precision,
        )
    }

    /// Rotational sweep with the default segment count.
    pub fn revolve<R>(&self, region: &R, angle: f64) -> KernelResult<Solid>
    where
        R: PlanarRegion + ?Sized,
    {
        self.extrude_rotate(region, angle, self.default_segments)
    }
}

impl Default for Extruder {
    fn default() -> Self {
        Self::with_precision(Precision::default())
    }
}
