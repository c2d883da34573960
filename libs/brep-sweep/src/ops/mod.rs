//! # Sweep Operations
//!
//! Operations that turn planar regions into solids.

pub mod extrude;

pub use extrude::{linear_extrude, rotate_extrude, Extruder, LinearExtrudeParams, RotateExtrudeParams};
