//! # Config Crate
//!
//! Centralized configuration constants for the sweep kernel.
//! Every tolerance, segment limit and output setting is defined here so the
//! geometry crates never carry their own literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_TOLERANCE, KernelSettings};
//!
//! // Use DEFAULT_TOLERANCE for floating-point comparisons
//! let value: f64 = 1e-9; // smaller than DEFAULT_TOLERANCE (1e-8)
//! assert!(value.abs() <= DEFAULT_TOLERANCE);
//!
//! // Or carry an explicit, validated snapshot through a call chain
//! let settings = KernelSettings::new(1e-6, 24, 512).expect("valid settings");
//! assert_eq!(settings.default_segments, 24);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Globals**: Settings are plain `Copy` values passed explicitly
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
