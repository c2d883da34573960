//! Tests for the validated settings snapshot.

use super::*;

/// Ensures default settings are sane and positive.
///
/// # Examples
/// ```
/// use config::constants::KernelSettings;
/// let settings = KernelSettings::default();
/// assert!(settings.tolerance > 0.0);
/// ```
#[test]
fn default_settings_are_valid() {
    let settings = KernelSettings::default();
    assert!(settings.tolerance > 0.0);
    assert!(settings.default_segments >= MIN_SEGMENTS);
    assert!(settings.default_segments <= settings.max_segments);
    assert_eq!(KernelSettings::new(DEFAULT_TOLERANCE, DEFAULT_SEGMENTS, MAX_SEGMENTS), Ok(settings));
}

/// Validates the builder rejects invalid values.
///
/// # Examples
/// ```
/// use config::constants::KernelSettings;
/// assert!(KernelSettings::new(0.0, 24, 100).is_err());
/// ```
#[test]
fn new_validates_inputs() {
    assert_eq!(
        KernelSettings::new(0.0, 24, 100).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert!(matches!(
        KernelSettings::new(f64::NAN, 24, 100),
        Err(ConfigError::InvalidTolerance(_))
    ));
    assert_eq!(
        KernelSettings::new(1.0e-9, 0, 100).unwrap_err(),
        ConfigError::InvalidSegments(0)
    );
    assert_eq!(
        KernelSettings::new(1.0e-9, 24, 0).unwrap_err(),
        ConfigError::InvalidSegments(0)
    );
    assert_eq!(
        KernelSettings::new(1.0e-9, 24, 12).unwrap_err(),
        ConfigError::SegmentsOverBudget { segments: 24, max: 12 }
    );
}

#[test]
fn with_tolerance_keeps_segments() {
    let settings = KernelSettings::default().with_tolerance(1e-4).unwrap();
    assert_eq!(settings.tolerance, 1e-4);
    assert_eq!(settings.default_segments, DEFAULT_SEGMENTS);
    assert!(KernelSettings::default().with_tolerance(-1.0).is_err());
}

#[test]
fn errors_render_their_values() {
    assert!(ConfigError::InvalidTolerance(-2.0).to_string().contains("-2"));
    assert!(ConfigError::SegmentsOverBudget { segments: 9, max: 3 }
        .to_string()
        .contains("budget of 3"));
}
