//! Property-based tests for the sweeps.
//!
//! Random star-shaped profiles are swept and the resulting solids checked
//! for closure, face counts and volume.
//!
//! Run with: cargo test -p brep-sweep --test properties

use brep_sweep::{extrude, extrude_rotate, PlanarRegion, Polygon2D, Precision};
use glam::DVec2;
use proptest::prelude::*;
use std::f64::consts::TAU;

// =============================================================================
// Strategies for generating random profiles
// =============================================================================

/// A polygon star-shaped around the origin: one vertex per equal angular
/// step, each at its own radius. Always simple.
fn arb_star() -> impl Strategy<Value = Polygon2D> {
    prop::collection::vec(0.5..2.0f64, 3..12).prop_filter_map("degenerate profile", |radii| {
        let n = radii.len();
        let points = radii
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let angle = TAU * i as f64 / n as f64;
                DVec2::new(r * angle.cos(), r * angle.sin())
            })
            .collect();
        Polygon2D::new(points, Precision::default()).ok()
    })
}

/// A star profile moved clear of the rotation axis.
fn arb_profile() -> impl Strategy<Value = Polygon2D> {
    arb_star().prop_map(|mut star| {
        star.translate(DVec2::new(3.0, 0.0));
        star
    })
}

fn edge_count(region: &Polygon2D) -> usize {
    region.boundary_paths().iter().map(|p| p.len()).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every edge of a linear sweep is shared by exactly two faces with
    /// opposite directions.
    #[test]
    fn linear_sweep_is_closed(star in arb_star(), height in 0.1..10.0f64, scale in 0.2..2.0f64) {
        let solid = extrude(&star, height, scale).unwrap();
        prop_assert!(solid.validate_closed(&Precision::default()).is_ok());
    }

    /// Frustum volume `h·A·(1 + c + c²) / 3`.
    #[test]
    fn linear_sweep_volume(star in arb_star(), height in 0.1..10.0f64, scale in 0.2..2.0f64) {
        let solid = extrude(&star, height, scale).unwrap();
        let expected = height * star.area() * (1.0 + scale + scale * scale) / 3.0;
        prop_assert!((solid.volume() - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn linear_sweep_face_count(star in arb_star(), height in 0.1..10.0f64) {
        let k = star.convex_sub_areas().unwrap().len();
        let solid = extrude(&star, height, 1.0).unwrap();
        prop_assert_eq!(solid.face_count(), 2 * k + edge_count(&star));
    }

    #[test]
    fn full_revolve_is_closed(profile in arb_profile(), segments in 3u32..24) {
        let solid = extrude_rotate(&profile, 360.0, segments).unwrap();
        prop_assert_eq!(solid.face_count(), segments as usize * edge_count(&profile));
        prop_assert!(solid.validate_closed(&Precision::default()).is_ok());
        prop_assert!(solid.volume() > 0.0);
    }

    #[test]
    fn partial_revolve_is_closed(profile in arb_profile(), angle in 5.0..359.0f64, segments in 2u32..24) {
        let k = profile.convex_sub_areas().unwrap().len();
        let solid = extrude_rotate(&profile, angle, segments).unwrap();
        prop_assert_eq!(solid.face_count(), segments as usize * edge_count(&profile) + 2 * k);
        prop_assert!(solid.validate_closed(&Precision::default()).is_ok());
        prop_assert!(solid.volume() > 0.0);
    }
}
