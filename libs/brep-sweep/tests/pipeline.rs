//! End-to-end tests: region -> sweep -> placement -> STL text.

use brep_sweep::scene::{Form, RenderTarget, SceneTransform};
use brep_sweep::stl::{render_stl, write_stl_file};
use brep_sweep::{extrude, extrude_rotate, Extruder, Face, KernelError, Polygon2D, Precision};
use config::constants::KernelSettings;
use glam::{DVec2, DVec3};

fn washer_profile() -> Polygon2D {
    // Square ring, 4 wide with a 2 wide hole, centred at x = 5.
    Polygon2D::with_holes(
        vec![
            DVec2::new(3.0, -2.0),
            DVec2::new(7.0, -2.0),
            DVec2::new(7.0, 2.0),
            DVec2::new(3.0, 2.0),
        ],
        vec![vec![
            DVec2::new(4.0, -1.0),
            DVec2::new(4.0, 1.0),
            DVec2::new(6.0, 1.0),
            DVec2::new(6.0, -1.0),
        ]],
        Precision::default(),
    )
    .unwrap()
}

#[test]
fn cube_to_stl() {
    let square = Polygon2D::square(DVec2::ONE, false, Precision::default()).unwrap();
    let cube = extrude(&square, 1.0, 1.0).unwrap();
    let triangles = cube.triangulate();

    let (text, report) = render_stl(&triangles).unwrap();

    assert_eq!(triangles.len(), 12);
    assert_eq!(report.written, 12);
    assert_eq!(text.lines().count(), 2 + 12 * 7);
    assert_eq!(text.matches("facet normal 0.0000 0.0000 1.0000").count(), 2);
    assert_eq!(text.matches("facet normal 0.0000 0.0000 -1.0000").count(), 2);
}

#[test]
fn revolved_region_with_hole_is_closed() {
    let precision = Precision::default();
    let solid = extrude_rotate(&washer_profile(), 270.0, 36).unwrap();

    solid.validate_closed(&precision).unwrap();
    // Pappus: area 12 at centroid radius 5, three quarters of a turn.
    let exact = 12.0 * 5.0 * 1.5 * std::f64::consts::PI;
    assert!((solid.volume() - exact).abs() / exact < 1e-2);
}

#[test]
fn configured_extruder_pipeline() {
    let settings = KernelSettings::new(1e-6, 12, 48).unwrap();
    let extruder = Extruder::new(&settings).unwrap();

    let tube = extruder.revolve(&washer_profile(), 360.0).unwrap();
    assert_eq!(tube.face_count(), 8 * 12);
    assert!(tube.is_closed(extruder.precision()));

    let err = extruder.extrude_rotate(&washer_profile(), 360.0, 49).unwrap_err();
    assert!(matches!(err, KernelError::InvalidParameter { name: "segments", .. }));
}

struct FaceCounter {
    faces: usize,
    area: f64,
}

impl RenderTarget for FaceCounter {
    fn draw_face(&mut self, face: &Face) {
        self.faces += 1;
        self.area += face.area();
    }
}

#[test]
fn placed_form_renders_and_serializes() {
    let precision = Precision::default();
    let square = Polygon2D::square(DVec2::splat(2.0), true, precision).unwrap();
    let mut form = Form::new(SceneTransform {
        translate: DVec3::new(0.0, 0.0, 10.0),
        rotate_y: 90.0,
        scale: DVec3::splat(0.5),
        ..SceneTransform::identity()
    });
    form.attach(extrude(&square, 2.0, 1.0).unwrap());

    let mut counter = FaceCounter { faces: 0, area: 0.0 };
    form.draw(&mut counter, &precision).unwrap();
    assert_eq!(counter.faces, 6);
    // Surface area 24, scaled by a quarter.
    assert!((counter.area - 6.0).abs() < 1e-9);

    let triangles: Vec<_> = form
        .world_faces(&precision)
        .unwrap()
        .iter()
        .flat_map(Face::triangulate)
        .collect();
    let path = std::env::temp_dir().join(format!("brep_sweep_form_{}.stl", std::process::id()));
    let report = write_stl_file(&triangles, &path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(report.written, 12);
    assert!(report.is_complete());
}
