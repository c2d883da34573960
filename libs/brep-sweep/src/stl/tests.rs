use super::*;

fn unit_triangle() -> Triangle {
    Triangle::new(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
    )
}

#[test]
fn test_single_triangle_literal() {
    let (text, report) = render_stl(&[unit_triangle()]).unwrap();

    assert_eq!(
        text,
        "solid Solid\n\
         facet normal 0.0000 0.0000 1.0000\n\
         outer loop\n\
         vertex 1.0000 0.0000 0.0000\n\
         vertex 0.0000 0.0000 0.0000\n\
         vertex 0.0000 1.0000 0.0000\n\
         endloop\n\
         endfacet\n\
         endsolid Solid\n"
    );
    assert_eq!(report.written, 1);
    assert!(report.is_complete());
}

#[test]
fn test_empty_solid() {
    let (text, report) = render_stl(&[]).unwrap();
    assert_eq!(text, "solid Solid\nendsolid Solid\n");
    assert_eq!(report.written, 0);
}

#[test]
fn test_four_decimals_with_rounding() {
    let tri = Triangle::new(
        DVec3::new(0.123_456, -2.5, 1e6),
        DVec3::new(1.0 / 3.0, 0.0, 0.0),
        DVec3::ZERO,
        DVec3::new(0.0, -1.0, 0.0),
    );
    let block = format_facet(0, &tri).unwrap();

    assert!(block.starts_with("facet normal 0.0000 -1.0000 0.0000\n"));
    assert!(block.contains("vertex 0.3333 0.0000 0.0000\n"));
    assert!(block.contains("vertex 0.1235 -2.5000 1000000.0000\n"));
}

#[test]
fn test_negative_zero_is_unsigned() {
    let tri = Triangle::new(
        DVec3::new(-0.0, -1e-9, -0.00004),
        DVec3::new(-0.00006, 0.0, 0.0),
        DVec3::ZERO,
        DVec3::new(-0.0, -0.0, -1.0),
    );
    let block = format_facet(0, &tri).unwrap();

    assert!(block.starts_with("facet normal 0.0000 0.0000 -1.0000\n"));
    // p2 is written first.
    assert!(block.contains("outer loop\nvertex -0.0001 0.0000 0.0000\nvertex 0.0000 0.0000 0.0000\n"));
}

#[test]
fn test_non_finite_facet_is_skipped() {
    let mut bad = unit_triangle();
    bad.p3 = DVec3::new(f64::NAN, 0.0, 0.0);
    let triangles = [unit_triangle(), bad, unit_triangle()];

    let (text, report) = render_stl(&triangles).unwrap();

    assert_eq!(report.written, 2);
    assert_eq!(report.skipped_count(), 1);
    assert!(matches!(report.skipped[0], KernelError::SerializationFace { index: 1, .. }));
    assert_eq!(text.matches("endfacet").count(), 2);
    assert!(!text.contains("NaN"));
    assert!(text.ends_with("endsolid Solid\n"));
}

#[test]
fn test_infinite_normal_is_reported() {
    let mut bad = unit_triangle();
    bad.normal = DVec3::new(0.0, f64::INFINITY, 0.0);
    let err = format_facet(7, &bad).unwrap_err();

    assert!(matches!(err, KernelError::SerializationFace { index: 7, .. }));
    assert!(err.to_string().contains("normal"));
}

/// A sink that refuses every write.
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_sink_failure_aborts() {
    let result = write_stl(&[unit_triangle()], &mut BrokenSink);
    assert!(matches!(result, Err(KernelError::Io(_))));
}

#[test]
fn test_write_file() {
    let path = std::env::temp_dir().join(format!("brep_sweep_stl_{}.stl", std::process::id()));
    let report = write_stl_file(&[unit_triangle()], &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(report.written, 1);
    assert!(text.starts_with("solid Solid\nfacet normal"));
}
