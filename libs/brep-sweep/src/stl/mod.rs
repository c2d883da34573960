//! # ASCII STL Output
//!
//! Writes triangles as a text STL solid:
//!
//! ```text
//! solid Solid
//! facet normal nx ny nz
//! outer loop
//! vertex x y z      (second stored vertex)
//! vertex x y z      (first stored vertex)
//! vertex x y z      (third stored vertex)
//! endloop
//! endfacet
//! endsolid Solid
//! ```
//!
//! Every number has exactly four decimals. A facet with a non-finite value
//! is skipped and reported in the [`StlReport`]; it never aborts the write.
//! Sink failures do.

#[cfg(test)]
mod tests;

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use config::constants::{STL_DECIMALS, STL_SOLID_NAME};
use glam::DVec3;

use crate::error::{KernelError, KernelResult};

/// A triangle with its facet normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First stored vertex.
    pub p1: DVec3,
    /// Second stored vertex.
    pub p2: DVec3,
    /// Third stored vertex.
    pub p3: DVec3,
    /// Facet normal, written as given.
    pub normal: DVec3,
}

impl Triangle {
    /// Creates a triangle.
    pub fn new(p1: DVec3, p2: DVec3, p3: DVec3, normal: DVec3) -> Self {
        Self { p1, p2, p3, normal }
    }
}

/// Outcome of one STL write.
#[derive(Debug, Default)]
pub struct StlReport {
    /// Facets written to the sink.
    pub written: usize,
    /// One [`KernelError::SerializationFace`] per skipped facet, in input order.
    pub skipped: Vec<KernelError>,
}

impl StlReport {
    /// Number of skipped facets.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True when every facet was written.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Formats one facet block, or explains why it cannot be written.
pub fn format_facet(index: usize, triangle: &Triangle) -> KernelResult<String> {
    let fields = [
        ("normal", triangle.normal),
        ("vertex 1", triangle.p1),
        ("vertex 2", triangle.p2),
        ("vertex 3", triangle.p3),
    ];
    if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(KernelError::SerializationFace {
            index,
            message: format!("{name} is not finite: {value}"),
        });
    }

    let mut out = String::with_capacity(192);
    // Writing into a String cannot fail.
    let _ = writeln!(out, "facet normal {}", coords(triangle.normal));
    out.push_str("outer loop\n");
    for vertex in [triangle.p2, triangle.p1, triangle.p3] {
        let _ = writeln!(out, "vertex {}", coords(vertex));
    }
    out.push_str("endloop\nendfacet\n");
    Ok(out)
}

/// Writes `triangles` as one ASCII solid.
///
/// # Examples
/// ```
/// use brep_sweep::stl::{write_stl, Triangle};
/// use glam::DVec3;
///
/// let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z);
/// let mut out = Vec::new();
/// let report = write_stl(&[tri], &mut out).unwrap();
/// assert_eq!(report.written, 1);
/// assert!(String::from_utf8(out).unwrap().starts_with("solid Solid\n"));
/// ```
pub fn write_stl<W: Write>(triangles: &[Triangle], writer: &mut W) -> KernelResult<StlReport> {
    let mut report = StlReport::default();

    writeln!(writer, "solid {STL_SOLID_NAME}")?;
    for (index, triangle) in triangles.iter().enumerate() {
        match format_facet(index, triangle) {
            Ok(block) => {
                writer.write_all(block.as_bytes())?;
                report.written += 1;
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping STL facet");
                report.skipped.push(err);
            }
        }
    }
    writeln!(writer, "endsolid {STL_SOLID_NAME}")?;
    writer.flush()?;

    tracing::debug!(written = report.written, skipped = report.skipped.len(), "wrote STL solid");
    Ok(report)
}

/// Renders `triangles` into a string.
pub fn render_stl(triangles: &[Triangle]) -> KernelResult<(String, StlReport)> {
    let mut buffer = Vec::new();
    let report = write_stl(triangles, &mut buffer)?;
    // Every byte written above comes from formatted `str`s.
    let text = String::from_utf8_lossy(&buffer).into_owned();
    Ok((text, report))
}

/// Writes `triangles` to a file, replacing it if present.
pub fn write_stl_file<P: AsRef<Path>>(triangles: &[Triangle], path: P) -> KernelResult<StlReport> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_stl(triangles, &mut writer)
}

fn coords(v: DVec3) -> String {
    format!("{} {} {}", number(v.x), number(v.y), number(v.z))
}

/// Fixed-point with [`STL_DECIMALS`] digits; values that round to zero are
/// written unsigned.
fn number(value: f64) -> String {
    let text = format!("{value:.prec$}", prec = STL_DECIMALS);
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => magnitude.to_string(),
        _ => text,
    }
}
