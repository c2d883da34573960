//! # Planar Regions
//!
//! The 2D input of every sweep. A region is consumed through the
//! [`PlanarRegion`] capability:
//!
//! - **convex sub-areas**: non-overlapping convex loops covering the region,
//!   used for caps
//! - **boundary paths**: closed loops of segments, interior on the left,
//!   used for side faces
//!
//! [`Polygon2D`] is the stock implementation: an outer loop with optional
//! holes.

mod decompose;


use glam::DVec2;

use crate::error::{KernelError, KernelResult};
use crate::precision::Precision;

// =============================================================================
// CAPABILITY
// =============================================================================

/// A planar region that can be swept.
pub trait PlanarRegion: Sync {
    /// Splits the region into convex, counter-clockwise, non-overlapping loops.
    fn convex_sub_areas(&self) -> KernelResult<Vec<ConvexArea>>;

    /// Every contour of the region, with the interior on the left of each
    /// segment (outer loops counter-clockwise, holes clockwise).
    fn boundary_paths(&self) -> Vec<BoundaryPath>;
}

// =============================================================================
// BOUNDARY
// =============================================================================

/// One straight piece of a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySegment {
    /// Start point.
    pub start: DVec2,
    /// End point.
    pub end: DVec2,
}

impl BoundarySegment {
    /// Creates a segment.
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// A closed contour made of consecutive segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundaryPath {
    segments: Vec<BoundarySegment>,
}

impl BoundaryPath {
    /// Closes a vertex loop into a path (`last -> first` included).
    pub fn from_loop(points: &[DVec2]) -> Self {
        let n = points.len();
        let segments = (0..n)
            .map(|i| BoundarySegment::new(points[i], points[(i + 1) % n]))
            .collect();
        Self { segments }
    }

    /// Builds a path from explicit segments.
    pub fn from_segments(segments: Vec<BoundarySegment>) -> Self {
        Self { segments }
    }

    /// The segments in traversal order.
    pub fn segments(&self) -> &[BoundarySegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when every segment starts where the previous one ended.
    pub fn is_closed(&self, precision: &Precision) -> bool {
        let n = self.segments.len();
        n > 0
            && (0..n).all(|i| {
                let next = &self.segments[(i + 1) % n];
                precision.points_eq_2d(self.segments[i].end, next.start)
            })
    }
}

// =============================================================================
// CONVEX AREA
// =============================================================================

/// A convex piece of a region: a closed, counter-clockwise vertex loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexArea {
    vertices: Vec<DVec2>,
}

impl ConvexArea {
    /// Wraps a counter-clockwise convex loop.
    ///
    /// Convexity is checked when the loop is lifted into a face.
    pub fn new(vertices: Vec<DVec2>) -> Self {
        Self { vertices }
    }

    /// Loop vertices.
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    /// Enclosed area (positive for counter-clockwise loops).
    pub fn area(&self) -> f64 {
        signed_area(&self.vertices)
    }
}

// =============================================================================
// POLYGON WITH HOLES
// =============================================================================

/// An outer loop with optional holes.
///
/// Loops are cleaned on construction: repeated and collinear vertices are
/// dropped and the winding is normalized (outer counter-clockwise, holes
/// clockwise).
///
/// # Example
///
/// ```rust
/// use brep_sweep::{PlanarRegion, Polygon2D, Precision};
/// use glam::DVec2;
///
/// let square = Polygon2D::square(DVec2::splat(10.0), true, Precision::default()).unwrap();
/// assert_eq!(square.vertex_count(), 4);
/// assert_eq!(square.boundary_paths().len(), 1);
/// assert_eq!(square.convex_sub_areas().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Polygon2D {
    /// Outer boundary vertices in counter-clockwise order
    outer: Vec<DVec2>,
    /// Holes, each in clockwise order
    holes: Vec<Vec<DVec2>>,
    precision: Precision,
}

impl Polygon2D {
    /// Creates a region from its outer boundary.
    pub fn new(outer: Vec<DVec2>, precision: Precision) -> KernelResult<Self> {
        Self::with_holes(outer, Vec::new(), precision)
    }

    /// Creates a region with holes.
    ///
    /// Every hole vertex must lie strictly inside the outer loop.
    pub fn with_holes(outer: Vec<DVec2>, holes: Vec<Vec<DVec2>>, precision: Precision) -> KernelResult<Self> {
        let mut outer = clean_loop(outer, &precision).map_err(|msg| KernelError::invalid_region(format!("outer loop {msg}")))?;
        if signed_area(&outer) < 0.0 {
            outer.reverse();
        }

        let mut cleaned = Vec::with_capacity(holes.len());
        for (index, hole) in holes.into_iter().enumerate() {
            let mut hole = clean_loop(hole, &precision)
                .map_err(|msg| KernelError::invalid_region(format!("hole {index} {msg}")))?;
            if signed_area(&hole) > 0.0 {
                hole.reverse();
            }
            if let Some(outside) = hole.iter().find(|p| !strictly_inside(&outer, **p, &precision)) {
                return Err(KernelError::invalid_region(format!(
                    "hole {index} vertex {outside} is not inside the outer loop"
                )));
            }
            cleaned.push(hole);
        }

        Ok(Self {
            outer,
            holes: cleaned,
            precision,
        })
    }

    /// Creates an axis-aligned rectangle.
    ///
    /// # Arguments
    ///
    /// * `size` - Width and height
    /// * `center` - If true, center at origin
    pub fn square(size: DVec2, center: bool, precision: Precision) -> KernelResult<Self> {
        let (x, y) = if center {
            (-size.x / 2.0, -size.y / 2.0)
        } else {
            (0.0, 0.0)
        };

        Self::new(
            vec![
                DVec2::new(x, y),
                DVec2::new(x + size.x, y),
                DVec2::new(x + size.x, y + size.y),
                DVec2::new(x, y + size.y),
            ],
            precision,
        )
    }

    /// Creates a regular polygon approximating a circle around the origin.
    pub fn circle(radius: f64, segments: u32, precision: Precision) -> KernelResult<Self> {
        let vertices = (0..segments)
            .map(|i| {
                let angle = std::f64::consts::TAU * f64::from(i) / f64::from(segments);
                DVec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(vertices, precision)
    }

    /// Outer loop, counter-clockwise.
    pub fn outer(&self) -> &[DVec2] {
        &self.outer
    }

    /// Hole loops, clockwise.
    pub fn holes(&self) -> &[Vec<DVec2>] {
        &self.holes
    }

    /// Returns the number of vertices in the outer boundary.
    pub fn vertex_count(&self) -> usize {
        self.outer.len()
    }

    /// Returns true if the polygon has holes.
    pub fn has_holes(&self) -> bool {
        !self.holes.is_empty()
    }

    /// The precision the loops were cleaned with.
    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    /// Area of the region (outer area minus hole areas).
    pub fn area(&self) -> f64 {
        signed_area(&self.outer) + self.holes.iter().map(|h| signed_area(h)).sum::<f64>()
    }

    /// Even-odd containment test over every loop.
    pub fn contains_point(&self, point: DVec2) -> bool {
        std::iter::once(&self.outer)
            .chain(self.holes.iter())
            .filter(|ring| crosses_ray(ring, point))
            .count()
            % 2
            == 1
    }

    /// Translates the polygon by the given offset.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_sweep::{Polygon2D, Precision};
    /// use glam::DVec2;
    ///
    /// let mut circle = Polygon2D::circle(5.0, 32, Precision::default()).unwrap();
    /// circle.translate(DVec2::new(10.0, 0.0)); // Move circle right by 10
    /// assert!(circle.outer().iter().all(|p| p.x >= 5.0 - 1e-9));
    /// ```
    pub fn translate(&mut self, offset: DVec2) {
        for vertex in &mut self.outer {
            *vertex += offset;
        }
        for hole in &mut self.holes {
            for vertex in hole {
                *vertex += offset;
            }
        }
    }
}

impl PlanarRegion for Polygon2D {
    fn convex_sub_areas(&self) -> KernelResult<Vec<ConvexArea>> {
        decompose::convex_decomposition(&self.outer, &self.holes, &self.precision)
    }

    fn boundary_paths(&self) -> Vec<BoundaryPath> {
        std::iter::once(&self.outer)
            .chain(self.holes.iter())
            .map(|ring| BoundaryPath::from_loop(ring))
            .collect()
    }
}

// =============================================================================
// LOOP HELPERS
// =============================================================================

/// Shoelace area, positive for counter-clockwise loops.
pub(crate) fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

/// Length of the longest edge of a closed loop.
pub(crate) fn longest_edge(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance(points[(i + 1) % n]))
        .fold(0.0, f64::max)
}

/// Drops repeated and collinear vertices until the loop is stable.
fn clean_loop(points: Vec<DVec2>, precision: &Precision) -> Result<Vec<DVec2>, String> {
    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(format!("has a non-finite vertex {bad}"));
    }

    let mut ring = points;
    loop {
        let before = ring.len();

        ring.dedup_by(|b, a| precision.points_eq_2d(*a, *b));
        while ring.len() > 1 && precision.points_eq_2d(ring[0], ring[ring.len() - 1]) {
            ring.pop();
        }

        let n = ring.len();
        if n >= 3 {
            if let Some(i) = (0..n).find(|&i| precision.collinear_2d(ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n])) {
                ring.remove(i);
            }
        }

        if ring.len() == before || ring.len() < 3 {
            break;
        }
    }

    if ring.len() < 3 {
        return Err(format!("has {} distinct non-collinear vertices, need at least 3", ring.len()));
    }
    if precision.is_sliver(2.0 * signed_area(&ring), longest_edge(&ring)) {
        return Err("encloses no area".to_string());
    }
    Ok(ring)
}

/// Crossing test of a +x ray from `point` against one loop.
fn crosses_ray(ring: &[DVec2], point: DVec2) -> bool {
    let n = ring.len();
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Inside the loop and farther than tolerance from every edge.
fn strictly_inside(ring: &[DVec2], point: DVec2, precision: &Precision) -> bool {
    let n = ring.len();
    let on_edge = (0..n).any(|i| {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let ab = b - a;
        let t = ((point - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
        precision.eq_zero(point.distance(a + ab * t))
    });
    !on_edge && crosses_ray(ring, point)
}
