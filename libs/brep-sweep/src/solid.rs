//! # Solids
//!
//! A boundary representation: an unordered set of convex faces.
//!
//! The sweeps guarantee a closed boundary for well-formed input. The type
//! does not enforce it; [`Solid::validate_closed`] checks it.

use std::collections::HashMap;

use glam::DVec3;

use crate::error::{KernelError, KernelResult};
use crate::polygon::Face;
use crate::precision::Precision;
use crate::stl::Triangle;
use crate::transform::PointTransform;

/// A set of faces bounding a volume.
///
/// # Example
///
/// ```rust
/// use brep_sweep::{extrude, Polygon2D, Precision};
/// use glam::DVec2;
///
/// let square = Polygon2D::square(DVec2::ONE, false, Precision::default()).unwrap();
/// let cube = extrude(&square, 1.0, 1.0).unwrap();
/// assert_eq!(cube.face_count(), 6);
/// assert!((cube.volume() - 1.0).abs() < 1e-12);
/// assert!(cube.is_closed(&Precision::default()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    faces: Vec<Face>,
}

impl Solid {
    /// Wraps a face set.
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// The faces, in construction order.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Consumes the solid, returning its faces.
    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the solid has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut points = self.faces.iter().flat_map(|f| f.vertices().iter().copied());
        let Some(first) = points.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        points.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Enclosed volume by the divergence theorem.
    ///
    /// Positive when faces point outward, negative when the solid is inside
    /// out. Only meaningful for closed solids.
    pub fn volume(&self) -> f64 {
        self.faces
            .iter()
            .map(|face| {
                let v = face.vertices();
                (1..v.len() - 1)
                    .map(|i| v[0].dot(v[i].cross(v[i + 1])))
                    .sum::<f64>()
            })
            .sum::<f64>()
            / 6.0
    }

    /// Total face area.
    pub fn surface_area(&self) -> f64 {
        self.faces.iter().map(Face::area).sum()
    }

    /// Checks that every edge is shared by exactly two faces traversing it in
    /// opposite directions.
    ///
    /// Vertices within tolerance of each other are treated as one.
    pub fn validate_closed(&self, precision: &Precision) -> KernelResult<()> {
        if self.faces.is_empty() {
            return Err(KernelError::non_manifold("solid has no faces"));
        }

        let mut welder = VertexWelder::new(precision);
        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        for face in &self.faces {
            let ids: Vec<usize> = face.vertices().iter().map(|v| welder.weld(*v)).collect();
            let n = ids.len();
            for i in 0..n {
                *directed.entry((ids[i], ids[(i + 1) % n])).or_insert(0) += 1;
            }
        }

        let mut edges: Vec<_> = directed.iter().collect();
        edges.sort_unstable();
        for (&(a, b), &count) in edges {
            if count > 1 {
                return Err(KernelError::non_manifold(format!(
                    "edge {} -> {} is traversed {count} times in the same direction",
                    welder.points[a], welder.points[b]
                )));
            }
            if !directed.contains_key(&(b, a)) {
                return Err(KernelError::non_manifold(format!(
                    "edge {} -> {} has no opposite edge",
                    welder.points[a], welder.points[b]
                )));
            }
        }
        Ok(())
    }

    /// [`validate_closed`](Self::validate_closed) as a predicate.
    pub fn is_closed(&self, precision: &Precision) -> bool {
        self.validate_closed(precision).is_ok()
    }

    /// Fan-triangulates every face.
    pub fn triangulate(&self) -> Vec<Triangle> {
        self.faces.iter().flat_map(Face::triangulate).collect()
    }

    /// Maps every face through `transform`.
    pub fn transform<T>(&self, transform: &T, precision: &Precision) -> KernelResult<Self>
    where
        T: PointTransform<DVec3> + ?Sized,
    {
        let faces = self
            .faces
            .iter()
            .map(|face| face.transform(transform, precision))
            .collect::<KernelResult<Vec<_>>>()?;
        Ok(Self { faces })
    }
}

/// Merges points within tolerance, bucketed on a grid of `epsilon` cells.
///
/// Points that compare equal lie in the same or a neighbouring cell, so a
/// lookup visits at most 27 buckets.
struct VertexWelder<'a> {
    precision: &'a Precision,
    points: Vec<DVec3>,
    cells: HashMap<[i64; 3], Vec<usize>>,
}

impl<'a> VertexWelder<'a> {
    fn new(precision: &'a Precision) -> Self {
        Self {
            precision,
            points: Vec::new(),
            cells: HashMap::new(),
        }
    }

    fn cell(&self, p: DVec3) -> [i64; 3] {
        let q = (p / self.precision.epsilon()).floor();
        [q.x as i64, q.y as i64, q.z as i64]
    }

    /// Index of the first stored point equal to `p`, storing `p` if none is.
    fn weld(&mut self, p: DVec3) -> usize {
        let [x, y, z] = self.cell(p);
        for dx in -1..=1_i64 {
            for dy in -1..=1_i64 {
                for dz in -1..=1_i64 {
                    let key = [x.saturating_add(dx), y.saturating_add(dy), z.saturating_add(dz)];
                    let Some(ids) = self.cells.get(&key) else {
                        continue;
                    };
                    if let Some(&id) = ids.iter().find(|&&id| self.precision.points_eq(self.points[id], p)) {
                        return id;
                    }
                }
            }
        }

        let id = self.points.len();
        self.points.push(p);
        self.cells.entry([x, y, z]).or_default().push(id);
        id
    }
}

impl From<Vec<Face>> for Solid {
    fn from(faces: Vec<Face>) -> Self {
        Self::new(faces)
    }
}

impl FromIterator<Face> for Solid {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// =============================================================================
// TESTS
// =============================================================================
