//! Convex decomposition of polygons with holes.
//!
//! Triangulates with `earcutr`, then greedily merges triangles across shared
//! diagonals while the union stays convex (Hertel–Mehlhorn). Every piece is
//! built from the original vertices only, so neighbouring pieces always meet
//! along complete edges.

use std::collections::HashMap;

use glam::DVec2;
use robust::{orient2d, Coord};

use super::{longest_edge, signed_area, ConvexArea};
use crate::error::{KernelError, KernelResult};
use crate::precision::Precision;

/// Splits `outer` minus `holes` into convex counter-clockwise loops.
pub(super) fn convex_decomposition(
    outer: &[DVec2],
    holes: &[Vec<DVec2>],
    precision: &Precision,
) -> KernelResult<Vec<ConvexArea>> {
    let points: Vec<DVec2> = outer.iter().chain(holes.iter().flatten()).copied().collect();

    // A lone convex loop needs no triangulation.
    if holes.is_empty() && is_convex_loop(outer) {
        return Ok(vec![ConvexArea::new(outer.to_vec())]);
    }

    let triangles = triangulate(outer, holes, &points)?;
    let pieces = merge_convex(&points, triangles);

    let areas: Vec<ConvexArea> = pieces
        .into_iter()
        .map(|piece| ConvexArea::new(piece.into_iter().map(|i| points[i]).collect()))
        .filter(|area| !precision.is_sliver(2.0 * area.area(), longest_edge(area.vertices())))
        .collect();

    tracing::debug!(points = points.len(), pieces = areas.len(), "decomposed region into convex pieces");
    Ok(areas)
}

/// Ear-clips the region and returns counter-clockwise index triangles.
fn triangulate(outer: &[DVec2], holes: &[Vec<DVec2>], points: &[DVec2]) -> KernelResult<Vec<[usize; 3]>> {
    let data: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let mut hole_indices = Vec::with_capacity(holes.len());
    let mut start = outer.len();
    for hole in holes {
        hole_indices.push(start);
        start += hole.len();
    }

    let indices = earcutr::earcut(&data, &hole_indices, 2)
        .map_err(|err| KernelError::invalid_region(format!("triangulation failed: {err:?}")))?;
    if indices.is_empty() {
        return Err(KernelError::invalid_region("triangulation produced no triangles"));
    }

    let mut triangles: Vec<[usize; 3]> = indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect();

    // Ear clipping emits one consistent winding; flip it as a whole so
    // zero-area slivers keep the same orientation as their neighbours.
    let total: f64 = triangles
        .iter()
        .map(|t| signed_area(&[points[t[0]], points[t[1]], points[t[2]]]))
        .sum();
    if total < 0.0 {
        for t in &mut triangles {
            t.swap(1, 2);
        }
    }
    Ok(triangles)
}

/// Greedy merge of adjacent pieces across shared diagonals.
fn merge_convex(points: &[DVec2], triangles: Vec<[usize; 3]>) -> Vec<Vec<usize>> {
    let mut pieces: Vec<Option<Vec<usize>>> = triangles.into_iter().map(|t| Some(t.to_vec())).collect();

    // Directed edge -> owning piece
    let mut owner: HashMap<(usize, usize), usize> = HashMap::new();
    for (id, piece) in pieces.iter().enumerate() {
        if let Some(piece) = piece {
            for (a, b) in loop_edges(piece) {
                owner.insert((a, b), id);
            }
        }
    }

    for id in 0..pieces.len() {
        let mut changed = true;
        while changed {
            changed = false;
            let Some(current) = pieces[id].clone() else {
                break;
            };

            for (a, b) in loop_edges(&current) {
                let Some(&other) = owner.get(&(b, a)) else {
                    continue;
                };
                if other == id {
                    continue;
                }
                let Some(neighbour) = pieces[other].as_ref() else {
                    continue;
                };
                let Some(merged) = try_merge(points, &current, neighbour, a, b) else {
                    continue;
                };

                owner.remove(&(a, b));
                owner.remove(&(b, a));
                for edge in loop_edges(&merged) {
                    owner.insert(edge, id);
                }
                pieces[id] = Some(merged);
                pieces[other] = None;
                changed = true;
                break;
            }
        }
    }

    pieces.into_iter().flatten().collect()
}

/// Joins `p` (owning `a -> b`) and `q` (owning `b -> a`) when the union is
/// convex at both ends of the shared edge.
fn try_merge(points: &[DVec2], p: &[usize], q: &[usize], a: usize, b: usize) -> Option<Vec<usize>> {
    let m = p.len();
    let n = q.len();
    let k = (0..m).find(|&i| p[i] == a && p[(i + 1) % m] == b)?;
    let j = (0..n).find(|&i| q[i] == b && q[(i + 1) % n] == a)?;

    let at_a = turn(points, p[(k + m - 1) % m], a, q[(j + 2) % n]);
    let at_b = turn(points, q[(j + n - 1) % n], b, p[(k + 2) % m]);
    if at_a < 0.0 || at_b < 0.0 {
        return None;
    }

    // b .. a around p, then q strictly between a and b.
    let mut merged: Vec<usize> = (1..=m).map(|s| p[(k + s) % m]).collect();
    merged.extend((2..n).map(|s| q[(j + s) % n]));

    let mut seen = merged.clone();
    seen.sort_unstable();
    seen.dedup();
    if seen.len() != merged.len() {
        return None;
    }
    Some(merged)
}

fn turn(points: &[DVec2], a: usize, b: usize, c: usize) -> f64 {
    orient2d(coord(points[a]), coord(points[b]), coord(points[c]))
}

fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn loop_edges(piece: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = piece.len();
    (0..n).map(move |i| (piece[i], piece[(i + 1) % n]))
}

/// Counter-clockwise with no reflex vertex.
fn is_convex_loop(points: &[DVec2]) -> bool {
    let n = points.len();
    (0..n).all(|i| orient2d(coord(points[i]), coord(points[(i + 1) % n]), coord(points[(i + 2) % n])) >= 0.0)
}
