//! Faces of a plane graph given by vertex coordinates and a list of edges.
//!
//! Faces are found from the graph's rotation system: around every vertex the
//! neighbours are put in clockwise order, and a face is traced by repeatedly
//! leaving a vertex `v2` (entered from `v1`) along the edge to the neighbour
//! that follows `v1` in `v2`'s order. Each directed edge (arc) lies on exactly
//! one face, so tracing from every unused arc enumerates all faces.
//!
//! The graph is assumed to be drawn without crossings, with straight edges.

use std::{
    collections::{ BTreeSet, HashMap, HashSet },
    f64::consts::TAU,
};
use tracing::debug;

crate::mkerr!(
    /// Errors from constructing a graph.
    GraphError("graph") -> GraphResult : {
        BadVertex => "edge refers to a nonexistent vertex",
        SelfLoop => "edges must join distinct vertices",
        DuplicateEdge => "each pair of vertices may be joined at most once",
        NonFinite => "vertex coordinates must be finite",
    }
);

/// A directed edge `(from, to)`.
pub type Arc = (usize, usize);

/// A closed walk of arcs bounding one face.
pub type Face = Vec<Arc>;

/// A straight-line drawing of a simple graph in the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGraph {
    coords: Vec<[f64; 2]>,
    edges: Vec<(usize, usize)>,
}

impl PlaneGraph {
    pub fn new(coords: Vec<[f64; 2]>, edges: Vec<(usize, usize)>)
        -> GraphResult<Self>
    {
        if coords.iter().flatten().any(|c| !c.is_finite()) {
            return Err(GraphError::NonFinite);
        }
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for &(a, b) in edges.iter() {
            if a >= coords.len() || b >= coords.len() {
                return Err(GraphError::BadVertex);
            }
            if a == b {
                return Err(GraphError::SelfLoop);
            }
            if !seen.insert((a.min(b), a.max(b))) {
                return Err(GraphError::DuplicateEdge);
            }
        }
        return Ok(Self { coords, edges });
    }

    pub fn coords(&self) -> &[[f64; 2]] { &self.coords }

    pub fn edges(&self) -> &[(usize, usize)] { &self.edges }

    /// Counter-clockwise angle in `[0, 2pi)` of the vector from `from` to
    /// `to`.
    fn angle(&self, from: usize, to: usize) -> f64 {
        let [x0, y0] = self.coords[from];
        let [x1, y1] = self.coords[to];
        return (y1 - y0).atan2(x1 - x0).rem_euclid(TAU);
    }

    /// For each vertex, its neighbours in clockwise order.
    pub fn rotation_system(&self) -> Vec<Vec<usize>> {
        let mut rs: Vec<Vec<usize>> = vec![Vec::new(); self.coords.len()];
        for &(a, b) in self.edges.iter() {
            rs[a].push(b);
            rs[b].push(a);
        }
        for (v, neighbors) in rs.iter_mut().enumerate() {
            // descending counter-clockwise angle is clockwise order
            neighbors.sort_by(|n1, n2| {
                self.angle(v, *n2).total_cmp(&self.angle(v, *n1))
            });
        }
        return rs;
    }

    /// Find all faces, including the outer one.
    ///
    /// For a connected graph the count satisfies Euler's formula
    /// `V - E + F = 2`. Faces are traced starting from the smallest unused arc
    /// so that the output is deterministic.
    pub fn faces(&self) -> Vec<Face> {
        // the arc entering v2 from n_k continues along (v2, n_{k+1})
        let successor: HashMap<Arc, Arc>
            = self.rotation_system().into_iter().enumerate()
            .flat_map(|(v2, neighbors)| {
                let d = neighbors.len();
                (0..d).map(move |k| ((neighbors[k], v2), (v2, neighbors[(k + 1) % d])))
                    .collect::<Vec<_>>()
            })
            .collect();
        let mut arcs: BTreeSet<Arc> = successor.keys().copied().collect();
        let mut faces: Vec<Face> = Vec::new();
        while let Some(e1) = arcs.pop_first() {
            let mut path: Face = vec![e1];
            let mut cur = e1;
            while let Some(&e2) = successor.get(&cur) {
                if e2 == e1 {
                    break;
                }
                arcs.remove(&e2);
                path.push(e2);
                cur = e2;
            }
            faces.push(path);
        }
        debug!(faces = faces.len(), "traced faces");
        return faces;
    }

    /// Unsigned area enclosed by a face, by the shoelace formula.
    pub fn face_area(&self, face: &[Arc]) -> f64 {
        let n = face.len();
        let mut acc: f64 = 0.0;
        for i in 0..n {
            let [xi, yi] = self.coords[face[i].0];
            let [xj, yj] = self.coords[face[(i + n - 1) % n].0];
            acc += xi * yj - xj * yi;
        }
        return 0.5 * acc.abs();
    }

    /// The face of largest area, which for a connected graph is the outer
    /// face. `None` if the graph has no edges.
    pub fn border(&self) -> Option<Face> {
        return self.faces().into_iter()
            .map(|f| (self.face_area(&f), f))
            .max_by(|(a1, _), (a2, _)| a1.total_cmp(a2))
            .map(|(_, f)| f);
    }
}
