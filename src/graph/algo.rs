//! Traversal algorithms used by the compiler.

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::error::Error;
use crate::util::id::Id;

/// Adjacency access used by the traversal algorithms.
///
/// Neighbor lists are reported at the pass level and may contain duplicates
/// when multiple edges connect the same pair of passes.
pub trait Adjacency {
    /// Out-neighbor ids of `id`, duplicates included. Empty for unknown ids.
    fn out_neighbors(&self, id: Id) -> &[Id];
    /// Number of incoming edge endpoints of `id`, duplicates included.
    fn in_degree(&self, id: Id) -> usize;
}

/// Collect the set of ids reachable from `root` via out-edges, `root` included.
pub fn reachable<G: Adjacency>(graph: &G, root: Id) -> BTreeSet<Id> {
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();

    visited.insert(root);
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        for &next in graph.out_neighbors(current) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

/// Returns whether a directed walk from `src` to `dst` exists. A vertex always
/// has a path to itself. Terminates on cyclic graphs.
pub fn has_path<G: Adjacency>(graph: &G, src: Id, dst: Id) -> bool {
    if src == dst {
        return true;
    }

    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();

    visited.insert(src);
    queue.push_back(src);

    while let Some(current) = queue.pop_front() {
        for &next in graph.out_neighbors(current) {
            if next == dst {
                return true;
            }
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    false
}

/// Kahn's algorithm over the supplied vertex list.
///
/// In-degrees are initialized from the full incoming-adjacency count of each
/// vertex. Vertices with zero in-degree are emitted in the order they appear
/// in `vertices`, their successors are decremented, and newly drained vertices
/// are appended to the work queue. Fails with [`Error::GraphNotAcyclic`] when
/// any in-degree remains positive after the queue runs dry.
pub fn topological_sort<G: Adjacency>(graph: &G, vertices: &[Id]) -> Result<Vec<Id>, Error> {
    let mut in_degrees: HashMap<Id, i32> = vertices
        .iter()
        .map(|&id| (id, graph.in_degree(id) as i32))
        .collect();

    let mut queue: VecDeque<Id> = vertices
        .iter()
        .copied()
        .filter(|id| in_degrees[id] == 0)
        .collect();

    let mut order = Vec::with_capacity(vertices.len());
    while let Some(id) = queue.pop_front() {
        order.push(id);

        for &next in graph.out_neighbors(id) {
            let degree = in_degrees.entry(next).or_insert(0);
            *degree -= 1;
            // Vertices outside the supplied set go negative and never enqueue.
            if *degree == 0 && vertices.contains(&next) {
                queue.push_back(next);
            }
        }
    }

    if vertices.iter().any(|id| in_degrees[id] != 0) {
        return Err(Error::GraphNotAcyclic);
    }

    Ok(order)
}
