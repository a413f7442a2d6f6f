//! The render graph owns the passes and the typed edges between their
//! resources, and keeps pass-level adjacency lists for cheap traversal.

use crate::error::Error;
use crate::graph::algo::Adjacency;
use crate::graph::pass::Pass;
use crate::util::id::{Id, IdSequence};

/// A typed data-flow arrow from a source pass resource to a destination pass
/// resource. Edges carry their own id, so duplicates between the same
/// endpoints stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: Id,
    /// Source pass id.
    pub src: Id,
    /// Destination pass id.
    pub dst: Id,
    /// Resource id on the source pass.
    pub src_resource: Id,
    /// Resource id on the destination pass.
    pub dst_resource: Id,
}

/// Directed graph of render passes connected by resource edges.
///
/// Passes and edges are immutable during compilation; all mutation helpers
/// report success through their return value and leave the graph untouched on
/// failure.
#[derive(Debug, Default, Clone)]
pub struct RenderGraph {
    passes: Vec<Pass>,
    edges: Vec<Edge>,
}

impl RenderGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pass to the graph. Returns the pass id as a stable handle.
    pub fn add_pass(&mut self, pass: Pass) -> Id {
        let id = pass.id;
        self.passes.push(pass);
        id
    }

    /// Remove a pass together with all incident edges and the adjacency
    /// entries referring to it. Returns false if the id is unknown.
    pub fn delete_pass(&mut self, id: Id) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };

        self.passes.remove(index);
        self.edges.retain(|edge| edge.src != id && edge.dst != id);
        for pass in &mut self.passes {
            pass.incoming.retain(|&other| other != id);
            pass.outgoing.retain(|&other| other != id);
        }

        true
    }

    /// Insert an edge between two pass resources, referenced by name.
    ///
    /// Fails when source and destination are the same pass or either resource
    /// name is not declared on its pass. Duplicate edges between the same
    /// endpoints are permitted and receive a fresh id each.
    pub fn insert_edge(&mut self, src: Id, src_res: &str, dst: Id, dst_res: &str) -> bool {
        if src == dst {
            return false;
        }

        let Some(src_resource) = self.pass(src).and_then(|p| p.resource_by_name(src_res)).map(|r| r.id) else {
            return false;
        };
        let Some(dst_resource) = self.pass(dst).and_then(|p| p.resource_by_name(dst_res)).map(|r| r.id) else {
            return false;
        };

        self.push_edge(src, src_resource, dst, dst_resource);
        true
    }

    /// Insert an edge between two pass resources, referenced by resource id.
    pub(crate) fn insert_edge_by_ids(&mut self, src: Id, src_resource: Id, dst: Id, dst_resource: Id) -> bool {
        if src == dst {
            return false;
        }
        if self.pass(src).and_then(|p| p.resource_by_id(src_resource)).is_none() {
            return false;
        }
        if self.pass(dst).and_then(|p| p.resource_by_id(dst_resource)).is_none() {
            return false;
        }

        self.push_edge(src, src_resource, dst, dst_resource);
        true
    }

    fn push_edge(&mut self, src: Id, src_resource: Id, dst: Id, dst_resource: Id) {
        // Presence of both passes was checked by the callers.
        if let Some(index) = self.index_of(src) {
            self.passes[index].outgoing.push(dst);
        }
        if let Some(index) = self.index_of(dst) {
            self.passes[index].incoming.push(src);
        }
        self.edges.push(Edge {
            id: IdSequence::next(),
            src,
            dst,
            src_resource,
            dst_resource,
        });
    }

    /// Delete a single edge matching the given endpoints, together with its
    /// adjacency entries. Returns false if no such edge exists.
    pub fn delete_edge(&mut self, src: Id, src_res: &str, dst: Id, dst_res: &str) -> bool {
        if src == dst {
            return false;
        }

        let Some(src_resource) = self.pass(src).and_then(|p| p.resource_by_name(src_res)).map(|r| r.id) else {
            return false;
        };
        let Some(dst_resource) = self.pass(dst).and_then(|p| p.resource_by_name(dst_res)).map(|r| r.id) else {
            return false;
        };

        self.remove_edge(src, src_resource, dst, dst_resource)
    }

    /// Delete the edge described by `edge` from this graph. Matching is by
    /// endpoint ids, so a record taken from a copied graph still resolves.
    pub(crate) fn delete_edge_record(&mut self, edge: &Edge) -> bool {
        self.remove_edge(edge.src, edge.src_resource, edge.dst, edge.dst_resource)
    }

    fn remove_edge(&mut self, src: Id, src_resource: Id, dst: Id, dst_resource: Id) -> bool {
        let Some(edge_index) = self.edges.iter().position(|e| {
            e.src == src && e.dst == dst && e.src_resource == src_resource && e.dst_resource == dst_resource
        }) else {
            return false;
        };
        let Some(src_index) = self.index_of(src) else {
            return false;
        };
        let Some(dst_index) = self.index_of(dst) else {
            return false;
        };
        let Some(out_index) = self.passes[src_index].outgoing.iter().position(|&p| p == dst) else {
            return false;
        };
        let Some(in_index) = self.passes[dst_index].incoming.iter().position(|&p| p == src) else {
            return false;
        };

        self.edges.remove(edge_index);
        self.passes[src_index].outgoing.remove(out_index);
        self.passes[dst_index].incoming.remove(in_index);

        true
    }

    /// Returns whether any edge runs from `src` to `dst`.
    pub fn contains_edge(&self, src: Id, dst: Id) -> bool {
        self.edges.iter().any(|edge| edge.src == src && edge.dst == dst)
    }

    /// Returns whether any edge connects `a` and `b` in either direction.
    pub fn contains_any_edge(&self, a: Id, b: Id) -> bool {
        self.contains_edge(a, b) || self.contains_edge(b, a)
    }

    /// Look up a pass by id.
    pub fn pass(&self, id: Id) -> Option<&Pass> {
        self.passes.iter().find(|pass| pass.id == id)
    }

    /// All passes in insertion order.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Resolve a list of pass ids to pass references.
    pub(crate) fn passes_for_ids(&self, ids: &[Id]) -> Result<Vec<&Pass>, Error> {
        ids.iter()
            .map(|&id| self.pass(id).ok_or(Error::NoNodeByGivenId))
            .collect()
    }

    /// Produce an independent copy of this graph, preserving pass, resource
    /// and edge identities so cross-references into the copy stay meaningful.
    pub fn deep_copy(&self) -> RenderGraph {
        self.clone()
    }

    fn index_of(&self, id: Id) -> Option<usize> {
        self.passes.iter().position(|pass| pass.id == id)
    }
}

impl Adjacency for RenderGraph {
    fn out_neighbors(&self, id: Id) -> &[Id] {
        self.pass(id).map(|pass| pass.outgoing.as_slice()).unwrap_or(&[])
    }

    fn in_degree(&self, id: Id) -> usize {
        self.pass(id).map(|pass| pass.incoming.len()).unwrap_or(0)
    }
}
