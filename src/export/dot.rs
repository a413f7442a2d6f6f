//! Graphviz export of a render graph.

use std::collections::HashMap;

use petgraph::dot::Dot;
use petgraph::Graph;

use crate::graph::render_graph::RenderGraph;
use crate::util::id::Id;

/// Render the pass-level structure of a graph in `dot` format, one edge per
/// resource connector. The caller decides where the string ends up.
pub fn graph_dot(graph: &RenderGraph) -> String {
    let mut dot_graph: Graph<&str, &str> = Graph::new();

    let mut indices = HashMap::with_capacity(graph.passes().len());
    for pass in graph.passes() {
        indices.insert(pass.id(), dot_graph.add_node(pass.name()));
    }

    for edge in graph.edges() {
        let label = resource_name(graph, edge.src, edge.src_resource);
        if let (Some(&src), Some(&dst)) = (indices.get(&edge.src), indices.get(&edge.dst)) {
            dot_graph.add_edge(src, dst, label);
        }
    }

    format!("{}", Dot::new(&dot_graph))
}

fn resource_name(graph: &RenderGraph, pass: Id, resource: Id) -> &str {
    graph
        .pass(pass)
        .and_then(|p| p.resource_by_id(resource))
        .map(|r| r.name.as_str())
        .unwrap_or("")
}
