//! Render graph construction and mutation behavior.

mod framework;

use deimos::prelude::*;

#[test]
fn pass_and_resource_ids_are_unique() {
    let graph = framework::deferred_graph();

    let mut ids: Vec<Id> = graph.passes().iter().map(|pass| pass.id()).collect();
    ids.extend(graph.passes().iter().flat_map(|pass| pass.resources().iter().map(|res| res.id)));
    ids.extend(graph.edges().iter().map(|edge| edge.id));

    let count = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), count);
}

#[test]
fn insert_edge_rejects_self_edges() {
    let mut graph = RenderGraph::new();
    let pass = graph.add_pass(framework::gbuffer_pass());
    assert!(!graph.insert_edge(pass, "positionImage", pass, "normalImage"));
    assert!(graph.edges().is_empty());
}

#[test]
fn insert_edge_rejects_unknown_resources() {
    let mut graph = RenderGraph::new();
    let gbuffer = graph.add_pass(framework::gbuffer_pass());
    let lighting = graph.add_pass(framework::lighting_pass());

    assert!(!graph.insert_edge(gbuffer, "depthImage", lighting, "positionImage"));
    assert!(!graph.insert_edge(gbuffer, "positionImage", lighting, "depthImage"));
    assert!(graph.edges().is_empty());
    // A failed insert must not leave partial adjacency behind.
    assert!(!graph.contains_any_edge(gbuffer, lighting));
}

#[test]
fn duplicate_edges_are_permitted_and_distinguishable() {
    let mut graph = RenderGraph::new();
    let gbuffer = graph.add_pass(framework::gbuffer_pass());
    let lighting = graph.add_pass(framework::lighting_pass());

    assert!(graph.insert_edge(gbuffer, "positionImage", lighting, "positionImage"));
    assert!(graph.insert_edge(gbuffer, "positionImage", lighting, "positionImage"));

    assert_eq!(graph.edges().len(), 2);
    assert_ne!(graph.edges()[0].id, graph.edges()[1].id);
}

#[test]
fn delete_edge_removes_a_single_match() {
    let mut graph = RenderGraph::new();
    let gbuffer = graph.add_pass(framework::gbuffer_pass());
    let lighting = graph.add_pass(framework::lighting_pass());

    assert!(graph.insert_edge(gbuffer, "positionImage", lighting, "positionImage"));
    assert!(graph.insert_edge(gbuffer, "positionImage", lighting, "positionImage"));

    assert!(graph.delete_edge(gbuffer, "positionImage", lighting, "positionImage"));
    assert_eq!(graph.edges().len(), 1);
    assert!(graph.contains_edge(gbuffer, lighting));

    assert!(graph.delete_edge(gbuffer, "positionImage", lighting, "positionImage"));
    assert!(graph.edges().is_empty());
    assert!(!graph.contains_edge(gbuffer, lighting));

    assert!(!graph.delete_edge(gbuffer, "positionImage", lighting, "positionImage"));
}

#[test]
fn delete_pass_removes_incident_edges() {
    let mut graph = framework::deferred_graph();
    let lighting = framework::pass_id(&graph, "Lighting Pass");
    let gbuffer = framework::pass_id(&graph, "G-Buffer Pass");
    let composition = framework::pass_id(&graph, "Composition Pass");

    assert!(graph.delete_pass(lighting));

    assert!(graph.pass(lighting).is_none());
    assert!(graph.edges().iter().all(|edge| edge.src != lighting && edge.dst != lighting));
    assert!(!graph.contains_any_edge(gbuffer, lighting));
    // Unrelated connectivity is untouched.
    assert!(graph.contains_edge(composition, framework::pass_id(&graph, "Present")));

    assert!(!graph.delete_pass(lighting));
}

#[test]
fn contains_any_edge_checks_both_directions() {
    let graph = framework::linear_graph();
    let gbuffer = framework::pass_id(&graph, "G-Buffer Pass");
    let lighting = framework::pass_id(&graph, "Lighting Pass");
    let present = framework::pass_id(&graph, "Present");

    assert!(graph.contains_edge(gbuffer, lighting));
    assert!(!graph.contains_edge(lighting, gbuffer));
    assert!(graph.contains_any_edge(lighting, gbuffer));
    assert!(!graph.contains_any_edge(gbuffer, present));
}

#[test]
fn deep_copy_preserves_identities_and_is_independent() {
    let graph = framework::deferred_graph();
    let mut copy = graph.deep_copy();

    let original_pass_ids: Vec<Id> = graph.passes().iter().map(|pass| pass.id()).collect();
    let copied_pass_ids: Vec<Id> = copy.passes().iter().map(|pass| pass.id()).collect();
    assert_eq!(original_pass_ids, copied_pass_ids);

    let original_edge_ids: Vec<Id> = graph.edges().iter().map(|edge| edge.id).collect();
    let copied_edge_ids: Vec<Id> = copy.edges().iter().map(|edge| edge.id).collect();
    assert_eq!(original_edge_ids, copied_edge_ids);

    for (original, copied) in graph.passes().iter().zip(copy.passes()) {
        assert_eq!(original.resources(), copied.resources());
    }

    // Mutating the copy leaves the original untouched.
    let gbuffer = framework::pass_id(&copy, "G-Buffer Pass");
    let composition = framework::pass_id(&copy, "Composition Pass");
    assert!(copy.insert_edge(gbuffer, "albedoImage", composition, "imageB"));
    assert_eq!(copy.edges().len(), graph.edges().len() + 1);
    assert!(!graph.contains_edge(gbuffer, composition));
}
