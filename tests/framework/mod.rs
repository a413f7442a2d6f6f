//! Shared pass factories and example graphs for the integration tests.
#![allow(dead_code)]

use deimos::prelude::*;

pub fn root_pass() -> Pass {
    PassBuilder::new(ROOT_PASS)
        .sentinel()
        .never_cull()
        .external("scene")
        .build()
}

pub fn present_pass() -> Pass {
    PassBuilder::render(PRESENT_PASS)
        .sentinel()
        .never_cull()
        .reads("presentImage", ResourceType::Image)
        .build()
}

pub fn gbuffer_pass() -> Pass {
    PassBuilder::render("G-Buffer Pass")
        .external("scene")
        .writes("positionImage", ResourceType::Image)
        .writes("normalImage", ResourceType::Image)
        .writes("albedoImage", ResourceType::Image)
        .writes("motionVectors", ResourceType::Image)
        .build()
}

pub fn lighting_pass() -> Pass {
    PassBuilder::render("Lighting Pass")
        .reads("positionImage", ResourceType::Image)
        .reads("normalImage", ResourceType::Image)
        .reads("albedoImage", ResourceType::Image)
        .writes("lightingResult", ResourceType::Image)
        .build()
}

pub fn ambient_occlusion_pass() -> Pass {
    PassBuilder::render("Ambient Occlusion Pass")
        .compute()
        .asynchronous()
        .reads("positionImage", ResourceType::Image)
        .reads("normalImage", ResourceType::Image)
        .writes("ambientOcclusionImage", ResourceType::Image)
        .build()
}

pub fn composition_pass() -> Pass {
    PassBuilder::render("Composition Pass")
        .reads("imageA", ResourceType::Image)
        .reads("imageB", ResourceType::Image)
        .writes("combined", ResourceType::Image)
        .build()
}

pub fn anti_aliasing_pass() -> Pass {
    PassBuilder::render("Anti-Aliasing Pass")
        .reads("motionVectors", ResourceType::Image)
        .reads("aaInput", ResourceType::Image)
        .writes("aaOutput", ResourceType::Image)
        .build()
}

pub fn async_compute_pass() -> Pass {
    PassBuilder::new("AsyncCompute Pass")
        .compute()
        .asynchronous()
        .external("scene")
        .writes("someImage", ResourceType::Image)
        .build()
}

/// Resolve a pass id by display name. Panics when the pass does not exist.
pub fn pass_id(graph: &RenderGraph, name: &str) -> Id {
    graph
        .passes()
        .iter()
        .find(|pass| pass.name() == name)
        .unwrap_or_else(|| panic!("no pass named {name}"))
        .id()
}

/// The linear deferred-shading example:
/// Root -> G-Buffer -> Lighting -> Composition -> Present.
pub fn linear_graph() -> RenderGraph {
    let mut graph = RenderGraph::new();
    let root = graph.add_pass(root_pass());
    let gbuffer = graph.add_pass(gbuffer_pass());
    let lighting = graph.add_pass(lighting_pass());
    let composition = graph.add_pass(composition_pass());
    let present = graph.add_pass(present_pass());

    assert!(graph.insert_edge(root, "scene", gbuffer, "scene"));

    assert!(graph.insert_edge(gbuffer, "positionImage", lighting, "positionImage"));
    assert!(graph.insert_edge(gbuffer, "normalImage", lighting, "normalImage"));
    assert!(graph.insert_edge(gbuffer, "albedoImage", lighting, "albedoImage"));

    assert!(graph.insert_edge(lighting, "lightingResult", composition, "imageA"));
    assert!(graph.insert_edge(composition, "combined", present, "presentImage"));

    graph
}

/// The linear example extended with an async ambient-occlusion pass feeding
/// the composition.
pub fn deferred_graph() -> RenderGraph {
    let mut graph = RenderGraph::new();
    let root = graph.add_pass(root_pass());
    let gbuffer = graph.add_pass(gbuffer_pass());
    let lighting = graph.add_pass(lighting_pass());
    let ambient_occlusion = graph.add_pass(ambient_occlusion_pass());
    let composition = graph.add_pass(composition_pass());
    let present = graph.add_pass(present_pass());

    assert!(graph.insert_edge(root, "scene", gbuffer, "scene"));

    assert!(graph.insert_edge(gbuffer, "positionImage", lighting, "positionImage"));
    assert!(graph.insert_edge(gbuffer, "normalImage", lighting, "normalImage"));
    assert!(graph.insert_edge(gbuffer, "albedoImage", lighting, "albedoImage"));

    assert!(graph.insert_edge(gbuffer, "positionImage", ambient_occlusion, "positionImage"));
    assert!(graph.insert_edge(gbuffer, "normalImage", ambient_occlusion, "normalImage"));

    assert!(graph.insert_edge(lighting, "lightingResult", composition, "imageA"));
    assert!(graph.insert_edge(ambient_occlusion, "ambientOcclusionImage", composition, "imageB"));

    assert!(graph.insert_edge(composition, "combined", present, "presentImage"));

    graph
}

/// A longer frame with a second compute pass, anti-aliasing and two
/// composition stages.
pub fn extended_graph() -> RenderGraph {
    let mut graph = RenderGraph::new();
    let root = graph.add_pass(root_pass());
    let some_compute = graph.add_pass(async_compute_pass());
    let gbuffer = graph.add_pass(gbuffer_pass());
    let lighting = graph.add_pass(lighting_pass());
    let ambient_occlusion = graph.add_pass(ambient_occlusion_pass());
    let composition = graph.add_pass(composition_pass());
    let anti_aliasing = graph.add_pass(anti_aliasing_pass());
    let composition2 = graph.add_pass(composition_pass());
    let present = graph.add_pass(present_pass());

    assert!(graph.insert_edge(root, "scene", gbuffer, "scene"));
    assert!(graph.insert_edge(root, "scene", some_compute, "scene"));

    assert!(graph.insert_edge(gbuffer, "positionImage", lighting, "positionImage"));
    assert!(graph.insert_edge(gbuffer, "normalImage", lighting, "normalImage"));
    assert!(graph.insert_edge(gbuffer, "albedoImage", lighting, "albedoImage"));

    assert!(graph.insert_edge(gbuffer, "positionImage", ambient_occlusion, "positionImage"));
    assert!(graph.insert_edge(gbuffer, "normalImage", ambient_occlusion, "normalImage"));

    assert!(graph.insert_edge(lighting, "lightingResult", composition, "imageA"));
    assert!(graph.insert_edge(ambient_occlusion, "ambientOcclusionImage", composition, "imageB"));

    assert!(graph.insert_edge(composition, "combined", anti_aliasing, "aaInput"));
    assert!(graph.insert_edge(gbuffer, "motionVectors", anti_aliasing, "motionVectors"));

    assert!(graph.insert_edge(anti_aliasing, "aaOutput", composition2, "imageA"));
    assert!(graph.insert_edge(some_compute, "someImage", composition2, "imageB"));

    assert!(graph.insert_edge(composition2, "combined", present, "presentImage"));

    graph
}
