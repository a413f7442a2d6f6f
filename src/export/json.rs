//! JSON report of a compiled plan.

use anyhow::{bail, Result};
use serde_json::{json, Value};

use crate::compiler::types::CompilerOutput;
use crate::graph::render_graph::RenderGraph;

/// Serialize a compiled plan and its input graph into a pretty-printed JSON
/// report, for debug tooling and timeline visualizers.
///
/// # Errors
/// * Fails if the compilation failed and carries no phase outputs.
pub fn compiler_report(graph: &RenderGraph, output: &CompilerOutput) -> Result<String> {
    let Some(phases) = output.phase_outputs.as_ref() else {
        bail!("compilation failed, no report available");
    };

    let nodes: Vec<Value> = graph
        .passes()
        .iter()
        .map(|pass| {
            json!({
                "id": pass.id(),
                "name": pass.name(),
                "dependencies": pass
                    .resources()
                    .iter()
                    .map(|res| {
                        json!({
                            "id": res.id,
                            "name": res.name,
                            "type": res.ty,
                            "access": res.access,
                        })
                    })
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let edges: Vec<Value> = graph
        .edges()
        .iter()
        .map(|edge| {
            json!({
                "id": edge.id,
                "srcNodeId": edge.src,
                "srcRes": edge.src_resource,
                "dstNodeId": edge.dst,
                "dstRes": edge.dst_resource,
            })
        })
        .collect();

    let serial_order: Vec<Value> = phases
        .serial_execution_order
        .iter()
        .map(|&id| {
            json!({
                "id": id,
                "name": pass_name(graph, id),
            })
        })
        .collect();

    let parallelizable: Vec<Value> = phases
        .parallelizable_nodes
        .iter()
        .map(|(&id, peers)| {
            json!([
                pass_name(graph, id),
                peers.iter().map(|&peer| pass_name(graph, peer)).collect::<Vec<_>>(),
            ])
        })
        .collect();

    let tasks: Vec<Value> = phases
        .task_order
        .iter()
        .map(|task| {
            json!({
                "pass": pass_name(graph, task.pass),
                "async": task.async_pass.map(|id| pass_name(graph, id)),
            })
        })
        .collect();

    let optimizer = &phases.resource_optimizer;
    let slots: Vec<Value> = optimizer
        .aliased
        .iter()
        .map(|slot| {
            json!({
                "id": slot.id,
                "type": slot.ty,
                "usagePoints": slot.usage_points.iter().collect::<Vec<_>>(),
            })
        })
        .collect();

    let report = json!({
        "compilerOptions": {
            "allowParallelization": output.options.allow_parallelization,
        },
        "inputGraph": {
            "nodes": nodes,
            "edges": edges,
        },
        "serialExecutionOrder": serial_order,
        "parallelizableNodes": parallelizable,
        "generatedTasks": tasks,
        "resourceOptimizerResult": {
            "timelineLength": optimizer.timeline_range.end,
            "preCount": optimizer.pre_count,
            "postCount": optimizer.post_count,
            "reduction": optimizer.reduction,
            "resources": slots,
        },
    });

    Ok(serde_json::to_string_pretty(&report)?)
}

fn pass_name(graph: &RenderGraph, id: crate::util::id::Id) -> &str {
    graph.pass(id).map(|pass| pass.name()).unwrap_or("<unknown>")
}
