//! Mermaid export of render graphs and compiled plans.

use std::collections::BTreeMap;

use crate::compiler::types::CompilerOutput;
use crate::graph::pass::{AccessType, ResourceType};
use crate::graph::render_graph::RenderGraph;

/// Render a graph as a mermaid `flowchart TD`: one node per pass, one bubble
/// per connected resource, arrows de-duplicated across multi-edges.
pub fn graph_flowchart(graph: &RenderGraph) -> String {
    let mut lines = vec![
        String::from("flowchart TD"),
        String::from("classDef resImage color:#4c4f69,fill:#cba6f7,stroke:#8839ef,stroke-width:1px;"),
        String::from("classDef resOther color:#4c4f69,fill:#f38ba8,stroke:#d20f39,stroke-width:1px;"),
        String::from("classDef pass color:#4c4f69,fill:#b4befe,stroke:#7287fd,stroke-width:1px;"),
    ];

    for pass in graph.passes() {
        lines.push(format!("{}[{}]:::pass", pass.id(), pass.name()));
        for edge in graph.edges().iter().filter(|edge| edge.src == pass.id()) {
            if let Some(res) = pass.resource_by_id(edge.src_resource) {
                let class = if res.ty == ResourceType::Image {
                    "resImage"
                } else {
                    "resOther"
                };
                lines.push(format!("{}({}):::{}", res.name, res.name, class));
            }
        }
    }

    for pass in graph.passes() {
        for edge in graph.edges().iter().filter(|edge| edge.src == pass.id()) {
            let Some(res) = pass.resource_by_id(edge.src_resource) else {
                continue;
            };
            let into_resource = format!("{} --> {}", pass.id(), res.name);
            if !lines.contains(&into_resource) {
                lines.push(into_resource);
            }
            let out_of_resource = format!("{} --> {}", res.name, edge.dst);
            if !lines.contains(&out_of_resource) {
                lines.push(out_of_resource);
            }
        }
    }

    lines.join("\n") + "\n"
}

/// Render a compiled plan as a mermaid Gantt chart: the task timeline, the
/// async companions, and one section per aliased slot showing which original
/// resource occupies it over which task range.
///
/// Returns `None` for failed compilations.
pub fn compiled_gantt(graph: &RenderGraph, output: &CompilerOutput) -> Option<String> {
    let phases = output.phase_outputs.as_ref()?;

    let mut lines = vec![
        String::from("---"),
        String::from("displayMode: compact"),
        String::from("---"),
        String::from("gantt"),
        String::from("\tdateFormat X"),
        String::from("\taxisFormat %s"),
        String::from("\tsection Passes"),
    ];

    for (i, task) in phases.task_order.iter().enumerate() {
        lines.push(format!("\t\t{} : {}, {}", pass_name(graph, task.pass), i, i + 1));
    }

    lines.push(String::from("\tsection Async"));
    for (i, task) in phases.task_order.iter().enumerate() {
        if let Some(async_pass) = task.async_pass {
            lines.push(format!("\t\t{} :crit, {}, {}", pass_name(graph, async_pass), i, i + 1));
        }
    }

    for (i, slot) in phases.resource_optimizer.aliased.iter().enumerate() {
        lines.push(format!("\tsection Resource #{i}"));

        // A write hands its name down to the following points so the aliased
        // occupant is labelled across its whole stay in the slot.
        let mut points: Vec<_> = slot.usage_points.iter().cloned().collect();
        for j in 1..points.len() {
            if points[j - 1].access == AccessType::Write {
                let name = points[j - 1].used_as.clone();
                points[j].used_as = name;
            }
        }

        let mut ranges: BTreeMap<String, (i32, i32)> = BTreeMap::new();
        for point in &points {
            ranges
                .entry(point.used_as.clone())
                .and_modify(|range| range.1 = point.point)
                .or_insert((point.point, point.point));
        }

        for (used_as, (start, end)) in &ranges {
            lines.push(format!("\t\t{} : {}, {}", used_as, start, end + 1));
        }
    }

    Some(lines.join("\n") + "\n")
}

fn pass_name(graph: &RenderGraph, id: crate::util::id::Id) -> &str {
    graph.pass(id).map(|pass| pass.name()).unwrap_or("<unknown>")
}
