//! Data types produced by the compiler phases.

use std::collections::BTreeMap;

use crate::compiler::alias::AliaserOutput;
use crate::error::Error;
use crate::graph::pass::{AccessType, ResourceType};
use crate::util::id::Id;

/// Options steering a compilation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Allow pairing main-queue tasks with async compute companions. When
    /// false the task order is a pure serialization of the execution order.
    pub allow_parallelization: bool,
}

/// One slot of execution: a main-queue pass with an optional companion pass
/// co-scheduled on the asynchronous compute queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub pass: Id,
    pub async_pass: Option<Id>,
}

/// Directed edge of an emitted resource template. Consumed by a downstream
/// barrier-generation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLink {
    pub src_pass: Id,
    pub dst_pass: Id,
    pub src_resource: Id,
    pub dst_resource: Id,
    /// The consumer's access to the linked resource.
    pub access: AccessType,
}

/// Template for one aliased storage slot and the data flow through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTemplate {
    pub id: Id,
    pub ty: ResourceType,
    pub links: Vec<ResourceLink>,
}

/// The intermediate results of every compiler phase. Present on successful
/// compilations only.
#[derive(Debug, Clone)]
pub struct PhaseOutputs {
    /// Pass ids retained by culling.
    pub cull_nodes: Vec<Id>,
    /// Pass ids in dependency-respecting serial order.
    pub serial_execution_order: Vec<Id>,
    /// For each non-sentinel pass with at least one independent peer, the
    /// passes that may execute concurrently with it. Advisory.
    pub parallelizable_nodes: BTreeMap<Id, Vec<Id>>,
    /// The final task order driving command submission.
    pub task_order: Vec<Task>,
    /// The aliased resource plan.
    pub resource_optimizer: AliaserOutput,
}

/// Everything a compilation produces.
#[derive(Debug, Clone)]
pub struct CompilerOutput {
    /// One template per aliased storage slot.
    pub resource_templates: Vec<ResourceTemplate>,
    pub has_failed: bool,
    /// The first phase failure, if any.
    pub fail_reason: Option<Error>,
    /// Phase results; `None` when the compilation failed.
    pub phase_outputs: Option<PhaseOutputs>,
    /// The options this output was compiled with.
    pub options: CompilerOptions,
}
