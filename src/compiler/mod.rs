//! The compiler turns a finished [`RenderGraph`](crate::RenderGraph) into an
//! execution plan for a command-submission layer.
//!
//! A plan consists of the culled pass set, a dependency-respecting serial
//! order, a task order whose slots may pair a main-queue pass with an async
//! compute companion, an aliased resource plan that reuses storage across
//! non-overlapping image lifetimes, and per-slot resource-link templates for a
//! downstream barrier-generation stage.
//!
//! Compilation is a pure function of the graph and the
//! [`CompilerOptions`]; it performs no I/O and keeps no state between runs.
//! All orderings are deterministic greedy heuristics: ties in the serial order
//! fall back to pass insertion order, pairing picks the first eligible
//! companion, and the aliaser packs first-fit in discovery order.

pub mod alias;
pub mod compile;
pub mod types;

pub use alias::{AliasedResource, AliaserOutput, ResourceAliaser, UsagePoint, UsageRange};
pub use compile::GraphCompiler;
pub use types::{CompilerOptions, CompilerOutput, PhaseOutputs, ResourceLink, ResourceTemplate, Task};
