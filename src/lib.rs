//! # Deimos
//!
//! Deimos is an offline render-graph compiler. It ingests a user-described
//! directed graph of rendering passes and their resource dependencies, and
//! emits an execution plan suitable for driving a GPU command-submission
//! layer:
//!
//! - a pruned graph with unreachable passes culled,
//! - a linear task order that respects all data dependencies,
//! - an async-companion assignment pairing main-queue tasks with compatible
//!   compute tasks for co-scheduling on distinct hardware queues,
//! - an aliased resource plan that reuses storage across non-overlapping
//!   image lifetimes, with per-resource timelines for a downstream
//!   barrier/synchronization stage.
//!
//! The compiler allocates no GPU memory, issues no API calls and performs no
//! I/O; [`GraphCompiler::compile`] is a pure function from a graph and a set
//! of options to a [`CompilerOutput`].
//!
//! # Example
//!
//! ```
//! use deimos::prelude::*;
//!
//! // Describe the frame. Every graph is anchored by a Root sentinel and, by
//! // convention, a Present sink.
//! let mut graph = RenderGraph::new();
//! let root = graph.add_pass(PassBuilder::new(ROOT_PASS).sentinel().never_cull().external("scene").build());
//! let forward = graph.add_pass(
//!     PassBuilder::render("Forward Pass")
//!         .external("scene")
//!         .writes("colorImage", ResourceType::Image)
//!         .build(),
//! );
//! let present = graph.add_pass(
//!     PassBuilder::render(PRESENT_PASS)
//!         .sentinel()
//!         .never_cull()
//!         .reads("presentImage", ResourceType::Image)
//!         .build(),
//! );
//! assert!(graph.insert_edge(root, "scene", forward, "scene"));
//! assert!(graph.insert_edge(forward, "colorImage", present, "presentImage"));
//!
//! // Compile it into a plan.
//! let output = GraphCompiler::new(&graph, CompilerOptions::default()).compile();
//! assert!(!output.has_failed);
//!
//! let phases = output.phase_outputs.as_ref().unwrap();
//! assert_eq!(phases.task_order.len(), 3);
//! ```

pub mod compiler;
pub mod export;
pub mod graph;
pub mod prelude;
pub mod util;

mod error;

pub use compiler::{
    AliasedResource, AliaserOutput, CompilerOptions, CompilerOutput, GraphCompiler, PhaseOutputs,
    ResourceAliaser, ResourceLink, ResourceTemplate, Task, UsagePoint, UsageRange,
};
pub use error::Error;
pub use graph::pass::{
    AccessType, Pass, PassBuilder, PassFlags, Resource, ResourceFlags, ResourceType, PRESENT_PASS,
    ROOT_PASS,
};
pub use graph::render_graph::{Edge, RenderGraph};
pub use util::id::{Id, IdSequence};
