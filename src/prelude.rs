//! Re-exports the commonly used public surface of the crate.

pub use crate::compiler::{CompilerOptions, CompilerOutput, GraphCompiler, Task};
pub use crate::error::Error;
pub use crate::graph::pass::{
    AccessType, Pass, PassBuilder, PassFlags, Resource, ResourceFlags, ResourceType, PRESENT_PASS,
    ROOT_PASS,
};
pub use crate::graph::render_graph::{Edge, RenderGraph};
pub use crate::util::id::{Id, IdSequence};
