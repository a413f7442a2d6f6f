//! Exposes the deimos error type

use thiserror::Error;

/// Error type that the graph compiler can return.
///
/// The compiler driver stores the first error it encounters in
/// [`CompilerOutput::fail_reason`](crate::CompilerOutput::fail_reason), so the
/// variants double as the failure reasons of a compilation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The supplied vertex set contains a dependency cycle and cannot be
    /// brought into a topological order.
    #[error("graph is not acyclic")]
    GraphNotAcyclic,
    /// The graph has no sentinel pass named `Root` to start culling from.
    #[error("render graph has no root pass")]
    NoRootNode,
    /// The culled sub-graph contains a cyclic dependency.
    #[error("render graph contains a cyclic dependency")]
    CyclicDependency,
    /// A pass id could not be resolved. Generally this should not happen.
    #[error("no pass found for the given id")]
    NoNodeByGivenId,
}
