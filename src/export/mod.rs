//! Visualization and debug exports.
//!
//! Everything here renders to a `String`; the compiler core performs no I/O,
//! so persisting (or displaying) an export is the caller's business. Three
//! formats are supported: a mermaid flowchart of the input graph, a mermaid
//! Gantt chart of a compiled plan, a graphviz `dot` rendering of the pass
//! structure, and a JSON report combining the input graph with every phase
//! output.

pub mod dot;
pub mod json;
pub mod mermaid;

pub use dot::graph_dot;
pub use json::compiler_report;
pub use mermaid::{compiled_gantt, graph_flowchart};
