//! The render graph describes a frame as a directed graph of passes connected
//! by typed resource edges. Each pass declares the resources it touches; edges
//! connect a producing resource on one pass to a consuming resource on
//! another, referenced by name at insertion time and by stable ids afterwards.
//!
//! Every graph is anchored by two sentinel passes: a `Root` pass all live work
//! is reachable from, and by convention a `Present` sink. The
//! [`compiler`](crate::compiler) consumes a finished graph and never mutates
//! it.
//!
//! # Example
//!
//! ```
//! use deimos::prelude::*;
//!
//! let mut graph = RenderGraph::new();
//! let root = graph.add_pass(PassBuilder::new(ROOT_PASS).sentinel().never_cull().external("scene").build());
//! let tonemap = graph.add_pass(
//!     PassBuilder::render("Tonemap Pass")
//!         .external("scene")
//!         .writes("ldrImage", ResourceType::Image)
//!         .build(),
//! );
//! let present = graph.add_pass(
//!     PassBuilder::render(PRESENT_PASS)
//!         .sentinel()
//!         .never_cull()
//!         .reads("presentImage", ResourceType::Image)
//!         .build(),
//! );
//!
//! assert!(graph.insert_edge(root, "scene", tonemap, "scene"));
//! assert!(graph.insert_edge(tonemap, "ldrImage", present, "presentImage"));
//! ```

pub mod algo;
pub mod pass;
pub mod render_graph;
