//! This module exposes the [`Pass`] type and the [`PassBuilder`] used to
//! declare one correctly. A pass names the resources it touches; edges between
//! pass resources are inserted on the owning [`RenderGraph`](crate::RenderGraph).
//!
//! # Example
//!
//! A raster pass consuming an opaque scene input and producing two images:
//! ```
//! use deimos::prelude::*;
//!
//! let pass = PassBuilder::render("G-Buffer Pass")
//!     .external("scene")
//!     .writes("positionImage", ResourceType::Image)
//!     .writes("normalImage", ResourceType::Image)
//!     .build();
//!
//! assert!(pass.flags().raster);
//! assert_eq!(pass.resources().len(), 3);
//! ```

use serde::Serialize;

use crate::util::id::{Id, IdSequence};

/// Name of the sentinel pass anchoring the front of every graph.
pub const ROOT_PASS: &str = "Root";
/// Name of the sentinel pass anchoring the back of every graph.
pub const PRESENT_PASS: &str = "Present";

/// How a pass accesses one of its declared resources.
///
/// Ignored for [`ResourceType::External`] resources, whose state is not
/// managed by the graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    #[default]
    None,
    Read,
    Write,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    Unknown,
    Image,
    Buffer,
    /// Opaque input such as the scene. Not a GPU resource of the graph.
    External,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResourceFlags {
    /// Keep this resource out of the aliasing phase; it gets dedicated storage.
    pub dont_optimize: bool,
}

/// A pass-local resource declaration. Names are unique within the owning pass;
/// ids are unique process-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: Id,
    pub name: String,
    pub ty: ResourceType,
    pub access: AccessType,
    pub flags: ResourceFlags,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassFlags {
    /// Any pass that is not async or compute.
    pub raster: bool,
    /// Compute pass.
    pub compute: bool,
    /// Eligible to run on the asynchronous compute queue.
    pub asynchronous: bool,
    /// Exempt from reachability culling.
    pub never_cull: bool,
    /// Synthetic Root / Present pass.
    pub sentinel: bool,
}

/// A vertex in the render graph; one unit of GPU work.
///
/// Passes are created through a [`PassBuilder`] and handed to
/// [`RenderGraph::add_pass`](crate::RenderGraph::add_pass), which owns them for
/// the rest of their life. Adjacency is tracked at the pass level by the graph.
#[derive(Debug, Clone)]
pub struct Pass {
    pub(crate) id: Id,
    pub(crate) name: String,
    pub(crate) flags: PassFlags,
    pub(crate) resources: Vec<Resource>,
    // Pass-level adjacency, one entry per incident edge. Kept in sync with the
    // graph's edge list; duplicates mirror multi-edges.
    pub(crate) incoming: Vec<Id>,
    pub(crate) outgoing: Vec<Id>,
}

impl Pass {
    /// Get the stable id of this pass.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the display name of this pass.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the flags of this pass.
    pub fn flags(&self) -> PassFlags {
        self.flags
    }

    /// The declared resources of this pass, in declaration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Look up a declared resource by name.
    pub fn resource_by_name(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|res| res.name == name)
    }

    /// Look up a declared resource by id.
    pub fn resource_by_id(&self, id: Id) -> Option<&Resource> {
        self.resources.iter().find(|res| res.id == id)
    }
}

/// Used to create [`Pass`] objects correctly.
/// # Example
/// See the [`pass`](crate::graph::pass) module level documentation.
pub struct PassBuilder {
    inner: Pass,
}

impl PassBuilder {
    /// Create a new pass with no flags set.
    pub fn new(name: impl Into<String>) -> Self {
        PassBuilder {
            inner: Pass {
                id: IdSequence::next(),
                name: name.into(),
                flags: PassFlags::default(),
                resources: vec![],
                incoming: vec![],
                outgoing: vec![],
            },
        }
    }

    /// Create a new raster pass.
    pub fn render(name: impl Into<String>) -> Self {
        let mut builder = Self::new(name);
        builder.inner.flags.raster = true;
        builder
    }

    /// Mark this pass as a compute pass.
    pub fn compute(mut self) -> Self {
        self.inner.flags.compute = true;
        self
    }

    /// Allow this pass to be scheduled on the asynchronous compute queue.
    /// Only meaningful together with [`compute`](PassBuilder::compute).
    pub fn asynchronous(mut self) -> Self {
        self.inner.flags.asynchronous = true;
        self
    }

    /// Exempt this pass from reachability culling.
    pub fn never_cull(mut self) -> Self {
        self.inner.flags.never_cull = true;
        self
    }

    /// Mark this pass as a synthetic Root / Present anchor.
    pub fn sentinel(mut self) -> Self {
        self.inner.flags.sentinel = true;
        self
    }

    /// Declare a resource this pass reads.
    pub fn reads(self, name: impl Into<String>, ty: ResourceType) -> Self {
        self.resource(name, ty, AccessType::Read, ResourceFlags::default())
    }

    /// Declare a resource this pass writes.
    pub fn writes(self, name: impl Into<String>, ty: ResourceType) -> Self {
        self.resource(name, ty, AccessType::Write, ResourceFlags::default())
    }

    /// Declare a written resource that must keep dedicated storage instead of
    /// participating in aliasing.
    pub fn writes_unaliased(self, name: impl Into<String>, ty: ResourceType) -> Self {
        self.resource(
            name,
            ty,
            AccessType::Write,
            ResourceFlags {
                dont_optimize: true,
            },
        )
    }

    /// Declare an opaque external input, e.g. the scene.
    pub fn external(self, name: impl Into<String>) -> Self {
        self.resource(name, ResourceType::External, AccessType::None, ResourceFlags::default())
    }

    fn resource(mut self, name: impl Into<String>, ty: ResourceType, access: AccessType, flags: ResourceFlags) -> Self {
        self.inner.resources.push(Resource {
            id: IdSequence::next(),
            name: name.into(),
            ty,
            access,
            flags,
        });
        self
    }

    /// Obtain the built [`Pass`] object.
    pub fn build(self) -> Pass {
        self.inner
    }
}
