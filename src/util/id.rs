//! The process-wide id source.

use std::sync::atomic::{AtomicI32, Ordering};

/// Stable integer handle for passes, resources, edges and aliased slots.
pub type Id = i32;

static NEXT_ID: AtomicI32 = AtomicI32::new(0);

/// Monotonic id source shared by the whole process.
///
/// Every pass, resource declaration, edge and synthesized aliased slot draws
/// its id from this counter, so ids are unique across all of them.
/// Simultaneous calls from independent threads each receive a distinct value.
pub struct IdSequence;

impl IdSequence {
    /// Draw the next id.
    pub fn next() -> Id {
        NEXT_ID.fetch_add(1, Ordering::Relaxed)
    }
}
