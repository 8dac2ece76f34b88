//! Keyed persistence of document records.
//!
//! The [`DocumentStore`] trait is the seam between the HTTP layer and
//! record persistence: create, atomic bulk-create, kind-scoped get/list,
//! and hard delete. [`MemoryStore`] is the in-process implementation.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{DocumentStore, StoreError, StoreResult};
