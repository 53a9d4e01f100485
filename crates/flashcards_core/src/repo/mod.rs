//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the load/save contract the collection service flushes through.
//! - Isolate file-system details from service orchestration.
//!
//! # Invariants
//! - Repositories persist whole collections; there are no partial writes.

pub mod collection_repo;
