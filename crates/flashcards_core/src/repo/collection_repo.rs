//! Collection repository contracts and implementations.
//!
//! # Responsibility
//! - Load the persisted group list at session start.
//! - Flush the full group list on every persisted mutation.
//!
//! # Invariants
//! - `load` on a fresh location returns an empty list.
//! - Loaded cards are always unflipped.

use crate::model::group::Group;
use crate::store::{read_groups, write_groups, StoreResult};
use std::path::PathBuf;

/// Repository interface for whole-collection persistence.
pub trait CollectionRepository {
    /// Loads all groups in persisted order.
    fn load(&self) -> StoreResult<Vec<Group>>;
    /// Replaces persisted groups with `groups`.
    fn save(&mut self, groups: &[Group]) -> StoreResult<()>;
}

/// `flashcards.json`-backed repository.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Constructs a repository bound to one collection file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CollectionRepository for JsonFileRepository {
    fn load(&self) -> StoreResult<Vec<Group>> {
        read_groups(&self.path)
    }

    fn save(&mut self, groups: &[Group]) -> StoreResult<()> {
        write_groups(&self.path, groups)
    }
}

/// In-memory repository for hosts without storage and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    groups: Vec<Group>,
    save_count: usize,
}

impl MemoryRepository {
    /// Creates a repository pre-seeded with `groups`.
    pub fn with_groups(groups: Vec<Group>) -> Self {
        Self {
            groups,
            save_count: 0,
        }
    }

    /// Returns the last saved groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns how many times `save` ran.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl CollectionRepository for MemoryRepository {
    fn load(&self) -> StoreResult<Vec<Group>> {
        let mut groups = self.groups.clone();
        for group in &mut groups {
            group.reset_flips();
        }
        Ok(groups)
    }

    fn save(&mut self, groups: &[Group]) -> StoreResult<()> {
        self.groups = groups.to_vec();
        self.save_count += 1;
        Ok(())
    }
}
