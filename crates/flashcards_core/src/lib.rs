//! Core domain logic for the flashcards app.
//! This crate is the single source of truth for collection invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::card::Card;
pub use model::collection::{Collection, CollectionError, CollectionResult};
pub use model::group::{normalize_group_name, Group, DEFAULT_GROUP_NAME};
pub use repo::collection_repo::{CollectionRepository, JsonFileRepository, MemoryRepository};
pub use service::collection_service::{
    CollectionService, DeletionToken, PendingDeletion, ServiceError, ServiceResult,
};
pub use service::preview::{derive_card_preview, CARD_PREVIEW_MAX_CHARS};
pub use store::{StoreError, StoreResult, FLASHCARDS_FILE_NAME};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
