//! Collection use-case service.
//!
//! # Responsibility
//! - Own the in-memory collection for one app session.
//! - Apply the flush policy after each mutation.
//! - Hold at most one card deletion open for undo.
//! - Import/export the collection at user-chosen paths.
//!
//! # Invariants
//! - Group and card edits are flushed before the call returns.
//! - Flip and selection changes are never flushed on their own.
//! - A card deletion is flushed only when committed, paused, or superseded.
//! - Index-shifting operations commit the pending deletion first.

use crate::model::card::Card;
use crate::model::collection::{Collection, CollectionError};
use crate::model::group::Group;
use crate::repo::collection_repo::CollectionRepository;
use crate::store::{read_import_file, write_groups, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use uuid::Uuid;

/// Identifier handed to the UI for one pending deletion.
pub type DeletionToken = Uuid;

/// Service error for collection use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation.
    Collection(CollectionError),
    /// File read/write or decode failure.
    Store(StoreError),
    /// Undo token does not match the pending deletion.
    NoPendingDeletion(DeletionToken),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NoPendingDeletion(token) => write!(f, "no pending deletion for token {token}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Collection(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NoPendingDeletion(_) => None,
        }
    }
}

impl From<CollectionError> for ServiceError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// A removed card kept in memory until committed or undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    /// Token the UI passes back to undo or commit.
    pub token: DeletionToken,
    /// Group the card was removed from.
    pub group_index: usize,
    /// Position the card occupied.
    pub position: usize,
    /// Removed card.
    pub card: Card,
}

/// Session facade over the in-memory collection and its repository.
pub struct CollectionService<R: CollectionRepository> {
    repo: R,
    collection: Collection,
    pending: Option<PendingDeletion>,
}

impl<R: CollectionRepository> CollectionService<R> {
    /// Loads the collection, falling back to a single `Default` group when the
    /// repository cannot be read.
    ///
    /// # Side effects
    /// - Emits `collection_open` logging events.
    pub fn open(repo: R) -> Self {
        let groups = match repo.load() {
            Ok(groups) => groups,
            Err(err) => {
                error!(
                    "event=collection_open module=service status=error error_code=load_failed error={}",
                    err
                );
                Vec::new()
            }
        };
        let service = Self::with_collection(repo, Collection::from_groups(groups));
        info!(
            "event=collection_open module=service status=ok groups={}",
            service.collection.groups().len()
        );
        service
    }

    /// Loads the collection and returns load failures to the caller.
    pub fn try_open(repo: R) -> ServiceResult<Self> {
        let groups = repo.load()?;
        Ok(Self::with_collection(repo, Collection::from_groups(groups)))
    }

    fn with_collection(repo: R, collection: Collection) -> Self {
        Self {
            repo,
            collection,
            pending: None,
        }
    }

    /// Returns the in-memory collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Returns the backing repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns the open deletion, if any.
    pub fn pending_deletion(&self) -> Option<&PendingDeletion> {
        self.pending.as_ref()
    }

    /// Switches the active group.
    pub fn select_group(&mut self, index: usize) -> ServiceResult<()> {
        self.collection.select_group(index)?;
        Ok(())
    }

    /// Creates and selects a new group.
    pub fn create_group(&mut self, name: &str) -> ServiceResult<usize> {
        let index = self.collection.create_group(name)?;
        info!("event=group_create module=service status=ok group_index={index}");
        self.flush()?;
        Ok(index)
    }

    /// Renames the active group. Returns whether the name changed.
    pub fn rename_group(&mut self, name: &str) -> ServiceResult<bool> {
        let changed = self.collection.rename_current_group(name)?;
        if changed {
            info!(
                "event=group_rename module=service status=ok group_index={}",
                self.collection.current_index()
            );
            self.flush()?;
        }
        Ok(changed)
    }

    /// Deletes the active group and returns it.
    pub fn delete_group(&mut self) -> ServiceResult<Group> {
        self.pending = None;
        let removed = self.collection.delete_current_group();
        info!(
            "event=group_delete module=service status=ok cards={} groups_left={}",
            removed.cards.len(),
            self.collection.groups().len()
        );
        self.flush()?;
        Ok(removed)
    }

    /// Appends a card to the active group.
    pub fn add_card(&mut self, front: &str, back: &str) -> ServiceResult<usize> {
        let position = self.collection.add_card(front, back)?;
        self.flush()?;
        Ok(position)
    }

    /// Replaces both sides of one card in the active group.
    pub fn edit_card(&mut self, position: usize, front: &str, back: &str) -> ServiceResult<()> {
        self.collection.edit_card(position, front, back)?;
        self.flush()
    }

    /// Flips one card. Returns the new flipped state.
    pub fn toggle_card(&mut self, position: usize) -> ServiceResult<bool> {
        Ok(self.collection.toggle_card(position)?)
    }

    /// Toggles every card in the active group.
    pub fn flip_all(&mut self) -> ServiceResult<()> {
        self.collection.flip_all()?;
        Ok(())
    }

    /// Removes one card and keeps it open for undo.
    ///
    /// A deletion already open is committed (flushed) first.
    pub fn delete_card(&mut self, position: usize) -> ServiceResult<PendingDeletion> {
        if let Some(previous) = self.pending.as_ref().map(|pending| pending.token) {
            self.commit_delete(previous)?;
        }

        let group_index = self.collection.current_index();
        let card = self.collection.remove_card(position)?;
        let pending = PendingDeletion {
            token: Uuid::new_v4(),
            group_index,
            position,
            card,
        };
        info!(
            "event=card_delete module=service status=pending group_index={group_index} position={position}"
        );
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Restores the pending deletion matching `token`. Returns the position.
    pub fn undo_delete(&mut self, token: DeletionToken) -> ServiceResult<usize> {
        let pending = match self.pending.take() {
            Some(pending) if pending.token == token => pending,
            other => {
                self.pending = other;
                return Err(ServiceError::NoPendingDeletion(token));
            }
        };

        let position =
            self.collection
                .insert_card(pending.group_index, pending.position, pending.card)?;
        info!(
            "event=card_delete module=service status=undone group_index={} position={position}",
            pending.group_index
        );
        Ok(position)
    }

    /// Finalizes the pending deletion matching `token` and flushes.
    ///
    /// Returns `Ok(false)` when `token` is stale.
    pub fn commit_delete(&mut self, token: DeletionToken) -> ServiceResult<bool> {
        let is_pending = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.token == token);
        if !is_pending {
            warn!("event=card_delete module=service status=stale_token");
            return Ok(false);
        }

        self.pending = None;
        info!("event=card_delete module=service status=committed");
        self.flush()?;
        Ok(true)
    }

    /// Flushes on app pause, committing any pending deletion.
    pub fn pause(&mut self) -> ServiceResult<()> {
        self.pending = None;
        self.flush()
    }

    /// Writes the collection to a user-chosen file.
    pub fn export_to(&self, path: impl AsRef<Path>) -> ServiceResult<()> {
        write_groups(path, self.collection.groups())?;
        info!(
            "event=collection_export module=service status=ok groups={}",
            self.collection.groups().len()
        );
        Ok(())
    }

    /// Replaces the collection with the contents of a user-chosen file.
    ///
    /// The current collection is left untouched when the file cannot be read.
    /// Returns the number of imported groups.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> ServiceResult<usize> {
        let groups = match read_import_file(path) {
            Ok(groups) => groups,
            Err(err) => {
                error!(
                    "event=collection_import module=service status=error error_code=import_failed error={}",
                    err
                );
                return Err(err.into());
            }
        };
        let imported = groups.len();
        self.pending = None;
        self.collection.replace_groups(groups);
        info!("event=collection_import module=service status=ok groups={imported}");
        self.flush()?;
        Ok(imported)
    }

    fn flush(&mut self) -> ServiceResult<()> {
        self.repo.save(self.collection.groups())?;
        Ok(())
    }
}
