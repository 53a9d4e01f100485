//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the collection session to Dart via FRB.
//! - Translate core errors into short user-facing messages.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One session exists per process; `open_collection` replaces it.
//! - Calls made before `open_collection` open the fallback data dir.

use flashcards_core::store::flashcards_file_path;
use flashcards_core::{
    core_version as core_version_inner, default_log_level, derive_card_preview,
    init_logging as init_logging_inner, ping as ping_inner, CollectionError, CollectionService,
    JsonFileRepository, ServiceError, DEFAULT_GROUP_NAME,
};
use log::{error, warn};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use uuid::Uuid;

const DATA_DIR_ENV: &str = "FLASHCARDS_DATA_DIR";
const FALLBACK_DIR_NAME: &str = "flashcards";

type Session = CollectionService<JsonFileRepository>;

static SESSION: OnceLock<Mutex<Option<Session>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
///   Blank selects the build default (`debug` or `info`).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(resolve_log_level(&level), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One card row as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub front: String,
    pub back: String,
    pub is_flipped: bool,
    /// One-line label for the side facing up.
    pub preview: String,
}

/// Full screen state: group selector plus active group cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionView {
    /// Group names in selector order.
    pub groups: Vec<String>,
    /// Selected entry in `groups`.
    pub current_index: u32,
    /// Cards of the selected group.
    pub cards: Vec<CardView>,
}

/// Generic action envelope; `message` is suitable for a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Card delete envelope carrying the undo token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCardResponse {
    pub ok: bool,
    /// Token for `undo_delete` / `commit_delete`.
    pub token: Option<String>,
    pub message: String,
}

/// Opens `data_dir/flashcards.json` and installs it as the session.
///
/// The previous session, if any, is flushed first.
#[flutter_rust_bridge::frb(sync)]
pub fn open_collection(data_dir: String) -> ActionResponse {
    let trimmed = data_dir.trim();
    if trimmed.is_empty() {
        return ActionResponse::failure("data_dir cannot be empty");
    }
    match install_session(PathBuf::from(trimmed)) {
        Ok(()) => ActionResponse::success("Loaded"),
        Err(err) => ActionResponse::failure(format!("open_collection failed: {err}")),
    }
}

/// Returns the current screen state.
#[flutter_rust_bridge::frb(sync)]
pub fn collection_snapshot() -> CollectionView {
    let snapshot = with_session(|service| {
        let collection = service.collection();
        Ok(CollectionView {
            groups: collection.group_names(),
            current_index: to_u32(collection.current_index()),
            cards: collection
                .current_cards()
                .iter()
                .map(|card| CardView {
                    front: card.front.clone(),
                    back: card.back.clone(),
                    is_flipped: card.is_flipped,
                    preview: derive_card_preview(card.visible_text()),
                })
                .collect(),
        })
    });
    snapshot.unwrap_or_else(|message| {
        warn!("event=ffi_snapshot module=ffi status=error error={message}");
        fallback_view()
    })
}

/// Placeholder state when no session can be opened: one empty `Default`.
fn fallback_view() -> CollectionView {
    CollectionView {
        groups: vec![DEFAULT_GROUP_NAME.to_string()],
        current_index: 0,
        cards: Vec::new(),
    }
}

/// Selects a group by selector index.
#[flutter_rust_bridge::frb(sync)]
pub fn select_group(index: u32) -> ActionResponse {
    respond(
        with_session(|service| service.select_group(index as usize)),
        |_| String::new(),
        "Error select group",
    )
}

/// Creates and selects a group.
#[flutter_rust_bridge::frb(sync)]
pub fn create_group(name: String) -> ActionResponse {
    respond(
        with_session(|service| service.create_group(&name)),
        |_| "Group created".to_string(),
        "Error create group",
    )
}

/// Renames the selected group.
#[flutter_rust_bridge::frb(sync)]
pub fn rename_group(name: String) -> ActionResponse {
    respond(
        with_session(|service| service.rename_group(&name)),
        |changed| {
            if changed {
                "Group renamed".to_string()
            } else {
                String::new()
            }
        },
        "Error rename group",
    )
}

/// Deletes the selected group.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_group() -> ActionResponse {
    respond(
        with_session(|service| service.delete_group()),
        |removed| format!("Group '{}' removed", removed.name),
        "Error remove group",
    )
}

/// Adds a card to the selected group.
#[flutter_rust_bridge::frb(sync)]
pub fn add_card(front: String, back: String) -> ActionResponse {
    respond(
        with_session(|service| service.add_card(&front, &back)),
        |_| "Card added".to_string(),
        "Error add card",
    )
}

/// Replaces both sides of one card.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_card(position: u32, front: String, back: String) -> ActionResponse {
    respond(
        with_session(|service| service.edit_card(position as usize, &front, &back)),
        |_| "Card saved".to_string(),
        "Error edit card",
    )
}

/// Flips one card.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_card(position: u32) -> ActionResponse {
    respond(
        with_session(|service| service.toggle_card(position as usize)),
        |_| String::new(),
        "Error flip card",
    )
}

/// Flips every card of the selected group.
#[flutter_rust_bridge::frb(sync)]
pub fn flip_all() -> ActionResponse {
    respond(
        with_session(|service| service.flip_all()),
        |_| String::new(),
        "Error flip cards",
    )
}

/// Removes one card and returns an undo token.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_card(position: u32) -> DeleteCardResponse {
    match with_session(|service| service.delete_card(position as usize)) {
        Ok(pending) => DeleteCardResponse {
            ok: true,
            token: Some(pending.token.to_string()),
            message: "Card deleted".to_string(),
        },
        Err(message) => DeleteCardResponse {
            ok: false,
            token: None,
            message: if message.is_empty() {
                "Error delete card".to_string()
            } else {
                message
            },
        },
    }
}

/// Restores the card removed by the matching `delete_card` call.
#[flutter_rust_bridge::frb(sync)]
pub fn undo_delete(token: String) -> ActionResponse {
    let Some(token) = parse_token(&token) else {
        return ActionResponse::failure("Nothing to restore");
    };
    respond(
        with_session(|service| service.undo_delete(token)),
        |_| "Card restored".to_string(),
        "Nothing to restore",
    )
}

/// Finalizes a deletion once the undo affordance is dismissed.
#[flutter_rust_bridge::frb(sync)]
pub fn commit_delete(token: String) -> ActionResponse {
    let Some(token) = parse_token(&token) else {
        return ActionResponse::success("");
    };
    respond(
        with_session(|service| service.commit_delete(token)),
        |_| String::new(),
        "Error save",
    )
}

/// Writes the collection to a user-picked file.
#[flutter_rust_bridge::frb(sync)]
pub fn export_collection(path: String) -> ActionResponse {
    respond(
        with_session(|service| service.export_to(path.trim())),
        |_| "Exported".to_string(),
        "Error export",
    )
}

/// Replaces the collection with a user-picked file.
#[flutter_rust_bridge::frb(sync)]
pub fn import_collection(path: String) -> ActionResponse {
    respond(
        with_session(|service| service.import_from(path.trim())),
        |_| "Imported".to_string(),
        "Error import",
    )
}

/// Flushes the collection when the app goes to background.
#[flutter_rust_bridge::frb(sync)]
pub fn pause() -> ActionResponse {
    respond(
        with_session(|service| service.pause()),
        |_| String::new(),
        "Error save",
    )
}

fn install_session(data_dir: PathBuf) -> Result<(), String> {
    let path = flashcards_file_path(&data_dir).map_err(|err| err.to_string())?;
    let mut guard = lock_session()?;
    // Flush before loading: reopening the same dir must read the latest state.
    if let Some(previous) = guard.as_mut() {
        if let Err(err) = previous.pause() {
            error!(
                "event=ffi_open module=ffi status=error error_code=flush_previous_failed error={err}"
            );
        }
    }
    *guard = Some(CollectionService::open(JsonFileRepository::new(path)));
    Ok(())
}

fn lock_session() -> Result<std::sync::MutexGuard<'static, Option<Session>>, String> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .map_err(|_| "session lock poisoned".to_string())
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> Result<T, ServiceError>) -> Result<T, String> {
    let mut guard = lock_session()?;
    if guard.is_none() {
        let path =
            flashcards_file_path(resolve_fallback_data_dir()).map_err(|err| err.to_string())?;
        *guard = Some(CollectionService::open(JsonFileRepository::new(path)));
    }
    match guard.as_mut() {
        Some(service) => f(service).map_err(|err| user_message(&err)),
        None => Err("session unavailable".to_string()),
    }
}

fn respond<T>(
    result: Result<T, String>,
    on_ok: impl FnOnce(T) -> String,
    fallback: &str,
) -> ActionResponse {
    match result {
        Ok(value) => ActionResponse::success(on_ok(value)),
        Err(message) if message.is_empty() => ActionResponse::failure(fallback),
        Err(message) => ActionResponse::failure(message),
    }
}

/// Maps service errors to toast text. Anything without a dedicated message
/// collapses to an empty string so the caller's generic message is shown.
fn user_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Collection(CollectionError::DuplicateGroupName(_)) => {
            "Group already exists".to_string()
        }
        ServiceError::Collection(CollectionError::InvalidGroupName) => {
            "Group name is empty".to_string()
        }
        ServiceError::Collection(CollectionError::EmptyCardText) => {
            "Front and back are required".to_string()
        }
        ServiceError::Collection(CollectionError::NoCardsToFlip) => {
            "No cards to flip".to_string()
        }
        ServiceError::Collection(_) => String::new(),
        ServiceError::Store(store_err) => {
            error!(
                "event=ffi_call module=ffi status=error error_code=store_failed error={store_err}"
            );
            String::new()
        }
        ServiceError::NoPendingDeletion(_) => String::new(),
    }
}

fn resolve_log_level(raw: &str) -> &str {
    if raw.trim().is_empty() {
        default_log_level()
    } else {
        raw
    }
}

fn parse_token(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

fn resolve_fallback_data_dir() -> PathBuf {
    if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(FALLBACK_DIR_NAME)
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
