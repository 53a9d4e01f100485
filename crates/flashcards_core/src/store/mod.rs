//! JSON file storage for the flashcard collection.
//!
//! # Responsibility
//! - Encode/decode the persisted group array.
//! - Read and write collection files for the app data dir and for
//!   user-chosen import/export locations.
//!
//! # Invariants
//! - The on-disk shape is `[{name, cards: [{front, back, isFlipped}]}]`.
//! - Decoded cards always come back unflipped.
//! - A missing data file is an empty collection, not an error.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_file;

pub use json_file::{
    decode_groups, encode_groups, flashcards_file_path, read_groups, read_import_file,
    write_groups, FLASHCARDS_FILE_NAME,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid collection json: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
