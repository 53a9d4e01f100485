//! File and codec helpers for `flashcards.json`.
//!
//! # Responsibility
//! - Resolve the data file path inside an app-provided directory.
//! - Serialize/deserialize group arrays with `serde_json`.
//! - Replace files atomically so an interrupted write keeps the old copy.
//!
//! # Invariants
//! - `read_groups` returns an empty list when the file does not exist.
//! - `write_groups` never leaves a truncated target file behind.

use super::{StoreError, StoreResult};
use crate::model::group::Group;
use log::{error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name used for the app-private collection and suggested for export.
pub const FLASHCARDS_FILE_NAME: &str = "flashcards.json";

/// Returns `data_dir/flashcards.json`, creating `data_dir` when missing.
pub fn flashcards_file_path(data_dir: impl AsRef<Path>) -> StoreResult<PathBuf> {
    let data_dir = data_dir.as_ref();
    fs::create_dir_all(data_dir).map_err(|source| StoreError::Io {
        path: data_dir.to_path_buf(),
        source,
    })?;
    Ok(data_dir.join(FLASHCARDS_FILE_NAME))
}

/// Serializes groups into the persisted JSON array shape.
pub fn encode_groups(groups: &[Group]) -> StoreResult<String> {
    Ok(serde_json::to_string(groups)?)
}

/// Deserializes a persisted JSON array.
///
/// A top-level `null` decodes as an empty list. Every card is returned with
/// `is_flipped == false`.
pub fn decode_groups(raw: &str) -> StoreResult<Vec<Group>> {
    let mut groups = serde_json::from_str::<Option<Vec<Group>>>(raw)?.unwrap_or_default();
    for group in &mut groups {
        group.reset_flips();
    }
    Ok(groups)
}

/// Reads groups from `path`.
///
/// # Side effects
/// - Emits `store_read` logging events with duration and status.
pub fn read_groups(path: impl AsRef<Path>) -> StoreResult<Vec<Group>> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_read module=store status=start");

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=store_read module=store status=ok duration_ms={} groups=0 missing=true",
                started_at.elapsed().as_millis()
            );
            return Ok(Vec::new());
        }
        Err(source) => {
            error!(
                "event=store_read module=store status=error duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match decode_groups(&raw) {
        Ok(groups) => {
            info!(
                "event=store_read module=store status=ok duration_ms={} groups={} missing=false",
                started_at.elapsed().as_millis(),
                groups.len()
            );
            Ok(groups)
        }
        Err(err) => {
            error!(
                "event=store_read module=store status=error duration_ms={} error_code=decode_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Reads groups from a user-chosen import file.
///
/// Unlike [`read_groups`], a missing file is an error.
pub fn read_import_file(path: impl AsRef<Path>) -> StoreResult<Vec<Group>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_groups(&raw)
}

/// Writes groups to `path` through a sibling temp file and rename.
///
/// # Side effects
/// - Emits `store_write` logging events with duration and status.
pub fn write_groups(path: impl AsRef<Path>, groups: &[Group]) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_write module=store status=start");

    match write_atomically(path, groups) {
        Ok(()) => {
            info!(
                "event=store_write module=store status=ok duration_ms={} groups={}",
                started_at.elapsed().as_millis(),
                groups.len()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_write module=store status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn write_atomically(path: &Path, groups: &[Group]) -> StoreResult<()> {
    let encoded = encode_groups(groups)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, encoded).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_groups, encode_groups};
    use crate::model::card::Card;
    use crate::model::group::Group;

    #[test]
    fn encode_uses_persisted_field_names() {
        let mut group = Group::new("Verbs");
        group.cards.push(Card::new("ir", "to go"));
        let encoded = encode_groups(&[group]).unwrap();
        assert_eq!(
            encoded,
            r#"[{"name":"Verbs","cards":[{"front":"ir","back":"to go","isFlipped":false}]}]"#
        );
    }

    #[test]
    fn decode_accepts_null_and_missing_cards() {
        assert!(decode_groups("null").unwrap().is_empty());

        let groups = decode_groups(r#"[{"name":"Empty"}]"#).unwrap();
        assert_eq!(groups.len(), 1);
        assert!(groups[0].cards.is_empty());
    }

    #[test]
    fn decode_resets_flipped_flags() {
        let groups = decode_groups(
            r#"[{"name":"g","cards":[{"front":"a","back":"b","isFlipped":true}]}]"#,
        )
        .unwrap();
        assert!(!groups[0].cards[0].is_flipped);
    }

    #[test]
    fn decode_rejects_missing_required_fields() {
        assert!(decode_groups(r#"[{"cards":[]}]"#).is_err());
        assert!(decode_groups(r#"[{"name":"g","cards":[{"front":"a"}]}]"#).is_err());
    }
}
