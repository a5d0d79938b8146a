use std::io::{Cursor, Read};

use thiserror::Error;
use uuid::Uuid;
use zip::ZipArchive;

/// Entry name of the primary save blob, relative to the bundle root.
const LEVEL_ENTRY: &str = "Level.sav";
/// Directory of per-player blobs, relative to the bundle root.
const PLAYERS_DIR: &str = "Players/";
/// Extension every save blob carries.
const SAVE_EXTENSION: &str = ".sav";

/// Errors that can occur while validating an uploaded archive bundle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// Upload did not open as a zip container
    #[error("Upload is not a readable zip archive: {reason}")]
    UnreadableContainer { reason: String },

    /// Archive opened but lists no entries
    #[error("Zip archive is empty")]
    EmptyArchive,

    /// An entry does not live under the save root
    #[error("Entry {entry:?} is outside the save root {save_id:?}. All entries of a bundle must share one root directory")]
    StrayEntry { entry: String, save_id: String },

    /// The required level data entry is missing
    #[error("Zip archive does not contain {expected:?}, available files: {entries:?}")]
    MissingLevelData {
        expected: String,
        entries: Vec<String>,
    },

    /// A player entry is not named by its id
    #[error("Player file {entry:?} is not named by a valid UUID. Player blobs must be stored as <save-id>/Players/<uuid>.sav")]
    InvalidPlayerId { entry: String },

    /// Two player entries resolve to one id
    #[error("Duplicate player id {player_id} in archive. Player blob keys must be unique")]
    DuplicatePlayerId { player_id: Uuid },

    /// An entry's payload failed to decompress
    #[error("Failed to read entry {entry:?} from the archive: {reason}")]
    EntryRead { entry: String, reason: String },
}

/// A validated, fully extracted archive bundle: the primary level blob plus
/// per-player blobs keyed by player id, in archive listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveBundle {
    /// First path segment shared by every entry in the archive.
    pub save_id: String,
    /// Contents of `<save_id>/Level.sav`.
    pub level_data: Vec<u8>,
    /// Contents of each `<save_id>/Players/<uuid>.sav`.
    pub player_saves: Vec<(Uuid, Vec<u8>)>,
}

/// Validate and extract an uploaded archive bundle.
///
/// The uploaded container is attacker-controllable, so nothing about its
/// structure is trusted: the listing must be non-empty, every entry must
/// live under the single root directory that names the save, the root must
/// contain `Level.sav`, and every `Players/*.sav` entry must be named by a
/// parseable UUID. Ingestion is all-or-nothing; no partially extracted
/// bundle ever escapes this function.
pub fn ingest_bundle(data: &[u8]) -> Result<SaveBundle, ArchiveError> {
    let mut archive =
        ZipArchive::new(Cursor::new(data)).map_err(|err| ArchiveError::UnreadableContainer {
            reason: err.to_string(),
        })?;

    // by_index order is central directory order, which is the listing order
    // the rest of the validation (and the bundle's key order) relies on.
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|err| ArchiveError::UnreadableContainer {
                reason: err.to_string(),
            })?;
        entries.push(entry.name().to_owned());
    }

    if entries.is_empty() {
        return Err(ArchiveError::EmptyArchive);
    }

    let save_id = entries[0].split('/').next().unwrap_or("").to_owned();

    let root_prefix = format!("{}/", save_id);
    if let Some(stray) = entries.iter().find(|entry| !entry.starts_with(&root_prefix)) {
        return Err(ArchiveError::StrayEntry {
            entry: stray.clone(),
            save_id,
        });
    }

    let level_entry = format!("{}{}", root_prefix, LEVEL_ENTRY);
    if !entries.iter().any(|entry| entry == &level_entry) {
        return Err(ArchiveError::MissingLevelData {
            expected: level_entry,
            entries,
        });
    }
    let level_data = read_entry(&mut archive, &level_entry)?;

    let players_prefix = format!("{}{}", root_prefix, PLAYERS_DIR);
    let mut player_saves: Vec<(Uuid, Vec<u8>)> = Vec::new();
    for entry in &entries {
        if !entry.starts_with(&players_prefix) || !entry.ends_with(SAVE_EXTENSION) {
            continue;
        }
        let file_name = entry.rsplit('/').next().unwrap_or(entry);
        let Some(stem) = file_name.strip_suffix(SAVE_EXTENSION) else {
            return Err(ArchiveError::InvalidPlayerId {
                entry: entry.clone(),
            });
        };
        let Ok(player_id) = Uuid::parse_str(stem) else {
            return Err(ArchiveError::InvalidPlayerId {
                entry: entry.clone(),
            });
        };
        if player_saves.iter().any(|(existing, _)| *existing == player_id) {
            return Err(ArchiveError::DuplicatePlayerId { player_id });
        }
        let data = read_entry(&mut archive, entry)?;
        player_saves.push((player_id, data));
    }

    Ok(SaveBundle {
        save_id,
        level_data,
        player_saves,
    })
}

fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    entry: &str,
) -> Result<Vec<u8>, ArchiveError> {
    let mut file = archive
        .by_name(entry)
        .map_err(|err| ArchiveError::EntryRead {
            entry: entry.to_owned(),
            reason: err.to_string(),
        })?;
    let mut data = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut data)
        .map_err(|err| ArchiveError::EntryRead {
            entry: entry.to_owned(),
            reason: err.to_string(),
        })?;
    Ok(data)
}
