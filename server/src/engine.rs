use std::future::Future;

use thiserror::Error;

use palworks_shared::{PalPatch, PlayerEntry, PlayerPatch};

use crate::{archive::SaveBundle, ProgressReporter};

/// Errors surfaced by the Save Engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Save contents did not parse
    #[error("Save data is corrupt or truncated: {reason}")]
    CorruptSave { reason: String },

    /// Save parsed but its format revision is not supported
    #[error("Unsupported save format version {version:?}. Update the editor or export the save with a supported game version")]
    UnsupportedVersion { version: String },

    /// A patch referenced an entity the save does not contain
    #[error("Cannot patch unknown entity {entity_id}. The entity listing may be stale; reload the save")]
    UnknownEntity { entity_id: String },

    /// Engine-internal failure while processing well-formed input
    #[error("Save engine failure: {reason}")]
    Internal { reason: String },
}

/// The external Save Engine.
///
/// Parsing the game's proprietary binary save format, applying structural
/// edits, and recompressing to the on-disk form all live behind this seam;
/// the session layer consumes the engine through these operations only and
/// treats everything else about it as opaque. Every operation receives the
/// connection's [`ProgressReporter`] so it can stream status lines while it
/// works.
pub trait SaveEngine: Send + Sync {
    /// The engine's handle to one parsed save.
    type Save: LoadedSave;

    /// Parse a single compressed save artifact.
    fn load_save(
        &self,
        data: Vec<u8>,
        progress: &ProgressReporter,
    ) -> impl Future<Output = Result<Self::Save, EngineError>> + Send;

    /// Parse a validated archive bundle: the primary level blob plus the
    /// per-player blobs keyed by player id.
    fn load_bundle(
        &self,
        bundle: SaveBundle,
        progress: &ProgressReporter,
    ) -> impl Future<Output = Result<Self::Save, EngineError>> + Send;
}

/// One parsed save, exclusively owned by the session that loaded it.
pub trait LoadedSave: Send {
    /// Display name of the save.
    fn name(&self) -> &str;

    /// Size in bytes of the artifact this save was parsed from.
    fn size(&self) -> u64;

    /// The entity listing, in the engine's insertion order. Every call
    /// reproduces the same order for an unchanged save.
    fn players(&self) -> Vec<PlayerEntry>;

    /// Apply pal edits to the in-memory save graph.
    fn apply_pal_patches(
        &mut self,
        patches: Vec<PalPatch>,
        progress: &ProgressReporter,
    ) -> impl Future<Output = Result<(), EngineError>> + Send;

    /// Apply player edits. Callers apply pal edits first; the engine's
    /// entity graph must be consistent between the two dependent kinds.
    fn apply_player_patches(
        &mut self,
        patches: Vec<PlayerPatch>,
        progress: &ProgressReporter,
    ) -> impl Future<Output = Result<(), EngineError>> + Send;

    /// Recompress the save graph to its binary wire form.
    fn serialize(
        &self,
        progress: &ProgressReporter,
    ) -> impl Future<Output = Result<Vec<u8>, EngineError>> + Send;
}
