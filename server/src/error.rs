use thiserror::Error;

use crate::{ArchiveError, EngineError, TransportError};

/// Umbrella error for one handler invocation.
///
/// Everything except `Transport` is recoverable: the router reports it to
/// the client as a single `ERROR` envelope and the connection stays open
/// for further operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Malformed or incomplete archive bundle; session state untouched
    #[error("{0}")]
    Archive(#[from] ArchiveError),

    /// Operation requested out of lifecycle order; no state change
    #[error("No save loaded. Load a save file before requesting this operation")]
    NoSaveLoaded,

    /// The Save Engine rejected or failed to process the input
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Write failure on the connection; fatal to this invocation
    #[error("{0}")]
    Transport(#[from] TransportError),
}
