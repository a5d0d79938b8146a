//! # Palworks Server
//! The session protocol and archive-ingestion layer of the palworks save
//! editor: dispatches client messages arriving over one persistent
//! connection, validates uploaded archive bundles, and streams progress
//! while the Save Engine parses, patches, and re-serializes saves.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use palworks_shared::{
        ClientMessage, DownloadPayload, PalPatch, PatchSet, PlayerEntry, PlayerPatch,
        ProtocolError, ServerMessage, SessionSummary,
    };
}

mod archive;
mod connection;
mod engine;
mod error;
mod handlers;
mod progress;
mod router;
mod server_config;
mod session;

pub use archive::{ingest_bundle, ArchiveError, SaveBundle};
pub use connection::{ConnectionHandle, TransportError};
pub use engine::{EngineError, LoadedSave, SaveEngine};
pub use error::SessionError;
pub use handlers::DOWNLOAD_NAME;
pub use progress::ProgressReporter;
pub use router::{dispatch, SessionRunner};
pub use server_config::ServerConfig;
pub use session::{LoadedSession, SessionSlot};
