//! # Palworks Shared
//! Wire protocol shared between the palworks editor client & server: the
//! `{type, data}` envelope types exchanged over the session connection,
//! plus the payload types they carry.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod messages;
mod types;

pub use messages::{ClientMessage, DownloadPayload, ProtocolError, ServerMessage};
pub use types::{PalPatch, PatchSet, PlayerEntry, PlayerPatch, SessionSummary};
