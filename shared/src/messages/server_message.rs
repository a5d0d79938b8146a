use serde::{Deserialize, Serialize};

use crate::{
    types::{PlayerEntry, SessionSummary},
    ProtocolError,
};

/// A message sent to the editor client.
///
/// Every network write the session performs is one of these envelopes, in
/// the same `{"type": ..., "data": ...}` wire form as [`ClientMessage`].
/// Each handler invocation produces zero or more `ProgressMessage` envelopes
/// followed by exactly one terminal envelope.
///
/// [`ClientMessage`]: crate::ClientMessage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// Human-readable status line streamed while a long operation runs.
    ProgressMessage(String),
    /// Terminal acknowledgment of a single-artifact load.
    LoadSaveFile(SessionSummary),
    /// Terminal acknowledgment of an archive-bundle load.
    LoadZipFile(SessionSummary),
    /// Terminal acknowledgment of an update.
    UpdateSaveFile(String),
    /// The regenerated binary artifact, base64-encoded.
    DownloadSaveFile(DownloadPayload),
    /// The entity listing materialized from the loaded save.
    GetPlayers(Vec<PlayerEntry>),
    /// Terminal failure report; the connection stays usable afterwards.
    Error(String),
}

/// Payload of [`ServerMessage::DownloadSaveFile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadPayload {
    /// Client-side filename; always the fixed artifact name.
    pub name: String,
    /// Base64 text of the serialized save.
    pub content: String,
}

impl ServerMessage {
    /// Decode a server envelope from its JSON wire form.
    pub fn from_json(payload: &[u8]) -> Result<Self, ProtocolError> {
        serde_json::from_slice(payload).map_err(|source| ProtocolError::MalformedEnvelope {
            reason: source.to_string(),
        })
    }

    /// Encode this envelope to its JSON wire form.
    pub fn to_json(&self) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(self).map_err(|source| ProtocolError::EncodeFailed {
            message_type: self.type_name().to_owned(),
            reason: source.to_string(),
        })
    }

    /// Wire tag of this envelope, e.g. `"PROGRESS_MESSAGE"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ServerMessage::ProgressMessage(_) => "PROGRESS_MESSAGE",
            ServerMessage::LoadSaveFile(_) => "LOAD_SAVE_FILE",
            ServerMessage::LoadZipFile(_) => "LOAD_ZIP_FILE",
            ServerMessage::UpdateSaveFile(_) => "UPDATE_SAVE_FILE",
            ServerMessage::DownloadSaveFile(_) => "DOWNLOAD_SAVE_FILE",
            ServerMessage::GetPlayers(_) => "GET_PLAYERS",
            ServerMessage::Error(_) => "ERROR",
        }
    }

    /// Whether this envelope is a streamed progress line rather than part
    /// of a handler's response sequence.
    pub fn is_progress(&self) -> bool {
        matches!(self, ServerMessage::ProgressMessage(_))
    }
}
