use serde::{Deserialize, Serialize};

use crate::{types::PatchSet, ProtocolError};

/// A message received from the editor client.
///
/// The wire form is a `{"type": ..., "data": ...}` envelope; the tag decides
/// which session operation the router invokes. Raw save bytes travel as JSON
/// byte arrays, exactly as the editor uploads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// Upload a single compressed save artifact.
    LoadSaveFile(Vec<u8>),
    /// Upload a multi-file archive bundle.
    LoadZipFile(Vec<u8>),
    /// Apply a set of entity patches to the loaded save.
    UpdateSaveFile(PatchSet),
    /// Export the loaded save as a regenerated binary artifact.
    DownloadSaveFile,
}

impl ClientMessage {
    /// Decode a client envelope from its JSON wire form.
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

    /// Wire tag of this envelope, e.g. `"LOAD_SAVE_FILE"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ClientMessage::LoadSaveFile(_) => "LOAD_SAVE_FILE",
            ClientMessage::LoadZipFile(_) => "LOAD_ZIP_FILE",
            ClientMessage::UpdateSaveFile(_) => "UPDATE_SAVE_FILE",
            ClientMessage::DownloadSaveFile => "DOWNLOAD_SAVE_FILE",
        }
    }
}
