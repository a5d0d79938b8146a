use thiserror::Error;

/// Errors that can occur while encoding or decoding wire envelopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Inbound payload was not a well-formed envelope
    #[error("Malformed envelope: {reason}. Envelopes must be JSON objects of the form {{\"type\": ..., \"data\": ...}} with a known message type")]
    MalformedEnvelope { reason: String },

    /// Outbound envelope could not be encoded
    #[error("Failed to encode {message_type} envelope: {reason}")]
    EncodeFailed {
        message_type: String,
        reason: String,
    },
}
