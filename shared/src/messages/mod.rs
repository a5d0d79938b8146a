mod client_message;
pub use client_message::ClientMessage;

mod error;
pub use error::ProtocolError;

mod server_message;
pub use server_message::{DownloadPayload, ServerMessage};
