use thiserror::Error;
use tokio::sync::mpsc::{self, Receiver, Sender};

use palworks_shared::ServerMessage;

use crate::ServerConfig;

/// Write failure on the connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Connection closed while writing a {message_type} envelope. The remote end is gone; the current handler invocation is abandoned and nothing is retried")]
pub struct TransportError {
    /// Wire tag of the envelope that could not be delivered.
    pub message_type: &'static str,
}

/// Sending half of one connection's outbound envelope stream.
///
/// Every network write the session performs goes through this handle, so
/// the client observes envelopes in exactly the order handlers produced
/// them. The receiving half belongs to the transport layer, which encodes
/// each envelope onto the wire.
#[derive(Clone)]
pub struct ConnectionHandle {
    sender: Sender<ServerMessage>,
}

impl ConnectionHandle {
    /// Create a connected handle/receiver pair for one connection.
    pub fn channel(config: &ServerConfig) -> (ConnectionHandle, Receiver<ServerMessage>) {
        let (sender, receiver) = mpsc::channel(config.outbound_capacity);
        (ConnectionHandle { sender }, receiver)
    }

    /// Send one envelope, awaiting channel capacity if the client is slow.
    pub async fn send(&self, message: ServerMessage) -> Result<(), TransportError> {
        let message_type = message.type_name();
        self.sender
            .send(message)
            .await
            .map_err(|_| TransportError { message_type })
    }
}
