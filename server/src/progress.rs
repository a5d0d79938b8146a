use log::debug;

use palworks_shared::ServerMessage;

use crate::ConnectionHandle;

/// Capability for streaming human-readable status lines to one connection.
///
/// Handed explicitly to every operation that may take noticeable time, so
/// the Save Engine stays transport-agnostic and testable with a recording
/// stub. Each call sends a `PROGRESS_MESSAGE` envelope immediately, with no
/// buffering or coalescing; lines reach the client in call order, strictly
/// ahead of the invocation's terminal envelope. Calling it zero or many
/// times during one operation is fine.
#[derive(Clone)]
pub struct ProgressReporter {
    connection: ConnectionHandle,
}

impl ProgressReporter {
    /// Bind a reporter to one connection's outbound stream.
    pub fn new(connection: &ConnectionHandle) -> Self {
        Self {
            connection: connection.clone(),
        }
    }

    /// Emit one progress line.
    ///
    /// A report to a closed connection is dropped: the session task is being
    /// torn down and there is no one left to tell. The terminal write of the
    /// surrounding handler surfaces the transport failure.
    pub async fn report(&self, text: impl Into<String>) {
        let text = text.into();
        if let Err(err) = self
            .connection
            .send(ServerMessage::ProgressMessage(text))
            .await
        {
            debug!("dropping progress line: {}", err);
        }
    }
}
