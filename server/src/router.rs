use log::{error, info, warn};
use tokio::sync::mpsc::Receiver;

use palworks_shared::{ClientMessage, ServerMessage};

use crate::{
    handlers, ConnectionHandle, SaveEngine, SessionError, SessionSlot, TransportError,
};

/// Dispatch one inbound message to its handler.
///
/// Guarantees the connection observes exactly one terminal envelope per
/// inbound message: the handler's success sequence, or a single `ERROR`
/// built from the failure. A transport failure means neither can be
/// delivered; the invocation is abandoned and the error is returned so the
/// run loop can drop the connection.
pub async fn dispatch<E: SaveEngine>(
    engine: &E,
    session: &mut SessionSlot<E::Save>,
    message: ClientMessage,
    connection: &ConnectionHandle,
) -> Result<(), TransportError> {
    let context = match &message {
        ClientMessage::LoadSaveFile(_) => "Error processing file",
        ClientMessage::LoadZipFile(_) => "Error processing zip file",
        ClientMessage::UpdateSaveFile(_) => "Error processing changes",
        ClientMessage::DownloadSaveFile => "Error downloading file",
    };

    let result = match message {
        ClientMessage::LoadSaveFile(data) => {
            handlers::load_save_file(engine, session, data, connection).await
        }
        ClientMessage::LoadZipFile(data) => {
            handlers::load_zip_file(engine, session, data, connection).await
        }
        ClientMessage::UpdateSaveFile(patch_set) => {
            handlers::update_save_file(session, patch_set, connection).await
        }
        ClientMessage::DownloadSaveFile => {
            handlers::download_save_file(session, connection).await
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(SessionError::Transport(err)) => {
            warn!("Connection write failed mid-operation: {}", err);
            Err(err)
        }
        Err(err) => {
            error!("{}: {}", context, err);
            connection
                .send(ServerMessage::Error(format!("{}: {}", context, err)))
                .await
        }
    }
}

/// Serves one connection: a single logical task that pulls typed inbound
/// messages and runs each handler to completion before looking at the next,
/// so handlers, engine calls, and envelope writes never overlap for one
/// connection.
pub struct SessionRunner<E: SaveEngine> {
    engine: E,
    session: SessionSlot<E::Save>,
}

impl<E: SaveEngine> SessionRunner<E> {
    /// A runner with an empty session slot.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            session: SessionSlot::new(),
        }
    }

    /// Drive the session until the inbound stream or the connection closes.
    ///
    /// The slot (and the save it may hold) is dropped with the runner:
    /// nothing outlives the connection scope, and an engine call in flight
    /// when the task is dropped is simply abandoned.
    pub async fn run(mut self, mut inbound: Receiver<ClientMessage>, connection: ConnectionHandle) {
        while let Some(message) = inbound.recv().await {
            if dispatch(&self.engine, &mut self.session, message, &connection)
                .await
                .is_err()
            {
                break;
            }
        }
        info!("Session closed");
    }
}
