use log::info;

use palworks_shared::{DownloadPayload, ServerMessage};

use crate::{ConnectionHandle, LoadedSave, ProgressReporter, SessionError, SessionSlot};

/// Fixed client-side filename of the exported artifact.
pub const DOWNLOAD_NAME: &str = "Level.sav";

/// Serialize the loaded save back to its binary form and send it to the
/// client as base64 text. Never mutates session state.
pub(crate) async fn download_save_file<S: LoadedSave>(
    session: &SessionSlot<S>,
    connection: &ConnectionHandle,
) -> Result<(), SessionError> {
    info!("Processing save file download");

    let loaded = session.loaded()?;
    let progress = ProgressReporter::new(connection);

    progress.report("Compressing save to its binary form").await;
    let data = loaded.save().serialize(&progress).await?;

    progress.report("Encoding save for transfer").await;
    let content = base64::encode(&data);

    info!("Generated save file ({} bytes), sending to client", data.len());
    connection
        .send(ServerMessage::DownloadSaveFile(DownloadPayload {
            name: DOWNLOAD_NAME.to_owned(),
            content,
        }))
        .await?;
    Ok(())
}
