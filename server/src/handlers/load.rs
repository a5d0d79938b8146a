use log::info;

use palworks_shared::ServerMessage;

use crate::{
    archive, session::LoadedSession, ConnectionHandle, ProgressReporter, SaveEngine, SessionError,
    SessionSlot,
};

/// Progress line emitted once parsing finishes, before the terminal
/// envelopes carry the actual results.
const RESULTS_COMING: &str = "Save processed successfully, results coming right up";

/// Load a single compressed save artifact, replacing any current session.
///
/// On success the connection observes the engine's progress lines, then a
/// `LOAD_SAVE_FILE` summary, then a `GET_PLAYERS` listing. On failure the
/// previous session (if any) is left untouched and the router reports a
/// single `ERROR`.
pub(crate) async fn load_save_file<E: SaveEngine>(
    engine: &E,
    session: &mut SessionSlot<E::Save>,
    data: Vec<u8>,
    connection: &ConnectionHandle,
) -> Result<(), SessionError> {
    info!("Processing save file upload ({} bytes)", data.len());

    let progress = ProgressReporter::new(connection);
    let save = engine.load_save(data, &progress).await?;

    let loaded = LoadedSession::new(save);
    let summary = loaded.summary();
    let players = loaded.players().to_vec();
    session.replace(loaded);

    info!("Save file loaded: {}", summary.name);
    progress.report(RESULTS_COMING).await;
    connection.send(ServerMessage::LoadSaveFile(summary)).await?;
    connection.send(ServerMessage::GetPlayers(players)).await?;
    Ok(())
}

/// Load a multi-file archive bundle, replacing any current session.
///
/// The bundle is validated and extracted before the engine sees it; any
/// validation failure short-circuits with no session change. The success
/// path matches [`load_save_file`], with `LOAD_ZIP_FILE` as the terminal
/// summary type.
pub(crate) async fn load_zip_file<E: SaveEngine>(
    engine: &E,
    session: &mut SessionSlot<E::Save>,
    data: Vec<u8>,
    connection: &ConnectionHandle,
) -> Result<(), SessionError> {
    info!("Processing zip file upload ({} bytes)", data.len());

    let bundle = archive::ingest_bundle(&data)?;
    info!(
        "Found {} player files under save {:?}",
        bundle.player_saves.len(),
        bundle.save_id
    );

    let progress = ProgressReporter::new(connection);
    let save = engine.load_bundle(bundle, &progress).await?;

    let loaded = LoadedSession::new(save);
    let summary = loaded.summary();
    let players = loaded.players().to_vec();
    session.replace(loaded);

    info!("Zip file processed: {}", summary.name);
    progress.report(RESULTS_COMING).await;
    connection.send(ServerMessage::LoadZipFile(summary)).await?;
    connection.send(ServerMessage::GetPlayers(players)).await?;
    Ok(())
}
