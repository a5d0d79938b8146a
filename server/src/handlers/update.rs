use log::info;

use palworks_shared::{PatchSet, ServerMessage};

use crate::{ConnectionHandle, LoadedSave, ProgressReporter, SessionError, SessionSlot};

/// Acknowledgment text of a completed update.
const CHANGES_SAVED: &str = "Changes saved";

/// Apply a patch set to the loaded save and refresh the entity listing.
///
/// Pal patches are applied before player patches; player records reference
/// the pal graph, so the engine must see pal edits first. A failure in
/// either application aborts the remaining steps; whatever the engine has
/// already committed stays committed (no rollback here). An update with
/// both kinds empty is a valid no-op and is still acknowledged.
pub(crate) async fn update_save_file<S: LoadedSave>(
    session: &mut SessionSlot<S>,
    patch_set: PatchSet,
    connection: &ConnectionHandle,
) -> Result<(), SessionError> {
    info!("Processing save file update");

    let loaded = session.loaded_mut()?;
    let progress = ProgressReporter::new(connection);

    if let Some(pals) = patch_set.modified_pals.filter(|patches| !patches.is_empty()) {
        loaded.save_mut().apply_pal_patches(pals, &progress).await?;
    }
    if let Some(players) = patch_set
        .modified_players
        .filter(|patches| !patches.is_empty())
    {
        loaded
            .save_mut()
            .apply_player_patches(players, &progress)
            .await?;
    }

    loaded.refresh_players();
    let players = loaded.players().to_vec();

    connection
        .send(ServerMessage::UpdateSaveFile(CHANGES_SAVED.to_owned()))
        .await?;
    connection.send(ServerMessage::GetPlayers(players)).await?;
    Ok(())
}
