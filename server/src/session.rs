use palworks_shared::{PlayerEntry, SessionSummary};

use crate::{LoadedSave, SessionError};

/// The one loaded-save context a connection is operating on: the parsed
/// save handle, its display summary, and the last-materialized entity
/// listing.
pub struct LoadedSession<S> {
    save_name: String,
    save_size: u64,
    save: S,
    players: Vec<PlayerEntry>,
}

impl<S: LoadedSave> LoadedSession<S> {
    /// Materialize a session from a freshly parsed save handle, deriving
    /// the summary and the initial entity listing.
    pub(crate) fn new(save: S) -> Self {
        let save_name = save.name().to_owned();
        let save_size = save.size();
        let players = save.players();
        Self {
            save_name,
            save_size,
            save,
            players,
        }
    }

    /// Name and size summary shown to the client on load.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            name: self.save_name.clone(),
            size: self.save_size,
        }
    }

    /// The last-materialized entity listing, in engine insertion order.
    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    /// The save handle this session exclusively owns.
    pub fn save(&self) -> &S {
        &self.save
    }

    pub(crate) fn save_mut(&mut self) -> &mut S {
        &mut self.save
    }

    /// Recompute the listing from the (possibly mutated) save handle, so
    /// listing responses stay consistent with the server-side save.
    pub(crate) fn refresh_players(&mut self) {
        self.players = self.save.players();
    }
}

/// Per-connection mutable slot holding the current session, if any.
///
/// Owned by the connection's task and passed `&mut` into handlers. Session
/// state is never process-wide, so a load on one connection can never race
/// an update on another and no locking is involved.
pub struct SessionSlot<S> {
    current: Option<LoadedSession<S>>,
}

impl<S: LoadedSave> SessionSlot<S> {
    /// An empty slot; a session exists only after the first successful load.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Whether a save is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// The current session, if a load has succeeded.
    pub fn current(&self) -> Option<&LoadedSession<S>> {
        self.current.as_ref()
    }

    /// Replace the session wholesale, dropping any previously held save.
    pub(crate) fn replace(&mut self, session: LoadedSession<S>) {
        self.current = Some(session);
    }

    pub(crate) fn loaded(&self) -> Result<&LoadedSession<S>, SessionError> {
        self.current.as_ref().ok_or(SessionError::NoSaveLoaded)
    }

    pub(crate) fn loaded_mut(&mut self) -> Result<&mut LoadedSession<S>, SessionError> {
        self.current.as_mut().ok_or(SessionError::NoSaveLoaded)
    }
}

impl<S: LoadedSave> Default for SessionSlot<S> {
    fn default() -> Self {
        Self::new()
    }
}
