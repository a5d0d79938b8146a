use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Name and byte size of the currently loaded save, shown to the client in
/// the terminal envelope of a successful load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub name: String,
    pub size: u64,
}

/// One entry of the entity listing.
///
/// The stable `uid` identifies the entity across loads and updates; every
/// other attribute comes from the Save Engine and is opaque to the session
/// layer, which only forwards it to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub uid: Uuid,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, Value>,
}

impl PlayerEntry {
    /// An entry with no attributes beyond its key.
    pub fn new(uid: Uuid) -> Self {
        Self {
            uid,
            attributes: serde_json::Map::new(),
        }
    }
}

/// An edit to a single pal, produced by the client editor. Opaque here;
/// only the Save Engine interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PalPatch(pub Value);

/// An edit to a single player. Opaque here, like [`PalPatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerPatch(pub Value);

/// The payload of an update request: which entities changed, by kind.
///
/// Both lists absent (or empty) is a valid no-op update, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_pals: Option<Vec<PalPatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_players: Option<Vec<PlayerPatch>>,
}

impl PatchSet {
    /// Whether this update carries no patches of either kind.
    pub fn is_empty(&self) -> bool {
        self.modified_pals
            .as_ref()
            .map_or(true, |patches| patches.is_empty())
            && self
                .modified_players
                .as_ref()
                .map_or(true, |patches| patches.is_empty())
    }
}
