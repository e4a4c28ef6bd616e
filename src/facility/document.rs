//! The document root wrapper
//!
//! A document holds at most one building. A document without a building is a
//! valid, empty document rather than an error.

use crate::facility::{building::Building, level::Level, room::Room};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Root of a parsed building document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingDocument {
    /// The building described by the document, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<Building>,
}

impl BuildingDocument {
    /// Wrap a building
    pub fn new(building: Building) -> Self {
        Self { building: Some(building) }
    }

    /// A document without a building
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the document carries no building
    pub fn is_empty(&self) -> bool {
        self.building.is_none()
    }

    /// Linear scan over the building's levels; first match wins.
    ///
    /// Returns `None` when `level_id` is `None`, when the document has no
    /// building, or when no level carries the id.
    pub fn find_level_by_id(&self, level_id: Option<&str>) -> Option<&Level> {
        let level_id = level_id?;
        let found = self.building.as_ref().and_then(|building| building.find_level(level_id));
        if found.is_none() {
            debug!("Level {} not found", level_id);
        }
        found
    }

    /// Resolve the level first, then scan its rooms; first match wins.
    ///
    /// Every miss (no level id, no room id, unknown level, unknown room)
    /// produces the same `None`.
    pub fn find_room_by_id(&self, level_id: Option<&str>, room_id: Option<&str>) -> Option<&Room> {
        let room_id = room_id?;
        let found = self.find_level_by_id(level_id).and_then(|level| level.find_room(room_id));
        if found.is_none() {
            debug!("Room {} not found on level {:?}", room_id, level_id);
        }
        found
    }
}

impl From<Building> for BuildingDocument {
    fn from(building: Building) -> Self {
        Self::new(building)
    }
}
