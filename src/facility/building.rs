//! Building records and level lookup

use crate::facility::{level::Level, room::Room};
use crate::types::BuildingId;
use serde::{Deserialize, Serialize};

/// Represents a building, the root of the physical hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Identifier of the building
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BuildingId>,
    /// Human-readable name of the building
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Levels of this building, in document order. `None` when the field was absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<Level>>,
}

impl Building {
    /// Create a building without levels
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: Some(BuildingId::new(id)), name: Some(name.into()), levels: Some(Vec::new()) }
    }

    /// Builder-style level append
    pub fn with_level(mut self, level: Level) -> Self {
        self.add_level(level);
        self
    }

    /// Add a level to the building
    pub fn add_level(&mut self, level: Level) {
        self.levels.get_or_insert_with(Vec::new).push(level);
    }

    /// Levels of this building; an absent list reads as empty
    pub fn levels(&self) -> &[Level] {
        self.levels.as_deref().unwrap_or_default()
    }

    /// Number of levels in the building
    pub fn level_count(&self) -> usize {
        self.levels().len()
    }

    /// Total number of rooms across all levels
    pub fn room_count(&self) -> usize {
        self.levels().iter().map(Level::room_count).sum()
    }

    /// All rooms of all levels, level by level in document order
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.levels().iter().flat_map(Level::rooms)
    }

    /// First level carrying `level_id`
    pub fn find_level(&self, level_id: &str) -> Option<&Level> {
        self.levels().iter().find(|level| level.has_id(level_id))
    }

    /// First room carrying `room_id` on the first level carrying `level_id`
    pub fn find_room(&self, level_id: &str, room_id: &str) -> Option<&Room> {
        self.find_level(level_id).and_then(|level| level.find_room(room_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_building() -> Building {
        Building::new("B1", "HQ")
            .with_level(
                Level::new("L1", "Ground")
                    .with_room(Room::new("R1", "Lobby", 50.0, 150.0, 0.0, 500.0))
                    .with_room(Room::new("R2", "Cloakroom", 10.0, 30.0, 0.0, 0.0)),
            )
            .with_level(Level::new("L2", "First"))
    }

    #[test]
    fn test_building_creation() {
        let building = Building::new("B1", "HQ");

        assert_eq!(building.id, Some(BuildingId::new("B1")));
        assert_eq!(building.name.as_deref(), Some("HQ"));
        assert_eq!(building.level_count(), 0);
        assert_eq!(building.room_count(), 0);
    }

    #[test]
    fn test_level_and_room_lookup() {
        let building = sample_building();

        assert_eq!(building.level_count(), 2);
        assert_eq!(building.room_count(), 2);
        assert!(building.find_level("L2").is_some());
        assert!(building.find_level("L3").is_none());
        assert!(building.find_room("L1", "R2").is_some());
        assert!(building.find_room("L2", "R1").is_none());
    }

    #[test]
    fn test_rooms_are_flattened_in_order() {
        let building = sample_building();
        let names: Vec<_> = building.rooms().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["Lobby", "Cloakroom"]);
    }

    #[test]
    fn test_absent_levels_read_as_empty() {
        let building: Building = serde_json::from_str(r#"{"id":"B7"}"#).unwrap();

        assert!(building.levels.is_none());
        assert_eq!(building.room_count(), 0);
        assert!(building.find_level("L1").is_none());
    }
}
