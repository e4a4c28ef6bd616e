//! Level records and room lookup

use crate::facility::room::Room;
use crate::types::LevelId;
use serde::{Deserialize, Serialize};

/// Represents a level (storey) of a building
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Identifier, unique within its building
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LevelId>,
    /// Human-readable name of the level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Rooms on this level, in document order. `None` when the field was absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<Room>>,
}

impl Level {
    /// Create an empty level
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: Some(LevelId::new(id)), name: Some(name.into()), rooms: Some(Vec::new()) }
    }

    /// Builder-style room append
    pub fn with_room(mut self, room: Room) -> Self {
        self.add_room(room);
        self
    }

    /// Add a room to the level
    pub fn add_room(&mut self, room: Room) {
        self.rooms.get_or_insert_with(Vec::new).push(room);
    }

    /// Rooms of this level; an absent list reads as empty
    pub fn rooms(&self) -> &[Room] {
        self.rooms.as_deref().unwrap_or_default()
    }

    /// Number of rooms on this level
    pub fn room_count(&self) -> usize {
        self.rooms().len()
    }

    /// First room carrying `room_id`
    pub fn find_room(&self, room_id: &str) -> Option<&Room> {
        self.rooms().iter().find(|room| room.has_id(room_id))
    }

    /// Whether this level carries the given id
    pub fn has_id(&self, level_id: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.as_str() == level_id)
    }
}
