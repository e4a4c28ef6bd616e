//! Room records
//!
//! A room is the leaf of the building tree. Every field is optional on the wire
//! so that a parsed document can be written back without inventing values;
//! the accessors apply the zero default that the metrics rely on.

use crate::types::RoomId;
use serde::{Deserialize, Serialize};

/// Represents a room within a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier, unique within its level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RoomId>,
    /// Human-readable name of the room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Floor area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Volume of the room
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cube: Option<f64>,
    /// Heating value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating: Option<f64>,
    /// Total light output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<f64>,
}

impl Room {
    /// Create a room with all four physical values set
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        area: f64,
        cube: f64,
        heating: f64,
        light: f64,
    ) -> Self {
        Self {
            id: Some(RoomId::new(id)),
            name: Some(name.into()),
            area: Some(area),
            cube: Some(cube),
            heating: Some(heating),
            light: Some(light),
        }
    }

    /// Floor area, zero when absent
    pub fn area(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }

    /// Volume, zero when absent
    pub fn volume(&self) -> f64 {
        self.cube.unwrap_or(0.0)
    }

    /// Heating value, zero when absent
    pub fn heating(&self) -> f64 {
        self.heating.unwrap_or(0.0)
    }

    /// Light output, zero when absent
    pub fn light(&self) -> f64 {
        self.light.unwrap_or(0.0)
    }

    /// Whether this room carries the given id
    pub fn has_id(&self, room_id: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.as_str() == room_id)
    }
}
