//! Building hierarchy data model
//!
//! This module models the physical hierarchy of a building document and the
//! point lookups over it.
//!
//! # Overview
//!
//! - **BuildingDocument**: the document root, holding at most one building
//! - **Building**: identifier, name and an ordered list of levels
//! - **Level**: identifier, name and an ordered list of rooms
//! - **Room**: leaf record with area, volume ("cube"), heating and light values
//!
//! Child lists may be absent rather than empty; both read the same way.
//! The tree is built once per request, read without mutation, then dropped.
//!
//! # Usage Example
//!
//! ```rust
//! use building_metrics::facility::*;
//!
//! let document = BuildingDocument::new(
//!     Building::new("B1", "HQ").with_level(
//!         Level::new("L1", "Ground").with_room(Room::new("R1", "Lobby", 50.0, 150.0, 0.0, 500.0)),
//!     ),
//! );
//!
//! let room = document.find_room_by_id(Some("L1"), Some("R1")).unwrap();
//! assert_eq!(room.area(), 50.0);
//! assert!(document.find_room_by_id(Some("L1"), None).is_none());
//! ```

pub mod building;
pub mod document;
pub mod level;
pub mod room;

// Re-export all public types for convenience
pub use building::Building;
pub use document::BuildingDocument;
pub use level::Level;
pub use room::Room;
