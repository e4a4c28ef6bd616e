//! Core types and identifiers for the building metrics engine
//!
//! This module contains identifiers, enumerations, and configuration structures
//! used throughout the crate.
//!
//! # Overview
//!
//! - **Identifiers**: opaque string identifiers for buildings, levels and rooms
//! - **Enums**: metrics, routed operations and output styles
//! - **Configuration**: service configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use building_metrics::types::*;
//!
//! let room_id = RoomId::new("R1");
//! let metric: Metric = "luminosity".parse().unwrap();
//!
//! let config = ServiceConfig {
//!     operation: Operation::Measure,
//!     metric,
//!     level_id: Some("L1".to_string()),
//!     room_id: Some(room_id.to_string()),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
