//! Building Metrics
//!
//! Physical metrics over a building hierarchy: a building holds levels, a
//! level holds rooms, and rooms carry area, volume (cube), heating and light.
//!
//! # Overview
//!
//! This library loads building documents from JSON, aggregates area, volume
//! and average luminosity at every level of the tree, and produces nested
//! reports from a single pre-order walk.
//!
//! ## Key Features
//!
//! - **Hierarchical Model**: buildings, levels and rooms with optional fields
//!   that survive a load/save round trip untouched
//! - **Aggregation**: sums for area and volume, room-weighted means for luminosity
//! - **Visitor Traversal**: one walk, one callback per node, any number of visitors
//! - **Reports**: nested area, volume and luminosity breakdowns
//! - **Reader Pipeline**: a JSON reader wrapped by stackable logging and
//!   auditing decorators, with atomic file writes
//!
//! ## Quick Start
//!
//! ```rust
//! use building_metrics::*;
//!
//! let document = io::parse(br#"{"building":{"id":"B1","name":"HQ","levels":[
//!     {"id":"L1","name":"Ground","rooms":[
//!         {"id":"R1","name":"Lobby","area":50.0,"cube":150.0,"heating":0.0,"light":500.0}]},
//!     {"id":"L2","name":"First","rooms":[]}]}}"#)?;
//!
//! assert_eq!(metrics::area(&document), 50.0);
//! assert_eq!(metrics::luminosity(&document), 10.0);
//!
//! let report = metrics::build_report(&document, Metric::Area).unwrap();
//! assert_eq!(report.level_count(), 2);
//! # Ok::<(), ReaderError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, enums and configuration
//! - [`facility`]: Building, level and room model
//! - [`metrics`]: Aggregation, traversal and reports
//! - [`io`]: Reader pipeline and decorators
//! - [`service`]: Request handling
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │  Facility   │    │   Metrics   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Building    │◄───┤ Aggregate   │
//! │ Enums       │    │ Level       │    │ Visitor     │
//! │ Config      │    │ Room        │    │ Report      │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                           ▲                  ▲
//!                           │                  │
//!                    ┌─────────────┐    ┌─────────────┐
//!                    │     IO      │    │   Service   │
//!                    │             │◄───┤             │
//!                    │ Reader      │    │ Dispatcher  │
//!                    │ Decorators  │    │ Upload      │
//!                    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod facility;
pub mod io;
pub mod logging;
pub mod metrics;
pub mod service;
pub mod types;

// Core types and identifiers
pub use types::{
    BuildingId, ConfigValidationError, LevelId, Metric, Operation, OutputStyle, RoomId,
    ServiceConfig,
};

// Building model
pub use facility::{Building, BuildingDocument, Level, Room};

// Metrics and traversal
pub use metrics::{build_report, describe, walk, Measurable, Node, Report, Visitor};

// Reader pipeline
pub use io::{AuditLog, AuditingReader, JsonReader, LoggingReader, Reader, ReaderError};

// Request handling
pub use service::{BuildingService, Request, Response, ServiceError};

pub use logging::LoggingConfig;
