//! Aggregation, traversal and reports
//!
//! This module contains the metric computations and the single-pass walk that
//! drives every report.
//!
//! # Overview
//!
//! - **Measurable**: area, volume and luminosity for rooms, levels, buildings
//! - **Node**: borrowed tagged union over the three node kinds
//! - **Visitor**: one callback per node, pre-order, driven by [`Node::accept`]
//! - **ReportBuilder**: visitor producing a nested report for one metric
//! - **OutlineVisitor**: visitor producing a plain-text outline
//!
//! # Usage Example
//!
//! ```rust
//! use building_metrics::facility::*;
//! use building_metrics::metrics::*;
//! use building_metrics::types::Metric;
//!
//! let document = BuildingDocument::new(
//!     Building::new("B1", "HQ")
//!         .with_level(
//!             Level::new("L1", "Ground")
//!                 .with_room(Room::new("R1", "Lobby", 50.0, 150.0, 0.0, 500.0)),
//!         )
//!         .with_level(Level::new("L2", "First")),
//! );
//!
//! assert_eq!(area(&document), 50.0);
//! assert_eq!(luminosity(&document), 10.0);
//!
//! let report = build_report(&document, Metric::Volume).unwrap();
//! assert_eq!(report.total(), 150.0);
//! assert_eq!(report.level_count(), 2);
//! ```

pub mod aggregate;
pub mod node;
pub mod outline;
pub mod report;
pub mod visitor;

// Re-export all public types for convenience
pub use aggregate::{area, luminosity, measure, volume, Measurable};
pub use node::Node;
pub use outline::{describe, OutlineVisitor};
pub use report::{
    build_report, building_report, AreaMetric, AreaReportBuilder, BuildingReport, LevelReport,
    LuminosityMetric, LuminosityReportBuilder, MetricKind, Report, ReportBuilder, RoomReport,
    VolumeMetric, VolumeReportBuilder,
};
pub use visitor::{walk, Callbacks, Visitor};
