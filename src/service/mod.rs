//! Request handling on top of the reader pipeline
//!
//! This module routes requests to the engine: load and save documents, produce
//! nested reports, measure single nodes and print outlines.
//!
//! # Usage Example
//!
//! ```rust
//! use building_metrics::io::{JsonReader, LoggingReader};
//! use building_metrics::service::*;
//! use building_metrics::types::Metric;
//!
//! let service = BuildingService::new(LoggingReader::new(JsonReader::new()));
//! let input = r#"{"building":{"id":"B1","levels":[
//!     {"id":"L1","rooms":[{"id":"R1","area":4.0,"cube":12.0}]}]}}"#;
//! let document = service.load_stream(input.as_bytes())?;
//!
//! let request = Request::Measure {
//!     metric: Metric::Volume,
//!     level_id: Some("L1".to_string()),
//!     room_id: Some("R1".to_string()),
//! };
//! assert_eq!(service.handle(&request, &document)?, Response::Value(12.0));
//! # Ok::<(), ServiceError>(())
//! ```

pub mod dispatcher;
pub mod error;
pub mod upload;

// Re-export all public types for convenience
pub use dispatcher::{measure, BuildingService, Request, Response};
pub use error::{ServiceError, ServiceResult};
pub use upload::StagedUpload;
