//! Request routing for building documents
//!
//! A [`BuildingService`] owns a reader pipeline, loads documents through it
//! and answers [`Request`]s: round trips, saves, nested reports, single
//! measurements and outlines.

use crate::facility::BuildingDocument;
use crate::io::Reader;
use crate::metrics::{build_report, describe, Measurable};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::upload::StagedUpload;
use crate::types::{Metric, Operation, ServiceConfig, STDIN_PATH};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// One unit of work against a loaded document
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Emit the document again
    Load,
    /// Persist the document at a location
    Save {
        /// Destination
        output: PathBuf,
    },
    /// Nested report for one metric
    Report(Metric),
    /// One value for the building, a level, or a room
    Measure {
        /// Metric to compute
        metric: Metric,
        /// Level to measure, or the level holding `room_id`
        level_id: Option<String>,
        /// Room to measure
        room_id: Option<String>,
    },
    /// Indented outline
    Describe,
}

impl Request {
    /// Derive the request a configuration asks for
    pub fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        if let Some(metric) = config.operation.report_metric() {
            return Ok(Request::Report(metric));
        }

        let request = match config.operation {
            Operation::Load => Request::Load,
            Operation::Save => Request::Save {
                output: config
                    .output
                    .clone()
                    .ok_or(ServiceError::MissingOutput(Operation::Save))?,
            },
            Operation::Measure => Request::Measure {
                metric: config.metric,
                level_id: config.level_id.clone(),
                room_id: config.room_id.clone(),
            },
            Operation::Area | Operation::Volume | Operation::Luminosity | Operation::Describe => {
                Request::Describe
            }
        };
        Ok(request)
    }
}

/// Result of a handled request
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Serialized document
    Document(String),
    /// Where the document was saved
    Saved(PathBuf),
    /// Serialized report
    Report(String),
    /// Single measurement
    Value(f64),
    /// Plain-text outline
    Outline(String),
}

impl Response {
    /// Whether the response carries text meant for an output sink
    pub fn has_payload(&self) -> bool {
        !matches!(self, Response::Saved(_))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Document(text) | Response::Report(text) => write!(f, "{}", text),
            Response::Outline(text) => write!(f, "{}", text.trim_end_matches('\n')),
            Response::Saved(path) => write!(f, "Saved to {}", path.display()),
            // Non-finite values render as JSON null
            Response::Value(value) => write!(f, "{}", serde_json::Value::from(*value)),
        }
    }
}

/// Loads documents through a reader pipeline and answers requests
#[derive(Debug, Clone)]
pub struct BuildingService<R> {
    reader: R,
}

impl<R: Reader> BuildingService<R> {
    /// Create a service around a reader pipeline
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// The reader pipeline
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Load a document from `input`; `None` or `-` means standard input
    pub fn load(&self, input: Option<&Path>) -> ServiceResult<BuildingDocument> {
        match input {
            Some(path) if path.as_os_str() != STDIN_PATH => self.load_file(path),
            _ => {
                let upload = StagedUpload::stage_stdin()?;
                self.load_file(upload.path())
            }
        }
    }

    /// Load a document from a file
    pub fn load_file(&self, path: &Path) -> ServiceResult<BuildingDocument> {
        let document: BuildingDocument = self.reader.read_from_file(path)?;
        info!(
            path = %path.display(),
            levels = document.building.as_ref().map_or(0, |b| b.level_count()),
            "Document loaded"
        );
        Ok(document)
    }

    /// Stage a stream and load the document from the staged copy
    pub fn load_stream<S: Read>(&self, source: S) -> ServiceResult<BuildingDocument> {
        let upload = StagedUpload::stage(source)?;
        self.load_file(upload.path())
    }

    /// Answer `request` for `document`
    #[instrument(skip(self, document), fields(building = document.building.is_some()))]
    pub fn handle(
        &self,
        request: &Request,
        document: &BuildingDocument,
    ) -> ServiceResult<Response> {
        let response = match request {
            Request::Load => Response::Document(self.reader.write(document)?),
            Request::Save { output } => {
                self.reader.write_to_file(document, output)?;
                Response::Saved(output.clone())
            }
            Request::Report(metric) => {
                let report = build_report(document, *metric).ok_or(ServiceError::MissingBuilding)?;
                Response::Report(self.reader.write(&report)?)
            }
            Request::Measure { metric, level_id, room_id } => Response::Value(measure(
                document,
                *metric,
                level_id.as_deref(),
                room_id.as_deref(),
            )?),
            Request::Describe => Response::Outline(describe(document)),
        };

        debug!("Request handled: {:?}", request);
        Ok(response)
    }
}

/// One metric for the building, one level, or one room
///
/// A room id needs its level id. With a room id the room is measured, else
/// with a level id the level, else the whole building. Unknown ids are
/// reported as not found rather than measured as zero.
pub fn measure(
    document: &BuildingDocument,
    metric: Metric,
    level_id: Option<&str>,
    room_id: Option<&str>,
) -> ServiceResult<f64> {
    let building = document.building.as_ref().ok_or(ServiceError::MissingBuilding)?;

    match (level_id, room_id) {
        (None, Some(room_id)) => Err(ServiceError::MissingLevelId { room_id: room_id.to_string() }),
        (Some(level_id), Some(room_id)) => {
            let level = building
                .find_level(level_id)
                .ok_or_else(|| ServiceError::level_not_found(level_id))?;
            let room = level
                .find_room(room_id)
                .ok_or_else(|| ServiceError::room_not_found(level_id, room_id))?;
            Ok(room.measure(metric))
        }
        (Some(level_id), None) => building
            .find_level(level_id)
            .map(|level| level.measure(metric))
            .ok_or_else(|| ServiceError::level_not_found(level_id)),
        (None, None) => Ok(building.measure(metric)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::{Building, Level, Room};
    use crate::io::JsonReader;

    fn sample() -> BuildingDocument {
        BuildingDocument::new(
            Building::new("B1", "HQ")
                .with_level(
                    Level::new("L1", "Ground")
                        .with_room(Room::new("R1", "Lobby", 50.0, 150.0, 0.0, 500.0))
                        .with_room(Room::new("R2", "Office", 20.0, 60.0, 0.0, 100.0)),
                )
                .with_level(Level::new("L2", "First")),
        )
    }

    #[test]
    fn test_measure_routes_by_ids() {
        let document = sample();

        assert_eq!(measure(&document, Metric::Volume, None, None).unwrap(), 210.0);
        assert_eq!(measure(&document, Metric::Volume, Some("L1"), None).unwrap(), 210.0);
        assert_eq!(measure(&document, Metric::Volume, Some("L2"), None).unwrap(), 0.0);
        assert_eq!(measure(&document, Metric::Area, Some("L1"), Some("R2")).unwrap(), 20.0);
        assert_eq!(measure(&document, Metric::Luminosity, Some("L1"), Some("R1")).unwrap(), 10.0);
    }

    #[test]
    fn test_measure_errors() {
        let document = sample();

        assert!(matches!(
            measure(&document, Metric::Volume, None, Some("R1")),
            Err(ServiceError::MissingLevelId { .. })
        ));
        assert!(matches!(
            measure(&document, Metric::Volume, Some("L9"), None),
            Err(ServiceError::LevelNotFound { .. })
        ));
        assert!(matches!(
            measure(&document, Metric::Volume, Some("L9"), Some("R1")),
            Err(ServiceError::LevelNotFound { .. })
        ));
        assert!(matches!(
            measure(&document, Metric::Volume, Some("L1"), Some("R9")),
            Err(ServiceError::RoomNotFound { .. })
        ));
        assert!(matches!(
            measure(&BuildingDocument::empty(), Metric::Volume, None, None),
            Err(ServiceError::MissingBuilding)
        ));
    }

    #[test]
    fn test_handle_report_and_outline() {
        let service = BuildingService::new(JsonReader::new());
        let document = sample();

        let report = service.handle(&Request::Report(Metric::Area), &document).unwrap();
        match report {
            Response::Report(text) => {
                let head = r#"{"buildingId":"B1","buildingName":"HQ","totalArea":70.0"#;
                assert!(text.starts_with(head))
            }
            other => panic!("expected report, got {:?}", other),
        }

        let outline = service.handle(&Request::Describe, &document).unwrap();
        assert!(outline.to_string().starts_with("Building: HQ (id=B1)"));
    }

    #[test]
    fn test_handle_report_without_building() {
        let service = BuildingService::new(JsonReader::new());
        let result = service.handle(&Request::Report(Metric::Volume), &BuildingDocument::empty());

        assert!(matches!(result, Err(ServiceError::MissingBuilding)));
    }

    #[test]
    fn test_handle_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("saved.json");
        let service = BuildingService::new(JsonReader::new());
        let document = sample();

        let request = Request::Save { output: output.clone() };
        let response = service.handle(&request, &document).unwrap();

        assert_eq!(response, Response::Saved(output.clone()));
        assert!(!response.has_payload());
        assert_eq!(service.load(Some(&output)).unwrap(), document);
    }

    #[test]
    fn test_load_stream() {
        let service = BuildingService::new(JsonReader::new());
        let document = service.load_stream(&br#"{"building":{"id":"B1"}}"#[..]).unwrap();

        assert_eq!(document.building.and_then(|b| b.id).unwrap().as_str(), "B1");
    }

    #[test]
    fn test_request_from_config() {
        let config = ServiceConfig {
            operation: Operation::Measure,
            metric: Metric::Area,
            level_id: Some("L1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Request::from_config(&config).unwrap(),
            Request::Measure {
                metric: Metric::Area,
                level_id: Some("L1".to_string()),
                room_id: None,
            }
        );

        let save = ServiceConfig { operation: Operation::Save, ..Default::default() };
        assert!(matches!(
            Request::from_config(&save),
            Err(ServiceError::MissingOutput(Operation::Save))
        ));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Response::Value(150.0).to_string(), "150.0");
        assert_eq!(Response::Value(f64::NAN).to_string(), "null");
    }
}
