//! Nested metric reports built by walking the tree
//!
//! A report mirrors the input tree: the building with its aggregate, each
//! level with its own aggregate, and each room with its individual value.
//! One generic [`ReportBuilder`] serves all three metrics; the metric marker
//! types only decide which value is computed and how the fields are named.
//!
//! Identifiers and names absent from the input are omitted from the output
//! rather than written as `null` or `""`.

use crate::facility::{Building, BuildingDocument, Level, Room};
use crate::io::DocumentShape;
use crate::metrics::aggregate::Measurable;
use crate::metrics::node::Node;
use crate::metrics::visitor::Visitor;
use crate::types::{BuildingId, LevelId, Metric, RoomId};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Compile-time description of one report metric
pub trait MetricKind: fmt::Debug + Clone + PartialEq + Default {
    /// Runtime metric computed by this kind
    const METRIC: Metric;
    /// Name of the report, used as the serialized struct name
    const REPORT_NAME: &'static str;
    /// Field holding a building or level aggregate
    const AGGREGATE_FIELD: &'static str;
    /// Field holding a single room value
    const ROOM_FIELD: &'static str;
}

/// Area reports: `totalArea` / `area`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AreaMetric;

/// Volume reports: `totalVolume` / `volume`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeMetric;

/// Luminosity reports: `averageLuminosity` / `luminosity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LuminosityMetric;

impl MetricKind for AreaMetric {
    const METRIC: Metric = Metric::Area;
    const REPORT_NAME: &'static str = "AreaReport";
    const AGGREGATE_FIELD: &'static str = "totalArea";
    const ROOM_FIELD: &'static str = "area";
}

impl MetricKind for VolumeMetric {
    const METRIC: Metric = Metric::Volume;
    const REPORT_NAME: &'static str = "VolumeReport";
    const AGGREGATE_FIELD: &'static str = "totalVolume";
    const ROOM_FIELD: &'static str = "volume";
}

impl MetricKind for LuminosityMetric {
    const METRIC: Metric = Metric::Luminosity;
    const REPORT_NAME: &'static str = "LuminosityReport";
    const AGGREGATE_FIELD: &'static str = "averageLuminosity";
    const ROOM_FIELD: &'static str = "luminosity";
}

/// Report entry for one room
#[derive(Debug, Clone, PartialEq)]
pub struct RoomReport<M: MetricKind> {
    /// Room identifier
    pub room_id: Option<RoomId>,
    /// Room name
    pub room_name: Option<String>,
    /// The room's own metric value
    pub value: f64,
    metric: PhantomData<M>,
}

/// Report entry for one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelReport<M: MetricKind> {
    /// Level identifier
    pub level_id: Option<LevelId>,
    /// Level name
    pub level_name: Option<String>,
    /// The level aggregate
    pub value: f64,
    /// One entry per room, in document order
    pub rooms: Vec<RoomReport<M>>,
}

/// Report for a whole building
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingReport<M: MetricKind> {
    /// Building identifier
    pub building_id: Option<BuildingId>,
    /// Building name
    pub building_name: Option<String>,
    /// The building aggregate
    pub value: f64,
    /// One entry per level, in document order
    pub levels: Vec<LevelReport<M>>,
}

impl<M: MetricKind> RoomReport<M> {
    /// Entry for `room`
    pub fn from_room(room: &Room) -> Self {
        Self {
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            value: room.measure(M::METRIC),
            metric: PhantomData,
        }
    }
}

impl<M: MetricKind> LevelReport<M> {
    /// Entry for `level`, without room entries yet
    pub fn from_level(level: &Level) -> Self {
        Self {
            level_id: level.id.clone(),
            level_name: level.name.clone(),
            value: level.measure(M::METRIC),
            rooms: Vec::new(),
        }
    }
}

impl<M: MetricKind> BuildingReport<M> {
    /// Report for `building`, without level entries yet
    pub fn from_building(building: &Building) -> Self {
        Self {
            building_id: building.id.clone(),
            building_name: building.name.clone(),
            value: building.measure(M::METRIC),
            levels: Vec::new(),
        }
    }
}

fn serialize_optional<S, T>(
    state: &mut S,
    key: &'static str,
    value: &Option<T>,
) -> Result<(), S::Error>
where
    S: SerializeStruct,
    T: Serialize,
{
    match value {
        Some(value) => state.serialize_field(key, value),
        None => state.skip_field(key),
    }
}

impl<M: MetricKind> Serialize for RoomReport<M> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("RoomReport", 3)?;
        serialize_optional(&mut state, "roomId", &self.room_id)?;
        serialize_optional(&mut state, "roomName", &self.room_name)?;
        state.serialize_field(M::ROOM_FIELD, &self.value)?;
        state.end()
    }
}

impl<M: MetricKind> Serialize for LevelReport<M> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("LevelReport", 4)?;
        serialize_optional(&mut state, "levelId", &self.level_id)?;
        serialize_optional(&mut state, "levelName", &self.level_name)?;
        state.serialize_field(M::AGGREGATE_FIELD, &self.value)?;
        state.serialize_field("rooms", &self.rooms)?;
        state.end()
    }
}

impl<M: MetricKind> Serialize for BuildingReport<M> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct(M::REPORT_NAME, 4)?;
        serialize_optional(&mut state, "buildingId", &self.building_id)?;
        serialize_optional(&mut state, "buildingName", &self.building_name)?;
        state.serialize_field(M::AGGREGATE_FIELD, &self.value)?;
        state.serialize_field("levels", &self.levels)?;
        state.end()
    }
}

impl<M: MetricKind> DocumentShape for BuildingReport<M> {
    fn shape_name() -> &'static str {
        M::REPORT_NAME
    }
}

/// Visitor accumulating a [`BuildingReport`] during one walk
///
/// The builder owns its state for a single traversal. A room visited while no
/// level is open (a walk started at a bare room) is ignored; a level visited
/// while no building is open is built but never attached.
#[derive(Debug)]
pub struct ReportBuilder<M: MetricKind> {
    report: Option<BuildingReport<M>>,
    current_level: Option<LevelReport<M>>,
}

/// Builder for area reports
pub type AreaReportBuilder = ReportBuilder<AreaMetric>;
/// Builder for volume reports
pub type VolumeReportBuilder = ReportBuilder<VolumeMetric>;
/// Builder for luminosity reports
pub type LuminosityReportBuilder = ReportBuilder<LuminosityMetric>;

impl<M: MetricKind> Default for ReportBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MetricKind> ReportBuilder<M> {
    /// Create a builder with no report yet
    pub fn new() -> Self {
        Self { report: None, current_level: None }
    }

    /// Close the open level and return the report, if a building was visited
    pub fn finish(mut self) -> Option<BuildingReport<M>> {
        self.close_level();
        self.report
    }

    fn close_level(&mut self) {
        if let Some(level) = self.current_level.take() {
            match &mut self.report {
                Some(report) => report.levels.push(level),
                None => debug!("Dropping level report {:?} outside of a building", level.level_id),
            }
        }
    }
}

impl<M: MetricKind> Visitor for ReportBuilder<M> {
    fn visit_building(&mut self, building: &Building) {
        self.close_level();
        self.report = Some(BuildingReport::from_building(building));
    }

    fn visit_level(&mut self, level: &Level) {
        self.close_level();
        self.current_level = Some(LevelReport::from_level(level));
    }

    fn visit_room(&mut self, room: &Room) {
        if let Some(level) = &mut self.current_level {
            level.rooms.push(RoomReport::from_room(room));
        }
    }
}

/// Report for one building under a statically chosen metric
pub fn building_report<M: MetricKind>(building: &Building) -> BuildingReport<M> {
    let mut builder = ReportBuilder::<M>::new();
    Node::Building(building).accept(&mut builder);
    builder.finish().unwrap_or_else(|| BuildingReport::from_building(building))
}

/// A finished report for one of the three metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Area breakdown
    Area(BuildingReport<AreaMetric>),
    /// Volume breakdown
    Volume(BuildingReport<VolumeMetric>),
    /// Luminosity breakdown
    Luminosity(BuildingReport<LuminosityMetric>),
}

impl Report {
    /// Report for `building` under a runtime metric
    pub fn for_building(building: &Building, metric: Metric) -> Self {
        match metric {
            Metric::Area => Report::Area(building_report(building)),
            Metric::Volume => Report::Volume(building_report(building)),
            Metric::Luminosity => Report::Luminosity(building_report(building)),
        }
    }

    /// The metric this report carries
    pub fn metric(&self) -> Metric {
        match self {
            Report::Area(_) => Metric::Area,
            Report::Volume(_) => Metric::Volume,
            Report::Luminosity(_) => Metric::Luminosity,
        }
    }

    /// The building aggregate
    pub fn total(&self) -> f64 {
        match self {
            Report::Area(report) => report.value,
            Report::Volume(report) => report.value,
            Report::Luminosity(report) => report.value,
        }
    }

    /// Number of level entries
    pub fn level_count(&self) -> usize {
        match self {
            Report::Area(report) => report.levels.len(),
            Report::Volume(report) => report.levels.len(),
            Report::Luminosity(report) => report.levels.len(),
        }
    }
}

impl DocumentShape for Report {
    fn shape_name() -> &'static str {
        "Report"
    }
}

/// Build the full nested report for the document's building.
///
/// Returns `None` for an empty document.
pub fn build_report(document: &BuildingDocument, metric: Metric) -> Option<Report> {
    document.building.as_ref().map(|building| Report::for_building(building, metric))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_building() -> Building {
        Building::new("B1", "HQ")
            .with_level(
                Level::new("L1", "Ground")
                    .with_room(Room::new("R1", "Lobby", 50.0, 150.0, 0.0, 500.0)),
            )
            .with_level(Level::new("L2", "First"))
    }

    #[test]
    fn test_area_report_shape() {
        let report = building_report::<AreaMetric>(&sample_building());

        assert_eq!(report.value, 50.0);
        assert_eq!(report.levels.len(), 2);
        assert_eq!(report.levels[0].value, 50.0);
        assert_eq!(report.levels[0].rooms.len(), 1);
        assert_eq!(report.levels[0].rooms[0].value, 50.0);
        assert!(report.levels[1].rooms.is_empty());
    }

    #[test]
    fn test_luminosity_report_values() {
        let report = building_report::<LuminosityMetric>(&sample_building());

        assert_eq!(report.value, 10.0);
        assert_eq!(report.levels[0].value, 10.0);
        assert_eq!(report.levels[1].value, 0.0);
        assert_eq!(report.levels[0].rooms[0].value, 10.0);
    }

    #[test]
    fn test_report_field_names() {
        let report = building_report::<VolumeMetric>(&sample_building());
        let json = serde_json::to_value(report).unwrap();

        assert_eq!(json["buildingId"], "B1");
        assert_eq!(json["buildingName"], "HQ");
        assert_eq!(json["totalVolume"], 150.0);
        assert_eq!(json["levels"][0]["levelId"], "L1");
        assert_eq!(json["levels"][0]["totalVolume"], 150.0);
        assert_eq!(json["levels"][0]["rooms"][0]["roomName"], "Lobby");
        assert_eq!(json["levels"][0]["rooms"][0]["volume"], 150.0);
    }

    #[test]
    fn test_absent_names_are_omitted() {
        let building = Building::default().with_level(Level::default().with_room(Room::default()));
        let json = serde_json::to_string(&building_report::<AreaMetric>(&building)).unwrap();

        assert_eq!(
            json,
            r#"{"totalArea":0.0,"levels":[{"totalArea":0.0,"rooms":[{"area":0.0}]}]}"#
        );
    }

    #[test]
    fn test_room_without_level_is_ignored() {
        let room = Room::new("R1", "Lonely", 1.0, 1.0, 0.0, 1.0);
        let mut builder = AreaReportBuilder::new();

        Node::Room(&room).accept(&mut builder);

        assert!(builder.finish().is_none());
    }

    #[test]
    fn test_build_report_on_empty_document() {
        assert!(build_report(&BuildingDocument::empty(), Metric::Area).is_none());

        let report = build_report(&BuildingDocument::new(sample_building()), Metric::Luminosity)
            .unwrap();
        assert_eq!(report.metric(), Metric::Luminosity);
        assert_eq!(report.total(), 10.0);
        assert_eq!(report.level_count(), 2);
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(BuildingReport::<AreaMetric>::shape_name(), "AreaReport");
        assert_eq!(BuildingReport::<LuminosityMetric>::shape_name(), "LuminosityReport");
    }
}
