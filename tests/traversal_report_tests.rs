//! Tests for the pre-order walk and the nested reports built from it

use building_metrics::facility::{Building, BuildingDocument, Level, Room};
use building_metrics::metrics::{
    build_report, building_report, walk, AreaMetric, AreaReportBuilder, Callbacks, LuminosityMetric,
    Node, Visitor, VolumeReportBuilder,
};
use building_metrics::types::Metric;
use serde_json::{json, Value};

/// Three levels with 3, 0 and 1 rooms
fn tower() -> BuildingDocument {
    BuildingDocument::new(
        Building::new("T", "Tower")
            .with_level(
                Level::new("L1", "One")
                    .with_room(Room::new("R11", "a", 10.0, 30.0, 1.0, 100.0))
                    .with_room(Room::new("R12", "b", 20.0, 60.0, 1.0, 0.0))
                    .with_room(Room::new("R13", "c", 5.0, 15.0, 1.0, 50.0)),
            )
            .with_level(Level::new("L2", "Two"))
            .with_level(
                Level::new("L3", "Three").with_room(Room::new("R31", "d", 8.0, 24.0, 1.0, 16.0)),
            ),
    )
}

#[derive(Default)]
struct Trace(Vec<String>);

impl Visitor for Trace {
    fn visit_building(&mut self, building: &Building) {
        self.0.push(format!("B:{}", building.id.as_ref().map_or("", |id| id.as_str())));
    }

    fn visit_level(&mut self, level: &Level) {
        self.0.push(format!("L:{}", level.id.as_ref().map_or("", |id| id.as_str())));
    }

    fn visit_room(&mut self, room: &Room) {
        self.0.push(format!("R:{}", room.id.as_ref().map_or("", |id| id.as_str())));
    }
}

#[test]
fn test_walk_is_pre_order_in_input_order() {
    let mut trace = Trace::default();
    walk(&tower(), &mut trace);

    assert_eq!(trace.0, vec!["B:T", "L:L1", "R:R11", "R:R12", "R:R13", "L:L2", "L:L3", "R:R31"]);
}

#[test]
fn test_each_node_visited_once() {
    let (mut buildings, mut levels, mut rooms) = (0, 0, 0);
    let mut counter = Callbacks::new(
        |_: &Building| buildings += 1,
        |_: &Level| levels += 1,
        |_: &Room| rooms += 1,
    );

    walk(&tower(), &mut counter);
    drop(counter);

    assert_eq!((buildings, levels, rooms), (1, 3, 4));
}

#[test]
fn test_walk_from_inner_node() {
    let document = tower();
    let level = document.find_level_by_id(Some("L1")).unwrap();
    let mut trace = Trace::default();

    Node::Level(level).accept(&mut trace);

    assert_eq!(trace.0, vec!["L:L1", "R:R11", "R:R12", "R:R13"]);
}

#[test]
fn test_report_nesting_matches_input_for_every_metric() {
    let document = tower();

    for metric in Metric::ALL {
        let report = serde_json::to_value(build_report(&document, metric).unwrap()).unwrap();
        let levels = report["levels"].as_array().unwrap();

        let level_ids: Vec<&Value> = levels.iter().map(|level| &level["levelId"]).collect();
        assert_eq!(level_ids, vec!["L1", "L2", "L3"]);

        let room_ids: Vec<Vec<&Value>> = levels
            .iter()
            .map(|level| {
                let rooms = level["rooms"].as_array().unwrap();
                rooms.iter().map(|room| &room["roomId"]).collect()
            })
            .collect();
        assert_eq!(room_ids, vec![vec!["R11", "R12", "R13"], vec![], vec!["R31"]]);
    }
}

#[test]
fn test_area_report_values() {
    let report = serde_json::to_value(build_report(&tower(), Metric::Area).unwrap()).unwrap();

    assert_eq!(report["buildingId"], "T");
    assert_eq!(report["buildingName"], "Tower");
    assert_eq!(report["totalArea"], 43.0);
    assert_eq!(report["levels"][0]["totalArea"], 35.0);
    assert_eq!(report["levels"][1]["totalArea"], 0.0);
    assert_eq!(
        report["levels"][0]["rooms"][1],
        json!({"roomId": "R12", "roomName": "b", "area": 20.0})
    );
}

#[test]
fn test_volume_report_field_names() {
    let report = serde_json::to_value(build_report(&tower(), Metric::Volume).unwrap()).unwrap();

    assert_eq!(report["totalVolume"], 129.0);
    assert_eq!(report["levels"][2]["totalVolume"], 24.0);
    assert_eq!(report["levels"][2]["rooms"][0]["volume"], 24.0);
}

#[test]
fn test_luminosity_report_uses_flattened_mean() {
    let report = building_report::<LuminosityMetric>(tower().building.as_ref().unwrap());
    let json = serde_json::to_value(&report).unwrap();

    // Rooms: 10, 0, 10, 2
    assert_eq!(json["averageLuminosity"], 5.5);
    assert_eq!(json["levels"][0]["averageLuminosity"], 20.0 / 3.0);
    assert_eq!(json["levels"][1]["averageLuminosity"], 0.0);
    assert_eq!(json["levels"][2]["rooms"][0]["luminosity"], 2.0);
}

#[test]
fn test_overflowing_luminosity_serializes_as_number() {
    let room = Room::new("R", "Lamp", 1e-310, 1.0, 0.0, 1e300);
    let document = BuildingDocument::new(
        Building::new("B", "Bright").with_level(Level::new("L", "Only").with_room(room)),
    );

    let report = build_report(&document, Metric::Luminosity).unwrap();
    let text = serde_json::to_string(&report).unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();

    assert!(!text.contains("null"));
    assert_eq!(json["averageLuminosity"], f64::MAX);
    assert_eq!(json["levels"][0]["averageLuminosity"], f64::MAX);
    assert_eq!(json["levels"][0]["rooms"][0]["luminosity"], f64::MAX);
}

#[test]
fn test_absent_ids_are_omitted_from_report() {
    let building = Building::default().with_level(Level::default().with_room(Room::default()));
    let json = serde_json::to_value(building_report::<AreaMetric>(&building)).unwrap();

    assert_eq!(
        json,
        json!({"totalArea": 0.0, "levels": [{"totalArea": 0.0, "rooms": [{"area": 0.0}]}]})
    );
}

#[test]
fn test_builders_are_independent_per_walk() {
    let document = tower();
    let mut area = AreaReportBuilder::new();
    let mut volume = VolumeReportBuilder::new();

    walk(&document, &mut area);
    walk(&document, &mut volume);

    assert_eq!(area.finish().unwrap().levels.len(), 3);
    assert_eq!(volume.finish().unwrap().value, 129.0);
}

#[test]
fn test_no_report_for_empty_document() {
    assert!(build_report(&BuildingDocument::empty(), Metric::Area).is_none());

    let mut builder = AreaReportBuilder::new();
    walk(&BuildingDocument::empty(), &mut builder);
    assert!(builder.finish().is_none());
}
