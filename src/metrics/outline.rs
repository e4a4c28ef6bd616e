//! Human-readable outline of a building, produced by a single walk

use crate::facility::{Building, BuildingDocument, Level, Room};
use crate::metrics::visitor::{walk, Visitor};
use std::fmt::Write;

const UNNAMED: &str = "<unnamed>";
const NO_ID: &str = "-";

/// Visitor writing one indented line per node
#[derive(Debug, Default)]
pub struct OutlineVisitor {
    text: String,
}

impl OutlineVisitor {
    /// Create an empty outline
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated outline
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Visitor for OutlineVisitor {
    fn visit_building(&mut self, building: &Building) {
        let _ = writeln!(
            self.text,
            "Building: {} (id={})",
            building.name.as_deref().unwrap_or(UNNAMED),
            building.id.as_ref().map_or(NO_ID, |id| id.as_str()),
        );
    }

    fn visit_level(&mut self, level: &Level) {
        let _ = writeln!(
            self.text,
            "  Level: {} (id={})",
            level.name.as_deref().unwrap_or(UNNAMED),
            level.id.as_ref().map_or(NO_ID, |id| id.as_str()),
        );
    }

    fn visit_room(&mut self, room: &Room) {
        let _ = writeln!(
            self.text,
            "    Room: {} (id={}, area={}, cube={}, heating={}, light={})",
            room.name.as_deref().unwrap_or(UNNAMED),
            room.id.as_ref().map_or(NO_ID, |id| id.as_str()),
            room.area(),
            room.volume(),
            room.heating(),
            room.light(),
        );
    }
}

/// Outline of the whole document; empty documents get a one-line notice
pub fn describe(document: &BuildingDocument) -> String {
    if document.is_empty() {
        return "Empty document (no building)\n".to_string();
    }

    let mut outline = OutlineVisitor::new();
    walk(document, &mut outline);
    outline.into_text()
}
