//! Single-pass traversal of the building tree
//!
//! A walk applies the visitor to a node and then to each of its children, in
//! document order: building, then each level followed by that level's rooms.
//! Every node gets exactly one callback. Absent child lists are walked as empty.

use crate::facility::{Building, BuildingDocument, Level, Room};
use crate::metrics::node::Node;
use tracing::trace;

/// Callback set invoked once per node during a walk
pub trait Visitor {
    /// Called for a building, before any of its levels
    fn visit_building(&mut self, building: &Building);

    /// Called for a level, before any of its rooms
    fn visit_level(&mut self, level: &Level);

    /// Called for a room
    fn visit_room(&mut self, room: &Room);
}

impl<'a> Node<'a> {
    /// Walk the sub-tree rooted at this node in pre-order
    pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) {
        trace!(kind = self.kind(), id = ?self.id(), name = ?self.name(), "Visiting node");
        match self {
            Node::Building(building) => visitor.visit_building(building),
            Node::Level(level) => visitor.visit_level(level),
            Node::Room(room) => visitor.visit_room(room),
        }
        for child in self.children() {
            child.accept(visitor);
        }
    }
}

/// Walk the document's building, if there is one
pub fn walk<V: Visitor + ?Sized>(document: &BuildingDocument, visitor: &mut V) {
    if let Some(building) = &document.building {
        Node::Building(building).accept(visitor);
    }
}

/// A visitor assembled from three closures
pub struct Callbacks<B, L, R>
where
    B: FnMut(&Building),
    L: FnMut(&Level),
    R: FnMut(&Room),
{
    on_building: B,
    on_level: L,
    on_room: R,
}

impl<B, L, R> Callbacks<B, L, R>
where
    B: FnMut(&Building),
    L: FnMut(&Level),
    R: FnMut(&Room),
{
    /// Bundle one closure per node kind
    pub fn new(on_building: B, on_level: L, on_room: R) -> Self {
        Self { on_building, on_level, on_room }
    }
}

impl<B, L, R> Visitor for Callbacks<B, L, R>
where
    B: FnMut(&Building),
    L: FnMut(&Level),
    R: FnMut(&Room),
{
    fn visit_building(&mut self, building: &Building) {
        (self.on_building)(building);
    }

    fn visit_level(&mut self, level: &Level) {
        (self.on_level)(level);
    }

    fn visit_room(&mut self, room: &Room) {
        (self.on_room)(room);
    }
}

impl<B, L, R> std::fmt::Debug for Callbacks<B, L, R>
where
    B: FnMut(&Building),
    L: FnMut(&Level),
    R: FnMut(&Room),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Visitor for Recorder {
        fn visit_building(&mut self, building: &Building) {
            self.events.push(format!("B:{}", building.name.as_deref().unwrap_or("?")));
        }

        fn visit_level(&mut self, level: &Level) {
            self.events.push(format!("L:{}", level.name.as_deref().unwrap_or("?")));
        }

        fn visit_room(&mut self, room: &Room) {
            self.events.push(format!("R:{}", room.name.as_deref().unwrap_or("?")));
        }
    }

    fn sample_building() -> Building {
        Building::new("B1", "HQ")
            .with_level(
                Level::new("L1", "Ground")
                    .with_room(Room::new("R1", "Lobby", 1.0, 1.0, 0.0, 0.0))
                    .with_room(Room::new("R2", "Desk", 1.0, 1.0, 0.0, 0.0)),
            )
            .with_level(Level { rooms: None, ..Level::new("L2", "Attic") })
            .with_level(
                Level::new("L3", "Roof").with_room(Room::new("R3", "Plant", 1.0, 1.0, 0.0, 0.0)),
            )
    }

    #[test]
    fn test_pre_order_visit() {
        let building = sample_building();
        let mut recorder = Recorder::default();

        Node::Building(&building).accept(&mut recorder);

        assert_eq!(
            recorder.events,
            vec!["B:HQ", "L:Ground", "R:Lobby", "R:Desk", "L:Attic", "L:Roof", "R:Plant"]
        );
    }

    #[test]
    fn test_walk_from_level_and_room() {
        let building = sample_building();
        let mut recorder = Recorder::default();

        Node::Level(&building.levels()[0]).accept(&mut recorder);
        Node::Room(&building.levels()[2].rooms()[0]).accept(&mut recorder);

        assert_eq!(recorder.events, vec!["L:Ground", "R:Lobby", "R:Desk", "R:Plant"]);
    }

    #[test]
    fn test_accept_follows_node_children() {
        let building = sample_building();
        let mut recorder = Recorder::default();
        Node::Building(&building).accept(&mut recorder);

        let mut expected = Vec::new();
        let mut stack = vec![Node::Building(&building)];
        while let Some(node) = stack.pop() {
            let tag = node.kind()[..1].to_uppercase();
            expected.push(format!("{}:{}", tag, node.name().unwrap_or("?")));
            stack.extend(node.children().into_iter().rev());
        }

        assert_eq!(recorder.events, expected);
    }

    #[test]
    fn test_walk_empty_document_is_noop() {
        let mut recorder = Recorder::default();
        walk(&BuildingDocument::empty(), &mut recorder);
        assert!(recorder.events.is_empty());

        let bare = BuildingDocument::new(Building { levels: None, ..Building::default() });
        walk(&bare, &mut recorder);
        assert_eq!(recorder.events, vec!["B:?"]);
    }

    #[test]
    fn test_callbacks_count_each_node_once() {
        let document = BuildingDocument::new(sample_building());
        let (mut buildings, mut levels, mut rooms) = (0, 0, 0);

        let mut callbacks = Callbacks::new(
            |_: &Building| buildings += 1,
            |_: &Level| levels += 1,
            |_: &Room| rooms += 1,
        );
        walk(&document, &mut callbacks);
        drop(callbacks);

        assert_eq!((buildings, levels, rooms), (1, 3, 3));
    }
}
