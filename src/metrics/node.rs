//! Borrowed view over one node of the building tree

use crate::facility::{Building, Level, Room};

/// One node of the three-level tree, borrowed from the document
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// A building
    Building(&'a Building),
    /// A level of a building
    Level(&'a Level),
    /// A room of a level
    Room(&'a Room),
}

impl<'a> Node<'a> {
    /// Short kind name, used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Building(_) => "building",
            Node::Level(_) => "level",
            Node::Room(_) => "room",
        }
    }

    /// Identifier of the node, if the document gave one
    pub fn id(&self) -> Option<&'a str> {
        match self {
            Node::Building(building) => building.id.as_ref().map(|id| id.as_str()),
            Node::Level(level) => level.id.as_ref().map(|id| id.as_str()),
            Node::Room(room) => room.id.as_ref().map(|id| id.as_str()),
        }
    }

    /// Name of the node, if the document gave one
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Node::Building(building) => building.name.as_deref(),
            Node::Level(level) => level.name.as_deref(),
            Node::Room(room) => room.name.as_deref(),
        }
    }

    /// Direct children, in document order
    pub fn children(&self) -> Vec<Node<'a>> {
        match self {
            Node::Building(building) => building.levels().iter().map(Node::Level).collect(),
            Node::Level(level) => level.rooms().iter().map(Node::Room).collect(),
            Node::Room(_) => Vec::new(),
        }
    }
}

impl<'a> From<&'a Building> for Node<'a> {
    fn from(building: &'a Building) -> Self {
        Node::Building(building)
    }
}

impl<'a> From<&'a Level> for Node<'a> {
    fn from(level: &'a Level) -> Self {
        Node::Level(level)
    }
}

impl<'a> From<&'a Room> for Node<'a> {
    fn from(room: &'a Room) -> Self {
        Node::Room(room)
    }
}
