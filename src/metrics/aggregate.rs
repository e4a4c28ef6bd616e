//! Aggregation of physical metrics over the building tree
//!
//! Every container value is derived from its children on each call; nothing
//! is cached. None of these functions fail: absent nodes, absent child lists
//! and zero areas all degrade to `0.0`.
//!
//! Area and volume are sums. Luminosity is `light / area` per room (zero when
//! the area is not positive), the mean over its rooms for a level, and the
//! mean over *all rooms of all levels* for a building. The building value is
//! not a mean of the level means.
//!
//! Results are always finite. A value that overflows is clamped to
//! `f64::MAX` (or `f64::MIN`), so a room with a tiny positive area and a
//! large light output reports `f64::MAX` rather than infinity.

use crate::facility::{Building, BuildingDocument, Level, Room};
use crate::metrics::node::Node;
use crate::types::Metric;

/// Something the three metrics can be computed for
pub trait Measurable {
    /// Floor area
    fn area(&self) -> f64;

    /// Volume
    fn volume(&self) -> f64;

    /// Light output per unit of floor area
    fn luminosity(&self) -> f64;

    /// Dispatch on a runtime metric
    fn measure(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Area => self.area(),
            Metric::Volume => self.volume(),
            Metric::Luminosity => self.luminosity(),
        }
    }
}

/// Clamp infinities to the nearest finite value; NaN becomes `0.0`
fn finite(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(f64::MIN, f64::MAX)
    }
}

/// Arithmetic mean; an empty input yields `0.0`
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }

    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        sum / count
    } else {
        // Divide first when the plain sum overflows
        finite(values.iter().map(|value| value / count).sum())
    }
}

impl Measurable for Room {
    fn area(&self) -> f64 {
        Room::area(self)
    }

    fn volume(&self) -> f64 {
        Room::volume(self)
    }

    fn luminosity(&self) -> f64 {
        let area = Room::area(self);
        if area > 0.0 {
            finite(self.light() / area)
        } else {
            0.0
        }
    }
}

impl Measurable for Level {
    fn area(&self) -> f64 {
        finite(self.rooms().iter().map(Measurable::area).sum())
    }

    fn volume(&self) -> f64 {
        finite(self.rooms().iter().map(Measurable::volume).sum())
    }

    fn luminosity(&self) -> f64 {
        mean(self.rooms().iter().map(Measurable::luminosity))
    }
}

impl Measurable for Building {
    fn area(&self) -> f64 {
        finite(self.levels().iter().map(Measurable::area).sum())
    }

    fn volume(&self) -> f64 {
        finite(self.levels().iter().map(Measurable::volume).sum())
    }

    fn luminosity(&self) -> f64 {
        mean(self.rooms().map(Measurable::luminosity))
    }
}

impl Measurable for BuildingDocument {
    fn area(&self) -> f64 {
        self.building.as_ref().area()
    }

    fn volume(&self) -> f64 {
        self.building.as_ref().volume()
    }

    fn luminosity(&self) -> f64 {
        self.building.as_ref().luminosity()
    }
}

impl Measurable for Node<'_> {
    fn area(&self) -> f64 {
        match self {
            Node::Building(building) => building.area(),
            Node::Level(level) => level.area(),
            Node::Room(room) => Measurable::area(*room),
        }
    }

    fn volume(&self) -> f64 {
        match self {
            Node::Building(building) => building.volume(),
            Node::Level(level) => level.volume(),
            Node::Room(room) => Measurable::volume(*room),
        }
    }

    fn luminosity(&self) -> f64 {
        match self {
            Node::Building(building) => building.luminosity(),
            Node::Level(level) => level.luminosity(),
            Node::Room(room) => room.luminosity(),
        }
    }
}

/// An absent node measures zero
impl<T: Measurable> Measurable for Option<&T> {
    fn area(&self) -> f64 {
        self.map_or(0.0, Measurable::area)
    }

    fn volume(&self) -> f64 {
        self.map_or(0.0, Measurable::volume)
    }

    fn luminosity(&self) -> f64 {
        self.map_or(0.0, Measurable::luminosity)
    }
}

/// Area of any node
pub fn area<N: Measurable + ?Sized>(node: &N) -> f64 {
    node.area()
}

/// Volume of any node
pub fn volume<N: Measurable + ?Sized>(node: &N) -> f64 {
    node.volume()
}

/// Luminosity of any node
pub fn luminosity<N: Measurable + ?Sized>(node: &N) -> f64 {
    node.luminosity()
}

/// Value of `metric` for any node
pub fn measure<N: Measurable + ?Sized>(node: &N, metric: Metric) -> f64 {
    node.measure(metric)
}
