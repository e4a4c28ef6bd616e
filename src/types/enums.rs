//! Enumeration types for the building metrics engine
//!
//! This module contains the metric kinds, the operations a caller can route a
//! request to, and the output style of the JSON reader.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical metrics computed over the building tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Floor area, summed bottom-up
    Area,
    /// Volume ("cube"), summed bottom-up
    Volume,
    /// Light output per unit of area, averaged over rooms
    Luminosity,
}

impl Metric {
    /// All metrics in display order
    pub const ALL: [Metric; 3] = [Metric::Area, Metric::Volume, Metric::Luminosity];
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Area => write!(f, "area"),
            Metric::Volume => write!(f, "volume"),
            Metric::Luminosity => write!(f, "luminosity"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "area" => Ok(Metric::Area),
            "volume" | "cube" => Ok(Metric::Volume),
            "luminosity" | "light" => Ok(Metric::Luminosity),
            _ => Err(format!("Unknown metric: {}", s)),
        }
    }
}

/// Kinds of request an external caller can route to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Parse a document and emit it again
    Load,
    /// Parse a document and persist it to a named location
    Save,
    /// Full nested area report
    Area,
    /// Full nested volume report
    Volume,
    /// Full nested luminosity report
    Luminosity,
    /// Single metric value for the building, one level or one room
    Measure,
    /// Indented human-readable outline of the building
    Describe,
}

impl Operation {
    /// The report metric for the report operations
    pub fn report_metric(&self) -> Option<Metric> {
        match self {
            Operation::Area => Some(Metric::Area),
            Operation::Volume => Some(Metric::Volume),
            Operation::Luminosity => Some(Metric::Luminosity),
            _ => None,
        }
    }

    /// Whether the operation writes to a named location
    pub fn requires_output(&self) -> bool {
        matches!(self, Operation::Save)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "load"),
            Operation::Save => write!(f, "save"),
            Operation::Area => write!(f, "area"),
            Operation::Volume => write!(f, "volume"),
            Operation::Luminosity => write!(f, "luminosity"),
            Operation::Measure => write!(f, "measure"),
            Operation::Describe => write!(f, "describe"),
        }
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "load" | "read" => Ok(Operation::Load),
            "save" | "write" => Ok(Operation::Save),
            "area" => Ok(Operation::Area),
            "volume" => Ok(Operation::Volume),
            "luminosity" => Ok(Operation::Luminosity),
            "measure" => Ok(Operation::Measure),
            "describe" => Ok(Operation::Describe),
            _ => Err(format!("Unknown operation: {}", s)),
        }
    }
}

/// Output style of the JSON reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Single line, no insignificant whitespace
    #[default]
    Compact,
    /// Indented, one field per line
    Pretty,
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStyle::Compact => write!(f, "compact"),
            OutputStyle::Pretty => write!(f, "pretty"),
        }
    }
}

impl FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(OutputStyle::Compact),
            "pretty" => Ok(OutputStyle::Pretty),
            _ => Err(format!("Unknown output style: {}", s)),
        }
    }
}
