use super::BlockId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the workspace surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The `(dx, dy)` needed to travel from `self` to `target`.
    pub fn offset_to(&self, target: &Coordinate) -> (f64, f64) {
        (target.x - self.x, target.y - self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where a block sits: plugged into a parent, or free on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum BlockLocation {
    /// `input_name` is `None` when the block hangs off the parent's next connection.
    Connected {
        parent_id: BlockId,
        input_name: Option<String>,
    },
    Detached { coordinate: Coordinate },
}

impl BlockLocation {
    pub fn parent_id(&self) -> Option<&BlockId> {
        match self {
            BlockLocation::Connected { parent_id, .. } => Some(parent_id),
            BlockLocation::Detached { .. } => None,
        }
    }

    pub fn input_name(&self) -> Option<&str> {
        match self {
            BlockLocation::Connected { input_name, .. } => input_name.as_deref(),
            BlockLocation::Detached { .. } => None,
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            BlockLocation::Connected { .. } => None,
            BlockLocation::Detached { coordinate } => Some(*coordinate),
        }
    }
}

impl fmt::Display for BlockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockLocation::Connected {
                parent_id,
                input_name: Some(input),
            } => write!(f, "{}.{}", parent_id, input),
            BlockLocation::Connected {
                parent_id,
                input_name: None,
            } => write!(f, "{}.next", parent_id),
            BlockLocation::Detached { coordinate } => write!(f, "{}", coordinate),
        }
    }
}
