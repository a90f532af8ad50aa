use std::fmt;

use pursuit_core::Point;

use crate::ghost::GhostId;

/// Rejected coordinator requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// The position lies outside the grid.
    OutOfBounds(Point),
    /// The position is a wall.
    Wall(Point),
    /// A ghost or the target already occupies the position.
    Occupied(Point),
    /// No free open cell is left to place a ghost on.
    NoFreeCell,
    /// No ghost with this id is on the roster.
    UnknownGhost(GhostId),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::Wall(p) => write!(f, "position {p} is a wall"),
            Self::Occupied(p) => write!(f, "position {p} is already occupied"),
            Self::NoFreeCell => f.write_str("no free open cell left"),
            Self::UnknownGhost(id) => write!(f, "no ghost {id} on the roster"),
        }
    }
}

impl std::error::Error for SimError {}
