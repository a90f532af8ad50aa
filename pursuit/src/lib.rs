//! Ghosts chasing a target across a procedurally generated maze,
//! each ghost planning with its own search strategy.
//!
//! The [`Coordinator`] owns the grid, the target and the ghost roster and
//! advances everything one fixed-rate tick at a time. Rendering, input and
//! frame pacing live outside this crate; they talk to the coordinator
//! through its setters and read-only accessors.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod ghost;
pub mod stats;

pub use config::SimConfig;
pub use coordinator::{Coordinator, Direction, Event};
pub use error::SimError;
pub use ghost::{Ghost, GhostId, Step};
pub use stats::{SearchStats, StatsSnapshot};

pub use pursuit_core::{Cell, Grid, Point};
pub use pursuit_paths::{SearchResult, Strategy};
