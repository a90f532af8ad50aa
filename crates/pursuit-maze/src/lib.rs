//! Procedural maze generation for pursuit grids.
//!
//! [`MazeGen`] walls in the outer ring, then tiles the interior with small
//! obstacle clusters separated by one-cell corridors. Each cell is assigned
//! its final state exactly once, tracked by a tagged mask.

pub mod mazegen;

pub use mazegen::{MazeGen, SHAPES, generate};
