//! **pursuit-core**: geometry primitives and the cell grid shared by the
//! pursuit crates.
//!
//! [`Point`] is the vertex identity used by every search, [`Range`] a
//! half-open rectangle, and [`Grid`] the OPEN/WALL map that agents walk on.

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{Cell, Grid};
