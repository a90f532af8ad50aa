//! Graph search on pursuit grids.
//!
//! Four strategies share one instrumented engine:
//!
//! - **BFS** FIFO frontier ([`PathRange::bfs_path`])
//! - **DFS** LIFO frontier ([`PathRange::dfs_path`])
//! - **Uniform-cost** priority frontier keyed by `g` ([`PathRange::ucs_path`])
//! - **A\*** priority frontier keyed by `g + h` ([`PathRange::astar_path`])
//!
//! Every call returns a [`SearchResult`] carrying the path (excluding the
//! start cell), the number of expanded nodes, the elapsed time and the peak
//! bookkeeping memory. [`PathRange::search`] dispatches on a [`Strategy`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, DFS |
//! | [`WeightedPather`] : [`Pather`] | uniform-cost |
//! | [`AstarPather`] : [`WeightedPather`] | A*, [`PathRange::search`] |
//!
//! [`pursuit_core::Grid`] implements all three with unit step costs and a
//! Manhattan heuristic.

mod astar;
mod best_first;
mod bfs;
mod dfs;
mod distance;
mod grid;
mod pathrange;
mod strategy;
mod traits;
mod ucs;

pub use distance::manhattan;
pub use pathrange::{PathRange, SearchResult};
pub use strategy::{ParseStrategyError, Strategy};
pub use traits::{AstarPather, Pather, WeightedPather};
