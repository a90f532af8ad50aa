//! Per-ghost search statistics.

use std::fmt;
use std::time::Duration;

use pursuit_core::Point;
use pursuit_paths::{SearchResult, Strategy};

use crate::ghost::GhostId;

/// Running totals over every search a ghost has issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Number of search invocations.
    pub searches: usize,
    /// Total expanded nodes.
    pub expanded: usize,
    /// Total wall-clock search time.
    pub time: Duration,
    /// Sum of each search's peak memory, in bytes.
    pub memory: usize,
}

impl SearchStats {
    /// Totals with one more search folded in.
    #[must_use]
    pub fn record(self, result: &SearchResult) -> Self {
        Self {
            searches: self.searches + 1,
            expanded: self.expanded + result.expanded,
            time: self.time + result.elapsed,
            memory: self.memory + result.peak_memory,
        }
    }

    /// Mean peak memory per search in bytes, 0 before the first search.
    pub fn average_memory(&self) -> f64 {
        if self.searches == 0 {
            return 0.0;
        }
        self.memory as f64 / self.searches as f64
    }
}

/// Point-in-time view of one ghost, handed to stats displays.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub id: GhostId,
    pub strategy: Strategy,
    pub position: Point,
    pub reached: bool,
    pub moves: usize,
    pub stats: SearchStats,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.strategy)?;
        if self.reached {
            writeln!(f, "Reached Target at: {}", self.position)?;
        } else {
            writeln!(f, "Position: {}", self.position)?;
        }
        writeln!(f, "Total Search Time: {:.4} seconds", self.stats.time.as_secs_f64())?;
        writeln!(f, "Total Expanded Nodes: {}", self.stats.expanded)?;
        writeln!(f, "Average Memory Usage: {:.2} KB", self.stats.average_memory() / 1024.0)?;
        write!(f, "Number of Searches: {}", self.stats.searches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(expanded: usize, micros: u64, peak_memory: usize) -> SearchResult {
        SearchResult {
            path: Vec::new(),
            expanded,
            elapsed: Duration::from_micros(micros),
            peak_memory,
        }
    }

    #[test]
    fn record_accumulates_by_value() {
        let empty = SearchStats::default();
        let one = empty.record(&result(10, 5, 1024));
        let two = one.record(&result(4, 7, 3072));
        assert_eq!(empty.searches, 0);
        assert_eq!(two.searches, 2);
        assert_eq!(two.expanded, 14);
        assert_eq!(two.time, Duration::from_micros(12));
        assert_eq!(two.average_memory(), 2048.0);
        assert_eq!(empty.average_memory(), 0.0);
    }

    #[test]
    fn snapshot_display_lists_totals() {
        let snap = StatsSnapshot {
            id: GhostId(3),
            strategy: Strategy::Astar,
            position: Point::new(4, 5),
            reached: true,
            moves: 9,
            stats: SearchStats::default().record(&result(12, 1500, 2048)),
        };
        let text = snap.to_string();
        assert!(text.contains("Algorithm: A*"));
        assert!(text.contains("Reached Target at: (4, 5)"));
        assert!(text.contains("Total Search Time: 0.0015 seconds"));
        assert!(text.contains("Total Expanded Nodes: 12"));
        assert!(text.contains("Average Memory Usage: 2.00 KB"));
        assert!(text.ends_with("Number of Searches: 1"));
    }
}
