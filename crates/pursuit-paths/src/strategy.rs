use std::fmt;
use std::str::FromStr;

/// Frontier discipline used by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Breadth-first: FIFO queue.
    Bfs,
    /// Depth-first: LIFO stack.
    Dfs,
    /// Uniform-cost: priority queue on accumulated cost.
    Ucs,
    /// A*: priority queue on cost plus Manhattan estimate.
    Astar,
}

impl Strategy {
    /// Every strategy, in menu order.
    pub const ALL: [Strategy; 4] = [Strategy::Bfs, Strategy::Dfs, Strategy::Ucs, Strategy::Astar];

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Ucs => "UCS",
            Strategy::Astar => "A*",
        }
    }

    /// RGB color an agent using this strategy is drawn with.
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            Strategy::Bfs => (0, 0, 255),
            Strategy::Dfs => (255, 182, 193),
            Strategy::Ucs => (255, 165, 0),
            Strategy::Astar => (255, 0, 0),
        }
    }

    /// Whether the strategy always returns a shortest path on unit grids.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Strategy::Dfs)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    /// Parse a strategy tag, case-insensitively. Accepts `BFS`, `DFS`,
    /// `UCS`, `A*` and `Astar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BFS" => Ok(Strategy::Bfs),
            "DFS" => Ok(Strategy::Dfs),
            "UCS" => Ok(Strategy::Ucs),
            "A*" | "ASTAR" => Ok(Strategy::Astar),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Error returned when a strategy tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown search strategy \u{201c}{}\u{201d} (expected BFS, DFS, UCS or A*)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}
