use std::mem::size_of;
use std::time::{Duration, Instant};

use pursuit_core::{Point, Range};

use crate::strategy::Strategy;
use crate::traits::AstarPather;

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// Outcome of a single search invocation.
///
/// All four fields are always produced together. An empty `path` means no
/// path was found (or start already equals goal); it is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Steps from the cell after the start up to and including the goal.
    pub path: Vec<Point>,
    /// Number of positions popped from the frontier and expanded.
    pub expanded: usize,
    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
    /// High-water mark, in bytes, of the frontier and visited bookkeeping.
    pub peak_memory: usize,
}

impl SearchResult {
    /// Whether the search produced no steps.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of steps in the path, which is also its cost on a unit grid.
    pub fn len(&self) -> usize {
        self.path.len()
    }
}

// ---------------------------------------------------------------------------
// Internal bookkeeping shared by the four strategies
// ---------------------------------------------------------------------------

/// Per-cell visited record: parent link and accumulated cost.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Priority-queue entry, ordered by `f` then by insertion sequence.
///
/// Equal priorities pop in insertion order, so ties follow the neighbor
/// expansion order.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Bytes charged for one visited-map entry: position, parent and cost.
pub(crate) const VISITED_ENTRY: usize = size_of::<(Point, Point, i32)>();

/// Tracks the bytes held by a search's frontier and visited map.
#[derive(Debug, Default)]
pub(crate) struct MemoryMeter {
    current: usize,
    peak: usize,
}

impl MemoryMeter {
    #[inline]
    pub(crate) fn alloc(&mut self, bytes: usize) {
        self.current += bytes;
        self.peak = self.peak.max(self.current);
    }

    #[inline]
    pub(crate) fn free(&mut self, bytes: usize) {
        self.current = self.current.saturating_sub(bytes);
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak
    }
}

/// What a frontier run reports before path reconstruction.
pub(crate) struct Trace {
    pub(crate) found: bool,
    pub(crate) expanded: usize,
    pub(crate) peak_memory: usize,
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Reusable search engine for a grid rectangle.
///
/// `PathRange` owns the visited-node array and the neighbor scratch buffer,
/// so repeated searches reuse their allocations. Nodes are invalidated
/// lazily by bumping a generation counter.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range.
    ///
    /// If the new size fits within the existing node array it is kept and
    /// only the generation is bumped; otherwise the array is reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        if new_len <= self.nodes.len() {
            self.next_generation();
            return;
        }
        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Run the search selected by `strategy` from `from` to `to`.
    pub fn search<P: AstarPather>(
        &mut self,
        strategy: Strategy,
        pather: &P,
        from: Point,
        to: Point,
    ) -> SearchResult {
        match strategy {
            Strategy::Bfs => self.bfs_path(pather, from, to),
            Strategy::Dfs => self.dfs_path(pather, from, to),
            Strategy::Ucs => self.ucs_path(pather, from, to),
            Strategy::Astar => self.astar_path(pather, from, to),
        }
    }

    // -----------------------------------------------------------------------
    // Shared driver
    // -----------------------------------------------------------------------

    /// Time a frontier run and turn its trace into a [`SearchResult`].
    ///
    /// Endpoints outside the range yield an empty result without searching.
    /// The closure receives the start index, goal index and the fresh
    /// generation.
    pub(crate) fn run(
        &mut self,
        strategy: Strategy,
        from: Point,
        to: Point,
        frontier: impl FnOnce(&mut Self, usize, usize, u32) -> Trace,
    ) -> SearchResult {
        let started = Instant::now();
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            log::debug!("{strategy}: endpoint outside {} ({from} -> {to})", self.rng);
            return SearchResult {
                elapsed: started.elapsed(),
                ..SearchResult::default()
            };
        };

        let cur_gen = self.next_generation();
        let trace = frontier(self, start_idx, goal_idx, cur_gen);
        let path = if trace.found {
            self.reconstruct(start_idx, goal_idx)
        } else {
            Vec::new()
        };

        let result = SearchResult {
            path,
            expanded: trace.expanded,
            elapsed: started.elapsed(),
            peak_memory: trace.peak_memory,
        };
        log::debug!(
            "{strategy}: {from} -> {to}: {} steps, {} expanded, {} bytes",
            result.len(),
            result.expanded,
            result.peak_memory
        );
        result
    }

    /// Bump the generation, clearing the node array on wrap-around.
    fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.generation
    }

    /// Walk the parent chain from the goal back to the start. The start
    /// cell itself is not part of the returned path.
    fn reconstruct(&self, start_idx: usize, goal_idx: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != start_idx && ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// Whether the node was reached during the current generation.
    #[inline]
    pub(crate) fn visited(&self, idx: usize, cur_gen: u32) -> bool {
        self.nodes[idx].generation == cur_gen
    }

    /// Record a visit with its parent and accumulated cost.
    #[inline]
    pub(crate) fn visit(&mut self, idx: usize, parent: usize, g: i32, cur_gen: u32) {
        let n = &mut self.nodes[idx];
        n.g = g;
        n.parent = parent;
        n.generation = cur_gen;
        n.open = true;
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn search_result_round_trip() {
        let r = SearchResult {
            path: vec![Point::new(1, 0), Point::new(2, 0)],
            expanded: 3,
            elapsed: Duration::from_micros(12),
            peak_memory: 96,
        };
        let json = serde_json::to_string(&r).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
