//! Obstacle-cluster maze generator.
//!
//! Generation runs in three passes:
//! 1. **Border**: the outer ring becomes wall.
//! 2. **Tiling**: the interior (2-cell margin) is scanned row-major from
//!    (2, 2); every untagged cell anchors a cluster drawn from [`SHAPES`].
//!    Footprints at least 3×3 become *cages* (walled perimeter with 1–4
//!    holes, an open walkway inside, a solid core); smaller ones become
//!    solid *loops*. Every cluster is wrapped in a one-cell open clearance
//!    ring so neighbouring clusters never fuse.
//! 3. **Fill**: whatever is still untagged becomes open floor.
//!
//! Tagging never overwrites: once a cell is tagged its state is final.
//! Reachability between arbitrary cells is not verified.

use pursuit_core::{Cell, Grid, Point, Range};
use rand::Rng;

/// Cluster footprints as (width, height). Every entry has at least one
/// side of 2 or more.
pub const SHAPES: [(i32, i32); 20] = [
    (1, 2),
    (2, 1),
    (2, 2),
    (1, 3),
    (3, 1),
    (2, 3),
    (3, 2),
    (3, 3),
    (1, 4),
    (4, 1),
    (3, 4),
    (4, 3),
    (4, 4),
    (2, 5),
    (5, 2),
    (3, 5),
    (5, 3),
    (4, 5),
    (5, 4),
    (5, 5),
];

/// Bounds margin applied to a tagging operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagMode {
    /// May reach the outermost ring.
    Outer,
    /// Must stay at least two cells from the edge.
    Normal,
}

impl TagMode {
    const fn margin(self) -> i32 {
        match self {
            TagMode::Outer => 0,
            TagMode::Normal => 2,
        }
    }
}

/// Generate a `width × height` maze with the given random source.
///
/// Deterministic for a seeded `rng`.
pub fn generate<R: Rng>(width: i32, height: i32, rng: R) -> Grid {
    let mut mg = MazeGen::new(width, height, rng);
    mg.build();
    mg.into_grid()
}

/// Maze generator state: the grid being built plus its tagged mask.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    grid: Grid,
    tagged: Vec<bool>,
    tags: usize,
    clusters: usize,
    cages: usize,
}

impl<R: Rng> MazeGen<R> {
    /// Create a generator for an all-open, untagged `width × height` grid.
    pub fn new(width: i32, height: i32, rng: R) -> Self {
        let grid = Grid::new(width, height);
        let len = grid.bounds().len();
        Self {
            rng,
            grid,
            tagged: vec![false; len],
            tags: 0,
            clusters: 0,
            cages: 0,
        }
    }

    /// Run all three passes.
    pub fn build(&mut self) {
        self.border_pass();
        self.tiling_pass();
        self.fill_pass();
        log::debug!(
            "maze {}x{}: {} clusters ({} cages), {} walls",
            self.grid.width(),
            self.grid.height(),
            self.clusters,
            self.cages,
            self.grid.count(Cell::Wall)
        );
    }

    /// The grid built so far.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consume the generator, returning the grid.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Whether `p` has been assigned its final state.
    pub fn is_tagged(&self, p: Point) -> bool {
        self.index(p).is_some_and(|i| self.tagged[i])
    }

    /// Whether every cell has been tagged.
    pub fn fully_tagged(&self) -> bool {
        self.tagged.iter().all(|&t| t)
    }

    /// Number of successful tagging operations so far.
    pub fn tag_count(&self) -> usize {
        self.tags
    }

    /// Number of clusters placed by the tiling pass.
    pub fn cluster_count(&self) -> usize {
        self.clusters
    }

    /// Wall in the outer ring.
    pub fn border_pass(&mut self) {
        let bounds = self.grid.bounds();
        for p in bounds.iter().filter(|&p| bounds.on_border(p)) {
            self.tag(p, Cell::Wall, TagMode::Outer);
        }
    }

    /// Anchor a cluster at every untagged interior cell, row-major.
    pub fn tiling_pass(&mut self) {
        let interior = self.grid.bounds().inset(2);
        for p in interior.iter() {
            if self.is_tagged(p) {
                continue;
            }
            let (w, h) = SHAPES[self.rng.random_range(0..SHAPES.len())];
            let footprint = Range::new(p.x, p.y, p.x + w, p.y + h);
            if w >= 3 && h >= 3 {
                self.cage(footprint);
            } else {
                self.loop_cluster(footprint);
            }
            self.clusters += 1;
        }
    }

    /// Open every cell the earlier passes left untagged.
    pub fn fill_pass(&mut self) {
        for p in self.grid.bounds().iter() {
            self.tag(p, Cell::Open, TagMode::Outer);
        }
    }

    /// Walled perimeter with holes, open walkway, solid core.
    fn cage(&mut self, rect: Range) {
        // Holes first: perimeter tagging then leaves them alone.
        let holes = self.rng.random_range(1..=4);
        for _ in 0..holes {
            let hole = self.random_hole(rect);
            self.tag(hole, Cell::Open, TagMode::Outer);
        }
        for p in rect.iter().filter(|&p| rect.on_border(p)) {
            self.tag(p, Cell::Wall, TagMode::Outer);
        }

        let walkway = rect.inset(1);
        let core = rect.inset(2);
        for p in walkway.iter() {
            let cell = if core.contains(p) { Cell::Wall } else { Cell::Open };
            self.tag(p, cell, TagMode::Normal);
        }
        self.clearance(rect);
        self.cages += 1;
    }

    /// Solid block.
    fn loop_cluster(&mut self, rect: Range) {
        for p in rect.iter() {
            self.tag(p, Cell::Wall, TagMode::Normal);
        }
        self.clearance(rect);
    }

    /// Open the one-cell ring just outside `rect`.
    fn clearance(&mut self, rect: Range) {
        let ring = Range::new(rect.min.x - 1, rect.min.y - 1, rect.max.x + 1, rect.max.y + 1);
        for p in ring.iter().filter(|&p| ring.on_border(p)) {
            self.tag(p, Cell::Open, TagMode::Normal);
        }
    }

    /// A random non-corner position on the perimeter of `rect`
    /// (both sides at least 3).
    fn random_hole(&mut self, rect: Range) -> Point {
        let (min, max) = (rect.min, rect.max);
        match self.rng.random_range(0..4) {
            0 => Point::new(min.x, self.rng.random_range(min.y + 1..max.y - 1)),
            1 => Point::new(max.x - 1, self.rng.random_range(min.y + 1..max.y - 1)),
            2 => Point::new(self.rng.random_range(min.x + 1..max.x - 1), min.y),
            _ => Point::new(self.rng.random_range(min.x + 1..max.x - 1), max.y - 1),
        }
    }

    /// Assign `cell` to `p` unless it is already tagged or outside the
    /// mode's margin. Returns whether the cell was tagged.
    fn tag(&mut self, p: Point, cell: Cell, mode: TagMode) -> bool {
        if !self.grid.bounds().inset(mode.margin()).contains(p) {
            return false;
        }
        let Some(i) = self.index(p) else {
            return false;
        };
        if self.tagged[i] {
            return false;
        }
        self.tagged[i] = true;
        self.tags += 1;
        self.grid.set(p, cell);
        true
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.grid.contains(p) {
            return None;
        }
        Some((p.y * self.grid.width() + p.x) as usize)
    }
}
