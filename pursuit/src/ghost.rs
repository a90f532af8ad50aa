//! Ghosts: agents that chase the target along searched paths.

use std::collections::VecDeque;
use std::fmt;

use pursuit_core::{Grid, Point};
use pursuit_paths::{PathRange, SearchResult, Strategy};

use crate::stats::{SearchStats, StatsSnapshot};

/// Stable roster identifier of a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GhostId(pub usize);

impl fmt::Display for GhostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a ghost did on one call to [`Ghost::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The ghost is stopped and ignored the request.
    Idle,
    /// Throttled tick; nothing happened.
    Waiting,
    /// There is no path to follow; a later step retries.
    NoPath,
    /// The next cell is held by another ghost; the path was replanned
    /// around the peers and the ghost stayed put.
    Blocked,
    /// The next cell turned out to be a wall; the path was dropped.
    Stale,
    /// The ghost stepped onto this cell.
    Moved(Point),
}

/// A pursuing agent bound to one search strategy.
#[derive(Debug, Clone)]
pub struct Ghost {
    id: GhostId,
    strategy: Strategy,
    pos: Point,
    path: VecDeque<Point>,
    stats: SearchStats,
    move_interval: u32,
    move_delay: u32,
    replan_cooldown: u32,
    cooldown: u32,
    moves: usize,
    active: bool,
    reached: bool,
    known_target: Option<Point>,
}

impl Ghost {
    /// A stopped ghost at `pos` that acts on every third tick.
    pub fn new(id: GhostId, strategy: Strategy, pos: Point) -> Self {
        Self {
            id,
            strategy,
            pos,
            path: VecDeque::new(),
            stats: SearchStats::default(),
            move_interval: 3,
            move_delay: 0,
            replan_cooldown: 0,
            cooldown: 0,
            moves: 0,
            active: false,
            reached: false,
            known_target: None,
        }
    }

    /// Set the ticks per step and the no-path re-search cooldown.
    #[must_use]
    pub fn with_pacing(mut self, move_interval: u32, replan_cooldown: u32) -> Self {
        self.move_interval = move_interval;
        self.replan_cooldown = replan_cooldown;
        self
    }

    pub fn id(&self) -> GhostId {
        self.id
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Remaining steps, next step first.
    pub fn path(&self) -> &VecDeque<Point> {
        &self.path
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Steps taken since the last search.
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the ghost has ever stood on the target.
    pub fn has_reached(&self) -> bool {
        self.reached
    }

    /// Target position used by the latest fresh search.
    pub fn known_target(&self) -> Option<Point> {
        self.known_target
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Clear the reached flag. Nothing else ever resets it.
    pub fn reset_reached(&mut self) {
        self.reached = false;
    }

    /// Point-in-time statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            id: self.id,
            strategy: self.strategy,
            position: self.pos,
            reached: self.reached,
            moves: self.moves,
            stats: self.stats,
        }
    }

    /// Set the reached flag if it is not set yet. Returns whether it flipped.
    pub(crate) fn mark_reached(&mut self) -> bool {
        if self.reached {
            return false;
        }
        self.reached = true;
        log::info!(
            "ghost {} ({}) reached the target at {} after {} searches",
            self.id,
            self.strategy,
            self.pos,
            self.stats.searches
        );
        true
    }

    /// Search from the current position to `target` on `grid` and adopt the
    /// result as the new path.
    pub fn find_path(&mut self, pr: &mut PathRange, grid: &Grid, target: Point) {
        self.known_target = Some(target);
        let result = pr.search(self.strategy, grid, self.pos, target);
        self.adopt(result, target);
        if self.pos == target {
            self.mark_reached();
        }
    }

    /// Search again with every peer position walled off. The shared grid
    /// and the known target are left untouched.
    fn replan_around(&mut self, pr: &mut PathRange, grid: &Grid, target: Point, peers: &[Point]) {
        let blocked = grid.with_additional_walls(peers.iter().copied());
        let result = pr.search(self.strategy, &blocked, self.pos, target);
        self.adopt(result, target);
    }

    fn adopt(&mut self, result: SearchResult, target: Point) {
        // Totals stop at the search that got the ghost to the target.
        if !self.reached {
            self.stats = self.stats.record(&result);
        }
        self.moves = 0;
        self.cooldown = if result.is_empty() && self.pos != target {
            self.replan_cooldown
        } else {
            0
        };
        self.path = result.path.into();
    }

    /// Advance one tick toward `target`, avoiding cells in `peers`.
    ///
    /// Only every `move_interval`-th call does any work. On those calls the
    /// ghost searches if it has no path or the target moved, then either
    /// takes the next step or replans when a peer holds that cell.
    pub fn advance(
        &mut self,
        pr: &mut PathRange,
        grid: &Grid,
        target: Point,
        peers: &[Point],
    ) -> Step {
        if !self.active {
            return Step::Idle;
        }
        self.move_delay += 1;
        if self.move_delay < self.move_interval {
            return Step::Waiting;
        }
        self.move_delay = 0;

        let target_moved = self.known_target != Some(target);
        if self.path.is_empty() || target_moved {
            if !target_moved && self.cooldown > 0 {
                self.cooldown -= 1;
                return Step::NoPath;
            }
            self.find_path(pr, grid, target);
        }

        let Some(&next) = self.path.front() else {
            return Step::NoPath;
        };
        if peers.contains(&next) {
            log::trace!("ghost {} blocked at {} by a peer on {}", self.id, self.pos, next);
            self.replan_around(pr, grid, target, peers);
            return Step::Blocked;
        }
        if grid.is_wall(next) {
            self.path.clear();
            return Step::Stale;
        }

        self.path.pop_front();
        self.pos = next;
        self.moves += 1;
        if self.pos == target {
            self.mark_reached();
        }
        Step::Moved(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_core::Cell;

    fn setup(grid: &Grid, strategy: Strategy, pos: Point) -> (Ghost, PathRange) {
        let mut ghost = Ghost::new(GhostId(0), strategy, pos).with_pacing(1, 0);
        ghost.start();
        (ghost, PathRange::new(grid.bounds()))
    }

    #[test]
    fn stopped_ghost_ignores_ticks() {
        let grid = Grid::new(5, 5);
        let mut pr = PathRange::new(grid.bounds());
        let mut ghost = Ghost::new(GhostId(0), Strategy::Bfs, Point::new(0, 0));
        assert_eq!(ghost.advance(&mut pr, &grid, Point::new(4, 4), &[]), Step::Idle);
        assert_eq!(ghost.stats().searches, 0);
    }

    #[test]
    fn moves_once_every_three_ticks_by_default() {
        let grid = Grid::new(6, 1);
        let mut pr = PathRange::new(grid.bounds());
        let mut ghost = Ghost::new(GhostId(0), Strategy::Bfs, Point::new(0, 0));
        ghost.start();
        let target = Point::new(5, 0);
        let steps: Vec<Step> = (0..6)
            .map(|_| ghost.advance(&mut pr, &grid, target, &[]))
            .collect();
        assert_eq!(
            steps,
            vec![
                Step::Waiting,
                Step::Waiting,
                Step::Moved(Point::new(1, 0)),
                Step::Waiting,
                Step::Waiting,
                Step::Moved(Point::new(2, 0)),
            ]
        );
        assert_eq!(ghost.stats().searches, 1);
    }

    #[test]
    fn follows_path_and_sets_reached_once() {
        let grid = Grid::new(4, 4);
        let (mut ghost, mut pr) = setup(&grid, Strategy::Astar, Point::new(0, 0));
        let target = Point::new(3, 3);
        for _ in 0..6 {
            assert!(matches!(
                ghost.advance(&mut pr, &grid, target, &[]),
                Step::Moved(_)
            ));
        }
        assert_eq!(ghost.pos(), target);
        assert!(ghost.has_reached());
        assert_eq!(ghost.stats().searches, 1);
        assert_eq!(ghost.moves(), 6);
    }

    #[test]
    fn reached_flag_and_stats_freeze_after_reaching() {
        let grid = Grid::new(5, 1);
        let (mut ghost, mut pr) = setup(&grid, Strategy::Ucs, Point::new(0, 0));
        ghost.advance(&mut pr, &grid, Point::new(1, 0), &[]);
        assert!(ghost.has_reached());
        let frozen = ghost.stats();

        // The target keeps moving; the ghost keeps chasing.
        for _ in 0..5 {
            ghost.advance(&mut pr, &grid, Point::new(4, 0), &[]);
            assert!(ghost.has_reached());
        }
        assert_eq!(ghost.pos(), Point::new(4, 0));
        assert_eq!(ghost.stats(), frozen);

        ghost.reset_reached();
        assert!(!ghost.has_reached());
    }

    #[test]
    fn target_change_triggers_fresh_search() {
        let grid = Grid::new(5, 5);
        let (mut ghost, mut pr) = setup(&grid, Strategy::Bfs, Point::new(0, 0));
        ghost.advance(&mut pr, &grid, Point::new(4, 0), &[]);
        assert_eq!(ghost.known_target(), Some(Point::new(4, 0)));
        ghost.advance(&mut pr, &grid, Point::new(4, 0), &[]);
        assert_eq!(ghost.stats().searches, 1);

        ghost.advance(&mut pr, &grid, Point::new(2, 4), &[]);
        assert_eq!(ghost.stats().searches, 2);
        assert_eq!(ghost.known_target(), Some(Point::new(2, 4)));
        assert_eq!(ghost.path().back(), Some(&Point::new(2, 4)));
    }

    #[test]
    fn peer_on_next_cell_forces_replan_without_moving() {
        let grid = Grid::new(3, 3);
        let (mut ghost, mut pr) = setup(&grid, Strategy::Bfs, Point::new(0, 0));
        let target = Point::new(2, 0);
        let peer = Point::new(1, 0);
        assert_eq!(ghost.advance(&mut pr, &grid, target, &[peer]), Step::Blocked);
        assert_eq!(ghost.pos(), Point::new(0, 0));
        assert_eq!(ghost.stats().searches, 2);
        assert!(!ghost.path().contains(&peer));
        assert_eq!(ghost.path().front(), Some(&Point::new(0, 1)));
        // The detour is followed next tick.
        assert_eq!(
            ghost.advance(&mut pr, &grid, target, &[peer]),
            Step::Moved(Point::new(0, 1))
        );
        assert_eq!(ghost.known_target(), Some(target));
        assert!(grid.is_open(peer));
    }

    #[test]
    fn wall_on_next_cell_drops_the_path() {
        let open = Grid::new(4, 1);
        let (mut ghost, mut pr) = setup(&open, Strategy::Dfs, Point::new(0, 0));
        let target = Point::new(3, 0);
        ghost.find_path(&mut pr, &open, target);

        let mut walled = open.clone();
        walled.set(Point::new(1, 0), Cell::Wall);
        assert_eq!(ghost.advance(&mut pr, &walled, target, &[]), Step::Stale);
        assert!(ghost.path().is_empty());
        assert_eq!(ghost.advance(&mut pr, &walled, target, &[]), Step::NoPath);
        assert_eq!(ghost.stats().searches, 2);
    }

    #[test]
    fn unreachable_target_is_retried_every_step() {
        let grid = Grid::parse(".#.");
        let (mut ghost, mut pr) = setup(&grid, Strategy::Astar, Point::new(0, 0));
        for _ in 0..4 {
            assert_eq!(
                ghost.advance(&mut pr, &grid, Point::new(2, 0), &[]),
                Step::NoPath
            );
        }
        assert_eq!(ghost.stats().searches, 4);
    }

    #[test]
    fn cooldown_rate_limits_retries() {
        let grid = Grid::parse(".#.");
        let mut pr = PathRange::new(grid.bounds());
        let mut ghost = Ghost::new(GhostId(1), Strategy::Bfs, Point::new(0, 0)).with_pacing(1, 2);
        ghost.start();
        for _ in 0..6 {
            ghost.advance(&mut pr, &grid, Point::new(2, 0), &[]);
        }
        // search, skip, skip, search, skip, skip
        assert_eq!(ghost.stats().searches, 2);
    }
}
