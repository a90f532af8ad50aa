//! The simulation owner: grid, target, ghost roster and the tick loop.

use pursuit_core::{Grid, Point};
use pursuit_paths::{PathRange, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::ghost::{Ghost, GhostId, Step};
use crate::stats::StatsSnapshot;

/// One-cell target movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset of the direction; y grows downward.
    pub const fn delta(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }
}

/// Something that happened during a [`Coordinator::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A ghost stood on the target for the first time.
    Reached(StatsSnapshot),
    /// A ghost on the target was taken off the roster.
    Retired(StatsSnapshot),
    /// The roster emptied and the simulation stopped itself.
    Stopped,
}

/// Owns the maze, the target and the ghosts, and advances them one tick
/// at a time.
///
/// Ghosts are processed in roster order. A ghost's collision context is
/// the live position of every other listed ghost, so ghosts earlier in
/// the roster have already moved when later ones look at them.
pub struct Coordinator {
    config: SimConfig,
    grid: Grid,
    pr: PathRange,
    target: Option<Point>,
    ghosts: Vec<Ghost>,
    running: bool,
    next_id: usize,
    ticks: u64,
}

impl Coordinator {
    /// Generate a maze from `config` and start with no target, no ghosts,
    /// stopped.
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let grid = pursuit_maze::generate(config.width, config.height, rng);
        Self::with_grid(config, grid)
    }

    /// Use an existing grid instead of generating one. The grid size
    /// overrides `config.width` and `config.height`.
    pub fn with_grid(mut config: SimConfig, grid: Grid) -> Self {
        config.width = grid.width();
        config.height = grid.height();
        Self {
            config,
            pr: PathRange::new(grid.bounds()),
            grid,
            target: None,
            ghosts: Vec::new(),
            running: false,
            next_id: 0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The maze. Read-only once generated.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// The roster, in processing order.
    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghost(&self, id: GhostId) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.id() == id)
    }

    pub fn ghost_mut(&mut self, id: GhostId) -> Option<&mut Ghost> {
        self.ghosts.iter_mut().find(|g| g.id() == id)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks processed while running.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Statistics of every listed ghost, in roster order.
    pub fn snapshots(&self) -> Vec<StatsSnapshot> {
        self.ghosts.iter().map(Ghost::snapshot).collect()
    }

    fn check_open(&self, p: Point) -> Result<(), SimError> {
        if !self.grid.contains(p) {
            return Err(SimError::OutOfBounds(p));
        }
        if self.grid.is_wall(p) {
            return Err(SimError::Wall(p));
        }
        Ok(())
    }

    fn ghost_at(&self, p: Point) -> bool {
        self.ghosts.iter().any(|g| g.pos() == p)
    }

    /// Place the target on an open cell not held by a ghost.
    pub fn set_target(&mut self, p: Point) -> Result<(), SimError> {
        let checked = self.check_open(p).and_then(|()| {
            if self.ghost_at(p) {
                Err(SimError::Occupied(p))
            } else {
                Ok(())
            }
        });
        if let Err(err) = checked {
            log::warn!("target not placed: {err}");
            return Err(err);
        }
        self.target = Some(p);
        Ok(())
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Shift the target one cell. Walls, the grid edge and an unset
    /// target leave it in place. Returns whether it moved.
    pub fn move_target(&mut self, dir: Direction) -> bool {
        let Some(cur) = self.target else {
            return false;
        };
        let next = cur + dir.delta();
        if !self.grid.is_open(next) {
            return false;
        }
        self.target = Some(next);
        true
    }

    /// Add a ghost on a free open cell. It starts moving right away when
    /// the simulation is running.
    pub fn add_ghost(&mut self, strategy: Strategy, pos: Point) -> Result<GhostId, SimError> {
        let checked = self.check_open(pos).and_then(|()| {
            if self.ghost_at(pos) || self.target == Some(pos) {
                Err(SimError::Occupied(pos))
            } else {
                Ok(())
            }
        });
        if let Err(err) = checked {
            log::warn!("{strategy} ghost not added: {err}");
            return Err(err);
        }

        let id = GhostId(self.next_id);
        self.next_id += 1;
        let mut ghost = Ghost::new(id, strategy, pos)
            .with_pacing(self.config.move_interval, self.config.replan_cooldown);
        if self.running {
            ghost.start();
        }
        self.ghosts.push(ghost);
        Ok(id)
    }

    /// Add a ghost on a random free open cell.
    pub fn add_ghost_random<R: Rng + ?Sized>(
        &mut self,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<GhostId, SimError> {
        let mut taken: Vec<Point> = self.ghosts.iter().map(Ghost::pos).collect();
        taken.extend(self.target);
        let Some(pos) = self.grid.random_open(rng, &taken) else {
            log::warn!("{strategy} ghost not added: no free cell");
            return Err(SimError::NoFreeCell);
        };
        self.add_ghost(strategy, pos)
    }

    /// Take a ghost off the roster, returning it.
    pub fn remove_ghost(&mut self, id: GhostId) -> Result<Ghost, SimError> {
        match self.ghosts.iter().position(|g| g.id() == id) {
            Some(i) => Ok(self.ghosts.remove(i)),
            None => {
                log::warn!("cannot remove ghost {id}: not on the roster");
                Err(SimError::UnknownGhost(id))
            }
        }
    }

    /// Run the simulation and activate every ghost.
    pub fn start(&mut self) {
        self.running = true;
        for g in &mut self.ghosts {
            g.start();
        }
    }

    /// Pause the simulation and deactivate every ghost.
    pub fn stop(&mut self) {
        self.running = false;
        for g in &mut self.ghosts {
            g.stop();
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Does nothing while stopped or without a target. Ghosts standing on
    /// the target are retired; every other ghost takes its move step with
    /// the other listed ghosts as obstacles.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        let Some(target) = self.target else {
            return events;
        };
        self.ticks += 1;

        let mut i = 0;
        while i < self.ghosts.len() {
            if self.ghosts[i].pos() == target {
                // The target may have been moved onto an idle ghost.
                if self.ghosts[i].mark_reached() {
                    events.push(Event::Reached(self.ghosts[i].snapshot()));
                }
                let ghost = self.ghosts.remove(i);
                log::info!("ghost {} ({}) retired at {}", ghost.id(), ghost.strategy(), target);
                events.push(Event::Retired(ghost.snapshot()));
                continue;
            }

            let peers: Vec<Point> = self
                .ghosts
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, g)| g.pos())
                .collect();
            let ghost = &mut self.ghosts[i];
            let was_reached = ghost.has_reached();
            let step = ghost.advance(&mut self.pr, &self.grid, target, &peers);
            if step == Step::Waiting {
                log::trace!("ghost {} waiting", ghost.id());
            }
            if !was_reached && ghost.has_reached() {
                events.push(Event::Reached(ghost.snapshot()));
            }
            i += 1;
        }

        if self.ghosts.is_empty() {
            self.running = false;
            log::info!("all ghosts retired after {} ticks, stopping", self.ticks);
            events.push(Event::Stopped);
        }
        events
    }
}
