//! Search traits for the OPEN/WALL [`Grid`].

use pursuit_core::{Grid, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        // Out-of-bounds cells read as walls, so this also bounds-checks.
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_open(n)));
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
