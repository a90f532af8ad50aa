use pursuit_core::Point;

use crate::PathRange;
use crate::pathrange::SearchResult;
use crate::strategy::Strategy;
use crate::traits::WeightedPather;

impl PathRange {
    /// Uniform-cost search from `from` to `to`.
    ///
    /// The frontier is keyed by accumulated path cost alone, so the first
    /// time the goal is popped its path is a cheapest one.
    pub fn ucs_path<P: WeightedPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> SearchResult {
        self.best_first(Strategy::Ucs, pather, from, to, |_| 0)
    }
}

#[cfg(test)]
mod tests {
    use pursuit_core::{Grid, Point};

    use crate::PathRange;
    use crate::traits::{Pather, WeightedPather};

    /// Open grid where stepping onto (1, 0) costs 10.
    struct Puddle(Grid);

    impl Pather for Puddle {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            self.0.neighbors(p, buf);
        }
    }

    impl WeightedPather for Puddle {
        fn cost(&self, _from: Point, to: Point) -> i32 {
            if to == Point::new(1, 0) { 10 } else { 1 }
        }
    }

    #[test]
    fn ucs_routes_around_expensive_cells() {
        let puddle = Puddle(Grid::new(3, 3));
        let mut pr = PathRange::new(puddle.0.bounds());
        let r = pr.ucs_path(&puddle, Point::new(0, 0), Point::new(2, 0));
        assert_eq!(
            r.path,
            vec![
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 0),
            ]
        );
        let bfs = pr.bfs_path(&puddle, Point::new(0, 0), Point::new(2, 0));
        assert_eq!(bfs.len(), 2);
    }

    #[test]
    fn ucs_matches_bfs_on_unit_costs() {
        let grid = Grid::parse(
            "\
            .....
            .###.
            ...#.
            .#...",
        );
        let mut pr = PathRange::new(grid.bounds());
        let (from, to) = (Point::new(0, 3), Point::new(4, 0));
        let ucs = pr.ucs_path(&grid, from, to);
        let bfs = pr.bfs_path(&grid, from, to);
        assert_eq!(ucs.len(), bfs.len());
        assert_eq!(ucs.len(), 7);
    }
}
