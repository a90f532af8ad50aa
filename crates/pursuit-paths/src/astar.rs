use pursuit_core::Point;

use crate::PathRange;
use crate::pathrange::SearchResult;
use crate::strategy::Strategy;
use crate::traits::AstarPather;

impl PathRange {
    /// A* search from `from` to `to`.
    ///
    /// The frontier is keyed by `g + h`, where `h` is the pather's estimate
    /// to the goal. With an admissible and consistent estimate (Manhattan
    /// distance on a 4-connected unit grid) the returned path is optimal.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> SearchResult {
        self.best_first(Strategy::Astar, pather, from, to, |p| pather.estimate(p, to))
    }
}

#[cfg(test)]
mod tests {
    use pursuit_core::{Grid, Point};

    use crate::PathRange;

    #[test]
    fn astar_goes_straight_on_an_open_row() {
        let grid = Grid::new(8, 3);
        let mut pr = PathRange::new(grid.bounds());
        let r = pr.astar_path(&grid, Point::new(0, 1), Point::new(7, 1));
        assert_eq!(r.len(), 7);
        // Only the cells on the straight line are expanded.
        assert_eq!(r.expanded, 8);
    }

    #[test]
    fn astar_expands_fewer_nodes_than_ucs() {
        let grid = Grid::new(15, 15);
        let mut pr = PathRange::new(grid.bounds());
        let (from, to) = (Point::new(7, 7), Point::new(14, 7));
        let astar = pr.astar_path(&grid, from, to);
        let ucs = pr.ucs_path(&grid, from, to);
        assert_eq!(astar.len(), ucs.len());
        assert!(astar.expanded < ucs.expanded);
    }
}
