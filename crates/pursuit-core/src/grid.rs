//! The OPEN/WALL cell grid agents move on.
//!
//! Every query outside `[0, width) × [0, height)` reads as [`Cell::Wall`], so
//! searches and movement never need to special-case the map edges.

use std::fmt;

use rand::Rng;

use crate::geom::{Point, Range};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Open,
    Wall,
}

impl Cell {
    /// Text glyph used by [`Grid::parse`] and the grid's `Display` impl.
    pub const fn glyph(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Wall => '#',
        }
    }
}

/// A fixed-size rectangular array of [`Cell`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid with every cell open.
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Cell::Open)
    }

    /// Create a new grid with every cell set to `cell`.
    pub fn filled(width: i32, height: i32, cell: Cell) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: vec![cell; bounds.len()],
            bounds,
        }
    }

    /// Parse a grid from text rows: `#` is a wall, anything else is open.
    ///
    /// Short rows are padded with open cells up to the longest row.
    pub fn parse(s: &str) -> Self {
        let rows: Vec<&str> = s.trim().lines().map(str::trim).collect();
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.set(Point::new(x as i32, y as i32), Cell::Wall);
                }
            }
        }
        grid
    }

    /// The bounding range `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size as a Point (width = x, height = y).
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Grid width.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Grid height.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the grid contains the given point.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.bounds.width() + p.x) as usize
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Cell> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Set the cell at a point. Returns `false` (and does nothing) if out
    /// of bounds.
    pub fn set(&mut self, p: Point, cell: Cell) -> bool {
        if !self.contains(p) {
            return false;
        }
        let idx = self.index(p);
        self.cells[idx] = cell;
        true
    }

    /// Whether `p` is a wall. Points outside the grid are always walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.at(p).is_none_or(|c| c == Cell::Wall)
    }

    /// Whether `p` is an in-bounds open cell.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        !self.is_wall(p)
    }

    /// Fill the entire grid with the given cell.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Count how many cells equal the given cell.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over `(Point, Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }

    /// Return a copy of this grid with every in-bounds position of `walls`
    /// forced to [`Cell::Wall`]. `self` is left untouched.
    pub fn with_additional_walls<I>(&self, walls: I) -> Grid
    where
        I: IntoIterator<Item = Point>,
    {
        let mut grid = self.clone();
        for p in walls {
            grid.set(p, Cell::Wall);
        }
        grid
    }

    /// Pick a uniformly random open cell that is not in `exclude`.
    ///
    /// Returns `None` when no such cell exists.
    pub fn random_open<R: Rng + ?Sized>(&self, rng: &mut R, exclude: &[Point]) -> Option<Point> {
        let candidates: Vec<Point> = self
            .iter()
            .filter(|&(p, c)| c == Cell::Open && !exclude.contains(&p))
            .map(|(p, _)| p)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let c = self.at(Point::new(x, y)).unwrap_or(Cell::Wall);
                write!(f, "{}", c.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_and_size() {
        let g = Grid::new(10, 5);
        assert_eq!(g.size(), Point::new(10, 5));
        assert_eq!(g.count(Cell::Open), 50);
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let g = Grid::new(4, 4);
        assert!(g.is_open(Point::new(0, 0)));
        assert!(g.is_wall(Point::new(-1, 0)));
        assert!(g.is_wall(Point::new(4, 2)));
        assert!(g.is_wall(Point::new(2, 4)));
        assert_eq!(g.at(Point::new(10, 10)), None);
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut g = Grid::new(3, 3);
        assert!(!g.set(Point::new(3, 0), Cell::Wall));
        assert!(g.set(Point::new(1, 1), Cell::Wall));
        assert_eq!(g.count(Cell::Wall), 1);
    }

    #[test]
    fn test_parse_and_display() {
        let text = "\
            ####
            #..#
            ####";
        let g = Grid::parse(text);
        assert_eq!(g.size(), Point::new(4, 3));
        assert!(g.is_open(Point::new(1, 1)));
        assert!(g.is_wall(Point::new(0, 1)));
        assert_eq!(g.to_string(), "####\n#..#\n####\n");
    }

    #[test]
    fn test_additional_walls_leave_original_untouched() {
        let g = Grid::new(5, 5);
        let blocked = g.with_additional_walls([Point::new(1, 1), Point::new(9, 9)]);
        assert!(blocked.is_wall(Point::new(1, 1)));
        assert_eq!(blocked.count(Cell::Wall), 1);
        assert!(g.is_open(Point::new(1, 1)));
        assert_eq!(g.count(Cell::Wall), 0);
    }

    #[test]
    fn test_random_open_respects_walls_and_exclusions() {
        let g = Grid::parse("###\n#..\n###");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let p = g.random_open(&mut rng, &[Point::new(1, 1)]).unwrap();
            assert_eq!(p, Point::new(2, 1));
        }
        assert_eq!(
            g.random_open(&mut rng, &[Point::new(1, 1), Point::new(2, 1)]),
            None
        );
    }
}
