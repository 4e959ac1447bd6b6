//! The binary walkable grid.
//!
//! One buffer per generation pass, owned by the orchestrator and lent to
//! the carving passes as `&mut`. Cells are 0 (solid) until something
//! carves them to 1; nothing ever carves back to 0.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Cell state for rock that nothing has carved yet.
pub const SOLID: u8 = 0;

/// Cell state for walkable floor.
pub const CARVED: u8 = 1;

/// A width×height grid of cell states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    /// Row-major cell states: `cells[y][x]`.
    pub cells: Vec<Vec<u8>>,
}

impl Grid {
    /// Allocate an all-solid grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![SOLID; width]; height],
        }
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// Mark a cell walkable. Out-of-bounds writes are dropped.
    pub fn carve(&mut self, p: Point) {
        if self.in_bounds(p) {
            self.cells[p.y as usize][p.x as usize] = CARVED;
        }
    }

    /// Whether a cell is walkable. Out-of-bounds reads are solid.
    pub fn is_carved(&self, p: Point) -> bool {
        self.in_bounds(p) && self.cells[p.y as usize][p.x as usize] == CARVED
    }

    /// Number of carved cells.
    pub fn carved_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == CARVED)
            .count()
    }

    /// Shrink the grid to the carved content plus a 1-cell margin.
    ///
    /// The margin is clipped at the grid edges. Returns the origin of the
    /// retained box so recorded positions can be translated into the new
    /// frame, or `None` (grid untouched) when nothing was ever carved.
    pub fn trim(&mut self) -> Option<Point> {
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;
        let mut any = false;

        for (y, row) in self.cells.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == CARVED {
                    any = true;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        if !any {
            return None;
        }

        let x0 = min_x.saturating_sub(1);
        let y0 = min_y.saturating_sub(1);
        let x1 = (max_x + 1).min(self.width - 1);
        let y1 = (max_y + 1).min(self.height - 1);

        self.cells = self.cells[y0..=y1]
            .iter()
            .map(|row| row[x0..=x1].to_vec())
            .collect();
        self.width = x1 - x0 + 1;
        self.height = y1 - y0 + 1;

        Some(Point::new(x0 as i32, y0 as i32))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &cell in row {
                f.write_str(if cell == CARVED { "." } else { "#" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_solid() {
        let grid = Grid::new(10, 6);
        assert_eq!(grid.cells.len(), 6);
        assert!(grid.cells.iter().all(|row| row.len() == 10));
        assert_eq!(grid.carved_count(), 0);
    }

    #[test]
    fn test_carve_and_read() {
        let mut grid = Grid::new(10, 10);
        grid.carve(Point::new(3, 4));
        assert!(grid.is_carved(Point::new(3, 4)));
        assert!(!grid.is_carved(Point::new(4, 3)));
        assert_eq!(grid.cells[4][3], CARVED);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut grid = Grid::new(5, 5);
        grid.carve(Point::new(-1, 2));
        grid.carve(Point::new(2, 9));
        assert_eq!(grid.carved_count(), 0);
        assert!(!grid.is_carved(Point::new(-1, 2)));
    }

    #[test]
    fn test_trim_keeps_one_cell_margin() {
        let mut grid = Grid::new(20, 20);
        grid.carve(Point::new(5, 6));
        grid.carve(Point::new(9, 11));

        let origin = grid.trim().unwrap();
        assert_eq!(origin, Point::new(4, 5));
        // Content box is (5..=9, 6..=11), plus one margin cell per side.
        assert_eq!(grid.width, 7);
        assert_eq!(grid.height, 8);
        assert!(grid.is_carved(Point::new(1, 1)));
        assert!(grid.is_carved(Point::new(5, 6)));
    }

    #[test]
    fn test_trim_clips_margin_at_edges() {
        let mut grid = Grid::new(8, 8);
        grid.carve(Point::new(0, 0));
        grid.carve(Point::new(7, 7));

        let origin = grid.trim().unwrap();
        assert_eq!(origin, Point::new(0, 0));
        assert_eq!((grid.width, grid.height), (8, 8));
    }

    #[test]
    fn test_trim_empty_grid_is_noop() {
        let mut grid = Grid::new(8, 8);
        assert_eq!(grid.trim(), None);
        assert_eq!((grid.width, grid.height), (8, 8));
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new(3, 2);
        grid.carve(Point::new(1, 0));
        assert_eq!(grid.to_string(), "#.#\n###\n");
    }
}
