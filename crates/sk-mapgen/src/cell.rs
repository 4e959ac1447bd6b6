//! Per-cell export metadata.
//!
//! A read-only view derived from the grid and the placed rooms, consumed
//! by the board and game-state layers. Nothing here mutates generation
//! state.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, SOLID};
use crate::point::Point;
use crate::room::PlacedRoom;

/// What occupies a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellContent {
    pub position: Point,
    /// Primary owning room, if any.
    pub location: Option<String>,
    /// True when the cell is solid rock.
    pub blocker: bool,
}

/// One exported cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Point,
    /// Names of every placed room whose footprint covers this cell.
    /// Usually zero or one entry; overlap edge cases produce more.
    pub locations: Vec<String>,
    /// Display elements, owned and filled in by the board layer.
    pub elements: Vec<String>,
    pub content: CellContent,
}

/// Build the cell view for a grid and its placements.
///
/// Room ownership is a linear scan over placements per cell; maps stay
/// small enough that a spatial index has not been worth it.
pub fn build_cells(grid: &Grid, placements: &[PlacedRoom]) -> Vec<Vec<Cell>> {
    let mut rows = Vec::with_capacity(grid.height);
    for y in 0..grid.height {
        let mut row = Vec::with_capacity(grid.width);
        for x in 0..grid.width {
            let position = Point::new(x as i32, y as i32);
            let locations: Vec<String> = placements
                .iter()
                .filter(|room| room.contains(position))
                .map(|room| room.name.clone())
                .collect();
            let content = CellContent {
                position,
                location: locations.first().cloned(),
                blocker: grid.cells[y][x] == SOLID,
            };
            row.push(Cell {
                position,
                locations,
                elements: Vec::new(),
                content,
            });
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::ConnectionKind;

    fn placed(name: &str, size: usize, x: i32, y: i32) -> PlacedRoom {
        PlacedRoom {
            name: name.into(),
            size,
            position: Point::new(x, y),
            connection: ConnectionKind::Through,
            anchor: Point::new(x, y),
        }
    }

    #[test]
    fn test_dimensions_match_grid() {
        let grid = Grid::new(12, 7);
        let cells = build_cells(&grid, &[]);
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|row| row.len() == 12));
    }

    #[test]
    fn test_blocker_tracks_grid_state() {
        let mut grid = Grid::new(10, 10);
        grid.carve(Point::new(4, 5));
        let cells = build_cells(&grid, &[]);
        assert!(!cells[5][4].content.blocker);
        assert!(cells[5][5].content.blocker);
    }

    #[test]
    fn test_room_ownership() {
        let grid = Grid::new(20, 20);
        let rooms = vec![placed("armory", 5, 10, 10)];
        let cells = build_cells(&grid, &rooms);

        assert_eq!(cells[10][10].locations, vec!["armory".to_string()]);
        assert_eq!(
            cells[10][10].content.location.as_deref(),
            Some("armory")
        );
        // Footprint corner is owned, one step past it is not.
        assert_eq!(cells[8][8].locations.len(), 1);
        assert!(cells[7][8].locations.is_empty());
        assert_eq!(cells[7][8].content.location, None);

        let owned = cells
            .iter()
            .flatten()
            .filter(|cell| !cell.locations.is_empty())
            .count();
        assert_eq!(owned, 25);
    }

    #[test]
    fn test_overlapping_rooms_list_both_names() {
        let grid = Grid::new(20, 20);
        let rooms = vec![placed("a", 5, 8, 8), placed("b", 5, 10, 10)];
        let cells = build_cells(&grid, &rooms);

        let shared = &cells[9][9];
        assert_eq!(shared.locations, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(shared.content.location.as_deref(), Some("a"));
    }

    #[test]
    fn test_elements_start_empty() {
        let grid = Grid::new(4, 4);
        let cells = build_cells(&grid, &[]);
        assert!(cells.iter().flatten().all(|cell| cell.elements.is_empty()));
    }
}
