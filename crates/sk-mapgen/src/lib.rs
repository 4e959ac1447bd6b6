//! sk-mapgen: map generation engine for the Skirmish tactical game.
//!
//! Produces the playable map as a binary walkable grid: a corridor
//! network shaped by a topology pattern, named rooms attached to it (every
//! requested room is always placed), and per-cell metadata for the board
//! and game-state layers. Generation is pure logic with no I/O; for a
//! fixed seed, pattern, room list and grid size it is bit-for-bit
//! reproducible across processes, so a networked session only has to ship
//! the seed.
//!
//! ```
//! use sk_mapgen::{CorridorPattern, MapGenerator, Point, RoomSpec};
//!
//! let mut generator = MapGenerator::seeded(50, 50, CorridorPattern::Random, 12345);
//! let rooms = vec![RoomSpec::new(5, "Armory"), RoomSpec::new(7, "Great Hall")];
//! let grid = generator.generate_map(&rooms, Point::new(25, 25));
//! assert!(grid.carved_count() > 0);
//! assert_eq!(generator.placements().len(), 2);
//! ```

pub mod cell;
pub mod corridor;
pub mod generation;
pub mod grid;
pub mod point;
pub mod room;

pub use cell::{Cell, CellContent, build_cells};
pub use corridor::{Corridor, CorridorNetwork, CorridorPattern, Direction};
pub use generation::MapGenerator;
pub use grid::{CARVED, Grid, SOLID};
pub use point::Point;
pub use room::{
    ConnectionKind, PlacedRoom, RoomSpec, carve_connections, carve_rooms, expansion_budget,
    place_rooms,
};
