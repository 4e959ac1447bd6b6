//! Corridor network synthesis.
//!
//! Builds the connective paths that rooms later attach to, and grows the
//! network on demand when the placer runs out of space. Corridors are
//! straight Manhattan-stepped segments; branching topologies come from
//! segments forking off cells of earlier segments. All digging is clipped
//! to a 1-cell border margin, so none of these operations can fail.

use serde::{Deserialize, Serialize};
use sk_rng::SeededRng;
use strum::{Display, EnumIter, EnumString};

use crate::grid::Grid;
use crate::point::Point;

/// How far a single extension request grows a corridor.
pub const EXTEND_STEP: usize = 6;

/// A cardinal heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All headings, in scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this heading. `Up` decreases `y`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The two headings orthogonal to this one.
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }
}

/// Topology strategy for the initial corridor set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum CorridorPattern {
    /// Arbitrary branching walk out of the starting point.
    #[default]
    Random,
    /// Spokes radiating from the starting point.
    Star,
    /// Orthogonal lattice of spanning lines.
    Grid,
    /// One long spine through the starting point.
    Linear,
}

/// A straight Manhattan-stepped path between two points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub start: Point,
    pub end: Point,
    /// Path cells in walk order, `start` first.
    pub cells: Vec<Point>,
    /// Current heading; extensions continue this way.
    pub direction: Direction,
}

impl Corridor {
    /// Dig a straight corridor of up to `length` cells from `start`.
    ///
    /// The start is clamped into the interior and the walk stops at the
    /// border margin, so the result may be shorter than requested but is
    /// never empty or out of bounds.
    pub fn dig(
        start: Point,
        direction: Direction,
        length: usize,
        width: usize,
        height: usize,
    ) -> Self {
        let start = clamp_to_interior(start, width, height);
        let (dx, dy) = direction.delta();
        let mut cells = vec![start];
        let mut cur = start;
        for _ in 1..length {
            let next = cur.offset(dx, dy);
            if !in_interior(next, width, height) {
                break;
            }
            cells.push(next);
            cur = next;
        }
        Self {
            start,
            end: cur,
            cells,
            direction,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The corridor cells must keep off the outermost ring, which is reserved
/// as a solid border.
fn in_interior(p: Point, width: usize, height: usize) -> bool {
    p.x >= 1 && p.y >= 1 && p.x <= (width as i32 - 2).max(1) && p.y <= (height as i32 - 2).max(1)
}

fn clamp_to_interior(p: Point, width: usize, height: usize) -> Point {
    Point::new(
        p.x.clamp(1, (width as i32 - 2).max(1)),
        p.y.clamp(1, (height as i32 - 2).max(1)),
    )
}

/// The connective path network covering a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorNetwork {
    pub width: usize,
    pub height: usize,
    pub corridors: Vec<Corridor>,
}

impl CorridorNetwork {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            corridors: Vec::new(),
        }
    }

    /// Build the initial corridor set for `room_count` rooms.
    pub fn generate(
        &mut self,
        room_count: usize,
        pattern: CorridorPattern,
        start: Point,
        rng: &mut SeededRng,
    ) {
        self.corridors.clear();
        match pattern {
            CorridorPattern::Random => self.generate_random(room_count, start, rng),
            CorridorPattern::Star => self.generate_star(room_count, start),
            CorridorPattern::Grid => self.generate_grid(room_count),
            CorridorPattern::Linear => self.generate_linear(start),
        }
    }

    fn generate_random(&mut self, room_count: usize, start: Point, rng: &mut SeededRng) {
        let reach = (self.width.max(self.height) / 2) as u32;
        let direction = *rng.pick(&Direction::ALL).unwrap();
        let length = 6 + rng.next_int(reach) as usize;
        self.corridors
            .push(Corridor::dig(start, direction, length, self.width, self.height));

        for _ in 1..room_count + 2 {
            self.add_branch(rng);
        }
    }

    fn generate_star(&mut self, room_count: usize, start: Point) {
        let reach = self.width.max(self.height);
        for direction in Direction::ALL {
            self.corridors
                .push(Corridor::dig(start, direction, reach, self.width, self.height));
        }
        // Extra spokes fork off the midpoints of the main four.
        for i in 4..room_count.max(4) {
            let parent = &self.corridors[i % 4];
            let mid = parent.cells[parent.cells.len() / 2];
            let direction = parent.direction.perpendicular()[(i / 4) % 2];
            self.corridors
                .push(Corridor::dig(mid, direction, reach, self.width, self.height));
        }
    }

    fn generate_grid(&mut self, room_count: usize) {
        let mut k = 2usize;
        while k * k < room_count {
            k += 1;
        }
        let w = self.width as i32;
        let h = self.height as i32;
        for i in 1..=k {
            let y = h * i as i32 / (k as i32 + 1);
            self.corridors.push(Corridor::dig(
                Point::new(1, y),
                Direction::Right,
                self.width,
                self.width,
                self.height,
            ));
        }
        for i in 1..=k {
            let x = w * i as i32 / (k as i32 + 1);
            self.corridors.push(Corridor::dig(
                Point::new(x, 1),
                Direction::Down,
                self.height,
                self.width,
                self.height,
            ));
        }
    }

    fn generate_linear(&mut self, start: Point) {
        self.corridors.push(Corridor::dig(
            Point::new(1, start.y),
            Direction::Right,
            self.width,
            self.width,
            self.height,
        ));
    }

    /// Lengthen a corridor along its heading, clipped at the border.
    pub fn extend_corridor(&mut self, index: usize) {
        let width = self.width;
        let height = self.height;
        let Some(corridor) = self.corridors.get_mut(index) else {
            return;
        };
        let (dx, dy) = corridor.direction.delta();
        let mut cur = corridor.end;
        for _ in 0..EXTEND_STEP {
            let next = cur.offset(dx, dy);
            if !in_interior(next, width, height) {
                break;
            }
            corridor.cells.push(next);
            cur = next;
        }
        corridor.end = cur;
    }

    /// Fork a new corridor off a random cell of a random existing one.
    pub fn add_branch(&mut self, rng: &mut SeededRng) {
        let reach = (self.width.max(self.height) / 2) as u32;
        if self.corridors.is_empty() {
            let center = Point::new(self.width as i32 / 2, self.height as i32 / 2);
            let direction = *rng.pick(&Direction::ALL).unwrap();
            let length = 4 + rng.next_int(reach) as usize;
            self.corridors
                .push(Corridor::dig(center, direction, length, self.width, self.height));
            return;
        }

        let parent = &self.corridors[rng.next_int(self.corridors.len() as u32) as usize];
        let from = parent.cells[rng.next_int(parent.cells.len() as u32) as usize];
        let direction = *rng.pick(&parent.direction.perpendicular()).unwrap();
        let length = 4 + rng.next_int(reach) as usize;
        self.corridors
            .push(Corridor::dig(from, direction, length, self.width, self.height));
    }

    /// Last-resort bulk expansion: four corridors spanning the grid.
    pub fn add_long_corridors(&mut self) {
        let w = self.width as i32;
        let h = self.height as i32;
        for y in [h / 3, 2 * h / 3] {
            self.corridors.push(Corridor::dig(
                Point::new(1, y),
                Direction::Right,
                self.width,
                self.width,
                self.height,
            ));
        }
        for x in [w / 3, 2 * w / 3] {
            self.corridors.push(Corridor::dig(
                Point::new(x, 1),
                Direction::Down,
                self.height,
                self.width,
                self.height,
            ));
        }
    }

    /// Mark every corridor cell walkable.
    pub fn carve(&self, grid: &mut Grid) {
        for corridor in &self.corridors {
            for &cell in &corridor.cells {
                grid.carve(cell);
            }
        }
    }
}
