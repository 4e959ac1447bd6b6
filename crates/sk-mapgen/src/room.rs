//! Room placement.
//!
//! Every requested room gets a position, no matter what. The solver scans
//! the corridor network for a clean spot, grows the network when it runs
//! out of candidates, and as a final fallback accepts the least-crowded
//! in-bounds position rather than dropping a room.

use serde::{Deserialize, Serialize};
use sk_rng::SeededRng;
use strum::Display;

use crate::corridor::{CorridorNetwork, Direction};
use crate::grid::Grid;
use crate::point::Point;

/// A room request: footprint side and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub size: usize,
    pub name: String,
}

impl RoomSpec {
    pub fn new(size: usize, name: impl Into<String>) -> Self {
        Self {
            size,
            name: name.into(),
        }
    }

    /// Half-extent of the footprint around the center.
    pub fn half(&self) -> i32 {
        (self.size / 2) as i32
    }
}

/// How a placed room meets the corridor network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ConnectionKind {
    /// Centered directly on a corridor cell.
    Through,
    /// Offset from the corridor; needs a carved connector.
    Side,
}

/// A room with its assigned position.
///
/// `position` is set exactly once, here; it is the authoritative center
/// for the rest of the room's lifetime. `anchor` is the corridor cell the
/// room was placed against (equal to `position` for through placements)
/// and is what the connector pass digs from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub name: String,
    pub size: usize,
    pub position: Point,
    pub connection: ConnectionKind,
    pub anchor: Point,
}

impl PlacedRoom {
    pub fn half(&self) -> i32 {
        (self.size / 2) as i32
    }

    /// Whether the room's footprint covers a coordinate.
    pub fn contains(&self, p: Point) -> bool {
        (p.x - self.position.x).abs() <= self.half() && (p.y - self.position.y).abs() <= self.half()
    }
}

/// Expansion rounds allowed per room before force-placement.
///
/// Proportional to grid area so large maps get more attempts, clamped so
/// pathological inputs still terminate quickly. 12 rounds on a 50×50 map.
pub fn expansion_budget(width: usize, height: usize) -> usize {
    (width * height / 200).clamp(6, 24)
}

/// Assign a position to every room, in the caller's order.
///
/// Earlier rooms get first choice of corridor slots; that ordering is part
/// of the contract, not an accident of iteration.
pub fn place_rooms(
    rooms: &[RoomSpec],
    network: &mut CorridorNetwork,
    rng: &mut SeededRng,
) -> Vec<PlacedRoom> {
    let mut placed = Vec::with_capacity(rooms.len());
    for spec in rooms {
        let room = place_one(spec, network, &placed, rng);
        placed.push(room);
    }
    placed
}

fn place_one(
    spec: &RoomSpec,
    network: &mut CorridorNetwork,
    placed: &[PlacedRoom],
    rng: &mut SeededRng,
) -> PlacedRoom {
    let budget = expansion_budget(network.width, network.height);
    for round in 0..budget {
        if let Some(room) = find_spot(spec, network, placed) {
            return room;
        }
        match round {
            0 => {
                let count = network.corridors.len() as u32;
                if count > 0 {
                    let index = rng.next_int(count) as usize;
                    network.extend_corridor(index);
                }
            }
            1 => network.add_branch(rng),
            2 => network.add_long_corridors(),
            _ => network.add_branch(rng),
        }
    }
    if let Some(room) = find_spot(spec, network, placed) {
        return room;
    }
    force_place(spec, network, placed)
}

/// Scan the network for a spot where the footprint fits cleanly.
///
/// Through placements win over side placements; within each kind the scan
/// runs over corridors in insertion order and cells in walk order, so the
/// result is fully determined by the network state.
fn find_spot(
    spec: &RoomSpec,
    network: &CorridorNetwork,
    placed: &[PlacedRoom],
) -> Option<PlacedRoom> {
    let half = spec.half();

    for corridor in &network.corridors {
        for &cell in &corridor.cells {
            if fits(cell, half, placed, network.width, network.height) {
                return Some(PlacedRoom {
                    name: spec.name.clone(),
                    size: spec.size,
                    position: cell,
                    connection: ConnectionKind::Through,
                    anchor: cell,
                });
            }
        }
    }

    for corridor in &network.corridors {
        for &cell in &corridor.cells {
            for direction in Direction::ALL {
                let (dx, dy) = direction.delta();
                let center = cell.offset(dx * (half + 1), dy * (half + 1));
                if fits(center, half, placed, network.width, network.height) {
                    return Some(PlacedRoom {
                        name: spec.name.clone(),
                        size: spec.size,
                        position: center,
                        connection: ConnectionKind::Side,
                        anchor: cell,
                    });
                }
            }
        }
    }

    None
}

fn fits(center: Point, half: i32, placed: &[PlacedRoom], width: usize, height: usize) -> bool {
    footprint_in_bounds(center, half, width, height)
        && placed
            .iter()
            .all(|other| center.manhattan(other.position) >= half + other.half() + 1)
}

fn footprint_in_bounds(center: Point, half: i32, width: usize, height: usize) -> bool {
    center.x - half >= 1
        && center.y - half >= 1
        && center.x + half <= width as i32 - 2
        && center.y + half <= height as i32 - 2
}

/// Accept the least-violating in-bounds center.
///
/// Scans every candidate center and minimizes the summed separation
/// shortfall against already-placed rooms; the first minimum in scan
/// order wins. Only reached when expansion has been exhausted, and it
/// always yields a position.
fn force_place(spec: &RoomSpec, network: &CorridorNetwork, placed: &[PlacedRoom]) -> PlacedRoom {
    let half = spec.half();
    let w = network.width as i32;
    let h = network.height as i32;

    let mut best: Option<(i64, Point)> = None;
    for y in (1 + half)..=(h - 2 - half) {
        for x in (1 + half)..=(w - 2 - half) {
            let center = Point::new(x, y);
            let shortfall: i64 = placed
                .iter()
                .map(|other| {
                    let required = half + other.half() + 1;
                    i64::from((required - center.manhattan(other.position)).max(0))
                })
                .sum();
            if best.is_none_or(|(s, _)| shortfall < s) {
                best = Some((shortfall, center));
            }
        }
    }

    // A room wider than the interior has no candidate range at all; pin it
    // to the middle of the grid.
    let position = best.map_or(Point::new(w / 2, h / 2), |(_, p)| p);
    let anchor = nearest_corridor_cell(network, position).unwrap_or(position);
    let connection = if anchor == position {
        ConnectionKind::Through
    } else {
        ConnectionKind::Side
    };

    PlacedRoom {
        name: spec.name.clone(),
        size: spec.size,
        position,
        connection,
        anchor,
    }
}

fn nearest_corridor_cell(network: &CorridorNetwork, from: Point) -> Option<Point> {
    let mut best: Option<(i32, Point)> = None;
    for corridor in &network.corridors {
        for &cell in &corridor.cells {
            let distance = cell.manhattan(from);
            if best.is_none_or(|(d, _)| distance < d) {
                best = Some((distance, cell));
            }
        }
    }
    best.map(|(_, cell)| cell)
}

/// Stamp every placed room's footprint into the grid.
pub fn carve_rooms(placements: &[PlacedRoom], grid: &mut Grid) {
    for room in placements {
        let half = room.half();
        for dy in -half..=half {
            for dx in -half..=half {
                grid.carve(room.position.offset(dx, dy));
            }
        }
    }
}

/// Carve connector paths for side-placed rooms.
///
/// Walks the Manhattan path from the room's corridor anchor until it
/// enters the footprint. Through-placed rooms sit on the corridor already
/// and leave the grid untouched.
pub fn carve_connections(placements: &[PlacedRoom], grid: &mut Grid) {
    for room in placements {
        if room.connection != ConnectionKind::Side {
            continue;
        }
        let mut cur = room.anchor;
        let mut remaining = grid.width + grid.height;
        while !room.contains(cur) && remaining > 0 {
            grid.carve(cur);
            if cur.x != room.position.x {
                cur.x += (room.position.x - cur.x).signum();
            } else {
                cur.y += (room.position.y - cur.y).signum();
            }
            remaining -= 1;
        }
    }
}
