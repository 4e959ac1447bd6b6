//! Generate a Skirmish map from the command line and inspect the result.
//!
//! Prints the walkable grid as ASCII plus a placement table, or the full
//! per-cell metadata as JSON with `--json`.

use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use strum::IntoEnumIterator;

use sk_mapgen::{CorridorPattern, MapGenerator, Point, RoomSpec};

#[derive(Parser, Debug)]
#[command(name = "maptool")]
#[command(author, version, about = "Generate a Skirmish map and print it", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = 50)]
    width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = 50)]
    height: usize,

    /// Corridor topology (random, star, grid, linear)
    #[arg(short, long, default_value = "random")]
    pattern: String,

    /// Seed for reproducible output; random when omitted
    #[arg(short, long)]
    seed: Option<u32>,

    /// Room as size:name, repeatable (e.g. -r 5:Armory -r "7:Great Hall")
    #[arg(short = 'r', long = "room")]
    rooms: Vec<String>,

    /// Starting point as x,y; defaults to the grid center
    #[arg(long)]
    start: Option<String>,

    /// Emit the per-cell metadata as JSON instead of ASCII art
    #[arg(long)]
    json: bool,
}

fn parse_room(raw: &str) -> Result<RoomSpec> {
    let (size, name) = raw
        .split_once(':')
        .with_context(|| format!("expected size:name, got {raw:?}"))?;
    let size: usize = size
        .trim()
        .parse()
        .with_context(|| format!("bad room size in {raw:?}"))?;
    if size < 3 {
        bail!("room size must be at least 3, got {size}");
    }
    let name = name.trim();
    if name.is_empty() {
        bail!("room name is empty in {raw:?}");
    }
    Ok(RoomSpec::new(size, name))
}

fn parse_point(raw: &str) -> Result<Point> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("expected x,y, got {raw:?}"))?;
    let x = x.trim().parse().with_context(|| format!("bad x in {raw:?}"))?;
    let y = y.trim().parse().with_context(|| format!("bad y in {raw:?}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let pattern = CorridorPattern::from_str(&args.pattern).map_err(|_| {
        let valid: Vec<String> = CorridorPattern::iter()
            .map(|p| p.to_string().to_lowercase())
            .collect();
        anyhow!(
            "unknown pattern {:?}, expected one of: {}",
            args.pattern,
            valid.join(", ")
        )
    })?;

    let rooms = if args.rooms.is_empty() {
        vec![
            RoomSpec::new(5, "Room1"),
            RoomSpec::new(7, "Room2"),
            RoomSpec::new(5, "Room3"),
        ]
    } else {
        args.rooms
            .iter()
            .map(|raw| parse_room(raw))
            .collect::<Result<Vec<_>>>()?
    };

    let start = match &args.start {
        Some(raw) => parse_point(raw)?,
        None => Point::new(args.width as i32 / 2, args.height as i32 / 2),
    };

    let mut generator = match args.seed {
        Some(seed) => MapGenerator::seeded(args.width, args.height, pattern, seed),
        None => MapGenerator::new(args.width, args.height, pattern),
    };
    generator.generate_map(&rooms, start);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&generator.cells())?);
        return Ok(());
    }

    print!("{}", generator.grid());
    println!();
    println!(
        "{}x{} after trim, pattern {}, seed {}",
        generator.grid().width,
        generator.grid().height,
        pattern,
        generator
            .seed()
            .map_or_else(|| "random".to_string(), |s| s.to_string()),
    );
    println!();
    println!(
        "{:<20} {:>4}  {:>10}  {:>10}  connection",
        "room", "size", "center", "anchor"
    );
    for room in generator.placements() {
        println!(
            "{:<20} {:>4}  {:>10}  {:>10}  {}",
            room.name,
            room.size,
            room.position.to_string(),
            room.anchor.to_string(),
            room.connection,
        );
    }

    Ok(())
}
