//! Headless walk to the winning tile.
//!
//! Usage:
//!   cargo run --bin walk                          # built-in level, seed 42
//!   cargo run --bin walk -- levels/stairs.txt     # text layout
//!   cargo run --bin walk -- level.json --seed 7   # serialized level
//!
//! A level file with a `.json` extension is read as a serialized level,
//! anything else as the text layout.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use isowalk_demos::{DEMO_LEVEL, Session, load_level, render};
use isowalk_floor::WalkConfig;

#[derive(Parser, Debug)]
#[command(name = "walk")]
#[command(about = "Walk the player to the winning tile of a level")]
struct Args {
    /// Level file; the built-in level when omitted
    level: Option<PathBuf>,

    /// Seed for the order tiles are registered in
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let level = match &args.level {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            let json = path.extension().is_some_and(|ext| ext == "json");
            load_level(&contents, json)?
        }
        None => load_level(DEMO_LEVEL, false)?,
    };

    let mut session = Session::new(level, args.seed, WalkConfig::default());
    println!(
        "floor: {} tiles, {} connections (seed {})",
        session.floor().node_count(),
        session.floor().edge_count(),
        args.seed
    );

    let start = session.level().start().cell;
    println!("{}", render(session.level(), &[], Some(start)));

    let goal = session.winning_tile().ok_or("level has no winning tile")?;
    match session.walk_to(goal) {
        Some(report) => {
            let end = report.path.last().copied();
            println!("{}", render(session.level(), &report.path, end));
            println!(
                "walked {} tiles in {} steps",
                report.path.len().saturating_sub(1),
                report.steps
            );
            if report.won {
                println!("You win!");
            }
        }
        None => println!("no way to reach the winning tile"),
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["walk"]).unwrap();
        assert_eq!(args.level, None);
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn level_and_seed() {
        let args = Args::try_parse_from(["walk", "level.json", "--seed", "7"]).unwrap();
        assert_eq!(args.level, Some(PathBuf::from("level.json")));
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Args::try_parse_from(["walk", "a.txt", "b.txt"]).is_err());
        assert!(Args::try_parse_from(["walk", "--seed"]).is_err());
        assert!(Args::try_parse_from(["walk", "--seed", "many"]).is_err());
    }
}
