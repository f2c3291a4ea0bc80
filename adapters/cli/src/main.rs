#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that hosts a Serpentine game session.
//!
//! Runs the simulation headlessly for a fixed number of ticks (or until the
//! game ends), printing ASCII frames and sound-cue lines. Interactive input
//! is out of scope here; the adapter exercises the same narrow interfaces a
//! graphical host would use.

mod render;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use serpentine_core::{Direction, GameStatus, InputCommand, SoundCue};
use serpentine_session::{Session, SessionConfig};
use serpentine_world::{query, WallPlan};
use std::io::Write;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Heading {
    North,
    East,
    South,
    West,
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::North => Direction::North,
            Heading::East => Direction::East,
            Heading::South => Direction::South,
            Heading::West => Direction::West,
        }
    }
}

/// Headless host for the Serpentine snake simulation.
#[derive(Debug, Parser)]
#[command(name = "serpentine", version, about)]
struct Args {
    /// Number of cell columns on the board.
    #[arg(long, default_value_t = 25)]
    columns: u32,

    /// Number of cell rows on the board.
    #[arg(long, default_value_t = 25)]
    rows: u32,

    /// Omit the perimeter wall ring.
    #[arg(long)]
    open: bool,

    /// Ticks between snake advances.
    #[arg(long, default_value_t = 2)]
    refresh_rate: u64,

    /// Ticks between guaranteed food spawns.
    #[arg(long, default_value_t = 25)]
    food_add_rate: u64,

    /// Segment count the snake starts with.
    #[arg(long, default_value_t = 1)]
    starting_length: u32,

    /// Heading the snake faces before the first advance.
    #[arg(long, value_enum, default_value_t = Heading::East)]
    starting_direction: Heading,

    /// Let the breadth-first-search pathfinder drive the snake.
    #[arg(long)]
    autopilot: bool,

    /// Seed for all session randomness; drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 512)]
    ticks: u64,

    /// Print a frame every N ticks (0 prints only the final frame).
    #[arg(long, default_value_t = 16)]
    frame_every: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.columns == 0 || args.rows == 0 {
        bail!("the board needs at least one column and one row");
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = SessionConfig {
        columns: args.columns,
        rows: args.rows,
        wall_plan: if args.open {
            WallPlan::Open
        } else {
            WallPlan::Perimeter
        },
        refresh_rate: args.refresh_rate,
        food_add_rate: args.food_add_rate,
        starting_snake_length: args.starting_length,
        starting_direction: args.starting_direction.into(),
        rng_seed: seed,
    };

    let mut session = Session::new(config);
    if args.autopilot {
        let _ = session.handle_input(InputCommand::ToggleAutopilot);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", query::welcome_banner(session.world()))?;
    writeln!(out, "seed: {seed}")?;

    for _ in 0..args.ticks {
        let report = session.tick();

        for sound in &report.sounds {
            writeln!(out, "[tick {}] {}", report.cycle, sound_line(*sound))?;
        }
        if args.frame_every != 0 && report.cycle % args.frame_every == 0 {
            write!(out, "{}", render::frame(&session.snapshot()))?;
        }

        if report.status == GameStatus::GameOver {
            break;
        }
    }

    write!(out, "{}", render::frame(&session.snapshot()))?;
    writeln!(
        out,
        "ticks: {}  length: {}  status: {:?}",
        session.cycle(),
        query::snake_len(session.world()),
        session.status()
    )?;
    Ok(())
}

fn sound_line(sound: SoundCue) -> &'static str {
    match sound {
        SoundCue::FoodEaten => "crunch: food eaten",
        SoundCue::FoodSpawned => "pop: food spawned",
        SoundCue::GameOver => "meow: game over",
    }
}
