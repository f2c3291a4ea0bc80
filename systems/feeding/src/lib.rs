#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic feeding system responsible for emitting food spawn commands.
//!
//! Two triggers are independently enabled: a spawn is proposed whenever the
//! board holds no food at all, and additionally on every `food_add_rate`-th
//! cycle regardless of existing food. Cell selection is uniform over the
//! board's empty cells using a seeded RNG, so identical seeds replay
//! identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serpentine_core::{CellCoord, Command};

/// Configuration parameters required to construct the feeding system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    food_add_rate: u64,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    #[must_use]
    pub const fn new(food_add_rate: u64, rng_seed: u64) -> Self {
        Self {
            food_add_rate,
            rng_seed,
        }
    }
}

/// Pure system that deterministically emits food spawn commands.
#[derive(Debug)]
pub struct Feeding {
    food_add_rate: u64,
    rng: ChaCha8Rng,
}

impl Feeding {
    /// Creates a new feeding system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            food_add_rate: config.food_add_rate,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Proposes at most one spawn command for the current cycle.
    ///
    /// `free_cells` must list the board's empty cells; when it is empty the
    /// system silently proposes nothing.
    pub fn handle(
        &mut self,
        cycle: u64,
        food_count: usize,
        free_cells: &[CellCoord],
        out: &mut Vec<Command>,
    ) {
        if !self.should_spawn(cycle, food_count) {
            return;
        }

        if free_cells.is_empty() {
            return;
        }

        let index = self.rng.gen_range(0..free_cells.len());
        out.push(Command::SpawnFood {
            cell: free_cells[index],
        });
    }

    fn should_spawn(&self, cycle: u64, food_count: usize) -> bool {
        if food_count == 0 {
            return true;
        }

        self.food_add_rate != 0 && cycle % self.food_add_rate == 0
    }
}
