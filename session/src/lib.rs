#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven game controller for Serpentine.
//!
//! The [`Session`] owns the authoritative world together with the
//! pathfinding and feeding systems, and drives one simulation step per
//! [`Session::tick`]. An external timer is expected to call `tick` at a
//! fixed interval; player input arrives between ticks through
//! [`Session::handle_input`] as plain state writes that take effect at the
//! next decision point. Render snapshots and sound cues are emitted after
//! state mutation, never before.

use serpentine_core::{
    Collision, Command, ControlMode, Direction, Event, GameStatus, InputCommand, SoundCue,
};
use serpentine_system_feeding::Feeding;
use serpentine_system_pathfinding::Pathfinder;
use serpentine_world::{self as world, query, WallPlan, World, WorldConfig};

const PATHFINDER_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const FEEDING_SEED_SALT: u64 = 0x6a09_e667_f3bc_c909;

/// Recognized configuration options for one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Number of cell columns on the board.
    pub columns: u32,
    /// Number of cell rows on the board.
    pub rows: u32,
    /// Wall placement applied once at board construction.
    pub wall_plan: WallPlan,
    /// Ticks between snake advances.
    pub refresh_rate: u64,
    /// Ticks between guaranteed food spawns.
    pub food_add_rate: u64,
    /// Segment count the snake starts with.
    pub starting_snake_length: u32,
    /// Heading the snake faces before the first advance.
    pub starting_direction: Direction,
    /// Seed from which all session randomness is derived.
    pub rng_seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            columns: 25,
            rows: 25,
            wall_plan: WallPlan::Perimeter,
            refresh_rate: 2,
            food_add_rate: 25,
            starting_snake_length: 1,
            starting_direction: Direction::East,
            rng_seed: 0x5e44_7e5e,
        }
    }
}

impl SessionConfig {
    fn world_config(&self) -> WorldConfig {
        WorldConfig {
            columns: self.columns,
            rows: self.rows,
            wall_plan: self.wall_plan,
            starting_snake_length: self.starting_snake_length,
            starting_direction: self.starting_direction,
        }
    }
}

/// Everything one tick produced, emitted after all state mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the cycle that just completed.
    pub cycle: u64,
    /// Terminal flag after the tick.
    pub status: GameStatus,
    /// World events the tick produced, in order.
    pub events: Vec<Event>,
    /// Sound cues for the audio collaborator, derived from the events.
    pub sounds: Vec<SoundCue>,
}

/// Drives one game from creation to its terminal state.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    world: World,
    pathfinder: Pathfinder,
    feeding: Feeding,
    cycle: u64,
}

impl Session {
    /// Creates a session with a fresh world derived from the configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            world: World::new(&config.world_config()),
            pathfinder: Pathfinder::new(serpentine_system_pathfinding::Config::new(
                config.rng_seed ^ PATHFINDER_SEED_SALT,
            )),
            feeding: Feeding::new(serpentine_system_feeding::Config::new(
                config.food_add_rate,
                config.rng_seed ^ FEEDING_SEED_SALT,
            )),
            cycle: 0,
            config,
        }
    }

    /// Discards the current game and starts over with the same
    /// configuration. The world is replaced wholesale, never partially
    /// reset.
    pub fn new_game(&mut self) {
        *self = Self::new(self.config);
    }

    /// Read-only access to the authoritative world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Index of the next cycle to run.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Terminal flag of the current game.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        query::status(&self.world)
    }

    /// Captures the read-only frame for the render collaborator.
    #[must_use]
    pub fn snapshot(&self) -> query::BoardSnapshot {
        query::snapshot(&self.world)
    }

    /// Applies one input command.
    ///
    /// Direction and mode changes are plain state writes that affect only
    /// the next tick's decision point. The returned cues cover input that
    /// maps straight to audio ([`InputCommand::ReplayFoodSound`]).
    pub fn handle_input(&mut self, input: InputCommand) -> Vec<SoundCue> {
        let mut events = Vec::new();
        match input {
            InputCommand::North => self.apply(
                Command::SetDirection {
                    direction: Direction::North,
                },
                &mut events,
            ),
            InputCommand::South => self.apply(
                Command::SetDirection {
                    direction: Direction::South,
                },
                &mut events,
            ),
            InputCommand::East => self.apply(
                Command::SetDirection {
                    direction: Direction::East,
                },
                &mut events,
            ),
            InputCommand::West => self.apply(
                Command::SetDirection {
                    direction: Direction::West,
                },
                &mut events,
            ),
            InputCommand::Reverse => self.apply(Command::ReverseSnake, &mut events),
            InputCommand::ToggleAutopilot => {
                let mode = query::mode(&self.world).toggled();
                self.apply(Command::SetMode { mode }, &mut events);
            }
            InputCommand::ReplayFoodSound => return vec![SoundCue::FoodSpawned],
        }
        sound_cues(&events)
    }

    /// Runs one simulation step.
    ///
    /// Every `refresh_rate` cycles the snake advances, driven by the
    /// buffered direction in manual mode or by the pathfinder in autopilot.
    /// The feeding system then gets a chance to propose a spawn. A session
    /// whose game already ended returns an empty terminal report.
    pub fn tick(&mut self) -> TickReport {
        if self.status() == GameStatus::GameOver {
            return TickReport {
                cycle: self.cycle,
                status: GameStatus::GameOver,
                events: Vec::new(),
                sounds: Vec::new(),
            };
        }

        let mut events = Vec::new();

        if self.cycle % self.config.refresh_rate.max(1) == 0 {
            self.advance_snake(&mut events);
        }

        self.update_food(&mut events);

        let report = TickReport {
            cycle: self.cycle,
            status: self.status(),
            sounds: sound_cues(&events),
            events,
        };
        self.cycle = self.cycle.saturating_add(1);
        report
    }

    fn advance_snake(&mut self, out_events: &mut Vec<Event>) {
        let Some(head) = query::snake_head(&self.world) else {
            self.apply(
                Command::EndGame {
                    collision: Collision::Wall,
                },
                out_events,
            );
            return;
        };

        let target = match query::mode(&self.world) {
            ControlMode::Autopilot => {
                let board = query::board_view(&self.world);
                match self.pathfinder.next_move(&board, head) {
                    Ok(cell) => Some(cell),
                    Err(_) => None,
                }
            }
            ControlMode::Manual => head.offset(query::direction(&self.world)),
        };

        match target {
            Some(target) => self.apply(Command::MoveSnake { target }, out_events),
            // Either the pathfinder exhausted its fallback or a manual
            // heading points off the board edge; both are terminal.
            None => self.apply(
                Command::EndGame {
                    collision: Collision::Wall,
                },
                out_events,
            ),
        }
    }

    fn update_food(&mut self, out_events: &mut Vec<Event>) {
        if self.status() == GameStatus::GameOver {
            return;
        }

        let food_count = query::food_cells(&self.world).len();
        let free_cells = query::free_cells(&self.world);
        let mut commands = Vec::new();
        self.feeding
            .handle(self.cycle, food_count, &free_cells, &mut commands);
        for command in commands {
            self.apply(command, out_events);
        }
    }

    fn apply(&mut self, command: Command, out_events: &mut Vec<Event>) {
        world::apply(&mut self.world, command, out_events);
    }
}

fn sound_cues(events: &[Event]) -> Vec<SoundCue> {
    let mut cues = Vec::new();
    for event in events {
        match event {
            Event::FoodEaten { .. } => cues.push(SoundCue::FoodEaten),
            Event::FoodSpawned { .. } => cues.push(SoundCue::FoodSpawned),
            Event::GameEnded { .. } => cues.push(SoundCue::GameOver),
            _ => {}
        }
    }
    cues
}
