#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Serpentine engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems consume immutable views of the world and
//! respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Serpentine.";

/// Location of a single board cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Reports whether two coordinates are orthogonal grid neighbors.
    #[must_use]
    pub fn is_adjacent_to(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Coordinate one step in the provided direction, if it does not
    /// underflow the grid origin. Callers remain responsible for checking
    /// the upper board bounds.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self
                .row
                .checked_add(1)
                .map(|row| Self::new(self.column, row)),
            Direction::West => self.column.checked_sub(1).map(|column| Self::new(column, self.row)),
        }
    }
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

/// Mutually exclusive state held by a single board cell.
///
/// Walls are immutable for the lifetime of a board; at most one cell holds
/// [`Occupancy::Head`] at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    /// Traversable cell containing nothing.
    Empty,
    /// Immutable obstacle; fatal to enter.
    Wall,
    /// The snake's head segment.
    Head,
    /// A non-head snake segment; fatal to enter.
    Body,
    /// A spawned food item; entering it grows the snake.
    Food,
}

impl Occupancy {
    /// Reports whether a searching or moving snake may pass through the cell.
    #[must_use]
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Empty | Self::Food)
    }
}

/// Selects which component supplies the snake's next-move decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlMode {
    /// The player's buffered direction drives each advance.
    Manual,
    /// The breadth-first-search pathfinder drives each advance.
    Autopilot,
}

impl ControlMode {
    /// The opposite mode, used by the toggle input command.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Manual => Self::Autopilot,
            Self::Autopilot => Self::Manual,
        }
    }
}

/// Terminal flag describing whether the simulation still accepts ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The snake is alive and the world accepts commands.
    Running,
    /// A collision ended the game; no further command mutates state.
    GameOver,
}

/// What the snake ran into when a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collision {
    /// The target cell was a wall (or lay off the board entirely).
    Wall,
    /// The target cell held one of the snake's own body segments.
    Body,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Updates the direction used for the next manual advance.
    SetDirection {
        /// Heading the snake should adopt at the next decision point.
        direction: Direction,
    },
    /// Switches between manual control and the autopilot pathfinder.
    SetMode {
        /// Mode the world should activate.
        mode: ControlMode,
    },
    /// Requests that the snake advance onto the provided cell.
    ///
    /// The target must be grid-adjacent to the current head; violating this
    /// is a caller contract error, not a runtime game event.
    MoveSnake {
        /// Cell the head should occupy after the move.
        target: CellCoord,
    },
    /// Reverses the snake so the tail becomes the head.
    ReverseSnake,
    /// Requests that food appear at the provided cell.
    ///
    /// Only an empty cell gains food; stale requests are ignored.
    SpawnFood {
        /// Cell chosen by the feeding system.
        cell: CellCoord,
    },
    /// Ends the game when no legal target cell can even be expressed,
    /// such as a manual heading pointing off a wall-free board or a
    /// pathfinder with no valid move left.
    EndGame {
        /// Collision category to report for the terminal transition.
        collision: Collision,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the buffered direction changed.
    DirectionChanged {
        /// Heading that will drive the next manual advance.
        direction: Direction,
    },
    /// Announces that the control mode changed.
    ModeChanged {
        /// Mode that became active.
        mode: ControlMode,
    },
    /// Confirms that the head moved between two adjacent cells.
    SnakeAdvanced {
        /// Cell the head occupied before the move.
        from: CellCoord,
        /// Cell the head occupies after the move.
        to: CellCoord,
    },
    /// Confirms that the snake consumed food and grew by one segment.
    FoodEaten {
        /// Cell that held the consumed food.
        cell: CellCoord,
    },
    /// Confirms that food appeared on the board.
    FoodSpawned {
        /// Cell that now holds food.
        cell: CellCoord,
    },
    /// Confirms that the snake reversed head-to-tail.
    SnakeReversed {
        /// Cell that became the new head.
        new_head: CellCoord,
    },
    /// Reports that a move was fatal and the game ended.
    GameEnded {
        /// What the snake collided with.
        collision: Collision,
    },
}

/// Discrete named cues delivered to the sound collaborator.
///
/// The core never blocks on playback; cues are fire-and-forget values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// The snake consumed a food item.
    FoodEaten,
    /// A food item appeared on the board.
    FoodSpawned,
    /// The game ended in a collision.
    GameOver,
}

/// Typed commands delivered by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputCommand {
    /// Steer north at the next decision point.
    North,
    /// Steer south at the next decision point.
    South,
    /// Steer east at the next decision point.
    East,
    /// Steer west at the next decision point.
    West,
    /// Reverse the snake head-to-tail.
    Reverse,
    /// Toggle between manual control and the autopilot.
    ToggleAutopilot,
    /// Replay the food jingle without touching the simulation.
    ReplayFoodSound,
}

impl InputCommand {
    /// Maps a raw key character onto an input command.
    ///
    /// Any unrecognized key deliberately falls through to [`Self::East`].
    /// This reproduces long-standing observable behavior rather than
    /// ignoring the key; see the session crate documentation before
    /// changing it.
    #[must_use]
    pub const fn from_key(key: char) -> Self {
        match key {
            'w' => Self::North,
            's' => Self::South,
            'a' => Self::West,
            'd' => Self::East,
            'r' => Self::Reverse,
            'q' => Self::ToggleAutopilot,
            'f' => Self::ReplayFoodSound,
            _ => Self::East,
        }
    }
}
