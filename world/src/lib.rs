#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game-state management for Serpentine.
//!
//! The [`World`] owns the board, the snake, and the food set for exactly one
//! game. It is mutated only through [`apply`] and read only through the
//! [`query`] module. A new game replaces the world wholesale; there is no
//! partial reset.

mod board;

use std::collections::{BTreeSet, VecDeque};

use serpentine_core::{
    CellCoord, Collision, Command, ControlMode, Direction, Event, GameStatus, Occupancy,
    WELCOME_BANNER,
};

pub use board::{Board, GridError, NeighborIter, WallPlan};

/// Parameters required to construct a fresh world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Number of cell columns on the board.
    pub columns: u32,
    /// Number of cell rows on the board.
    pub rows: u32,
    /// Wall placement applied once at construction.
    pub wall_plan: WallPlan,
    /// Segment count the snake starts with, clamped to the available space.
    pub starting_snake_length: u32,
    /// Heading the snake faces before the first advance.
    pub starting_direction: Direction,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            columns: 25,
            rows: 25,
            wall_plan: WallPlan::Perimeter,
            starting_snake_length: 1,
            starting_direction: Direction::East,
        }
    }
}

/// Represents the authoritative Serpentine game state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    snake: VecDeque<CellCoord>,
    food: BTreeSet<CellCoord>,
    direction: Direction,
    mode: ControlMode,
    status: GameStatus,
}

impl World {
    /// Creates a new world ready for simulation.
    ///
    /// The snake spawns head-first along the starting direction, centered on
    /// the board, with its length clamped so every segment fits on a
    /// traversable cell.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        let board = Board::new(config.columns, config.rows, config.wall_plan);
        let snake = place_snake(&board, config);
        let mut world = Self {
            banner: WELCOME_BANNER,
            board,
            snake,
            food: BTreeSet::new(),
            direction: config.starting_direction,
            mode: ControlMode::Manual,
            status: GameStatus::Running,
        };
        world.stamp_snake();
        world
    }

    fn stamp_snake(&mut self) {
        for (index, cell) in self.snake.iter().enumerate() {
            let occupancy = if index == 0 {
                Occupancy::Head
            } else {
                Occupancy::Body
            };
            self.board.set(*cell, occupancy);
        }
    }

    fn head(&self) -> Option<CellCoord> {
        self.snake.front().copied()
    }

    fn advance_head(&mut self, target: CellCoord) {
        if let Some(old_head) = self.head() {
            self.board.set(old_head, Occupancy::Body);
        }
        self.snake.push_front(target);
        self.board.set(target, Occupancy::Head);
    }

    fn drop_tail(&mut self) {
        // Snake coordinates never repeat, so clearing by coordinate is safe
        // even in the length-1 case where the tail is the former head.
        if let Some(tail) = self.snake.pop_back() {
            self.board.set(tail, Occupancy::Empty);
        }
    }

    fn move_snake(&mut self, target: CellCoord, out_events: &mut Vec<Event>) {
        let Some(head) = self.head() else {
            return;
        };
        debug_assert!(
            head.is_adjacent_to(target),
            "move target {target:?} is not adjacent to head {head:?}"
        );

        let occupancy = match self.board.occupancy(target) {
            Ok(occupancy) => occupancy,
            // Off-board targets only occur on wall-free boards when a manual
            // heading points over the edge; the edge behaves like a wall.
            Err(_) => {
                self.end_game(Collision::Wall, out_events);
                return;
            }
        };

        match occupancy {
            Occupancy::Wall => self.end_game(Collision::Wall, out_events),
            Occupancy::Head | Occupancy::Body => self.end_game(Collision::Body, out_events),
            Occupancy::Food => {
                let _ = self.food.remove(&target);
                self.advance_head(target);
                out_events.push(Event::SnakeAdvanced {
                    from: head,
                    to: target,
                });
                out_events.push(Event::FoodEaten { cell: target });
            }
            Occupancy::Empty => {
                self.advance_head(target);
                self.drop_tail();
                out_events.push(Event::SnakeAdvanced {
                    from: head,
                    to: target,
                });
            }
        }
    }

    fn reverse_snake(&mut self, out_events: &mut Vec<Event>) {
        let Some(old_head) = self.head() else {
            return;
        };

        self.board.set(old_head, Occupancy::Body);
        self.snake.make_contiguous().reverse();

        if let Some(new_head) = self.head() {
            self.board.set(new_head, Occupancy::Head);
            out_events.push(Event::SnakeReversed { new_head });
        }
    }

    fn spawn_food(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        // Stale spawn decisions (cell no longer empty) are dropped silently.
        if self.board.occupancy(cell) != Ok(Occupancy::Empty) {
            return;
        }

        self.board.set(cell, Occupancy::Food);
        let _ = self.food.insert(cell);
        out_events.push(Event::FoodSpawned { cell });
    }

    fn end_game(&mut self, collision: Collision, out_events: &mut Vec<Event>) {
        self.status = GameStatus::GameOver;
        out_events.push(Event::GameEnded { collision });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(&WorldConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// A world whose status is [`GameStatus::GameOver`] is terminal: every
/// command is ignored until the session replaces the world wholesale.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.status == GameStatus::GameOver {
        return;
    }

    match command {
        Command::SetDirection { direction } => {
            world.direction = direction;
            out_events.push(Event::DirectionChanged { direction });
        }
        Command::SetMode { mode } => {
            world.mode = mode;
            out_events.push(Event::ModeChanged { mode });
        }
        Command::MoveSnake { target } => world.move_snake(target, out_events),
        Command::ReverseSnake => world.reverse_snake(out_events),
        Command::SpawnFood { cell } => world.spawn_food(cell, out_events),
        Command::EndGame { collision } => world.end_game(collision, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Board, World};
    use serpentine_core::{CellCoord, ControlMode, Direction, GameStatus, Occupancy};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the board's occupancy grid.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView<'_> {
        BoardView {
            board: &world.board,
        }
    }

    /// The current head cell, if the snake exists.
    #[must_use]
    pub fn snake_head(world: &World) -> Option<CellCoord> {
        world.snake.front().copied()
    }

    /// Snake coordinates in order, head first, tail last.
    #[must_use]
    pub fn snake_cells(world: &World) -> Vec<CellCoord> {
        world.snake.iter().copied().collect()
    }

    /// Number of segments composing the snake.
    #[must_use]
    pub fn snake_len(world: &World) -> usize {
        world.snake.len()
    }

    /// Coordinates currently holding food, in deterministic sorted order.
    #[must_use]
    pub fn food_cells(world: &World) -> Vec<CellCoord> {
        world.food.iter().copied().collect()
    }

    /// Empty cells available for food spawning, in row-major order.
    #[must_use]
    pub fn free_cells(world: &World) -> Vec<CellCoord> {
        let board = &world.board;
        let mut cells = Vec::new();
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                let cell = CellCoord::new(column, row);
                if board.occupancy(cell) == Ok(Occupancy::Empty) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Heading buffered for the next manual advance.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.direction
    }

    /// Active control mode.
    #[must_use]
    pub fn mode(world: &World) -> ControlMode {
        world.mode
    }

    /// Terminal flag for the current game.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }

    /// Captures the read-only snapshot consumed by render collaborators.
    #[must_use]
    pub fn snapshot(world: &World) -> BoardSnapshot {
        BoardSnapshot {
            columns: world.board.columns(),
            rows: world.board.rows(),
            cells: world.board.cells().to_vec(),
            snake: snake_cells(world),
            food: food_cells(world),
            status: world.status,
        }
    }

    /// Read-only view into the dense occupancy grid.
    #[derive(Clone, Copy, Debug)]
    pub struct BoardView<'a> {
        board: &'a Board,
    }

    impl BoardView<'_> {
        /// Occupancy of the provided cell, if it lies on the board.
        #[must_use]
        pub fn occupancy(&self, cell: CellCoord) -> Option<Occupancy> {
            self.board.occupancy(cell).ok()
        }

        /// In-bounds neighbors of the cell in fixed scan order.
        #[must_use]
        pub fn neighbors(&self, cell: CellCoord) -> super::NeighborIter {
            self.board.neighbors(cell)
        }

        /// Provides the dimensions of the underlying board.
        #[must_use]
        pub fn dimensions(&self) -> (u32, u32) {
            (self.board.columns(), self.board.rows())
        }
    }

    /// Immutable frame handed to render collaborators after each tick.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct BoardSnapshot {
        /// Number of cell columns on the board.
        pub columns: u32,
        /// Number of cell rows on the board.
        pub rows: u32,
        /// Dense row-major occupancy grid.
        pub cells: Vec<Occupancy>,
        /// Snake coordinates, head first.
        pub snake: Vec<CellCoord>,
        /// Food coordinates in sorted order.
        pub food: Vec<CellCoord>,
        /// Terminal flag at capture time.
        pub status: GameStatus,
    }
}

fn place_snake(board: &Board, config: &WorldConfig) -> VecDeque<CellCoord> {
    let mut snake = VecDeque::new();
    let Some(head) = starting_head(board) else {
        return snake;
    };
    snake.push_back(head);

    // The body trails away from the heading so the first advance is legal.
    let trailing = opposite(config.starting_direction);
    let mut cursor = head;
    for _ in 1..config.starting_snake_length.max(1) {
        let Some(next) = cursor.offset(trailing) else {
            break;
        };
        if board.occupancy(next) != Ok(Occupancy::Empty) {
            break;
        }
        snake.push_back(next);
        cursor = next;
    }

    snake
}

fn starting_head(board: &Board) -> Option<CellCoord> {
    let center = CellCoord::new(board.columns() / 2, board.rows() / 2);
    if board.occupancy(center) == Ok(Occupancy::Empty) {
        return Some(center);
    }

    // Degenerate layouts (tiny boards fully ringed by wall) fall back to the
    // first traversable cell in row-major order.
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let cell = CellCoord::new(column, row);
            if board.occupancy(cell) == Ok(Occupancy::Empty) {
                return Some(cell);
            }
        }
    }
    None
}

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::North => Direction::South,
        Direction::East => Direction::West,
        Direction::South => Direction::North,
        Direction::West => Direction::East,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_world(columns: u32, rows: u32) -> World {
        World::new(&WorldConfig {
            columns,
            rows,
            wall_plan: WallPlan::Open,
            starting_snake_length: 1,
            starting_direction: Direction::East,
        })
    }

    fn occupancy(world: &World, cell: CellCoord) -> Occupancy {
        query::board_view(world)
            .occupancy(cell)
            .expect("cell on board")
    }

    #[test]
    fn new_world_places_a_single_head_at_center() {
        let world = open_world(5, 5);
        let head = CellCoord::new(2, 2);
        assert_eq!(query::snake_head(&world), Some(head));
        assert_eq!(query::snake_len(&world), 1);
        assert_eq!(occupancy(&world, head), Occupancy::Head);
    }

    #[test]
    fn starting_length_extends_away_from_heading() {
        let world = World::new(&WorldConfig {
            columns: 7,
            rows: 7,
            wall_plan: WallPlan::Open,
            starting_snake_length: 3,
            starting_direction: Direction::East,
        });

        assert_eq!(
            query::snake_cells(&world),
            vec![
                CellCoord::new(3, 3),
                CellCoord::new(2, 3),
                CellCoord::new(1, 3),
            ]
        );
        assert_eq!(occupancy(&world, CellCoord::new(3, 3)), Occupancy::Head);
        assert_eq!(occupancy(&world, CellCoord::new(2, 3)), Occupancy::Body);
    }

    #[test]
    fn perimeter_plan_rings_the_board_with_walls() {
        let world = World::new(&WorldConfig {
            columns: 5,
            rows: 4,
            wall_plan: WallPlan::Perimeter,
            starting_snake_length: 1,
            starting_direction: Direction::East,
        });

        for column in 0..5 {
            assert_eq!(occupancy(&world, CellCoord::new(column, 0)), Occupancy::Wall);
            assert_eq!(occupancy(&world, CellCoord::new(column, 3)), Occupancy::Wall);
        }
        for row in 0..4 {
            assert_eq!(occupancy(&world, CellCoord::new(0, row)), Occupancy::Wall);
            assert_eq!(occupancy(&world, CellCoord::new(4, row)), Occupancy::Wall);
        }
        assert_eq!(occupancy(&world, CellCoord::new(1, 1)), Occupancy::Empty);
    }

    #[test]
    fn moving_onto_empty_preserves_length_and_food() {
        let mut world = open_world(5, 5);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnFood {
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(3, 2),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::SnakeAdvanced {
                from: CellCoord::new(2, 2),
                to: CellCoord::new(3, 2),
            }]
        );
        assert_eq!(query::snake_len(&world), 1);
        assert_eq!(query::food_cells(&world), vec![CellCoord::new(0, 0)]);
        assert_eq!(occupancy(&world, CellCoord::new(2, 2)), Occupancy::Empty);
        assert_eq!(occupancy(&world, CellCoord::new(3, 2)), Occupancy::Head);
    }

    #[test]
    fn moving_onto_food_grows_by_one_and_consumes_it() {
        let mut world = open_world(5, 5);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnFood {
                cell: CellCoord::new(3, 2),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(3, 2),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::SnakeAdvanced {
                    from: CellCoord::new(2, 2),
                    to: CellCoord::new(3, 2),
                },
                Event::FoodEaten {
                    cell: CellCoord::new(3, 2),
                },
            ]
        );
        assert_eq!(query::snake_len(&world), 2);
        assert!(query::food_cells(&world).is_empty());
        assert_eq!(occupancy(&world, CellCoord::new(2, 2)), Occupancy::Body);
        assert_eq!(occupancy(&world, CellCoord::new(3, 2)), Occupancy::Head);
    }

    #[test]
    fn moving_onto_wall_ends_the_game_without_mutating_the_snake() {
        let mut world = World::new(&WorldConfig {
            columns: 5,
            rows: 5,
            wall_plan: WallPlan::Perimeter,
            starting_snake_length: 1,
            starting_direction: Direction::East,
        });
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(3, 2),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(4, 2),
            },
            &mut events,
        );

        assert!(events.contains(&Event::GameEnded {
            collision: Collision::Wall
        }));
        assert_eq!(query::status(&world), GameStatus::GameOver);
        assert_eq!(query::snake_cells(&world), vec![CellCoord::new(3, 2)]);
    }

    #[test]
    fn moving_onto_body_ends_the_game_without_mutating_the_snake() {
        let mut world = World::new(&WorldConfig {
            columns: 5,
            rows: 5,
            wall_plan: WallPlan::Open,
            starting_snake_length: 3,
            starting_direction: Direction::East,
        });
        let before = query::snake_cells(&world);
        let mut events = Vec::new();

        // Head is at (2, 2) with body at (1, 2); turning back is fatal.
        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(1, 2),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::GameEnded {
                collision: Collision::Body
            }]
        );
        assert_eq!(query::status(&world), GameStatus::GameOver);
        assert_eq!(query::snake_cells(&world), before);
    }

    #[test]
    fn moving_off_an_open_board_collides_like_a_wall() {
        let mut world = open_world(3, 3);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(2, 1),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(3, 1),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::GameEnded {
                collision: Collision::Wall
            }]
        );
    }

    #[test]
    fn reversing_twice_restores_the_original_order() {
        let mut world = World::new(&WorldConfig {
            columns: 7,
            rows: 7,
            wall_plan: WallPlan::Open,
            starting_snake_length: 4,
            starting_direction: Direction::East,
        });
        let original = query::snake_cells(&world);
        let mut events = Vec::new();

        apply(&mut world, Command::ReverseSnake, &mut events);
        let reversed = query::snake_cells(&world);
        let mut expected = original.clone();
        expected.reverse();
        assert_eq!(reversed, expected);
        assert_eq!(
            events,
            vec![Event::SnakeReversed {
                new_head: CellCoord::new(0, 3)
            }]
        );
        assert_eq!(occupancy(&world, CellCoord::new(0, 3)), Occupancy::Head);
        assert_eq!(occupancy(&world, CellCoord::new(3, 3)), Occupancy::Body);

        apply(&mut world, Command::ReverseSnake, &mut events);
        assert_eq!(query::snake_cells(&world), original);
    }

    #[test]
    fn spawn_food_rejects_occupied_cells() {
        let mut world = open_world(5, 5);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SpawnFood {
                cell: CellCoord::new(2, 2),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(query::food_cells(&world).is_empty());
        assert_eq!(occupancy(&world, CellCoord::new(2, 2)), Occupancy::Head);
    }

    #[test]
    fn food_set_mirrors_food_occupancy() {
        let mut world = open_world(5, 5);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnFood {
                cell: CellCoord::new(4, 4),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnFood {
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        );

        for cell in query::food_cells(&world) {
            assert_eq!(occupancy(&world, cell), Occupancy::Food);
        }
        assert_eq!(query::food_cells(&world).len(), 2);
    }

    #[test]
    fn game_over_worlds_ignore_every_command() {
        let mut world = open_world(3, 3);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(2, 1),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::MoveSnake {
                target: CellCoord::new(3, 1),
            },
            &mut events,
        );
        assert_eq!(query::status(&world), GameStatus::GameOver);
        let frozen = query::snapshot(&world);
        events.clear();

        apply(
            &mut world,
            Command::SetDirection {
                direction: Direction::North,
            },
            &mut events,
        );
        apply(&mut world, Command::ReverseSnake, &mut events);
        apply(
            &mut world,
            Command::SpawnFood {
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::snapshot(&world), frozen);
    }

    #[test]
    fn mode_and_direction_writes_take_effect_immediately() {
        let mut world = open_world(5, 5);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SetDirection {
                direction: Direction::North,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetMode {
                mode: ControlMode::Autopilot,
            },
            &mut events,
        );

        assert_eq!(query::direction(&world), Direction::North);
        assert_eq!(query::mode(&world), ControlMode::Autopilot);
        assert_eq!(
            events,
            vec![
                Event::DirectionChanged {
                    direction: Direction::North
                },
                Event::ModeChanged {
                    mode: ControlMode::Autopilot
                },
            ]
        );
    }

    #[test]
    fn snapshot_reflects_board_and_status() {
        let world = open_world(4, 3);
        let snapshot = query::snapshot(&world);

        assert_eq!(snapshot.columns, 4);
        assert_eq!(snapshot.rows, 3);
        assert_eq!(snapshot.cells.len(), 12);
        assert_eq!(snapshot.snake, vec![CellCoord::new(2, 1)]);
        assert_eq!(snapshot.status, GameStatus::Running);
    }
}
