#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first-search pathfinder that steers the snake toward food.
//!
//! Given the board and the snake head, [`Pathfinder::next_move`] finds the
//! nearest reachable food by hop count and returns the single next cell the
//! snake should enter. Tie-breaks between equally distant food cells are
//! fully determined by the board's fixed neighbor scan order (North, East,
//! South, West), so repeated searches over the same state return the same
//! answer.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serpentine_core::{CellCoord, Occupancy};
use serpentine_world::query::BoardView;
use thiserror::Error;

/// Raised when neither food nor any in-bounds neighbor is available.
///
/// Sessions treat this as an unrecoverable board configuration and end the
/// game rather than propagating a crash.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PathfindingError {
    /// The head has no in-bounds neighbor to move to.
    #[error("snake head has no valid move available")]
    NoValidMove,
}

/// Configuration parameters required to construct the pathfinder.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided fallback RNG seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that computes the snake's next move via breadth-first search.
///
/// The search overlay (visited flags and parent pointers) lives here, not on
/// the board: it is scratch state reset before every independent search, and
/// keeping it out of the world prevents one tick's search from leaking into
/// the next.
#[derive(Debug)]
pub struct Pathfinder {
    overlay: SearchOverlay,
    rng: ChaCha8Rng,
}

impl Pathfinder {
    /// Creates a new pathfinder using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            overlay: SearchOverlay::default(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Computes the next cell on a shortest path to the nearest food.
    ///
    /// Walls and body segments are never traversed. When no food is
    /// reachable the fallback picks a random in-bounds neighbor of the head,
    /// preferring traversable cells when any exist.
    ///
    /// # Errors
    ///
    /// Returns [`PathfindingError::NoValidMove`] when the head has no
    /// in-bounds neighbor at all.
    pub fn next_move(
        &mut self,
        board: &BoardView<'_>,
        head: CellCoord,
    ) -> Result<CellCoord, PathfindingError> {
        match self.nearest_food(board, head) {
            Some(food) => match self.first_step_toward(head, food) {
                Some(step) => Ok(step),
                // Unreachable while the parent chain invariant holds; the
                // fallback keeps the game alive rather than panicking.
                None => self.random_neighbor(board, head),
            },
            None => self.random_neighbor(board, head),
        }
    }

    /// Breadth-first search rooted at the head.
    ///
    /// Neighbors are marked visited and given their parent at enqueue time,
    /// which both prevents duplicate enqueues and pins the tie-break to
    /// "first discovered in scan order". Non-traversable cells may be
    /// enqueued but are skipped at dequeue, never expanded.
    fn nearest_food(&mut self, board: &BoardView<'_>, head: CellCoord) -> Option<CellCoord> {
        let (columns, rows) = board.dimensions();
        self.overlay.reset(columns, rows);

        let mut queue = VecDeque::new();
        self.overlay.visit(head, None);
        queue.push_back(head);

        while let Some(cell) = queue.pop_front() {
            let Some(occupancy) = board.occupancy(cell) else {
                continue;
            };
            match occupancy {
                Occupancy::Wall | Occupancy::Body => continue,
                Occupancy::Food => return Some(cell),
                Occupancy::Empty | Occupancy::Head => {}
            }

            for neighbor in board.neighbors(cell) {
                if !self.overlay.is_visited(neighbor) {
                    self.overlay.visit(neighbor, Some(cell));
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }

    /// Walks the parent chain back from the food to the cell whose parent is
    /// the head. That cell is the first step of a shortest path; when the
    /// head is already adjacent to the food, it is the food cell itself.
    fn first_step_toward(&self, head: CellCoord, food: CellCoord) -> Option<CellCoord> {
        let mut cursor = food;
        while let Some(parent) = self.overlay.parent(cursor) {
            if parent == head {
                return Some(cursor);
            }
            cursor = parent;
        }
        None
    }

    fn random_neighbor(
        &mut self,
        board: &BoardView<'_>,
        head: CellCoord,
    ) -> Result<CellCoord, PathfindingError> {
        let mut traversable = Vec::with_capacity(4);
        let mut blocked = Vec::with_capacity(4);
        for neighbor in board.neighbors(head) {
            match board.occupancy(neighbor) {
                Some(occupancy) if occupancy.is_traversable() => traversable.push(neighbor),
                Some(_) => blocked.push(neighbor),
                None => {}
            }
        }

        let pool = if traversable.is_empty() {
            &blocked
        } else {
            &traversable
        };
        if pool.is_empty() {
            return Err(PathfindingError::NoValidMove);
        }

        let index = self.rng.gen_range(0..pool.len());
        Ok(pool[index])
    }
}

/// Ephemeral per-search metadata, reset before every independent search.
#[derive(Debug, Default)]
struct SearchOverlay {
    columns: u32,
    rows: u32,
    visited: Vec<bool>,
    parent: Vec<Option<CellCoord>>,
}

impl SearchOverlay {
    fn reset(&mut self, columns: u32, rows: u32) {
        let cell_count_u64 = u64::from(columns) * u64::from(rows);
        let cell_count = usize::try_from(cell_count_u64).unwrap_or(0);

        self.columns = columns;
        self.rows = rows;

        if self.visited.len() != cell_count {
            self.visited = vec![false; cell_count];
            self.parent = vec![None; cell_count];
        } else {
            self.visited.fill(false);
            self.parent.fill(None);
        }
    }

    fn visit(&mut self, cell: CellCoord, parent: Option<CellCoord>) {
        if let Some(index) = self.index(cell) {
            self.visited[index] = true;
            self.parent[index] = parent;
        }
    }

    fn is_visited(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(true, |index| self.visited[index])
    }

    fn parent(&self, cell: CellCoord) -> Option<CellCoord> {
        self.index(cell).and_then(|index| self.parent[index])
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_reset_clears_previous_search_state() {
        let mut overlay = SearchOverlay::default();
        overlay.reset(3, 3);
        overlay.visit(CellCoord::new(1, 1), Some(CellCoord::new(0, 1)));
        assert!(overlay.is_visited(CellCoord::new(1, 1)));

        overlay.reset(3, 3);
        assert!(!overlay.is_visited(CellCoord::new(1, 1)));
        assert_eq!(overlay.parent(CellCoord::new(1, 1)), None);
    }

    #[test]
    fn overlay_treats_out_of_bounds_cells_as_visited() {
        let mut overlay = SearchOverlay::default();
        overlay.reset(2, 2);
        assert!(overlay.is_visited(CellCoord::new(2, 0)));
        assert!(overlay.is_visited(CellCoord::new(0, 2)));
    }

    #[test]
    fn overlay_resizes_when_dimensions_change() {
        let mut overlay = SearchOverlay::default();
        overlay.reset(2, 2);
        overlay.visit(CellCoord::new(1, 1), None);

        overlay.reset(4, 4);
        assert!(!overlay.is_visited(CellCoord::new(1, 1)));
        assert!(!overlay.is_visited(CellCoord::new(3, 3)));
    }
}
