//! Dense occupancy board with immutable wall topology.

use serpentine_core::{CellCoord, Occupancy};
use thiserror::Error;

/// Wall placement applied exactly once when a board is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallPlan {
    /// A one-cell wall ring around the board edge, the default play layout.
    Perimeter,
    /// No walls anywhere; the board edge itself bounds movement.
    Open,
}

/// Raised when a cell access lands outside the board dimensions.
///
/// Out-of-bounds access is a programming error in correct integrations, so
/// internal paths additionally `debug_assert!` before reaching for this.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The requested cell lies outside the configured dimensions.
    #[error("cell ({column}, {row}) lies outside the {columns}x{rows} board")]
    OutOfBounds {
        /// Column index of the rejected access.
        column: u32,
        /// Row index of the rejected access.
        row: u32,
        /// Number of columns on the board.
        columns: u32,
        /// Number of rows on the board.
        rows: u32,
    },
}

/// Fixed-size occupancy grid stored in row-major order.
#[derive(Clone, Debug)]
pub struct Board {
    columns: u32,
    rows: u32,
    cells: Vec<Occupancy>,
}

impl Board {
    /// Creates a board of the requested dimensions with walls placed per the
    /// provided plan.
    #[must_use]
    pub(crate) fn new(columns: u32, rows: u32, wall_plan: WallPlan) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut board = Self {
            columns,
            rows,
            cells: vec![Occupancy::Empty; capacity],
        };

        if wall_plan == WallPlan::Perimeter {
            for row in 0..rows {
                for column in 0..columns {
                    if row == 0 || row + 1 == rows || column == 0 || column + 1 == columns {
                        board.set(CellCoord::new(column, row), Occupancy::Wall);
                    }
                }
            }
        }

        board
    }

    /// Number of cell columns on the board.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows on the board.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Occupancy of the provided cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] when the cell lies outside the
    /// board dimensions.
    pub fn occupancy(&self, cell: CellCoord) -> Result<Occupancy, GridError> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .ok_or(GridError::OutOfBounds {
                column: cell.column(),
                row: cell.row(),
                columns: self.columns,
                rows: self.rows,
            })
    }

    /// Dense row-major occupancy cells.
    #[must_use]
    pub(crate) fn cells(&self) -> &[Occupancy] {
        &self.cells
    }

    pub(crate) fn set(&mut self, cell: CellCoord, occupancy: Occupancy) {
        debug_assert!(
            self.index(cell).is_some(),
            "occupancy write to out-of-bounds cell {cell:?}"
        );
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = occupancy;
            }
        }
    }

    /// In-bounds neighbors of the cell in fixed scan order: North, East,
    /// South, West.
    ///
    /// The order is load-bearing: breadth-first searches inherit their
    /// tie-break behavior from it, so every consumer must observe neighbors
    /// through this iterator rather than enumerating offsets itself.
    #[must_use]
    pub fn neighbors(&self, cell: CellCoord) -> NeighborIter {
        let mut neighbors = NeighborIter::default();

        if cell.row() > 0 {
            neighbors.push(CellCoord::new(cell.column(), cell.row() - 1));
        }
        if cell.column() + 1 < self.columns {
            neighbors.push(CellCoord::new(cell.column() + 1, cell.row()));
        }
        if cell.row() + 1 < self.rows {
            neighbors.push(CellCoord::new(cell.column(), cell.row() + 1));
        }
        if cell.column() > 0 {
            neighbors.push(CellCoord::new(cell.column() - 1, cell.row()));
        }

        neighbors
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

/// Fixed-capacity iterator over a cell's in-bounds neighbors.
#[derive(Clone, Debug, Default)]
pub struct NeighborIter {
    buffer: [Option<CellCoord>; 4],
    len: usize,
    cursor: usize,
}

impl NeighborIter {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}
