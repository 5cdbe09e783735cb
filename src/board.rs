//! Board & collision engine. Every operation returns a new `Board`.

use crate::piece::{filled_cells, ActivePiece, Colour, Shape};

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Filled(Colour),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// `GRID_HEIGHT` rows of `GRID_WIDTH` cells, row 0 at the top.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

fn empty_row() -> Vec<Cell> {
    vec![Cell::Empty; GRID_WIDTH]
}

fn in_bounds(x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as usize) < GRID_WIDTH && (y as usize) < GRID_HEIGHT
}

impl Board {
    pub fn empty() -> Self {
        Self {
            rows: (0..GRID_HEIGHT).map(|_| empty_row()).collect(),
        }
    }

    /// Builds a board from explicit rows. Returns `None` unless the grid is
    /// exactly `GRID_HEIGHT` × `GRID_WIDTH`.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let well_formed =
            rows.len() == GRID_HEIGHT && rows.iter().all(|row| row.len() == GRID_WIDTH);
        well_formed.then_some(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `(x, y)`, or `None` off the board.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !in_bounds(x, y) {
            return None;
        }
        Some(self.rows[y as usize][x as usize])
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_filled())
    }

    pub fn with_cell(&self, x: i32, y: i32, cell: Cell) -> Board {
        let mut next = self.clone();
        if in_bounds(x, y) {
            next.rows[y as usize][x as usize] = cell;
        }
        next
    }

    // ------------------------------------------------------------------------
    // Collision
    // ------------------------------------------------------------------------

    /// Whether `piece`, shifted by `(dx, dy)`, fits. Horizontal bounds and the
    /// floor are always checked; settled cells only block a downward probe
    /// (`dy == 1`).
    pub fn can_occupy(&self, piece: &ActivePiece, dx: i32, dy: i32) -> bool {
        piece.cells().all(|(x, y)| {
            let (x, y) = (x + dx, y + dy);
            if x < 0 || x >= GRID_WIDTH as i32 || y >= GRID_HEIGHT as i32 {
                return false;
            }
            !(dy == 1 && self.is_occupied(x, y))
        })
    }

    // ------------------------------------------------------------------------
    // Footprints
    // ------------------------------------------------------------------------

    /// Empties the whole bounding rectangle of `piece`, filled or not.
    pub fn clear_footprint(&self, piece: &ActivePiece) -> Board {
        let mut next = self.clone();
        let cols = piece.x..piece.x + piece.width() as i32;
        let rows = piece.y..piece.y + piece.height() as i32;
        for y in rows {
            for x in cols.clone() {
                if in_bounds(x, y) {
                    next.rows[y as usize][x as usize] = Cell::Empty;
                }
            }
        }
        next
    }

    /// Marks the filled cells of `shape` at `(at_x, at_y)`. Cells falling off
    /// the board are dropped.
    pub fn stamp_footprint(&self, shape: Shape, colour: Colour, at_x: i32, at_y: i32) -> Board {
        let mut next = self.clone();
        for (dx, dy) in filled_cells(shape) {
            let (x, y) = (at_x + dx, at_y + dy);
            if in_bounds(x, y) {
                next.rows[y as usize][x as usize] = Cell::Filled(colour);
            }
        }
        next
    }

    pub fn clear_and_stamp(
        &self,
        old: &ActivePiece,
        shape: Shape,
        colour: Colour,
        at_x: i32,
        at_y: i32,
    ) -> Board {
        self.clear_footprint(old).stamp_footprint(shape, colour, at_x, at_y)
    }

    // ------------------------------------------------------------------------
    // Line clear
    // ------------------------------------------------------------------------

    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows[y].iter().all(Cell::is_filled)
    }

    pub fn complete_rows(&self) -> Vec<usize> {
        (0..GRID_HEIGHT).filter(|y| self.is_row_complete(*y)).collect()
    }

    /// Drops every complete row and refills from the top. Returns the new
    /// board and the number of rows removed.
    pub fn clear_complete_rows(&self) -> (Board, u32) {
        let complete = self.complete_rows();
        let remaining: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(y, _)| !complete.contains(y))
            .map(|(_, row)| row.clone())
            .collect();
        let cleared = complete.len();

        let mut rows: Vec<Vec<Cell>> = (0..cleared).map(|_| empty_row()).collect();
        rows.extend(remaining);
        (Board { rows }, cleared as u32)
    }

    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.rows[y].iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn total_filled_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_filled()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;

    pub const DEBRIS: Cell = Cell::Filled(Colour::Purple);

    pub fn fill_row(board: &Board, y: usize) -> Board {
        (0..GRID_WIDTH).fold(board.clone(), |b, x| b.with_cell(x as i32, y as i32, DEBRIS))
    }

    /// Fills row `y` except for the columns in `gaps`.
    pub fn fill_row_with_gaps(board: &Board, y: usize, gaps: &[usize]) -> Board {
        (0..GRID_WIDTH)
            .filter(|x| !gaps.contains(x))
            .fold(board.clone(), |b, x| b.with_cell(x as i32, y as i32, DEBRIS))
    }
}
