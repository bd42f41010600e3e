mod error;
mod shared;

use std::path::Path;
use std::str::FromStr;

pub use error::*;
pub use shared::*;

use rand::Rng;

use crate::{Cell, CellState};

/// The chance that any given cell of a generated board holds a mine.
pub const MINE_PROBABILITY: f64 = 0.25;

/// A square minesweeper grid.
///
/// Coordinates are `(x, y)` where `x` is the row and `y` the column of the
/// board message produced by the [`Display`](std::fmt::Display) impl.
///
/// This type is not synchronized. See [`SharedBoard`] for the version that is
/// shared between connections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major, `size * size` entries.
    cells: Vec<Cell>,
}

/// Summarizes what a [`Board::dig()`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigOutcome {
    /// Out of bounds, or the cell was not untouched.
    NoChange,
    /// The cell (and maybe more, through a cascade) was revealed.
    Revealed,
    /// The cell held a mine. The mine is gone now and the cell is revealed.
    Exploded,
}

impl Board {
    /// Creates a board from rows of mine flags.
    ///
    /// Panics if the rows do not form a square.
    pub fn from_rows(rows: &[Vec<bool>]) -> Self {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "board rows must form a square");
            cells.extend(row.iter().map(|&has_mine| Cell::new(has_mine)));
        }
        Self { size, cells }
    }

    /// Creates a `size` x `size` board where each cell holds a mine with
    /// probability [`MINE_PROBABILITY`].
    ///
    /// Fails if `size * size` cells overflow or cannot be allocated.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self, BoardTooLarge> {
        let len = size.checked_mul(size).ok_or(BoardTooLarge { size })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| BoardTooLarge { size })?;
        cells.extend((0..len).map(|_| Cell::new(rng.gen_bool(MINE_PROBABILITY))));
        Ok(Self { size, cells })
    }

    /// Reads a board file, see the [`FromStr`] impl for the format.
    pub fn load(path: &Path) -> Result<Self, LoadBoardError> {
        std::fs::read_to_string(path)?.parse()
    }

    /// The side length.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// The board message, i.e. the same as `to_string()`.
    pub fn look(&self) -> String {
        self.to_string()
    }

    /// Digs the cell at `(x, y)`.
    ///
    /// Does nothing if the coordinates are out of bounds or the cell is
    /// flagged or already dug. Digging a mine removes it, which changes the
    /// counts of the revealed cells around it. If the dug cell has no mines
    /// around it, its untouched neighbors are dug too, and so on.
    pub fn dig(&mut self, x: usize, y: usize) -> DigOutcome {
        let Some(idx) = self.index(x, y) else {
            return DigOutcome::NoChange;
        };
        if self.cells[idx].state != CellState::Untouched {
            return DigOutcome::NoChange;
        }

        let exploded = self.cells[idx].has_mine;
        if exploded {
            self.cells[idx].has_mine = false;
            self.update_counts(x, y);
        }
        self.reveal_from(x, y);

        if exploded {
            DigOutcome::Exploded
        } else {
            DigOutcome::Revealed
        }
    }

    /// Flags an untouched cell. Returns whether anything changed.
    pub fn flag(&mut self, x: usize, y: usize) -> bool {
        self.transition(x, y, CellState::Untouched, CellState::Flagged)
    }

    /// Removes the flag from a flagged cell. Returns whether anything changed.
    pub fn deflag(&mut self, x: usize, y: usize) -> bool {
        self.transition(x, y, CellState::Flagged, CellState::Untouched)
    }

    fn transition(&mut self, x: usize, y: usize, from: CellState, to: CellState) -> bool {
        match self.index(x, y) {
            Some(idx) if self.cells[idx].state == from => {
                self.cells[idx].state = to;
                true
            }
            _ => false,
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| x * self.size + y)
    }

    fn count_adjacent_mines(&self, x: usize, y: usize) -> u8 {
        neighbors(self.size, x, y)
            .filter(|&(i, j)| self.cells[i * self.size + j].has_mine)
            .count() as u8
    }

    /// Recomputes the counts of the revealed cells in the 3x3 area around
    /// `(x, y)`, after the mine at `(x, y)` was removed.
    fn update_counts(&mut self, x: usize, y: usize) {
        for (i, j) in neighborhood(self.size, x, y) {
            let idx = i * self.size + j;
            if self.cells[idx].is_dug() {
                self.cells[idx].state = CellState::Dug {
                    adjacent_mines: self.count_adjacent_mines(i, j),
                };
            }
        }
    }

    /// Marks the cell as dug and returns its mine count.
    fn mark_dug(&mut self, x: usize, y: usize) -> u8 {
        let adjacent_mines = self.count_adjacent_mines(x, y);
        self.cells[x * self.size + y].state = CellState::Dug { adjacent_mines };
        adjacent_mines
    }

    // Explicit worklist, the depth of a cascade is unbounded.
    fn reveal_from(&mut self, x: usize, y: usize) {
        if self.mark_dug(x, y) != 0 {
            return;
        }
        let mut pending = vec![(x, y)];
        while let Some((i, j)) = pending.pop() {
            for (ni, nj) in neighbors(self.size, i, j) {
                if self.cells[ni * self.size + nj].state == CellState::Untouched
                    && self.mark_dug(ni, nj) == 0
                {
                    pending.push((ni, nj));
                }
            }
        }
    }
}

/// All in-bounds coordinates of the 3x3 area centered on `(x, y)`.
fn neighborhood(size: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let last = size.saturating_sub(1);
    (x.saturating_sub(1)..=(x + 1).min(last))
        .flat_map(move |i| (y.saturating_sub(1)..=(y + 1).min(last)).map(move |j| (i, j)))
}

/// Like [`neighborhood()`], without the center.
fn neighbors(size: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    neighborhood(size, x, y).filter(move |&pos| pos != (x, y))
}

/// Parses the board file format: one line per row, each made of `0` (no
/// mine) or `1` (mine) values separated by single spaces. There must be as
/// many lines as there are values per line.
impl FromStr for Board {
    type Err = LoadBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for (row, line) in s.lines().enumerate() {
            let mut values = Vec::new();
            for (column, value) in line.split(' ').enumerate() {
                match value {
                    "0" => values.push(false),
                    "1" => values.push(true),
                    _ => {
                        return Err(LoadBoardError::InvalidValue {
                            row,
                            column,
                            value: String::from(value),
                        })
                    }
                }
            }
            if let Some(first) = rows.first() {
                if first.len() != values.len() {
                    return Err(LoadBoardError::RaggedRow {
                        row,
                        expected: first.len(),
                        found: values.len(),
                    });
                }
            }
            rows.push(values);
        }

        match rows.first() {
            None => Err(LoadBoardError::Empty),
            Some(first) if first.len() != rows.len() => Err(LoadBoardError::NotSquare {
                rows: rows.len(),
                columns: first.len(),
            }),
            Some(_) => Ok(Board::from_rows(&rows)),
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // A zero-sized board has no rows, so nothing to write.
        for row in self.cells.chunks(self.size.max(1)) {
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
