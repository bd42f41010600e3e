/// What a player has done to a cell so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Untouched,
    Flagged,
    /// The cell has been revealed. This state is final.
    Dug {
        /// How many of the up to 8 neighbors hold a mine.
        adjacent_mines: u8,
    },
}

/// A single square of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub(crate) has_mine: bool,
    pub(crate) state: CellState,
}

impl Cell {
    pub fn new(has_mine: bool) -> Self {
        Self {
            has_mine,
            state: CellState::Untouched,
        }
    }

    /// Whether the cell still holds a mine.
    ///
    /// Digging a mine removes it, so this is `false` for every dug cell.
    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_dug(&self) -> bool {
        matches!(self.state, CellState::Dug { .. })
    }

    /// The character used for this cell in a board message.
    pub fn glyph(&self) -> char {
        match self.state {
            CellState::Untouched => '-',
            CellState::Flagged => 'F',
            CellState::Dug { adjacent_mines: 0 } => ' ',
            CellState::Dug { adjacent_mines } => char::from(b'0' + adjacent_mines),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
