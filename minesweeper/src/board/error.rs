/// The error type for loading a board from its textual 0/1 representation.
#[derive(Debug)]
pub enum LoadBoardError {
    Io(std::io::Error),
    Empty,
    /// A line has a different number of values than the first line.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    InvalidValue {
        row: usize,
        column: usize,
        value: String,
    },
    /// The number of lines does not match the number of values per line.
    NotSquare { rows: usize, columns: usize },
}

impl std::error::Error for LoadBoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadBoardError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadBoardError {
    fn from(err: std::io::Error) -> Self {
        LoadBoardError::Io(err)
    }
}

impl std::fmt::Display for LoadBoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadBoardError::Io(_) => write!(f, "Could not read the board file"),
            LoadBoardError::Empty => write!(f, "The board file contains no lines"),
            LoadBoardError::RaggedRow { row, expected, found } => write!(
                f,
                "Line {} has {} values, but the first line has {}",
                row + 1,
                found,
                expected
            ),
            LoadBoardError::InvalidValue { row, column, value } => write!(
                f,
                "Value {:?} in line {}, column {} is neither 0 nor 1",
                value,
                row + 1,
                column + 1
            ),
            LoadBoardError::NotSquare { rows, columns } => write!(
                f,
                "The board has {} lines of {} values each, but it must be square",
                rows, columns
            ),
        }
    }
}

/// A generated board whose cells cannot be allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardTooLarge {
    pub size: usize,
}

impl std::error::Error for BoardTooLarge {}

impl std::fmt::Display for BoardTooLarge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A board of size {} does not fit in memory", self.size)
    }
}
