use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Board, DigOutcome, Response};

/// A [`Board`] shared by all connections.
///
/// Every operation holds one board-wide lock for its whole duration,
/// including rendering the board message it returns. So a caller never sees
/// half of a cascade, and racing operations always end up in a state that
/// some sequential order of them would also produce.
///
/// Cloning is cheap and yields a handle to the same board.
#[derive(Clone, Debug)]
pub struct SharedBoard {
    inner: Arc<Mutex<Board>>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(Mutex::new(board)),
        }
    }

    // No operation can panic halfway through a mutation, so a poisoned lock
    // still guards a consistent board.
    fn lock(&self) -> MutexGuard<'_, Board> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn size(&self) -> usize {
        self.lock().size()
    }

    pub fn look(&self) -> Response {
        Response::Board(self.lock().look())
    }

    /// Digs at `(x, y)`, see [`Board::dig()`].
    ///
    /// Returns [`Response::Boom`] if a mine was hit, the board message otherwise.
    pub fn dig(&self, x: usize, y: usize) -> Response {
        let mut board = self.lock();
        match board.dig(x, y) {
            DigOutcome::Exploded => Response::Boom,
            DigOutcome::Revealed | DigOutcome::NoChange => Response::Board(board.look()),
        }
    }

    pub fn flag(&self, x: usize, y: usize) -> Response {
        let mut board = self.lock();
        board.flag(x, y);
        Response::Board(board.look())
    }

    pub fn deflag(&self, x: usize, y: usize) -> Response {
        let mut board = self.lock();
        board.deflag(x, y);
        Response::Board(board.look())
    }

    /// A copy of the current board.
    pub fn snapshot(&self) -> Board {
        self.lock().clone()
    }
}
