use quickcheck::{Arbitrary, Gen};

use crate::Board;

/// The mine layout of a small square board.
#[derive(Clone, Debug)]
pub struct MineField {
    pub rows: Vec<Vec<bool>>,
}

impl MineField {
    pub fn to_board(&self) -> Board {
        Board::from_rows(&self.rows)
    }
}

impl Arbitrary for MineField {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = usize::from(u8::arbitrary(g) % 8);
        // Roughly one mine in four, like generated boards
        let rows = (0..size)
            .map(|_| (0..size).map(|_| u8::arbitrary(g) % 4 == 0).collect())
            .collect();
        MineField { rows }
    }
}

/// A player move, with coordinates that are sometimes out of bounds.
#[derive(Clone, Copy, Debug)]
pub enum Action {
    Dig(usize, usize),
    Flag(usize, usize),
    Deflag(usize, usize),
}

impl Arbitrary for Action {
    fn arbitrary(g: &mut Gen) -> Self {
        let x = usize::from(u8::arbitrary(g) % 10);
        let y = usize::from(u8::arbitrary(g) % 10);
        *g.choose(&[Action::Dig(x, y), Action::Flag(x, y), Action::Deflag(x, y)])
            .unwrap()
    }
}
