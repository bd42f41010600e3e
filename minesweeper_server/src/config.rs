use std::path::PathBuf;

use anyhow::Context;
use minesweeper::Board;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// The port clients connect to unless configured otherwise.
pub const DEFAULT_PORT: u16 = 4444;

/// The side length of the board when neither a size nor a file is given.
pub const DEFAULT_SIZE: usize = 10;

/// Where the board comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardSource {
    Random { size: usize, seed: Option<u64> },
    File(PathBuf),
}

impl Default for BoardSource {
    fn default() -> Self {
        BoardSource::Random {
            size: DEFAULT_SIZE,
            seed: None,
        }
    }
}

impl BoardSource {
    pub fn build(&self) -> anyhow::Result<Board> {
        match self {
            BoardSource::Random { size, seed } => {
                let seed = seed.unwrap_or_else(rand::random);
                info!(size, seed, "Generating random board");
                let mut rng = StdRng::seed_from_u64(seed);
                Board::random(*size, &mut rng).context("Failed to generate the board")
            }
            BoardSource::File(path) => {
                let board = Board::load(path)
                    .with_context(|| format!("Failed to load board from '{}'", path.display()))?;
                info!(size = board.size(), path = %path.display(), "Loaded board");
                Ok(board)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Keep a client connected after it hit a mine.
    pub debug: bool,
    pub port: u16,
    pub board: BoardSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            port: DEFAULT_PORT,
            board: BoardSource::default(),
        }
    }
}
