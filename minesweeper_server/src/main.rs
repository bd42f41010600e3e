use std::path::PathBuf;

use clap::Parser;
use minesweeper_server::{run, BoardSource, Config, DEFAULT_PORT, DEFAULT_SIZE};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Keep clients connected after they hit a mine
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Play on a random board of this side length
    #[arg(short, long, conflicts_with = "file")]
    size: Option<usize>,

    /// Play on the board stored in this file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "MINESWEEPER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// RNG seed for random boards
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn into_config(self) -> Config {
        let board = match self.file {
            Some(path) => BoardSource::File(path),
            None => BoardSource::Random {
                size: self.size.unwrap_or(DEFAULT_SIZE),
                seed: self.seed,
            },
        };
        Config {
            debug: self.debug,
            port: self.port,
            board,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    run(args.into_config())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
