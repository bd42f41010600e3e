use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;

use anyhow::Context;
use minesweeper::{Board, SharedBoard};
use tracing::{debug, info, instrument, warn};

use crate::player_count::PlayerCount;
use crate::session::{Session, SessionEnd};
use crate::Config;

/// Accepts clients and serves each of them on its own thread, all playing on
/// the same board.
pub struct Server {
    listener: TcpListener,
    board: SharedBoard,
    players: PlayerCount,
    debug: bool,
}

impl Server {
    pub fn bind<A: ToSocketAddrs>(addr: A, board: Board, debug: bool) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).context("Failed to bind the listening socket")?;
        Ok(Self {
            listener,
            board: SharedBoard::new(board),
            players: PlayerCount::new(),
            debug,
        })
    }

    /// The bound address, useful when binding to port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn players(&self) -> &PlayerCount {
        &self.players
    }

    /// Accepts connections forever.
    ///
    /// Returns an error only if the listening socket fails. Failures of
    /// individual connections never end this loop.
    pub fn serve(&self) -> anyhow::Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(conn) => conn,
                Err(err) if is_per_connection_error(err.kind()) => {
                    warn!(%err, "Failed to accept a connection");
                    continue;
                }
                Err(err) => return Err(err).context("The listening socket failed"),
            };

            let board = self.board.clone();
            let players = self.players.clone();
            let debug = self.debug;
            let spawned = thread::Builder::new()
                .name(format!("client {}", peer))
                .spawn(move || handle_client(stream, peer, board, players, debug));
            if let Err(err) = spawned {
                warn!(%peer, %err, "Could not start a thread for the client");
            }
        }
    }
}

/// Binds to the configured port and serves until the listener fails.
pub fn run(config: Config) -> anyhow::Result<()> {
    let board = config.board.build()?;
    let server = Server::bind(("0.0.0.0", config.port), board, config.debug)?;
    info!(
        addr = %server.local_addr()?,
        debug = config.debug,
        "Listening for players"
    );
    server.serve()
}

fn is_per_connection_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionAborted | ErrorKind::ConnectionReset | ErrorKind::Interrupted
    )
}

#[instrument(name = "client", skip_all, fields(%peer))]
fn handle_client(
    stream: TcpStream,
    peer: SocketAddr,
    board: SharedBoard,
    players: PlayerCount,
    debug: bool,
) {
    let seat = players.join();
    info!(players = seat.players_at_join, "Player connected");

    match serve_connection(&stream, board, debug, seat.players_at_join) {
        Ok(end) => info!(?end, "Player left"),
        Err(err) => {
            debug!(%err, "Connection failed");
            info!("Player left");
        }
    }

    // The client may already be gone, in which case there is nothing to close.
    stream.shutdown(Shutdown::Both).ok();
    drop(seat);
}

fn serve_connection(
    stream: &TcpStream,
    board: SharedBoard,
    debug: bool,
    num_players: usize,
) -> std::io::Result<SessionEnd> {
    let mut session = Session::new(BufReader::new(stream), BufWriter::new(stream), board, debug);
    session.greet(num_players)?;
    session.run()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn client_events_carry_the_peer() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let mut client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        client.write_all(b"dig 0 0\nbye\n").unwrap();
        let (stream, peer) = listener.accept().unwrap();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let board = SharedBoard::new("1 0\n0 0\n".parse().unwrap());
        tracing::subscriber::with_default(subscriber, || {
            handle_client(stream, peer, board, PlayerCount::new(), true)
        });

        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let peer = format!("peer={}", peer);
        for event in ["Player connected", "Mine triggered", "Client said bye", "Player left"] {
            let line = logs
                .lines()
                .find(|line| line.contains(event))
                .unwrap_or_else(|| panic!("no {:?} event in:\n{}", event, logs));
            assert!(line.contains(&peer), "{}", line);
        }
    }
}
