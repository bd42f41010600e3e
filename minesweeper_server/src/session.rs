use std::io::{BufRead, Write};

use minesweeper::{welcome_message, Request, Response, SharedBoard};
use tracing::{debug, trace};

/// Why a session stopped serving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client closed its end of the connection.
    Disconnected,
    /// The client sent `bye`.
    Bye,
    /// The client hit a mine and the server is not in debug mode.
    Boom,
}

/// The request/response loop for one client.
///
/// Generic over the reader and writer so that it can be driven without a
/// socket.
pub struct Session<R, W> {
    reader: R,
    writer: W,
    board: SharedBoard,
    debug: bool,
    // A re-usable buffer for one line of input.
    // Should always be cleared before reading into it.
    buf: Vec<u8>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, board: SharedBoard, debug: bool) -> Self {
        Self {
            reader,
            writer,
            board,
            debug,
            buf: Vec::new(),
        }
    }

    /// Sends the welcome line.
    pub fn greet(&mut self, num_players: usize) -> std::io::Result<()> {
        writeln!(self.writer, "{}", welcome_message(num_players))?;
        self.writer.flush()
    }

    /// Serves requests until the session ends.
    ///
    /// Lines that are not valid requests are ignored without a reply.
    /// Returns an error only on communication failure.
    pub fn run(&mut self) -> std::io::Result<SessionEnd> {
        loop {
            self.buf.clear();
            if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
                // 0 bytes read means EOF - the client has closed the connection.
                return Ok(SessionEnd::Disconnected);
            }

            let line = String::from_utf8_lossy(&self.buf);
            let line = line.strip_suffix('\n').unwrap_or(&line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            let request = match line.parse::<Request>() {
                Ok(request) => request,
                Err(err) => {
                    trace!(line, %err, "Ignoring malformed request");
                    continue;
                }
            };
            trace!(?request, "Received request");

            let response = match self.dispatch(request) {
                Some(response) => response,
                None => {
                    debug!("Client said bye");
                    return Ok(SessionEnd::Bye);
                }
            };
            write!(self.writer, "{}", response)?;
            self.writer.flush()?;

            if response == Response::Boom {
                debug!(?request, "Mine triggered");
                if !self.debug {
                    return Ok(SessionEnd::Boom);
                }
            }
        }
    }

    /// Returns `None` when the client wants to leave.
    fn dispatch(&self, request: Request) -> Option<Response> {
        Some(match request {
            Request::Look => self.board.look(),
            Request::Dig { x, y } => self.board.dig(x, y),
            Request::Flag { x, y } => self.board.flag(x, y),
            Request::Deflag { x, y } => self.board.deflag(x, y),
            Request::Help => Response::Help,
            Request::Bye => return None,
        })
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
