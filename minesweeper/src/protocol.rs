use std::str::FromStr;

/// The line sent instead of a board message when a dig hit a mine.
pub const BOOM_MESSAGE: &str = "BOOM!\n";

pub const HELP_MESSAGE: &str = "Commands:\n\
    \x20 look           show the board\n\
    \x20 dig X Y        reveal the square in row X, column Y\n\
    \x20 flag X Y       mark the square as a suspected mine\n\
    \x20 deflag X Y     remove a mark\n\
    \x20 help           show this message\n\
    \x20 bye            leave the game\n";

/// The first line a client receives, without the trailing newline.
pub fn welcome_message(num_players: usize) -> String {
    format!(
        "Welcome to Minesweeper. {} people are playing including you. Type 'help' for help.",
        num_players
    )
}

/// A request line sent by a client.
///
/// Coordinates are row first. Numbers too large for `usize` are kept as
/// `usize::MAX`, which is out of bounds on every board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Look,
    Dig { x: usize, y: usize },
    Flag { x: usize, y: usize },
    Deflag { x: usize, y: usize },
    Help,
    Bye,
}

/// What the server writes back for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// A board message, already newline-terminated.
    Board(String),
    Boom,
    Help,
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Board(board) => f.write_str(board),
            Response::Boom => f.write_str(BOOM_MESSAGE),
            Response::Help => f.write_str(HELP_MESSAGE),
        }
    }
}

/// Why a line is not a valid [`Request`].
///
/// Clients never see this, invalid lines are ignored.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseRequestError {
    UnknownCommand(String),
    WrongArgumentCount {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    InvalidCoordinate(String),
}

impl std::error::Error for ParseRequestError {}

impl std::fmt::Display for ParseRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseRequestError::UnknownCommand(command) => {
                write!(f, "Unknown command {:?}", command)
            }
            ParseRequestError::WrongArgumentCount {
                command,
                expected,
                found,
            } => write!(
                f,
                "'{}' takes {} arguments, but {} were given",
                command, expected, found
            ),
            ParseRequestError::InvalidCoordinate(coordinate) => {
                write!(f, "{:?} is not a non-negative integer", coordinate)
            }
        }
    }
}

fn parse_coordinate(s: &str) -> Result<usize, ParseRequestError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseRequestError::InvalidCoordinate(String::from(s)));
    }
    // Only digits, so the only possible failure is overflow.
    Ok(s.parse().unwrap_or(usize::MAX))
}

/// Parses exactly one of `look`, `dig X Y`, `flag X Y`, `deflag X Y`, `help`
/// or `bye`, with single spaces and no surrounding whitespace.
impl FromStr for Request {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split(' ');
        // split() always yields at least one item
        let command = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();

        let (name, expected): (&'static str, usize) = match command {
            "look" => ("look", 0),
            "help" => ("help", 0),
            "bye" => ("bye", 0),
            "dig" => ("dig", 2),
            "flag" => ("flag", 2),
            "deflag" => ("deflag", 2),
            _ => return Err(ParseRequestError::UnknownCommand(String::from(command))),
        };
        if args.len() != expected {
            return Err(ParseRequestError::WrongArgumentCount {
                command: name,
                expected,
                found: args.len(),
            });
        }

        Ok(match name {
            "look" => Request::Look,
            "help" => Request::Help,
            "bye" => Request::Bye,
            _ => {
                let x = parse_coordinate(args[0])?;
                let y = parse_coordinate(args[1])?;
                match name {
                    "dig" => Request::Dig { x, y },
                    "flag" => Request::Flag { x, y },
                    _ => Request::Deflag { x, y },
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_requests() {
        assert_eq!("look".parse(), Ok(Request::Look));
        assert_eq!("help".parse(), Ok(Request::Help));
        assert_eq!("bye".parse(), Ok(Request::Bye));
        assert_eq!("dig 3 1".parse(), Ok(Request::Dig { x: 3, y: 1 }));
        assert_eq!("flag 0 12".parse(), Ok(Request::Flag { x: 0, y: 12 }));
        assert_eq!("deflag 007 4".parse(), Ok(Request::Deflag { x: 7, y: 4 }));
    }

    #[test]
    fn huge_coordinates_are_out_of_bounds() {
        assert_eq!(
            "dig 99999999999999999999999 1".parse(),
            Ok(Request::Dig {
                x: usize::MAX,
                y: 1
            })
        );
    }

    #[test]
    fn parse_rejects_anything_else() {
        for line in [
            "",
            "Look",
            "look ",
            " look",
            "look 1 2",
            "dig",
            "dig 1",
            "dig 1 2 3",
            "dig  1 2",
            "dig -1 2",
            "dig +1 2",
            "dig 1 x",
            "dig 1\t2",
            "flag 1.5 2",
            "bye now",
            "quit",
        ] {
            assert!(line.parse::<Request>().is_err(), "{:?} was accepted", line);
        }
    }

    #[test]
    fn parse_errors_explain_the_problem() {
        assert_eq!(
            "dig 1".parse::<Request>(),
            Err(ParseRequestError::WrongArgumentCount {
                command: "dig",
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            "flag 1 -2".parse::<Request>(),
            Err(ParseRequestError::InvalidCoordinate(String::from("-2")))
        );
        assert_eq!(
            "DIG 1 2".parse::<Request>().unwrap_err().to_string(),
            "Unknown command \"DIG\""
        );
    }

    #[test]
    fn welcome_line() {
        assert_eq!(
            welcome_message(3),
            "Welcome to Minesweeper. 3 people are playing including you. Type 'help' for help."
        );
    }

    #[test]
    fn responses_are_newline_terminated() {
        assert_eq!(Response::Boom.to_string(), "BOOM!\n");
        assert!(Response::Help.to_string().ends_with('\n'));
        assert_eq!(Response::Board(String::from("- -\n- -\n")).to_string(), "- -\n- -\n");
    }
}
