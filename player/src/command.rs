//! Line commands understood by the interactive player

use std::fmt;

use engine_core::Direction;
use engine_games::SizeTag;

/// One parsed input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Swipe the board
    Move(Direction),
    /// Restart the current game
    Reset,
    /// Replace the current game with one of another size
    NewGame(SizeTag),
    /// List the board sizes that can be played
    Sizes,
    Help,
    Quit,
}

impl Command {
    /// Parse a line of input
    ///
    /// Returns `None` for blank lines and anything unrecognised. Matching is
    /// case-insensitive and ignores surrounding whitespace.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_ascii_lowercase();
        let mut words = line.split_whitespace();
        let word = words.next()?;
        let arg = words.next();
        if words.next().is_some() {
            return None;
        }

        let command = match (word, arg) {
            ("w" | "up" | "k", None) => Command::Move(Direction::Up),
            ("s" | "down" | "j", None) => Command::Move(Direction::Down),
            ("a" | "left" | "h", None) => Command::Move(Direction::Left),
            ("d" | "right" | "l", None) => Command::Move(Direction::Right),
            ("n" | "new" | "reset", None) => Command::Reset,
            ("n" | "new", Some(size)) => Command::NewGame(size.parse().ok()?),
            ("sizes", None) => Command::Sizes,
            ("?" | "help", None) => Command::Help,
            ("q" | "quit" | "exit", None) => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move(dir) => write!(f, "move {}", dir),
            Command::Reset => write!(f, "reset"),
            Command::NewGame(size) => write!(f, "new {}", size),
            Command::Sizes => write!(f, "sizes"),
            Command::Help => write!(f, "help"),
            Command::Quit => write!(f, "quit"),
        }
    }
}

pub const HELP: &str = "\
Commands:
  w a s d       swipe up, left, down, right (also up/left/down/right, h/j/k/l)
  n             restart the current game
  n <size>      start a new game on a <size> x <size> board
  sizes         list the playable board sizes
  ?             show this help (also help)
  q             quit (also quit, exit)
";
