use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Blue,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'R' => Some(Self::Red),
            'B' => Some(Self::Blue),
            _ => None,
        }
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(Self::from_char), chars.next()) {
            (Some(color), None) => Ok(color),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Content of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied(Color),
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Occupied(color) => color.to_char(),
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            _ => Color::from_char(ch).map(Self::Occupied),
        }
    }
}

/// A board coordinate, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// One step; the source square keeps its piece.
    Clone,
    /// Two steps; the source square is vacated.
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.kind {
            MoveKind::Clone => "->",
            MoveKind::Jump => "=>",
        };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// What the engine wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Decision {
    Move(Move),
    Pass,
}

impl Decision {
    pub fn as_move(&self) -> Option<Move> {
        match self {
            Self::Move(mv) => Some(*mv),
            Self::Pass => None,
        }
    }
}

/// Public game state returned from the referee and the WASM API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Vec<String>,
    pub to_move: Color,
    pub red_count: u8,
    pub blue_count: u8,
    pub is_game_over: bool,
    /// `true` when the previous action was a pass.
    pub is_pass: bool,
    /// Squares flipped by the previous move; empty after a pass.
    pub flipped: Vec<Position>,
}

/// Final result after game over. `winner` is `None` on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Option<Color>,
    pub red_count: u8,
    pub blue_count: u8,
}
