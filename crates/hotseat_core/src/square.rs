//! Board coordinates.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the 64 squares of an 8x8 board.
///
/// Squares are indexed `a1 = 0`, `b1 = 1`, ..., `h8 = 63` and
/// round-trip through algebraic text (`"e2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: u8 = 64;

    /// Creates a square from its index (`a1 = 0 .. h8 = 63`).
    pub fn new(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    /// Creates a square from zero-based file (`a = 0`) and rank (`1 = 0`).
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    /// Zero-based index, `a1 = 0`.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Zero-based file, `a = 0`.
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank, `1 = 0`.
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Iterates all squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT).map(Square)
    }

    /// Returns the square offset by the given file/rank delta, if on the board.
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        let file = (self.file() as i8).checked_add(files)?;
        let rank = (self.rank() as i8).checked_add(ranks)?;
        Self::from_coords(u8::try_from(file).ok()?, u8::try_from(rank).ok()?)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{}{}", file, rank)
    }
}

/// Error parsing a square from algebraic text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid square: {:?}", input)]
pub struct SquareParseError {
    /// The text that failed to parse.
    pub input: String,
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareParseError {
            input: s.to_string(),
        };

        let bytes = s.trim().as_bytes();
        let [file, rank] = bytes else {
            return Err(invalid());
        };

        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(rank) {
            return Err(invalid());
        }

        Self::from_coords(file - b'a', rank - b'1').ok_or_else(invalid)
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}
