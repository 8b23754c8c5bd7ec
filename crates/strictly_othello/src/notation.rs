//! Algebraic coordinate notation: column letter followed by 1-indexed row.
//!
//! Row 2, column 3 is written `D3`. Boards wider than 26 columns have no
//! single-letter encoding and are not supported.

use crate::types::{Coord, MAX_SIZE};
use derive_more::Display;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{instrument, warn};

static ALGEBRAIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z])([1-9][0-9]?)$").expect("static pattern compiles"));

/// Encodes a coordinate as `Letter+Digit` (e.g. `D3`).
pub fn to_algebraic(coord: Coord) -> String {
    coord.to_string()
}

/// Parses algebraic notation for a board of side `size`.
///
/// Case-insensitive and tolerant of surrounding whitespace. Returns `None`
/// for anything else: wrong shape, letter past the last column, row outside
/// `1..=size`, or trailing characters.
#[instrument]
pub fn parse_algebraic(text: &str, size: usize) -> Option<Coord> {
    let upper = text.trim().to_ascii_uppercase();
    let caps = ALGEBRAIC.captures(&upper)?;

    let letter = caps[1].as_bytes()[0];
    let col = usize::from(letter - b'A');
    let row: usize = caps[2].parse().ok()?;

    if col >= size || row == 0 || row > size {
        return None;
    }
    Some(Coord::new(row - 1, col))
}

/// Notation that could not be parsed as a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Invalid coordinate notation: {:?}", _0)]
pub struct NotationError(pub String);

impl std::error::Error for NotationError {}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match u8::try_from(self.col) {
            Ok(col) if usize::from(col) < MAX_SIZE => {
                write!(f, "{}{}", char::from(b'A' + col), self.row + 1)
            }
            _ => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Coord {
    type Err = NotationError;

    /// Parses against the widest supported board; check bounds separately.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_algebraic(s, MAX_SIZE).ok_or_else(|| {
            warn!(input = %s, "Rejected coordinate notation");
            NotationError(s.to_string())
        })
    }
}
