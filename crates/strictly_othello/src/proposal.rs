//! Validation of move proposals from untrusted text sources.
//!
//! Automated agents answer with free text ("I'll play d3.", "**C4**",
//! "PASS"). This module pulls the first coordinate-shaped token out of that
//! text and accepts it only if it is legal in the given position.

use crate::notation::parse_algebraic;
use crate::rules::valid_moves;
use crate::types::{Board, Coord, LETTERS, Player};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

// Letters past the last column are stripped before matching.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][1-9][0-9]?").expect("static pattern compiles"));

/// Signal an agent uses to say it has no legal move.
pub const PASS: &str = "PASS";

/// Checks whether the proposal is the explicit pass signal.
pub fn is_pass(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(PASS)
}

/// Extracts the first in-bounds `Letter+Digit` token from `raw`.
///
/// The text is uppercased and stripped of every character that is neither a
/// column letter nor a row digit of this board, then scanned for a letter
/// followed by a row number. Two-digit rows are read only when the board has
/// at least ten rows and the pair is in range.
#[instrument(skip(board), fields(size = board.size()))]
pub fn extract_coord(board: &Board, raw: &str) -> Option<Coord> {
    let size = board.size();
    let last = LETTERS.chars().nth(size.checked_sub(1)?)?;
    let digits = if size >= 10 {
        '0'..='9'
    } else {
        '1'..=char::from_digit(u32::try_from(size).ok()?, 10)?
    };

    let cleaned: String = raw
        .trim()
        .to_ascii_uppercase()
        .chars()
        .filter(|c| ('A'..=last).contains(c) || digits.contains(c))
        .collect();
    debug!(cleaned = %cleaned, "Sanitized proposal");

    let found = TOKEN.find(&cleaned)?.as_str();

    parse_algebraic(found, size).or_else(|| parse_algebraic(&found[..2], size))
}

/// Extracts a coordinate and confirms it is legal for `player`.
///
/// Returns `None` when nothing usable was found; the caller decides whether
/// to retry or fall back.
#[instrument(skip(board), fields(size = board.size(), player = %player))]
pub fn extract_move(board: &Board, player: Player, raw: &str) -> Option<Coord> {
    let Some(coord) = extract_coord(board, raw) else {
        warn!(raw = %raw, "No coordinate found in proposal");
        return None;
    };

    if valid_moves(board, player).contains(&coord) {
        debug!(%coord, "Proposal accepted");
        Some(coord)
    } else {
        warn!(%coord, "Proposed coordinate is not a legal move");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_from_chatter() {
        let board = Board::standard();
        assert_eq!(
            extract_move(&board, Player::Black, "I will play **d3**."),
            Some(Coord::new(2, 3))
        );
    }

    #[test]
    fn test_rejects_illegal_coordinate() {
        let board = Board::standard();
        assert_eq!(extract_move(&board, Player::Black, "A1"), None);
        assert_eq!(extract_coord(&board, "A1"), Some(Coord::new(0, 0)));
    }

    #[test]
    fn test_pass_yields_nothing() {
        let board = Board::standard();
        assert!(is_pass(" pass "));
        assert_eq!(extract_move(&board, Player::Black, "PASS"), None);
    }

    #[test]
    fn test_letters_past_last_column_are_stripped() {
        // 'Z' is not a column on 8×8 and is removed before scanning.
        let board = Board::standard();
        assert_eq!(extract_coord(&board, "Z9 then C4"), Some(Coord::new(3, 2)));
    }

    #[test]
    fn test_out_of_range_digits_are_stripped() {
        let board = Board::standard();
        assert_eq!(extract_coord(&board, "A9 or C4"), Some(Coord::new(3, 2)));
        assert_eq!(extract_coord(&board, "D34"), Some(Coord::new(2, 3)));
    }

    #[test]
    fn test_zero_after_letter_is_skipped() {
        let board = Board::standard();
        assert_eq!(extract_coord(&board, "E0 no, F5"), Some(Coord::new(4, 5)));
    }

    #[test]
    fn test_two_digit_rows_on_large_board() {
        let board = Board::initial(12).unwrap();
        assert_eq!(extract_coord(&board, "L12"), Some(Coord::new(11, 11)));
        // 19 is out of range, so the single digit is used.
        assert_eq!(extract_coord(&board, "A19"), Some(Coord::new(0, 0)));
    }
}
