//! Core domain types for Othello.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Column letters used by the algebraic notation and the ASCII renderer.
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Side length of the standard board.
pub const STANDARD_SIZE: usize = 8;

/// Largest supported side length (one letter per column).
pub const MAX_SIZE: usize = 26;

/// Player in the game.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Player {
    /// Black (moves first).
    Black,
    /// White.
    White,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Returns the cell holding this player's disc.
    pub fn to_cell(self) -> Cell {
        Cell::Disc(self)
    }

    /// Single-letter symbol used in text renderings.
    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No disc.
    #[default]
    Empty,
    /// Cell holding a player's disc.
    Disc(Player),
}

impl Cell {
    /// Returns the owner of the disc in this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Disc(player) => Some(player),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Disc(player) => player.symbol(),
        }
    }
}

/// A zero-based (row, column) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index, top to bottom.
    pub row: usize,
    /// Column index, left to right.
    pub col: usize,
}

impl Coord {
    /// Creates a new coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring coordinate one step in direction `(dr, dc)`,
    /// or `None` if the step would leave a board of side `size`.
    pub fn step(self, (dr, dc): (isize, isize), size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

/// Errors raised when constructing a board.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardError {
    /// Side length of zero.
    #[display("Board size must be positive")]
    ZeroSize,

    /// Side length larger than the notation supports.
    #[display("Board size {} exceeds the maximum of {}", _0, MAX_SIZE)]
    TooLarge(usize),

    /// The standard opening needs an even side length.
    #[display("Board size {} is odd; the opening position needs an even size", _0)]
    OddSize(usize),

    /// Text rows did not describe a square grid of known symbols.
    #[display("Malformed board text: {}", _0)]
    Malformed(String),

    /// Coordinate outside the grid.
    #[display("Coordinate ({}, {}) is out of bounds", _0.row, _0.col)]
    OutOfBounds(Coord),
}

impl std::error::Error for BoardError {}

/// Square Othello board of side `size`, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an N×N board with every cell empty.
    #[instrument]
    pub fn empty(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        if size > MAX_SIZE {
            return Err(BoardError::TooLarge(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Creates the standard opening position.
    ///
    /// White holds the two cells on the main diagonal of the central 2×2
    /// block, Black the other two. Odd sizes have no centre block and are
    /// rejected.
    #[instrument]
    pub fn initial(size: usize) -> Result<Self, BoardError> {
        if size % 2 == 1 {
            return Err(BoardError::OddSize(size));
        }
        Self::empty(size)?;
        Ok(Self::opening(size))
    }

    /// The standard 8×8 opening position.
    pub fn standard() -> Self {
        Self::opening(STANDARD_SIZE)
    }

    /// Parses a board from text rows of `B`, `W` and `.` (whitespace ignored).
    ///
    /// ```
    /// use strictly_othello::{Board, Coord, Cell, Player};
    ///
    /// let board = Board::from_rows(&["B.", ".W"]).unwrap();
    /// assert_eq!(board.get(Coord::new(1, 1)), Some(Cell::Disc(Player::White)));
    /// ```
    #[instrument]
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let mut board = Self::empty(rows.len())?;
        for (row, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != board.size {
                return Err(BoardError::Malformed(format!(
                    "row {} has {} cells, expected {}",
                    row + 1,
                    symbols.len(),
                    board.size
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let cell = match symbol.to_ascii_uppercase() {
                    'B' => Cell::Disc(Player::Black),
                    'W' => Cell::Disc(Player::White),
                    '.' => Cell::Empty,
                    other => {
                        return Err(BoardError::Malformed(format!(
                            "unknown symbol '{}' at row {}",
                            other,
                            row + 1
                        )));
                    }
                };
                board.put(Coord::new(row, col), cell);
            }
        }
        Ok(board)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks whether a coordinate lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Gets the cell at a coordinate.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.contains(coord)
            .then(|| self.cells[coord.row * self.size + coord.col])
    }

    /// Sets the cell at a coordinate.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), BoardError> {
        if !self.contains(coord) {
            return Err(BoardError::OutOfBounds(coord));
        }
        self.put(coord, cell);
        Ok(())
    }

    /// Checks if the cell at a coordinate is empty (false when off-board).
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Number of discs owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.owner() == Some(player))
            .count()
    }

    /// Total number of discs on the board.
    pub fn disc_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Formats the board as ASCII with column letters and 1-indexed rows.
    pub fn render(&self, current: Player) -> String {
        let letters: Vec<String> = LETTERS
            .chars()
            .take(self.size)
            .map(String::from)
            .collect();
        let mut out = format!("   {}\n", letters.join(" "));
        for row in 0..self.size {
            out.push_str(&format!("{:>2} ", row + 1));
            for col in 0..self.size {
                out.push(self.cells[row * self.size + col].symbol());
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str(&format!("Current: {}", current.symbol()));
        out
    }

    pub(crate) fn put(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row * self.size + coord.col] = cell;
    }

    // Caller guarantees an even size in 2..=MAX_SIZE.
    fn opening(size: usize) -> Self {
        let mut board = Self {
            size,
            cells: vec![Cell::Empty; size * size],
        };
        let mid = size / 2;
        board.put(Coord::new(mid - 1, mid - 1), Cell::Disc(Player::White));
        board.put(Coord::new(mid, mid), Cell::Disc(Player::White));
        board.put(Coord::new(mid - 1, mid), Cell::Disc(Player::Black));
        board.put(Coord::new(mid, mid - 1), Cell::Disc(Player::Black));
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_no_discs() {
        let board = Board::empty(8).unwrap();
        assert_eq!(board.disc_count(), 0);
        assert_eq!(board.cells().len(), 64);
    }

    #[test]
    fn test_empty_board_rejects_zero() {
        assert_eq!(Board::empty(0), Err(BoardError::ZeroSize));
        assert_eq!(Board::empty(27), Err(BoardError::TooLarge(27)));
    }

    #[test]
    fn test_initial_board_center_cross() {
        let board = Board::initial(8).unwrap();
        let white = Cell::Disc(Player::White);
        let black = Cell::Disc(Player::Black);
        assert_eq!(board.get(Coord::new(3, 3)), Some(white));
        assert_eq!(board.get(Coord::new(4, 4)), Some(white));
        assert_eq!(board.get(Coord::new(3, 4)), Some(black));
        assert_eq!(board.get(Coord::new(4, 3)), Some(black));
        assert_eq!(board.count(Player::Black), 2);
        assert_eq!(board.count(Player::White), 2);
    }

    #[test]
    fn test_initial_board_rejects_odd_size() {
        assert_eq!(Board::initial(7), Err(BoardError::OddSize(7)));
    }

    #[test]
    fn test_step_stops_at_edges() {
        assert_eq!(Coord::new(0, 0).step((-1, 0), 8), None);
        assert_eq!(Coord::new(7, 7).step((0, 1), 8), None);
        assert_eq!(Coord::new(3, 3).step((1, -1), 8), Some(Coord::new(4, 2)));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(matches!(
            Board::from_rows(&["B.", "."]),
            Err(BoardError::Malformed(_))
        ));
        assert!(matches!(
            Board::from_rows(&["BX", ".."]),
            Err(BoardError::Malformed(_))
        ));
    }

    #[test]
    fn test_render_small_board() {
        let board = Board::initial(4).unwrap();
        let expected = "   A B C D\n 1 . . . . \n 2 . W B . \n 3 . B W . \n 4 . . . . \nCurrent: W";
        assert_eq!(board.render(Player::White), expected);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::empty(4).unwrap();
        let result = board.set(Coord::new(4, 0), Cell::Disc(Player::Black));
        assert_eq!(result, Err(BoardError::OutOfBounds(Coord::new(4, 0))));
    }
}
