//! The board: a square grid of digits with `0` denoting empty cells.

use std::fmt::{self, Display};

use derive_more::{Display as DeriveDisplay, Error};

use crate::{geometry::Geometry, position::Position, rules};

/// A square grid of `size × size` cells.
///
/// Each cell holds `0` (empty) or a digit in `1..=size`. The board owns its
/// [`Geometry`], so sizes never have to be threaded alongside it.
///
/// # Text format
///
/// [`Display`] renders the board as one character per cell in row-major
/// order: `.` for empty, `1`-`9` for digits up to nine, and `A`-`G` for
/// digits 10-16. [`Board::parse`] reads the same format, ignoring
/// whitespace, which keeps fixtures legible when split across lines.
///
/// # Examples
///
/// ```
/// use infinidoku_core::{Board, GridKind, Position};
///
/// let geometry = GridKind::Classic.geometry();
/// let mut board = Board::new(geometry);
/// assert_eq!(board.get(Position::new(4, 4)), 0);
///
/// board.set(Position::new(4, 4), 7);
/// assert_eq!(board.get(Position::new(4, 4)), 7);
/// assert_eq!(board.filled_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<u8>,
}

impl Board {
    /// Creates an empty board with the given geometry.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            cells: vec![0; geometry.cell_count()],
        }
    }

    /// Returns the board geometry.
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Returns the digit at `pos`, or `0` if the cell is empty.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range for the board geometry.
    #[must_use]
    pub fn get(&self, pos: Position) -> u8 {
        self.assert_in_range(pos);
        self.cells[self.geometry.index_of(pos)]
    }

    /// Sets the cell at `pos` to `digit` (`0` clears the cell).
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of range or `digit` exceeds the board's
    /// maximum digit.
    pub fn set(&mut self, pos: Position, digit: u8) {
        self.assert_in_range(pos);
        assert!(
            digit <= self.geometry.max_digit(),
            "digit {digit} exceeds maximum {} for this board",
            self.geometry.max_digit()
        );
        let index = self.geometry.index_of(pos);
        self.cells[index] = digit;
    }

    fn assert_in_range(&self, pos: Position) {
        let size = self.geometry.size();
        assert!(
            pos.row < size && pos.col < size,
            "position {pos} is out of range for a {size}x{size} board"
        );
    }

    /// Returns an iterator over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        self.geometry.positions()
    }

    /// Returns the number of non-empty cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Returns whether every cell is non-empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != 0)
    }

    /// Returns whether the board is a valid complete solution.
    ///
    /// True iff every cell is filled and every row, column, and box contains
    /// each digit exactly once. Equivalently, [`rules::is_legal`] holds for
    /// every cell's own digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use infinidoku_core::{Board, GridKind};
    ///
    /// let geometry = GridKind::Mini.geometry();
    /// let solved = Board::parse(
    ///     geometry,
    ///     "123456\
    ///      456123\
    ///      231564\
    ///      564231\
    ///      312645\
    ///      645312",
    /// )
    /// .unwrap();
    /// assert!(solved.is_solved());
    /// assert!(!Board::new(geometry).is_solved());
    /// ```
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.positions().all(|pos| {
            let digit = self.get(pos);
            digit != 0 && rules::is_legal(self, pos, digit)
        })
    }

    /// Parses a board from its text representation.
    ///
    /// Whitespace is ignored; the remaining characters must be exactly
    /// `size * size` cells in row-major order (`.` empty, `1`-`9`, `A`-`G`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseBoardError`] if the cell count does not match the
    /// geometry, a character is not a valid cell, or a digit exceeds the
    /// board's maximum digit.
    pub fn parse(geometry: Geometry, s: &str) -> Result<Self, ParseBoardError> {
        let mut board = Self::new(geometry);
        let mut positions = geometry.positions();
        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            let digit = digit_from_char(ch).ok_or(ParseBoardError::InvalidCell { ch })?;
            if digit > geometry.max_digit() {
                return Err(ParseBoardError::DigitOutOfRange {
                    digit,
                    max_digit: geometry.max_digit(),
                });
            }
            let pos = positions.next().ok_or(ParseBoardError::WrongCellCount {
                expected: geometry.cell_count(),
            })?;
            board.set(pos, digit);
        }
        if positions.next().is_some() {
            return Err(ParseBoardError::WrongCellCount {
                expected: geometry.cell_count(),
            });
        }
        Ok(board)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cell in &self.cells {
            write!(f, "{}", char_from_digit(cell))?;
        }
        Ok(())
    }
}

fn digit_from_char(ch: char) -> Option<u8> {
    match ch {
        '.' => Some(0),
        '1'..='9' => Some(ch as u8 - b'0'),
        'A'..='G' => Some(ch as u8 - b'A' + 10),
        _ => None,
    }
}

fn char_from_digit(digit: u8) -> char {
    match digit {
        0 => '.',
        1..=9 => (b'0' + digit) as char,
        _ => (b'A' + digit - 10) as char,
    }
}

/// An error parsing a board from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveDisplay, Error)]
pub enum ParseBoardError {
    /// The text does not contain exactly one character per cell.
    #[display("expected exactly {expected} cells")]
    WrongCellCount {
        /// The cell count required by the geometry.
        expected: usize,
    },
    /// A character is not a valid cell.
    #[display("invalid cell character {ch:?}")]
    InvalidCell {
        /// The offending character.
        ch: char,
    },
    /// A digit exceeds the board's maximum digit.
    #[display("digit {digit} exceeds maximum {max_digit}")]
    DigitOutOfRange {
        /// The parsed digit.
        digit: u8,
        /// The maximum digit allowed by the geometry.
        max_digit: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GridKind;

    const SOLVED_MINI: &str = "\
        123456\
        456123\
        231564\
        564231\
        312645\
        645312";

    #[test]
    fn test_get_set_round_trip() {
        let mut board = Board::new(GridKind::Classic.geometry());
        let pos = Position::new(8, 8);
        board.set(pos, 9);
        assert_eq!(board.get(pos), 9);
        board.set(pos, 0);
        assert_eq!(board.get(pos), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let board = Board::new(GridKind::Mini.geometry());
        let _ = board.get(Position::new(6, 0));
    }

    #[test]
    #[should_panic(expected = "exceeds maximum")]
    fn test_set_digit_out_of_range_panics() {
        let mut board = Board::new(GridKind::Mini.geometry());
        board.set(Position::new(0, 0), 7);
    }

    #[test]
    fn test_parse_display_round_trip() {
        let geometry = GridKind::Mini.geometry();
        let board = Board::parse(geometry, SOLVED_MINI).unwrap();
        assert_eq!(board.to_string(), SOLVED_MINI.replace(char::is_whitespace, ""));
        assert_eq!(board.get(Position::new(0, 0)), 1);
        assert_eq!(board.get(Position::new(5, 5)), 2);
    }

    #[test]
    fn test_parse_ignores_whitespace_and_accepts_letters() {
        let geometry = GridKind::Monster.geometry();
        let text = format!("G{}", ".".repeat(255));
        let board = Board::parse(geometry, &text).unwrap();
        assert_eq!(board.get(Position::new(0, 0)), 16);
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_parse_errors() {
        let geometry = GridKind::Mini.geometry();
        assert_eq!(
            Board::parse(geometry, "123"),
            Err(ParseBoardError::WrongCellCount { expected: 36 })
        );
        assert_eq!(
            Board::parse(geometry, &"x".repeat(36)),
            Err(ParseBoardError::InvalidCell { ch: 'x' })
        );
        assert_eq!(
            Board::parse(geometry, &"7".repeat(36)),
            Err(ParseBoardError::DigitOutOfRange {
                digit: 7,
                max_digit: 6
            })
        );
    }

    #[test]
    fn test_is_solved_detects_duplicates() {
        let geometry = GridKind::Mini.geometry();
        let mut board = Board::parse(geometry, SOLVED_MINI).unwrap();
        assert!(board.is_solved());

        // Introduce a duplicate within row 0.
        board.set(Position::new(0, 0), 2);
        assert!(!board.is_solved());

        // An empty cell also fails the check.
        board.set(Position::new(0, 0), 0);
        assert!(!board.is_solved());
    }

    #[test]
    fn test_filled_count_and_is_full() {
        let geometry = GridKind::Mini.geometry();
        let mut board = Board::new(geometry);
        assert_eq!(board.filled_count(), 0);
        assert!(!board.is_full());

        for pos in geometry.positions() {
            board.set(pos, 1);
        }
        assert_eq!(board.filled_count(), 36);
        assert!(board.is_full());
    }
}
