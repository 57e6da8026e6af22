//! Cell coordinates.

use std::fmt::{self, Display};

/// A `(row, col)` cell coordinate on a board.
///
/// Rows and columns are zero-based and counted from the top-left corner.
/// The coordinate itself is geometry-agnostic; boards and rules assert that
/// positions are in range for the geometry they are used with.
///
/// # Examples
///
/// ```
/// use infinidoku_core::Position;
///
/// let pos = Position::new(3, 7);
/// assert_eq!(pos.row, 3);
/// assert_eq!(pos.col, 7);
/// assert_eq!(pos.to_string(), "(3, 7)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Zero-based row index.
    pub row: u8,
    /// Zero-based column index.
    pub col: u8,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_row_major() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 5),
            Position::new(0, 0),
            Position::new(1, 3),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 5),
                Position::new(1, 0),
                Position::new(1, 3),
            ]
        );
    }
}
