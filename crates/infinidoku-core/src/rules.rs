//! Row/column/box constraint rules: the validator and candidate calculator.

use crate::{board::Board, digit_set::DigitSet, position::Position};

/// Returns whether placing `digit` at `pos` respects the Sudoku constraints.
///
/// A placement is legal iff `digit` does not already occur elsewhere in the
/// same row, the same column, or the same sub-box. The cell at `pos` itself
/// is excluded from the scan, so probing a filled cell with its own digit
/// reports on the rest of the board — which is what makes a complete board
/// valid exactly when every cell's own digit is legal.
///
/// This is a pure O(size) function; the caller guarantees `pos` is in range
/// and `digit` is in `1..=max_digit`.
///
/// # Examples
///
/// ```
/// use infinidoku_core::{Board, GridKind, Position, is_legal};
///
/// let mut board = Board::new(GridKind::Classic.geometry());
/// board.set(Position::new(0, 0), 4);
///
/// assert!(!is_legal(&board, Position::new(0, 5), 4)); // same row
/// assert!(!is_legal(&board, Position::new(7, 0), 4)); // same column
/// assert!(!is_legal(&board, Position::new(1, 1), 4)); // same box
/// assert!(is_legal(&board, Position::new(4, 4), 4));
/// ```
#[must_use]
pub fn is_legal(board: &Board, pos: Position, digit: u8) -> bool {
    let geometry = board.geometry();
    for i in 0..geometry.size() {
        let in_row = Position::new(pos.row, i);
        if in_row != pos && board.get(in_row) == digit {
            return false;
        }
        let in_col = Position::new(i, pos.col);
        if in_col != pos && board.get(in_col) == digit {
            return false;
        }
    }
    let origin = geometry.box_origin(pos);
    for row in origin.row..origin.row + geometry.box_h() {
        for col in origin.col..origin.col + geometry.box_w() {
            let in_box = Position::new(row, col);
            if in_box != pos && board.get(in_box) == digit {
                return false;
            }
        }
    }
    true
}

/// Returns every digit that could legally be placed in the empty cell `pos`.
///
/// The result is recomputed from the current board state on every call;
/// nothing is cached, since the board changes between calls.
///
/// # Examples
///
/// ```
/// use infinidoku_core::{Board, GridKind, Position, candidates};
///
/// let geometry = GridKind::Mini.geometry();
/// let mut board = Board::new(geometry);
/// board.set(Position::new(0, 0), 1);
/// board.set(Position::new(0, 1), 2);
/// board.set(Position::new(1, 0), 3);
///
/// let cands = candidates(&board, Position::new(0, 2));
/// assert_eq!(cands.into_iter().collect::<Vec<_>>(), vec![4, 5, 6]);
/// ```
#[must_use]
pub fn candidates(board: &Board, pos: Position) -> DigitSet {
    let mut set = DigitSet::EMPTY;
    for digit in 1..=board.geometry().max_digit() {
        if is_legal(board, pos, digit) {
            set.insert(digit);
        }
    }
    set
}
