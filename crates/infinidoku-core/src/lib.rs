//! Core data structures and rules for variable-size Sudoku boards.
//!
//! This crate provides the fundamental types shared by puzzle generation and
//! game session management: board geometry, the board itself, digit sets, and
//! the row/column/box constraint rules.
//!
//! # Overview
//!
//! - [`geometry`]: Board dimensions and sub-box shape. A [`Geometry`] is only
//!   constructible from a consistent `(size, box_w, box_h)` combination;
//!   [`GridKind`] names the three supported play modes (6×6, 9×9, 16×16).
//! - [`position`]: A `(row, col)` cell coordinate.
//! - [`board`]: A square grid of digits where `0` denotes an empty cell.
//! - [`digit_set`]: A bitmask set of digits `1..=16`, used for candidate
//!   computation.
//! - [`rules`]: The constraint validator [`is_legal`] and the candidate
//!   calculator [`candidates`]. Both are pure functions over a board.
//!
//! # Examples
//!
//! ```
//! use infinidoku_core::{Board, GridKind, Position, candidates, is_legal};
//!
//! let geometry = GridKind::Classic.geometry();
//! let mut board = Board::new(geometry);
//!
//! board.set(Position::new(0, 0), 5);
//!
//! // 5 is no longer legal anywhere in row 0, column 0, or the top-left box.
//! assert!(!is_legal(&board, Position::new(0, 8), 5));
//! assert!(!is_legal(&board, Position::new(8, 0), 5));
//! assert!(!is_legal(&board, Position::new(2, 2), 5));
//!
//! // Candidate computation excludes it as well.
//! assert!(!candidates(&board, Position::new(0, 8)).contains(5));
//! ```

pub mod board;
pub mod digit_set;
pub mod geometry;
pub mod position;
pub mod rules;

pub use self::{
    board::Board,
    digit_set::DigitSet,
    geometry::{Geometry, GeometryError, GridKind},
    position::Position,
    rules::{candidates, is_legal},
};
