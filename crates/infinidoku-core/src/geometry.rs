//! Board geometry: grid size and sub-box shape.

use derive_more::{Display, Error};

use crate::position::Position;

/// The dimensions of a Sudoku board: overall size and sub-box shape.
///
/// A geometry is only constructible through [`Geometry::new`], which rejects
/// inconsistent combinations, so holding a `Geometry` is proof that
/// `box_w * box_h == size` and that digits fit in `1..=size`.
///
/// # Examples
///
/// ```
/// use infinidoku_core::Geometry;
///
/// let geometry = Geometry::new(6, 3, 2).unwrap();
/// assert_eq!(geometry.size(), 6);
/// assert_eq!(geometry.max_digit(), 6);
/// assert_eq!(geometry.cell_count(), 36);
///
/// // 3×3 boxes cannot tile a 6×6 grid.
/// assert!(Geometry::new(6, 3, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    size: u8,
    box_w: u8,
    box_h: u8,
}

impl Geometry {
    /// Creates a geometry from a size and sub-box dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SizeOutOfRange`] if `size` is not in `2..=16`,
    /// or [`GeometryError::BoxMismatch`] if `box_w * box_h != size` or either
    /// box dimension is zero.
    pub fn new(size: u8, box_w: u8, box_h: u8) -> Result<Self, GeometryError> {
        if !(2..=16).contains(&size) {
            return Err(GeometryError::SizeOutOfRange { size });
        }
        if box_w == 0 || box_h == 0 || box_w.checked_mul(box_h) != Some(size) {
            return Err(GeometryError::BoxMismatch { size, box_w, box_h });
        }
        Ok(Self { size, box_w, box_h })
    }

    /// Returns the board size (number of rows, columns, and digits).
    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Returns the sub-box width.
    #[must_use]
    pub const fn box_w(&self) -> u8 {
        self.box_w
    }

    /// Returns the sub-box height.
    #[must_use]
    pub const fn box_h(&self) -> u8 {
        self.box_h
    }

    /// Returns the largest digit on this board, equal to [`size`](Self::size).
    #[must_use]
    pub const fn max_digit(&self) -> u8 {
        self.size
    }

    /// Returns the total number of cells (`size * size`).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Returns the top-left corner of the sub-box containing `pos`.
    ///
    /// # Examples
    ///
    /// ```
    /// use infinidoku_core::{Geometry, Position};
    ///
    /// let geometry = Geometry::new(6, 3, 2).unwrap();
    /// assert_eq!(
    ///     geometry.box_origin(Position::new(3, 4)),
    ///     Position::new(2, 3)
    /// );
    /// ```
    #[must_use]
    pub fn box_origin(&self, pos: Position) -> Position {
        Position::new(pos.row - pos.row % self.box_h, pos.col - pos.col % self.box_w)
    }

    /// Returns an iterator over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Converts a position into a row-major cell index.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> usize {
        pos.row as usize * self.size as usize + pos.col as usize
    }
}

/// The three supported play modes and their board geometries.
///
/// # Examples
///
/// ```
/// use infinidoku_core::GridKind;
///
/// assert_eq!(GridKind::Mini.geometry().size(), 6);
/// assert_eq!(GridKind::Classic.geometry().size(), 9);
/// assert_eq!(GridKind::Monster.geometry().size(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    /// 6×6 board with 3×2 boxes.
    Mini,
    /// 9×9 board with 3×3 boxes.
    Classic,
    /// 16×16 board with 4×4 boxes.
    Monster,
}

impl GridKind {
    /// All grid kinds, smallest first.
    pub const ALL: [Self; 3] = [Self::Mini, Self::Classic, Self::Monster];

    /// Returns the board geometry for this kind.
    #[must_use]
    pub const fn geometry(self) -> Geometry {
        match self {
            Self::Mini => Geometry {
                size: 6,
                box_w: 3,
                box_h: 2,
            },
            Self::Classic => Geometry {
                size: 9,
                box_w: 3,
                box_h: 3,
            },
            Self::Monster => Geometry {
                size: 16,
                box_w: 4,
                box_h: 4,
            },
        }
    }
}

/// An invalid `(size, box_w, box_h)` combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GeometryError {
    /// The board size is outside the supported range.
    #[display("board size {size} is outside the supported range 2..=16")]
    SizeOutOfRange {
        /// The rejected size.
        size: u8,
    },
    /// The sub-box dimensions do not tile the board.
    #[display("{box_w}x{box_h} boxes do not tile a {size}x{size} board")]
    BoxMismatch {
        /// The board size.
        size: u8,
        /// The rejected box width.
        box_w: u8,
        /// The rejected box height.
        box_h: u8,
    },
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_grid_kinds_are_valid_geometries() {
        for kind in GridKind::ALL {
            let geometry = kind.geometry();
            let rebuilt = Geometry::new(geometry.size(), geometry.box_w(), geometry.box_h())
                .expect("built-in geometry is consistent");
            assert_eq!(geometry, rebuilt);
        }
    }

    #[test]
    fn test_rejects_inconsistent_combinations() {
        assert_eq!(
            Geometry::new(0, 1, 1),
            Err(GeometryError::SizeOutOfRange { size: 0 })
        );
        assert_eq!(
            Geometry::new(17, 17, 1),
            Err(GeometryError::SizeOutOfRange { size: 17 })
        );
        assert_eq!(
            Geometry::new(9, 3, 2),
            Err(GeometryError::BoxMismatch {
                size: 9,
                box_w: 3,
                box_h: 2
            })
        );
        assert_eq!(
            Geometry::new(9, 0, 9),
            Err(GeometryError::BoxMismatch {
                size: 9,
                box_w: 0,
                box_h: 9
            })
        );
    }

    #[test]
    fn test_positions_cover_board_in_row_major_order() {
        let geometry = GridKind::Mini.geometry();
        let positions: Vec<_> = geometry.positions().collect();
        assert_eq!(positions.len(), geometry.cell_count());
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[1], Position::new(0, 1));
        assert_eq!(positions[35], Position::new(5, 5));
        for (i, pos) in positions.iter().enumerate() {
            assert_eq!(geometry.index_of(*pos), i);
        }
    }

    #[test]
    fn test_box_origin_classic() {
        let geometry = GridKind::Classic.geometry();
        assert_eq!(
            geometry.box_origin(Position::new(4, 7)),
            Position::new(3, 6)
        );
        assert_eq!(
            geometry.box_origin(Position::new(0, 0)),
            Position::new(0, 0)
        );
        assert_eq!(
            geometry.box_origin(Position::new(8, 8)),
            Position::new(6, 6)
        );
    }

    proptest! {
        #[test]
        fn prop_valid_geometry_invariants(box_w in 1_u8..=8, box_h in 1_u8..=8) {
            let size = box_w.checked_mul(box_h);
            let Some(size) = size.filter(|size| (2..=16).contains(size)) else {
                return Ok(());
            };
            let geometry = Geometry::new(size, box_w, box_h).unwrap();
            prop_assert_eq!(geometry.cell_count(), usize::from(size) * usize::from(size));
            prop_assert_eq!(geometry.max_digit(), size);
        }

        #[test]
        fn prop_box_origin_contains_position(row in 0_u8..9, col in 0_u8..9) {
            let geometry = GridKind::Classic.geometry();
            let pos = Position::new(row, col);
            let origin = geometry.box_origin(pos);
            prop_assert!(origin.row <= pos.row && pos.row < origin.row + geometry.box_h());
            prop_assert!(origin.col <= pos.col && pos.col < origin.col + geometry.box_w());
            prop_assert_eq!(origin.row % geometry.box_h(), 0);
            prop_assert_eq!(origin.col % geometry.box_w(), 0);
        }
    }
}
