//! A set of digits 1-16, backed by a bitmask.

use std::iter::FusedIterator;

use crate::geometry::Geometry;

/// A set of digits in the range 1-16.
///
/// The implementation uses a 16-bit integer where bit `i` represents the
/// digit `i + 1`, providing cheap storage and fast set operations for
/// candidate computation on any supported board size.
///
/// # Examples
///
/// ```
/// use infinidoku_core::DigitSet;
///
/// let mut set = DigitSet::EMPTY;
/// set.insert(1);
/// set.insert(5);
/// set.insert(16);
///
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(5));
/// assert!(!set.contains(2));
/// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 5, 16]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DigitSet(u16);

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns the set of every digit playable on a board with `geometry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use infinidoku_core::{DigitSet, GridKind};
    ///
    /// let full = DigitSet::full(GridKind::Mini.geometry());
    /// assert_eq!(full.len(), 6);
    /// assert!(full.contains(6));
    /// assert!(!full.contains(7));
    /// ```
    #[must_use]
    pub fn full(geometry: Geometry) -> Self {
        match geometry.size() {
            16 => Self(u16::MAX),
            size => Self((1 << size) - 1),
        }
    }

    fn bit(digit: u8) -> u16 {
        assert!(
            (1..=16).contains(&digit),
            "digit must be between 1 and 16, got {digit}"
        );
        1 << (digit - 1)
    }

    /// Adds a digit to the set.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-16.
    pub fn insert(&mut self, digit: u8) {
        self.0 |= Self::bit(digit);
    }

    /// Removes a digit from the set.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-16.
    pub fn remove(&mut self, digit: u8) {
        self.0 &= !Self::bit(digit);
    }

    /// Returns whether the set contains a digit.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-16.
    #[must_use]
    pub fn contains(self, digit: u8) -> bool {
        self.0 & Self::bit(digit) != 0
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for DigitSet {
    type Item = u8;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> Self::IntoIter {
        DigitSetIter(self.0)
    }
}

/// Iterator over the digits of a [`DigitSet`], in ascending order.
#[derive(Debug, Clone)]
pub struct DigitSetIter(u16);

impl Iterator for DigitSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let digit = self.0.trailing_zeros() as u8 + 1;
        self.0 &= self.0 - 1;
        Some(digit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for DigitSetIter {}
impl ExactSizeIterator for DigitSetIter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geometry::GridKind;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = DigitSet::EMPTY;
        assert!(set.is_empty());

        set.insert(1);
        set.insert(16);
        assert!(set.contains(1));
        assert!(set.contains(16));
        assert_eq!(set.len(), 2);

        set.remove(1);
        assert!(!set.contains(1));
        assert_eq!(set.len(), 1);

        // Removing an absent digit is a no-op.
        set.remove(3);
        assert_eq!(set.len(), 1);
    }

    #[test]
    #[should_panic(expected = "digit must be")]
    fn test_rejects_zero() {
        let mut set = DigitSet::EMPTY;
        set.insert(0);
    }

    #[test]
    #[should_panic(expected = "digit must be")]
    fn test_rejects_seventeen() {
        let mut set = DigitSet::EMPTY;
        set.insert(17);
    }

    #[test]
    fn test_full_matches_geometry() {
        for kind in GridKind::ALL {
            let geometry = kind.geometry();
            let full = DigitSet::full(geometry);
            assert_eq!(full.len(), usize::from(geometry.size()));
            for digit in 1..=geometry.max_digit() {
                assert!(full.contains(digit));
            }
        }
        let monster = DigitSet::full(GridKind::Monster.geometry());
        assert_eq!(monster.len(), 16);
    }

    #[test]
    fn test_iteration_order_is_ascending() {
        let set: DigitSet = [9, 1, 16, 5].into_iter().collect();
        let collected: Vec<_> = set.into_iter().collect();
        assert_eq!(collected, vec![1, 5, 9, 16]);
    }

    proptest! {
        #[test]
        fn prop_collect_round_trips(digits in prop::collection::btree_set(1_u8..=16, 0..16)) {
            let set: DigitSet = digits.iter().copied().collect();
            prop_assert_eq!(set.len(), digits.len());
            let collected: Vec<_> = set.into_iter().collect();
            let expected: Vec<_> = digits.into_iter().collect();
            prop_assert_eq!(collected, expected);
        }
    }
}
