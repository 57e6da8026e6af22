//! Puzzle generation for variable-size Sudoku boards.
//!
//! Generation happens in two phases:
//!
//! 1. **Solution filling**: an empty board is completed by randomized
//!    backtracking. Cells are visited in row-major order; at each cell the
//!    digits are tried in a freshly shuffled order, and the search backtracks
//!    when a cell has no legal digit left. The recursion is expressed with an
//!    explicit frame stack so the depth is bounded by the cell count even on
//!    16×16 boards.
//! 2. **Clue removal**: the solved board is copied, and cells are zeroed by
//!    uniformly random picks until an attempt budget of
//!    `size² - floor(size² * fill_ratio)` is spent. A pick that lands on an
//!    already-empty cell still spends an attempt, so the problem keeps *at
//!    least* `floor(size² * fill_ratio)` clues.
//!
//! The produced puzzle is not checked for solution uniqueness; the problem is
//! always completable to the recorded solution, but other completions may
//! exist.
//!
//! Generation is reproducible: every puzzle records the 64-bit seed it was
//! generated from, and [`PuzzleGenerator::generate_with_seed`] replays it.
//!
//! # Examples
//!
//! ```
//! use infinidoku_core::GridKind;
//! use infinidoku_generator::PuzzleGenerator;
//!
//! let generator = PuzzleGenerator::new(GridKind::Classic.geometry());
//! let puzzle = generator.generate(0.45).unwrap();
//!
//! assert!(puzzle.solution.is_solved());
//! assert!(puzzle.problem.filled_count() >= 36); // floor(81 * 0.45)
//!
//! // The same seed reproduces the same puzzle.
//! let replay = generator.generate_with_seed(0.45, puzzle.seed).unwrap();
//! assert_eq!(replay, puzzle);
//! ```

use derive_more::{Display, Error};
use infinidoku_core::{Board, Geometry, Position, is_legal};
use rand::{RngExt as _, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg64Mcg;

/// A generated puzzle: the problem board, its solution, and the seed.
///
/// Invariant: every non-zero cell of `problem` equals the corresponding cell
/// of `solution`, and `solution` is a valid complete board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The board presented to the player; `0` cells are to be filled in.
    pub problem: Board,
    /// The complete solution the problem was carved from.
    pub solution: Board,
    /// The seed that reproduces this puzzle for the same geometry and
    /// fill ratio.
    pub seed: u64,
}

/// Generates puzzles for a fixed board geometry.
///
/// The generator itself is stateless; randomness comes from a per-call
/// [`Pcg64Mcg`] stream seeded either from entropy ([`generate`]) or from a
/// caller-provided seed ([`generate_with_seed`]).
///
/// [`generate`]: Self::generate
/// [`generate_with_seed`]: Self::generate_with_seed
#[derive(Debug, Clone, Copy)]
pub struct PuzzleGenerator {
    geometry: Geometry,
}

impl PuzzleGenerator {
    /// Creates a generator for the given geometry.
    #[must_use]
    pub const fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    /// Returns the geometry this generator produces boards for.
    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Generates a puzzle from a fresh entropy seed.
    ///
    /// `fill_ratio` is the fraction of cells retained as givens; see
    /// [`generate_with_seed`](Self::generate_with_seed) for the exact
    /// semantics.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidFillRatio`] if `fill_ratio` is not in
    /// the open interval `(0, 1)`, or [`GenerateError::Unsolvable`] if
    /// backtracking cannot complete a board (not expected for any
    /// constructible [`Geometry`]).
    pub fn generate(&self, fill_ratio: f64) -> Result<GeneratedPuzzle, GenerateError> {
        self.generate_with_seed(fill_ratio, rand::rng().random())
    }

    /// Generates the puzzle determined by `seed`.
    ///
    /// The problem retains at least `floor(size² * fill_ratio)` givens: the
    /// removal loop spends one attempt per random pick whether or not the
    /// picked cell was still filled, so colliding picks waste attempts
    /// rather than remove extra cells.
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_with_seed(
        &self,
        fill_ratio: f64,
        seed: u64,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        if !(fill_ratio > 0.0 && fill_ratio < 1.0) {
            return Err(GenerateError::InvalidFillRatio { fill_ratio });
        }
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let solution = fill_solution(self.geometry, &mut rng)?;
        let problem = remove_clues(&solution, fill_ratio, &mut rng);
        Ok(GeneratedPuzzle {
            problem,
            solution,
            seed,
        })
    }
}

/// Completes an empty board by randomized backtracking.
///
/// One stack frame per visited cell holds that cell's remaining shuffled
/// candidates. Re-entering the loop clears the frame's cell first, which
/// covers both the fresh-frame case (already empty) and the backtrack case
/// (undo the previous tentative digit before trying the next one).
fn fill_solution(geometry: Geometry, rng: &mut Pcg64Mcg) -> Result<Board, GenerateError> {
    let positions: Vec<Position> = geometry.positions().collect();
    let mut board = Board::new(geometry);
    let mut stack = vec![shuffled_digits(geometry, rng)];

    while !stack.is_empty() {
        let pos = positions[stack.len() - 1];
        board.set(pos, 0);
        let candidates = stack.last_mut().expect("stack is non-empty");

        let mut placed = None;
        while let Some(digit) = candidates.pop() {
            if is_legal(&board, pos, digit) {
                placed = Some(digit);
                break;
            }
        }

        match placed {
            Some(digit) => {
                board.set(pos, digit);
                if stack.len() == positions.len() {
                    return Ok(board);
                }
                stack.push(shuffled_digits(geometry, rng));
            }
            None => {
                stack.pop();
            }
        }
    }

    Err(GenerateError::Unsolvable {
        size: geometry.size(),
    })
}

fn shuffled_digits(geometry: Geometry, rng: &mut Pcg64Mcg) -> Vec<u8> {
    let mut digits: Vec<u8> = (1..=geometry.max_digit()).collect();
    digits.shuffle(rng);
    digits
}

/// Carves a problem out of a solved board by spending the removal budget.
fn remove_clues(solution: &Board, fill_ratio: f64, rng: &mut Pcg64Mcg) -> Board {
    let geometry = solution.geometry();
    let mut problem = solution.clone();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let keep = (geometry.cell_count() as f64 * fill_ratio) as usize;
    let mut attempts = geometry.cell_count() - keep;
    while attempts > 0 {
        let pos = Position::new(
            rng.random_range(0..geometry.size()),
            rng.random_range(0..geometry.size()),
        );
        if problem.get(pos) != 0 {
            problem.set(pos, 0);
        }
        attempts -= 1;
    }
    problem
}

/// An error producing a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Display, Error)]
pub enum GenerateError {
    /// The requested fill ratio is outside the open interval `(0, 1)`.
    #[display("fill ratio {fill_ratio} is outside the open interval (0, 1)")]
    InvalidFillRatio {
        /// The rejected fill ratio.
        fill_ratio: f64,
    },
    /// Backtracking exhausted every assignment without filling the board.
    #[display("backtracking exhausted without completing a {size}x{size} board")]
    Unsolvable {
        /// The board size that failed to fill.
        size: u8,
    },
}

#[cfg(test)]
mod tests {
    use infinidoku_core::GridKind;
    use proptest::prelude::*;

    use super::*;

    fn assert_problem_subset_of_solution(puzzle: &GeneratedPuzzle) {
        for pos in puzzle.problem.positions() {
            let given = puzzle.problem.get(pos);
            if given != 0 {
                assert_eq!(given, puzzle.solution.get(pos), "mismatch at {pos}");
            }
        }
    }

    #[test]
    fn test_solutions_are_valid_for_all_kinds() {
        for kind in GridKind::ALL {
            let generator = PuzzleGenerator::new(kind.geometry());
            for seed in [0, 1, 0xDEAD_BEEF] {
                let puzzle = generator.generate_with_seed(0.5, seed).unwrap();
                assert!(
                    puzzle.solution.is_solved(),
                    "invalid solution for {kind:?} seed {seed}"
                );
                assert_problem_subset_of_solution(&puzzle);
            }
        }
    }

    #[test]
    fn test_classic_fill_ratio_scenario() {
        // 9×9 at fill_ratio 0.45: the attempt budget is 81 - 36 = 45, so at
        // least floor(81 * 0.45) = 36 givens survive (collisions only ever
        // leave more).
        let generator = PuzzleGenerator::new(GridKind::Classic.geometry());
        for seed in 0..20 {
            let puzzle = generator.generate_with_seed(0.45, seed).unwrap();
            assert!(puzzle.problem.filled_count() >= 36, "seed {seed}");
            assert!(puzzle.problem.filled_count() < 81, "seed {seed}");
            assert_problem_subset_of_solution(&puzzle);
        }
    }

    #[test]
    fn test_same_seed_reproduces_same_puzzle() {
        let generator = PuzzleGenerator::new(GridKind::Classic.geometry());
        let a = generator.generate_with_seed(0.45, 42).unwrap();
        let b = generator.generate_with_seed(0.45, 42).unwrap();
        assert_eq!(a, b);

        let c = generator.generate_with_seed(0.45, 43).unwrap();
        assert_ne!(a.solution, c.solution);
    }

    #[test]
    fn test_generate_draws_fresh_seeds() {
        let generator = PuzzleGenerator::new(GridKind::Mini.geometry());
        let a = generator.generate(0.5).unwrap();
        let b = generator.generate(0.5).unwrap();
        assert_ne!(a.seed, b.seed);
    }

    #[test]
    fn test_invalid_fill_ratios_are_rejected() {
        let generator = PuzzleGenerator::new(GridKind::Classic.geometry());
        for fill_ratio in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            let result = generator.generate_with_seed(fill_ratio, 0);
            assert!(
                matches!(result, Err(GenerateError::InvalidFillRatio { .. })),
                "{fill_ratio} was accepted"
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_mini_puzzles_hold_invariants(
            fill_ratio in 0.05_f64..0.95,
            seed in any::<u64>(),
        ) {
            let geometry = GridKind::Mini.geometry();
            let generator = PuzzleGenerator::new(geometry);
            let puzzle = generator.generate_with_seed(fill_ratio, seed).unwrap();

            prop_assert!(puzzle.solution.is_solved());

            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_precision_loss,
                clippy::cast_sign_loss
            )]
            let keep = (geometry.cell_count() as f64 * fill_ratio) as usize;
            prop_assert!(puzzle.problem.filled_count() >= keep);

            for pos in puzzle.problem.positions() {
                let given = puzzle.problem.get(pos);
                prop_assert!(given == 0 || given == puzzle.solution.get(pos));
            }
        }
    }
}
