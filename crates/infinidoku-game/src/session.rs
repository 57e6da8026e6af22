//! The game session state machine.

use std::collections::HashSet;

use derive_more::{Display, IsVariant};
use infinidoku_core::{Board, DigitSet, Geometry, GridKind, Position, rules};
use infinidoku_generator::{GenerateError, GeneratedPuzzle, PuzzleGenerator};
use rand::seq::IndexedRandom as _;

use crate::{
    clock::{Clock, MonotonicClock},
    stats::{GameRecord, MemoryStore, StatsError, StatsStore},
};

/// Lives at the start of every game.
const STARTING_LIVES: u8 = 3;
/// Points for a correct placement before multipliers.
const BASE_POINTS: u64 = 100;
/// A placement within this many milliseconds of selecting a cell earns the
/// speed multiplier.
const SPEED_BONUS_WINDOW_MS: u64 = 5_000;

/// The lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IsVariant)]
pub enum GameState {
    /// No game in progress.
    Idle,
    /// A game is in progress and accepting actions.
    Active,
    /// A game is in progress but frozen.
    Paused,
    /// The game ended with no lives left.
    Lost,
    /// The game ended with the board solved.
    Won,
}

/// Per-cell verdict of the validation overlay.
///
/// Only meaningful while check mode is enabled; disabling check mode resets
/// every cell to [`Unchecked`](Self::Unchecked).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellCheck {
    /// Not evaluated (or the cell changed since the last check pass).
    #[default]
    Unchecked,
    /// The cell matches the solution.
    Correct,
    /// The cell contradicts the solution.
    Wrong,
}

/// A playing session: one owned game at a time, plus the clock and the
/// statistics collaborator.
///
/// All mutation goes through the action methods; there is no way to reach
/// the board or scoring state directly. Actions that arrive while the
/// session is not [`Active`](GameState::Active), or that target a given
/// cell, are silently ignored — the presentation layer is expected to gate
/// them, but the engine stays safe if it does not.
///
/// # Examples
///
/// ```
/// use infinidoku_core::GridKind;
/// use infinidoku_game::{GameState, Session};
///
/// let mut session = Session::new();
/// assert_eq!(session.state(), GameState::Idle);
///
/// session.start(GridKind::Classic, 0.45)?;
/// assert_eq!(session.state(), GameState::Active);
/// assert_eq!(session.lives(), 3);
/// assert_eq!(session.score(), 0);
/// # Ok::<(), infinidoku_generator::GenerateError>(())
/// ```
#[derive(Debug)]
pub struct Session {
    state: GameState,
    clock: Box<dyn Clock>,
    stats: Box<dyn StatsStore>,
    game: Option<Game>,
}

#[derive(Debug)]
struct Game {
    puzzle: GeneratedPuzzle,
    board: Board,
    overlay: Vec<CellCheck>,
    lives: u8,
    score: u64,
    elapsed_ms: u64,
    run_started_at: Option<u64>,
    selected_cell: Option<Position>,
    selected_digit: Option<u8>,
    selection_at: Option<u64>,
    check_mode: bool,
    notes_mode: bool,
    fast_entry: bool,
    super_hint: bool,
    error_history: HashSet<Position>,
    hint_cells: HashSet<Position>,
}

impl Game {
    fn new(puzzle: GeneratedPuzzle, now: u64) -> Self {
        let board = puzzle.problem.clone();
        let overlay = vec![CellCheck::Unchecked; board.geometry().cell_count()];
        Self {
            puzzle,
            board,
            overlay,
            lives: STARTING_LIVES,
            score: 0,
            elapsed_ms: 0,
            run_started_at: Some(now),
            selected_cell: None,
            selected_digit: None,
            selection_at: None,
            check_mode: false,
            notes_mode: false,
            fast_entry: false,
            super_hint: false,
            error_history: HashSet::new(),
            hint_cells: HashSet::new(),
        }
    }

    fn geometry(&self) -> Geometry {
        self.board.geometry()
    }

    fn in_range(&self, pos: Position) -> bool {
        let size = self.geometry().size();
        pos.row < size && pos.col < size
    }

    fn is_given(&self, pos: Position) -> bool {
        self.puzzle.problem.get(pos) != 0
    }

    fn set_overlay(&mut self, pos: Position, check: CellCheck) {
        let index = self.geometry().index_of(pos);
        self.overlay[index] = check;
    }

    fn fill_hint(&mut self, pos: Position) {
        let digit = self.puzzle.solution.get(pos);
        self.board.set(pos, digit);
        self.set_overlay(pos, CellCheck::Unchecked);
        self.hint_cells.insert(pos);
    }

    /// Folds the running interval into the accumulated total.
    fn freeze_timer(&mut self, now: u64) {
        if let Some(started) = self.run_started_at.take() {
            self.elapsed_ms += now.saturating_sub(started);
        }
    }
}

impl Session {
    /// Creates an idle session with the real clock and an in-memory
    /// statistics store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Box::new(MonotonicClock::new()), Box::new(MemoryStore::new()))
    }

    /// Creates an idle session with explicit collaborators.
    ///
    /// Use this to persist statistics (see
    /// [`JsonFileStore`](crate::JsonFileStore)) or to drive time by hand in
    /// tests (see [`ManualClock`](crate::ManualClock)).
    #[must_use]
    pub fn with_parts(clock: Box<dyn Clock>, stats: Box<dyn StatsStore>) -> Self {
        Self {
            state: GameState::Idle,
            clock,
            stats,
            game: None,
        }
    }

    // --- transitions -----------------------------------------------------

    /// Starts a new game, replacing any game in progress.
    ///
    /// Generates a fresh puzzle for the chosen kind and difficulty, then
    /// resets lives, score, the timer, the overlay, and all per-cell
    /// history. On error the session is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if `fill_ratio` is outside `(0, 1)` or
    /// generation fails.
    pub fn start(&mut self, kind: GridKind, fill_ratio: f64) -> Result<(), GenerateError> {
        let puzzle = PuzzleGenerator::new(kind.geometry()).generate(fill_ratio)?;
        self.start_with_puzzle(puzzle);
        Ok(())
    }

    /// Starts a new game from an already generated puzzle.
    ///
    /// Useful for replaying a seed or for deterministic tests.
    pub fn start_with_puzzle(&mut self, puzzle: GeneratedPuzzle) {
        let now = self.clock.now_ms();
        self.game = Some(Game::new(puzzle, now));
        self.state = GameState::Active;
    }

    /// Freezes the game and the timer.
    ///
    /// Ignored unless the session is [`Active`](GameState::Active).
    pub fn pause(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let now = self.clock.now_ms();
        if let Some(game) = &mut self.game {
            game.freeze_timer(now);
        }
        self.state = GameState::Paused;
    }

    /// Resumes a paused game without resetting the accumulated time.
    ///
    /// Ignored unless the session is [`Paused`](GameState::Paused).
    pub fn resume(&mut self) {
        if self.state != GameState::Paused {
            return;
        }
        let now = self.clock.now_ms();
        if let Some(game) = &mut self.game {
            game.run_started_at = Some(now);
        }
        self.state = GameState::Active;
    }

    /// Discards any game in progress and returns to
    /// [`Idle`](GameState::Idle).
    ///
    /// Nothing is persisted beyond what was already reported at a victory.
    pub fn quit_to_menu(&mut self) {
        self.game = None;
        self.state = GameState::Idle;
    }

    // --- player actions --------------------------------------------------

    /// Selects a cell, starting the speed-bonus window.
    ///
    /// Selecting a filled cell also selects its digit, mirroring how a
    /// player picks up a digit by tapping it.
    pub fn select_cell(&mut self, pos: Position) {
        if !self.state.is_active() {
            return;
        }
        let now = self.clock.now_ms();
        let Some(game) = &mut self.game else { return };
        if !game.in_range(pos) {
            return;
        }
        game.selected_cell = Some(pos);
        game.selection_at = Some(now);
        let value = game.board.get(pos);
        if value != 0 {
            game.selected_digit = Some(value);
        }
    }

    /// Selects the digit used by fast entry.
    pub fn select_digit(&mut self, digit: u8) {
        if !self.state.is_active() {
            return;
        }
        let Some(game) = &mut self.game else { return };
        if digit == 0 || digit > game.geometry().max_digit() {
            return;
        }
        game.selected_digit = Some(digit);
    }

    /// Places a digit in a cell.
    ///
    /// Ignored unless the session is Active, the position is in range, the
    /// digit is playable, and the cell is not a given. The cell's overlay
    /// entry is reset either way.
    ///
    /// A correct placement scores [the base points](Self::score) with two
    /// independent multipliers — ×1.5 when placed within 5 seconds of the
    /// last cell selection, then ×0.5 when the cell previously held a wrong
    /// value — except that a cell ever filled by a hint scores zero. A
    /// wrong placement scores nothing, records the cell in the error
    /// history, and leaves the cell editable.
    ///
    /// Completing the board transitions to [`Won`](GameState::Won), adds
    /// the time bonus, and reports the completion time to the statistics
    /// store.
    pub fn place(&mut self, pos: Position, digit: u8) {
        if !self.state.is_active() {
            return;
        }
        let now = self.clock.now_ms();
        let Some(game) = &mut self.game else { return };
        if !game.in_range(pos) || digit == 0 || digit > game.geometry().max_digit() {
            return;
        }
        if game.is_given(pos) {
            return;
        }

        game.board.set(pos, digit);
        game.set_overlay(pos, CellCheck::Unchecked);

        if digit == game.puzzle.solution.get(pos) {
            let mut points = BASE_POINTS;
            if game.hint_cells.contains(&pos) {
                points = 0;
            } else {
                let speedy = game
                    .selection_at
                    .is_some_and(|at| now.saturating_sub(at) < SPEED_BONUS_WINDOW_MS);
                if speedy {
                    points = points * 3 / 2;
                }
                if game.error_history.contains(&pos) {
                    points /= 2;
                }
            }
            game.score += points;
            self.evaluate_victory();
        } else {
            game.error_history.insert(pos);
        }
    }

    /// Empties a non-given cell.
    ///
    /// Ignored unless the session is Active and the cell is editable.
    pub fn clear_cell(&mut self, pos: Position) {
        if !self.state.is_active() {
            return;
        }
        let Some(game) = &mut self.game else { return };
        if !game.in_range(pos) || game.is_given(pos) {
            return;
        }
        game.board.set(pos, 0);
        game.set_overlay(pos, CellCheck::Unchecked);
    }

    /// Toggles check mode.
    ///
    /// Enabling marks every filled cell [`Correct`](CellCheck::Correct) or
    /// [`Wrong`](CellCheck::Wrong) against the solution and decrements
    /// lives by the number of wrong cells found in this pass (uncapped,
    /// saturating at zero). Running out of lives transitions to
    /// [`Lost`](GameState::Lost). Disabling clears the overlay without
    /// touching lives; re-enabling re-evaluates from scratch.
    pub fn toggle_check(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let Some(game) = &mut self.game else { return };

        if game.check_mode {
            game.check_mode = false;
            game.overlay.fill(CellCheck::Unchecked);
            return;
        }

        let mut wrong: u32 = 0;
        for pos in game.board.positions() {
            let value = game.board.get(pos);
            let mark = if value == 0 {
                CellCheck::Unchecked
            } else if value == game.puzzle.solution.get(pos) {
                CellCheck::Correct
            } else {
                wrong += 1;
                CellCheck::Wrong
            };
            game.set_overlay(pos, mark);
        }
        game.check_mode = true;

        if wrong > 0 {
            game.lives = game.lives.saturating_sub(u8::try_from(wrong).unwrap_or(u8::MAX));
            if game.lives == 0 {
                let now = self.clock.now_ms();
                game.freeze_timer(now);
                self.state = GameState::Lost;
            }
        }
    }

    /// Fills a uniformly random empty cell with its solution digit.
    ///
    /// The cell is recorded as hint-used, so later placements there score
    /// zero. A no-op when no empty cell exists or the session is not
    /// Active. Filling the last empty cell wins the game.
    pub fn hint(&mut self) {
        if !self.state.is_active() {
            return;
        }
        let Some(game) = &mut self.game else { return };
        let empty: Vec<Position> = game
            .board
            .positions()
            .filter(|&pos| game.board.get(pos) == 0)
            .collect();
        let Some(&pos) = empty.choose(&mut rand::rng()) else {
            return;
        };
        game.fill_hint(pos);
        self.evaluate_victory();
    }

    /// Fills a chosen editable cell with its solution digit (the targeted
    /// hint tool).
    ///
    /// Also switches super-hint mode off, since the tool is single-shot.
    /// Ignored for givens or when the session is not Active.
    pub fn hint_at(&mut self, pos: Position) {
        if !self.state.is_active() {
            return;
        }
        let Some(game) = &mut self.game else { return };
        if !game.in_range(pos) || game.is_given(pos) {
            return;
        }
        game.fill_hint(pos);
        game.super_hint = false;
        self.evaluate_victory();
    }

    /// Toggles the notes flag (candidate display). Pure flag, no board
    /// effect.
    pub fn toggle_notes(&mut self) {
        if let Some(game) = self.active_game_mut() {
            game.notes_mode = !game.notes_mode;
        }
    }

    /// Toggles the fast-entry flag (tap places the selected digit).
    pub fn toggle_fast_entry(&mut self) {
        if let Some(game) = self.active_game_mut() {
            game.fast_entry = !game.fast_entry;
        }
    }

    /// Toggles the super-hint flag (next tap is a targeted hint).
    pub fn toggle_super_hint(&mut self) {
        if let Some(game) = self.active_game_mut() {
            game.super_hint = !game.super_hint;
        }
    }

    fn active_game_mut(&mut self) -> Option<&mut Game> {
        if self.state.is_active() {
            self.game.as_mut()
        } else {
            None
        }
    }

    /// Transitions to `Won` when the board matches the solution: freezes
    /// the timer, applies the time bonus, and reports the completion time.
    /// A persistence failure is logged and otherwise ignored; the session
    /// has already committed to the win.
    fn evaluate_victory(&mut self) {
        let Some(game) = &mut self.game else { return };
        if game.board != game.puzzle.solution {
            return;
        }
        let now = self.clock.now_ms();
        game.freeze_timer(now);
        let final_time = game.elapsed_ms;
        game.score += time_bonus(game.score, final_time);
        self.state = GameState::Won;
        if let Err(err) = self.stats.record_completion(final_time) {
            log::warn!("failed to persist completion time: {err}");
        }
    }

    // --- queries ---------------------------------------------------------

    /// Returns the session state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the working board, if a game exists.
    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.game.as_ref().map(|game| &game.board)
    }

    /// Returns the board geometry of the current game.
    #[must_use]
    pub fn geometry(&self) -> Option<Geometry> {
        self.game.as_ref().map(Game::geometry)
    }

    /// Returns remaining lives (0-3); zero when idle.
    #[must_use]
    pub fn lives(&self) -> u8 {
        self.game.as_ref().map_or(0, |game| game.lives)
    }

    /// Returns the score; zero when idle.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.game.as_ref().map_or(0, |game| game.score)
    }

    /// Returns elapsed play time in milliseconds.
    ///
    /// Accumulates only while the game is running; paused and finished
    /// games report a frozen total.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        let Some(game) = &self.game else { return 0 };
        match game.run_started_at {
            Some(started) => game.elapsed_ms + self.clock.now_ms().saturating_sub(started),
            None => game.elapsed_ms,
        }
    }

    /// Returns the overlay verdict for a cell.
    ///
    /// Only meaningful while check mode is enabled; otherwise every cell
    /// reads [`CellCheck::Unchecked`].
    #[must_use]
    pub fn overlay(&self, pos: Position) -> CellCheck {
        match &self.game {
            Some(game) if game.in_range(pos) => game.overlay[game.geometry().index_of(pos)],
            _ => CellCheck::Unchecked,
        }
    }

    /// Returns whether a cell is a given (pre-filled, not editable).
    #[must_use]
    pub fn is_given(&self, pos: Position) -> bool {
        self.game
            .as_ref()
            .is_some_and(|game| game.in_range(pos) && game.is_given(pos))
    }

    /// Returns the legal candidates for an empty cell of the current game.
    ///
    /// Empty for filled cells, out-of-range positions, or idle sessions.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        match &self.game {
            Some(game) if game.in_range(pos) && game.board.get(pos) == 0 => {
                rules::candidates(&game.board, pos)
            }
            _ => DigitSet::EMPTY,
        }
    }

    /// Returns the selected cell, if any.
    #[must_use]
    pub fn selected_cell(&self) -> Option<Position> {
        self.game.as_ref().and_then(|game| game.selected_cell)
    }

    /// Returns the selected digit, if any.
    #[must_use]
    pub fn selected_digit(&self) -> Option<u8> {
        self.game.as_ref().and_then(|game| game.selected_digit)
    }

    /// Returns whether check mode is enabled.
    #[must_use]
    pub fn check_mode(&self) -> bool {
        self.game.as_ref().is_some_and(|game| game.check_mode)
    }

    /// Returns whether the notes flag is on.
    #[must_use]
    pub fn notes_mode(&self) -> bool {
        self.game.as_ref().is_some_and(|game| game.notes_mode)
    }

    /// Returns whether the fast-entry flag is on.
    #[must_use]
    pub fn fast_entry(&self) -> bool {
        self.game.as_ref().is_some_and(|game| game.fast_entry)
    }

    /// Returns whether the super-hint flag is on.
    #[must_use]
    pub fn super_hint(&self) -> bool {
        self.game.as_ref().is_some_and(|game| game.super_hint)
    }

    /// Returns how many copies of `digit` the board still needs.
    #[must_use]
    pub fn digit_remaining(&self, digit: u8) -> u8 {
        let Some(game) = &self.game else { return 0 };
        let geometry = game.geometry();
        if digit == 0 || digit > geometry.max_digit() {
            return 0;
        }
        let used = game
            .board
            .positions()
            .filter(|&pos| game.board.get(pos) == digit)
            .count();
        geometry
            .size()
            .saturating_sub(u8::try_from(used).unwrap_or(u8::MAX))
    }

    /// Loads the statistics record from the session's store.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the store cannot be read.
    pub fn stats_record(&self) -> Result<GameRecord, StatsError> {
        self.stats.load()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The victory time bonus: half the score under two minutes, 30% under
/// five, 10% under ten, nothing beyond.
fn time_bonus(score: u64, elapsed_ms: u64) -> u64 {
    match elapsed_ms / 60_000 {
        0 | 1 => score / 2,
        2..=4 => score * 3 / 10,
        5..=9 => score / 10,
        _ => 0,
    }
}
