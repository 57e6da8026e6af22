//! Game session rules for Infinidoku.
//!
//! This crate turns a generated puzzle into a playable game: a [`Session`]
//! owns the working board and applies every rule of play — lives, scoring,
//! the validation overlay, hints, the pause-aware timer, and the victory and
//! loss transitions. The presentation layer renders session queries and
//! forwards player input; it never touches the board directly.
//!
//! Time and persistence enter through two small traits, [`Clock`] and
//! [`StatsStore`], so the whole state machine is testable without sleeping
//! or touching the filesystem.
//!
//! # Examples
//!
//! ```
//! use infinidoku_core::GridKind;
//! use infinidoku_game::{GameState, Session};
//!
//! let mut session = Session::new();
//! session.start(GridKind::Mini, 0.55)?;
//!
//! assert_eq!(session.state(), GameState::Active);
//! assert_eq!(session.lives(), 3);
//!
//! // Give the player a free cell; hinted cells never score.
//! session.hint();
//! assert_eq!(session.score(), 0);
//! # Ok::<(), infinidoku_generator::GenerateError>(())
//! ```

pub mod clock;
pub mod session;
pub mod stats;

pub use self::{
    clock::{Clock, ManualClock, MonotonicClock},
    session::{CellCheck, GameState, Session},
    stats::{GameRecord, JsonFileStore, MemoryStore, StatsError, StatsStore},
};
