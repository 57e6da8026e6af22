//! Best-time statistics: a minimal persistence contract.
//!
//! The session reports completion times through a [`StatsStore`]; everything
//! else about storage is the store's business. [`JsonFileStore`] keeps a
//! small JSON record on disk, [`MemoryStore`] keeps it in process (the
//! default, and the natural choice for tests).

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

/// The persisted statistics record.
///
/// # Examples
///
/// ```
/// use infinidoku_game::GameRecord;
///
/// let mut record = GameRecord::default();
/// record.apply_completion(90_000);
/// record.apply_completion(120_000); // slower, best time unchanged
///
/// assert_eq!(record.games_played, 2);
/// assert_eq!(record.best_time_ms, Some(90_000));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Fastest completion in milliseconds, if any game was ever completed.
    pub best_time_ms: Option<u64>,
    /// Total number of completed games.
    pub games_played: u64,
}

impl GameRecord {
    /// Folds one completed game into the record.
    ///
    /// Increments `games_played` and lowers `best_time_ms` iff `time_ms` is
    /// smaller than the current best or no best exists yet.
    pub fn apply_completion(&mut self, time_ms: u64) {
        self.games_played += 1;
        if self.best_time_ms.is_none_or(|best| time_ms < best) {
            self.best_time_ms = Some(time_ms);
        }
    }
}

/// Read-modify-write storage for the statistics record.
pub trait StatsStore: fmt::Debug {
    /// Loads the current record.
    ///
    /// A store with no record yet returns [`GameRecord::default`].
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the backing storage cannot be read or is
    /// malformed.
    fn load(&self) -> Result<GameRecord, StatsError>;

    /// Records a completed game and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the backing storage cannot be read or
    /// written.
    fn record_completion(&mut self, time_ms: u64) -> Result<GameRecord, StatsError>;
}

/// An in-process store; the record does not outlive the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: GameRecord,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> Result<GameRecord, StatsError> {
        Ok(self.record)
    }

    fn record_completion(&mut self, time_ms: u64) -> Result<GameRecord, StatsError> {
        self.record.apply_completion(time_ms);
        Ok(self.record)
    }
}

/// A store backed by a single JSON file.
///
/// A missing file loads as the default record, so no setup is required
/// before the first game.
///
/// # Examples
///
/// ```no_run
/// use infinidoku_game::{JsonFileStore, StatsStore as _};
///
/// let mut store = JsonFileStore::new("infinidoku_stats.json");
/// let record = store.record_completion(90_000)?;
/// assert_eq!(record.games_played, store.load()?.games_played);
/// # Ok::<(), infinidoku_game::StatsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store reading and writing the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self) -> Result<GameRecord, StatsError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(GameRecord::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn record_completion(&mut self, time_ms: u64) -> Result<GameRecord, StatsError> {
        let mut record = self.load()?;
        record.apply_completion(time_ms);
        fs::write(&self.path, serde_json::to_string(&record)?)?;
        Ok(record)
    }
}

/// An error accessing the statistics store.
#[derive(Debug, Display, Error, From)]
pub enum StatsError {
    /// The backing storage could not be read or written.
    #[display("failed to access the statistics store: {_0}")]
    Io(io::Error),
    /// The stored record could not be decoded.
    #[display("statistics record is malformed: {_0}")]
    Format(serde_json::Error),
}
