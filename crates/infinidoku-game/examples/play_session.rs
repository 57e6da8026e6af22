//! Plays one scripted game from the command line.
//!
//! Generates a puzzle, makes a deliberate mistake, runs a check pass, then
//! solves the rest with hints and prints the final score and the persisted
//! statistics.
//!
//! ```sh
//! cargo run --example play_session -- --kind mini
//! ```

use clap::{Parser, ValueEnum};
use infinidoku_core::GridKind;
use infinidoku_game::{GameState, JsonFileStore, MonotonicClock, Session};
use infinidoku_generator::GenerateError;

#[derive(Debug, Parser)]
struct Args {
    /// Grid kind to play.
    #[arg(long, value_enum, default_value_t = Kind::Classic)]
    kind: Kind,

    /// Fraction of cells left as givens, in (0, 1).
    #[arg(long)]
    fill_ratio: Option<f64>,

    /// File for best-time statistics.
    #[arg(long, default_value = "infinidoku_stats.json")]
    stats_file: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Mini,
    Classic,
    Monster,
}

impl Kind {
    fn grid_kind(self) -> GridKind {
        match self {
            Self::Mini => GridKind::Mini,
            Self::Classic => GridKind::Classic,
            Self::Monster => GridKind::Monster,
        }
    }

    fn default_fill_ratio(self) -> f64 {
        match self {
            Self::Mini => 0.55,
            Self::Classic => 0.45,
            Self::Monster => 0.50,
        }
    }
}

fn main() -> Result<(), GenerateError> {
    env_logger::init();
    let args = Args::parse();

    let kind = args.kind.grid_kind();
    let fill_ratio = args.fill_ratio.unwrap_or(args.kind.default_fill_ratio());

    let mut session = Session::with_parts(
        Box::new(MonotonicClock::new()),
        Box::new(JsonFileStore::new(&args.stats_file)),
    );
    session.start(kind, fill_ratio)?;

    let board = session.board().ok_or(GenerateError::Unsolvable {
        size: kind.geometry().size(),
    })?;
    println!("starting a {kind:?} game with {} givens", board.filled_count());
    println!("{}", render(&session));

    // Put a wrong digit in the first empty cell, then pay for it in a check
    // pass.
    if let Some(pos) = first_empty(&session) {
        let legal = session.candidates_at(pos);
        let wrong = (1..=session.geometry().map_or(0, |g| g.max_digit()))
            .find(|&digit| !legal.contains(digit));
        if let Some(digit) = wrong {
            session.select_cell(pos);
            session.place(pos, digit);
            session.toggle_check();
            println!(
                "placed a wrong {digit} at {pos}; lives left: {}",
                session.lives()
            );
            session.toggle_check();
            session.clear_cell(pos);
        }
    }

    // Let hints finish the board.
    while session.state() == GameState::Active {
        session.hint();
    }

    println!("{}", render(&session));
    println!(
        "finished {:?} with score {} in {:.1}s",
        session.state(),
        session.score(),
        session.elapsed_ms() as f64 / 1_000.0
    );

    match session.stats_record() {
        Ok(record) => println!(
            "games played: {}, best time: {:?} ms",
            record.games_played, record.best_time_ms
        ),
        Err(err) => eprintln!("could not read statistics: {err}"),
    }
    Ok(())
}

fn first_empty(session: &Session) -> Option<infinidoku_core::Position> {
    let board = session.board()?;
    board.positions().find(|&pos| board.get(pos) == 0)
}

fn render(session: &Session) -> String {
    let Some(board) = session.board() else {
        return String::new();
    };
    let size = board.geometry().size();
    let text = board.to_string();
    let mut out = String::new();
    for row in 0..size {
        let start = usize::from(row) * usize::from(size);
        for (i, ch) in text[start..start + usize::from(size)].char_indices() {
            if i > 0 {
                out.push(' ');
            }
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
