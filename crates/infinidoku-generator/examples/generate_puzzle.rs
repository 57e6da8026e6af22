//! Example demonstrating puzzle generation.
//!
//! Generates a puzzle for the chosen grid kind and fill ratio, then prints
//! the seed, the problem, and the solution in board text format.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Pick the board size and difficulty:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --kind monster --fill-ratio 0.32
//! ```
//!
//! Reproduce a previously printed puzzle:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed 424242
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use infinidoku_core::{Board, GridKind};
use infinidoku_generator::PuzzleGenerator;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Mini,
    Classic,
    Monster,
}

impl From<Kind> for GridKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Mini => GridKind::Mini,
            Kind::Classic => GridKind::Classic,
            Kind::Monster => GridKind::Monster,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board size to generate.
    #[arg(long, value_name = "KIND", default_value = "classic")]
    kind: Kind,

    /// Fraction of cells retained as givens, in (0, 1).
    #[arg(long, value_name = "RATIO", default_value_t = 0.45)]
    fill_ratio: f64,

    /// Seed for reproducible generation (default: fresh entropy).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();
    let kind = GridKind::from(args.kind);
    let generator = PuzzleGenerator::new(kind.geometry());

    let result = match args.seed {
        Some(seed) => generator.generate_with_seed(args.fill_ratio, seed),
        None => generator.generate(args.fill_ratio),
    };
    let puzzle = match result {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("generation failed: {err}");
            process::exit(1);
        }
    };

    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();
    println!("Problem ({} givens):", puzzle.problem.filled_count());
    print_board(&puzzle.problem);
    println!();
    println!("Solution:");
    print_board(&puzzle.solution);
}

fn print_board(board: &Board) {
    let size = usize::from(board.geometry().size());
    let text = board.to_string();
    for row in 0..size {
        println!("  {}", &text[row * size..(row + 1) * size]);
    }
}
