//! Interactively looks up positions in a built tablebase.
//!
//! Grounded on the original retrograde-analysis implementation's
//! `get_next_move.cpp`: read a position from stdin, report the moves that
//! keep the forced mate on schedule (or that it is already checkmate, or
//! that the tablebase has nothing to say about it), and repeat.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use zugzwang::chess::position::Position;
use zugzwang::tablebase::{persistence, probe, Tablebase};

/// Looks up positions in a tablebase built by the `build` binary.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Tablebase file written by `build`.
    #[arg(long, default_value = "output.csv")]
    tablebase: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let tablebase = persistence::read(&args.tablebase)
        .with_context(|| format!("reading tablebase from {}", args.tablebase.display()))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Enter a position as \"<placement> <side>\", e.g. \"4k3/8/5K2/8/Q7/8/8/8 w\".");
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            break;
        }

        match Position::try_from(input) {
            Ok(position) => report(&tablebase, &position),
            Err(err) => println!("could not parse '{input}': {err}"),
        }

        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}

fn report(tablebase: &Tablebase, position: &Position) {
    match probe::depth_to_mate(tablebase, position) {
        None => println!("this tablebase has no forced win recorded for this position."),
        Some(0) => println!("this position is already checkmate."),
        Some(depth) => {
            let recommendations = probe::recommendations(position, tablebase);
            if recommendations.is_empty() {
                println!("this position is recorded as a forced win, but no move reproduces it -- the tablebase may be stale.");
            } else {
                for recommendation in &recommendations {
                    println!("{} (mate in {}.)", recommendation.describe(), depth);
                }
            }
        },
    }
}
