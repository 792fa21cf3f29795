//! Builds a tablebase for a given piece inventory and writes it to disk.
//!
//! Grounded on the original retrograde-analysis implementation's
//! `run_engine.cpp`: take a maximum piece count (and, optionally, a specific
//! starting inventory to restrict the build to its subsets), run the
//! retrograde fixed-point computation and persist the result.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use zugzwang::chess::core::{PieceKind, Player};
use zugzwang::tablebase::inventory::{self, Inventory, Token};
use zugzwang::tablebase::{fixedpoint, persistence};

/// Builds an endgame tablebase by retrograde analysis.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Total number of pieces on the board, including both kings.
    #[arg(long)]
    max_pieces: u8,

    /// How many half-moves deep to search before giving up on a layer.
    #[arg(long, default_value_t = 12)]
    depth: u32,

    /// Restrict the build to subsets of this specific inventory (e.g. "KQk"
    /// for "a white king and queen against a lone black king", with
    /// `max_pieces` 3), instead of every inventory up to `max_pieces`. Uses
    /// the FEN piece letters, including both kings: uppercase for White,
    /// lowercase for Black. Its length must equal `max_pieces`.
    #[arg(long)]
    starting_pieces: Option<String>,

    /// Where to write the resulting tablebase.
    #[arg(long, default_value = "output.csv")]
    output: PathBuf,
}

/// Parses one FEN piece letter into a [`Token`], or `None` for a king letter
/// ('K'/'k'): kings are part of every position implicitly and are not
/// themselves inventory tokens, but the CLI alphabet includes them (spec's
/// `starting_pieces` is given with length `max_pieces`, kings included) the
/// same way the original implementation's `generate_subsets_of_piece_combination`
/// accepts and filters them out before building combinations.
fn parse_token(symbol: char) -> anyhow::Result<Option<Token>> {
    let owner = if symbol.is_ascii_uppercase() {
        Player::White
    } else {
        Player::Black
    };
    let kind = match symbol.to_ascii_uppercase() {
        'K' => return Ok(None),
        'Q' => PieceKind::Queen,
        'R' => PieceKind::Rook,
        'B' => PieceKind::Bishop,
        'N' => PieceKind::Knight,
        _ => bail!("unknown piece letter '{symbol}': expected one of \"KQRBNkqrbn\""),
    };
    Ok(Some((kind, owner)))
}

fn main() -> anyhow::Result<()> {
    zugzwang::print_system_info();
    let args = Args::parse();

    let starting_pieces = args
        .starting_pieces
        .as_ref()
        .map(|starting| {
            starting
                .chars()
                .map(parse_token)
                .collect::<anyhow::Result<Vec<Option<Token>>>>()
                .map(|tokens| tokens.into_iter().flatten().collect::<Inventory>())
        })
        .transpose()?;

    println!(
        "building tablebase for up to {} piece(s) total{}",
        args.max_pieces,
        match &args.starting_pieces {
            Some(starting) => format!(" (restricted to subsets of \"{starting}\")"),
            None => String::new(),
        }
    );

    let tablebase = fixedpoint::build(args.depth, args.max_pieces, starting_pieces.as_ref()).context("building tablebase")?;
    for (depth, layer) in tablebase.iter().enumerate() {
        println!("layer {depth}: {} position(s)", layer.len());
    }

    persistence::write(&tablebase, &args.output).context("writing tablebase to disk")?;
    println!("wrote {} layer(s) to {}", tablebase.len(), args.output.display());

    Ok(())
}
