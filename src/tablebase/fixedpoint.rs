//! Builds a tablebase by alternating retrograde layers until no further
//! positions are discovered.
//!
//! Grounded on the original retrograde-analysis implementation's main loop in
//! `run_engine.cpp`. Layer 0 is every checkmate for the configured piece
//! inventories (Black to move, mated). Each following layer alternates
//! between two modes:
//!
//! - Odd layers (White to move): the predecessors of the previous, Black-to-move
//!   layer. Any such predecessor is a forced win for White -- White simply
//!   plays the move that reaches the known Black-to-move loss -- so every
//!   newly discovered predecessor is added unconditionally (existential).
//! - Even layers (Black to move): the predecessors of the previous, White-to-move
//!   layer, kept only if *every* legal Black reply lands in a position already
//!   known to be a White win (universal).
//!
//! The original implementation's universal check, `is_forced_win`, is
//! vacuously true for a position with no legal moves at all, which would
//! wrongly count stalemates (and positions that happen to already be
//! checkmate) as forced wins. This rewrite explicitly excludes positions with
//! no legal moves (`Position::is_stalemate`, or simply having none) before
//! applying the universal check.

use std::collections::HashSet;

use crate::chess::core::Player;
use crate::tablebase::codec::{self, Key};
use crate::tablebase::error::{Result, TablebaseError};
use crate::tablebase::inventory::{self, Inventory, MAX_PIECES, MIN_PIECES};
use crate::tablebase::{checkmate, retrograde, Tablebase};

/// Builds a tablebase for every inventory up to `max_pieces` pieces total, or
/// (if `starting_pieces` is given) every subset of that specific inventory,
/// up to `max_depth` half-moves from mate.
///
/// Stops early, before `max_depth`, once a layer comes back empty: no larger
/// depth can discover anything further once that happens.
///
/// # Errors
///
/// Returns [`TablebaseError::OutOfRange`] if `max_pieces` is outside
/// `MIN_PIECES..=MAX_PIECES`, or [`TablebaseError::InvalidInventory`] if
/// `starting_pieces` is given and its length doesn't leave room for exactly
/// `max_pieces` pieces total.
pub fn build(max_depth: u32, max_pieces: u8, starting_pieces: Option<&Inventory>) -> Result<Tablebase> {
    if !(MIN_PIECES..=MAX_PIECES).contains(&max_pieces) {
        return Err(TablebaseError::OutOfRange {
            reason: format!("max_pieces must be within {MIN_PIECES}..={MAX_PIECES}, got {max_pieces}"),
        });
    }
    let inventories = match starting_pieces {
        Some(starting) => {
            if starting.len() != usize::from(max_pieces - MIN_PIECES) {
                return Err(TablebaseError::InvalidInventory {
                    reason: format!(
                        "starting_pieces has {} token(s), expected {} for max_pieces {max_pieces}",
                        starting.len(),
                        max_pieces - MIN_PIECES
                    ),
                });
            }
            inventory::subsets_of(starting)
        },
        None => inventory::all_inventories(max_pieces),
    };

    let mut checkmates = HashSet::new();
    for combination in &inventories {
        checkmates.extend(checkmate::checkmates_for(combination));
    }

    let mut layers: Tablebase = vec![checkmates.clone()];
    let mut black_to_move_known: HashSet<Key> = checkmates;
    let mut white_to_move_known: HashSet<Key> = HashSet::new();
    let max_depth = max_depth as usize;

    while layers.len() <= max_depth {
        let previous = layers.last().expect("layers is never empty");
        if previous.is_empty() {
            break;
        }

        let next_layer = if layers.len() % 2 == 1 {
            expand_layer(previous, Player::Black, max_pieces, &white_to_move_known)?
        } else {
            filter_layer(previous, Player::White, max_pieces, &black_to_move_known, &white_to_move_known)?
        };

        if next_layer.is_empty() {
            break;
        }

        if layers.len() % 2 == 1 {
            white_to_move_known.extend(next_layer.iter().cloned());
        } else {
            black_to_move_known.extend(next_layer.iter().cloned());
        }
        layers.push(next_layer);
    }

    Ok(layers)
}

/// Decodes `key`, a key this crate produced itself earlier in the build. A
/// decode failure here is not bad input -- it is an invariant violation in a
/// position the core constructed -- so it is surfaced as
/// [`TablebaseError::RulesEngineError`] rather than silently discarded, per
/// the failure-semantics policy in [`crate::tablebase::error`].
fn decode_own_key(key: &str) -> Result<crate::chess::position::Position> {
    codec::decode(key).map_err(|err| TablebaseError::RulesEngineError {
        reason: format!("tablebase holds a key it cannot decode itself: {err}"),
    })
}

/// Odd layer: every new predecessor of `previous`, unconditionally.
/// `mover` is the side that made the move leading into `previous`'s
/// positions.
fn expand_layer(previous: &HashSet<Key>, mover: Player, max_pieces: u8, known: &HashSet<Key>) -> Result<HashSet<Key>> {
    let mut next = HashSet::new();
    for key in previous {
        let position = decode_own_key(key)?;
        for candidate in retrograde::predecessors(&position, mover, max_pieces) {
            if !known.contains(&candidate) {
                let _ = next.insert(candidate);
            }
        }
    }
    Ok(next)
}

/// Even layer: predecessors of `previous` kept only when every legal reply is
/// itself a known White win.
fn filter_layer(
    previous: &HashSet<Key>,
    mover: Player,
    max_pieces: u8,
    known: &HashSet<Key>,
    white_wins: &HashSet<Key>,
) -> Result<HashSet<Key>> {
    let mut next = HashSet::new();
    for key in previous {
        let position = decode_own_key(key)?;
        for candidate_key in retrograde::predecessors(&position, mover, max_pieces) {
            if known.contains(&candidate_key) || next.contains(&candidate_key) {
                continue;
            }
            let candidate = decode_own_key(&candidate_key)?;
            if is_forced_win(&candidate, white_wins) {
                let _ = next.insert(candidate_key);
            }
        }
    }
    Ok(next)
}

/// A Black-to-move position is a forced White win iff Black has at least one
/// legal move (stalemate is not a loss) and every legal reply lands on a
/// position already known to be a White win.
fn is_forced_win(candidate: &crate::chess::position::Position, white_wins: &HashSet<Key>) -> bool {
    let moves = candidate.generate_moves();
    !moves.is_empty()
        && moves
            .iter()
            .all(|mv| white_wins.contains(&codec::encode(&candidate.make_move(*mv))))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::build;
    use crate::chess::core::{PieceKind, Player};

    #[test]
    fn king_and_queen_builds_at_least_two_layers() {
        let starting = vec![(PieceKind::Queen, Player::White)];
        let layers = build(4, 3, Some(&starting)).unwrap();
        assert!(!layers[0].is_empty(), "checkmates should be non-empty");
        assert!(layers.len() >= 2, "at least one forced-win layer should exist");
    }

    #[test]
    fn out_of_range_piece_count_is_rejected() {
        assert!(build(1, 1, None).is_err());
        assert!(build(1, 6, None).is_err());
    }

    #[test]
    fn mismatched_starting_pieces_length_is_rejected() {
        let starting = vec![(PieceKind::Queen, Player::White)];
        assert!(build(1, 4, Some(&starting)).is_err());
    }
}
