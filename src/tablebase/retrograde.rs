//! Retrograde move generation: given a position, find every position one
//! half-move earlier that could have led to it.
//!
//! Grounded on the original retrograde-analysis implementation's
//! `generate_predecessor_board_states`, `get_piece_possible_predecessor_locations`
//! and `perform_unmove_or_uncapture`. Non-sliding attacks (knight, king) and
//! sliding attacks (queen, rook, bishop) are each their own inverse -- a piece
//! that attacks square X from square Y could equally have moved from Y to X
//! -- so the forward attack tables in [`crate::chess::attacks`] double as the
//! predecessor-square generator; see [`crate::chess::bitboard::Board::attack_targets`].
//!
//! Every candidate piece could either have simply moved (an "unmove") or have
//! captured something on the way (an "uncapture", reintroducing a piece of
//! the side to move that a forward move would have removed). Pawns are never
//! considered since this crate has no pawns.

use std::collections::HashSet;

use crate::chess::core::{Piece, PieceKind, Player, Square};
use crate::chess::position::Position;
use crate::tablebase::codec;

/// Piece kinds a captured piece may have been, i.e. every kind but the king
/// (a king is never captured in a legal game).
const CAPTURABLE_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Every position one half-move before `position`, as tablebase keys.
///
/// `side_just_moved` is whichever side played the move that produced
/// `position` -- always `position.side_to_move().opponent()`, but made
/// explicit so callers who already know it (e.g. [`crate::tablebase::fixedpoint`],
/// iterating one layer at a time) don't need to reconstruct it.
///
/// `max_pieces` caps how many pieces a predecessor may have: reintroducing a
/// captured piece (an "uncapture") is only considered while doing so would
/// keep the predecessor within that budget.
#[must_use]
pub fn predecessors(position: &Position, side_just_moved: Player, max_pieces: u8) -> HashSet<String> {
    let mover = side_just_moved;
    let captured_owner = position.side_to_move();
    let pieces = position.pieces();
    let mut result = HashSet::new();

    for (index, (current_square, piece)) in pieces.iter().enumerate() {
        if piece.owner != mover {
            continue;
        }
        for origin in position.board().attack_targets(*current_square, piece.kind) {
            if position.at(origin).is_some() {
                continue;
            }

            let mut unmoved: Vec<(Square, Piece)> = pieces.clone();
            unmoved[index] = (origin, *piece);
            try_insert(&unmoved, mover, &mut result);

            if pieces.len() < max_pieces as usize {
                for &captured_kind in &CAPTURABLE_KINDS {
                    let mut uncaptured = unmoved.clone();
                    uncaptured.push((
                        *current_square,
                        Piece {
                            owner: captured_owner,
                            kind: captured_kind,
                        },
                    ));
                    try_insert(&uncaptured, mover, &mut result);
                }
            }
        }
    }
    result
}

fn try_insert(pieces: &[(Square, Piece)], side_to_move: Player, result: &mut HashSet<String>) {
    let candidate = Position::from_pieces(pieces, side_to_move);
    if candidate.is_legal() {
        let _ = result.insert(codec::encode(&candidate));
    }
}
