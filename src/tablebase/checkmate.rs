//! Enumerates base checkmates: positions with Black to move, in check, with
//! no legal reply. These seed layer zero of a tablebase -- every other layer
//! is discovered by walking backwards from them.
//!
//! Grounded on the original retrograde-analysis implementation's
//! `generate_checkmates_for_piece_set_for_player`, which enumerates every way
//! to place the two kings plus a piece inventory on distinct squares and
//! keeps the ones that are legal and checkmate. That implementation walks all
//! `64^n` square tuples and throws away the ones with repeated squares; this
//! rewrite instead enumerates permutations of distinct squares directly,
//! which visits the same legal placements without the wasted work.

use std::collections::HashSet;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::chess::core::{Piece, PieceKind, Player, Square};
use crate::chess::position::Position;
use crate::tablebase::codec;
use crate::tablebase::inventory::Inventory;

/// Every checkmate (encoded as a tablebase key) reachable with `inventory` in
/// addition to the two kings, with Black to move and checkmated.
#[must_use]
pub fn checkmates_for(inventory: &Inventory) -> HashSet<String> {
    let mut slots = vec![
        Piece {
            owner: Player::White,
            kind: PieceKind::King,
        },
        Piece {
            owner: Player::Black,
            kind: PieceKind::King,
        },
    ];
    slots.extend(inventory.iter().map(|(kind, owner)| Piece {
        owner: *owner,
        kind: *kind,
    }));

    let mut result = HashSet::new();
    for squares in Square::iter().permutations(slots.len()) {
        let pieces: Vec<(Square, Piece)> = squares.into_iter().zip(slots.iter().copied()).collect();
        let position = Position::from_pieces(&pieces, Player::Black);
        if position.is_legal() && position.is_checkmate() {
            let _ = result.insert(codec::encode(&position));
        }
    }
    result
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::checkmates_for;
    use crate::chess::core::{PieceKind, Player};

    #[test]
    fn king_and_queen_forces_mates() {
        let inventory = vec![(PieceKind::Queen, Player::White)];
        let mates = checkmates_for(&inventory);
        assert!(!mates.is_empty());
        for key in &mates {
            assert!(key.ends_with(" b"));
        }
    }

    #[test]
    fn bare_kings_have_no_checkmates() {
        assert_eq!(checkmates_for(&Vec::new()), std::collections::HashSet::new());
    }
}
