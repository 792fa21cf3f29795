//! Enumerates piece inventories: multisets of non-king pieces that, together
//! with the two kings every position has, describe an endgame material
//! configuration (e.g. "king and queen vs king").
//!
//! Grounded on the original retrograde-analysis implementation's
//! `generate_piece_combinations`/`generate_subsets_of_piece_combination`,
//! which impose a total order over the piece alphabet
//! `{B, N, Q, R, b, n, q, r}` (kings excluded, pawns never present) and
//! generate non-decreasing sequences over it -- i.e. combinations with
//! repetition, so "two white rooks" is reachable but never produced twice in
//! two different orders.

use crate::chess::core::{PieceKind, Player};

/// A single non-king piece identified by kind and owner.
pub type Token = (PieceKind, Player);

/// A multiset of non-king pieces. Both kings are implied and not stored
/// here.
pub type Inventory = Vec<Token>;

/// The eight-symbol alphabet combinations are drawn from, in the same order
/// as the ASCII ordering of `{B, N, Q, R, b, n, q, r}`: White pieces before
/// Black, and within a side, alphabetical by FEN letter.
const TOKENS: [Token; 8] = [
    (PieceKind::Bishop, Player::White),
    (PieceKind::Knight, Player::White),
    (PieceKind::Queen, Player::White),
    (PieceKind::Rook, Player::White),
    (PieceKind::Bishop, Player::Black),
    (PieceKind::Knight, Player::Black),
    (PieceKind::Queen, Player::Black),
    (PieceKind::Rook, Player::Black),
];

/// Smallest number of pieces (both kings, nothing else) a tablebase can be
/// built for.
pub const MIN_PIECES: u8 = 2;
/// Largest number of pieces this crate builds a tablebase for. Retrograde
/// analysis beyond this is possible in principle but combinatorially
/// expensive enough that the original implementation drew the same line.
pub const MAX_PIECES: u8 = 5;

/// Appends every non-decreasing sequence over `TOKENS` of length
/// `remaining`, prefixed by `prefix`, to `out`. `start` is the index into
/// `TOKENS` the next element may begin from, enforcing non-decreasing order
/// (and therefore avoiding generating the same multiset in more than one
/// order).
fn extend_non_decreasing(prefix: &[Token], start: usize, remaining: usize, out: &mut Vec<Inventory>) {
    if remaining == 0 {
        out.push(prefix.to_vec());
        return;
    }
    for (offset, token) in TOKENS.iter().enumerate().skip(start) {
        let mut next_prefix = prefix.to_vec();
        next_prefix.push(*token);
        extend_non_decreasing(&next_prefix, offset, remaining - 1, out);
    }
}

/// Every inventory reachable with at most `max_pieces` pieces total
/// (including both kings).
///
/// Callers are expected to have already checked `max_pieces` against
/// `MIN_PIECES..=MAX_PIECES` (see [`crate::tablebase::fixedpoint::build`]):
/// a `max_pieces` below `MIN_PIECES` simply yields an empty result.
#[must_use]
pub fn all_inventories(max_pieces: u8) -> Vec<Inventory> {
    let mut result = Vec::new();
    if max_pieces >= MIN_PIECES {
        for total in MIN_PIECES..=max_pieces {
            let extra = usize::from(total - MIN_PIECES);
            extend_non_decreasing(&[], 0, extra, &mut result);
        }
    }
    result
}

/// Every subset of `starting_pieces` (including the empty subset and
/// `starting_pieces` itself), preserving multiplicities positionally: each of
/// the `2^n` bitmasks over the input's positions selects a subset.
#[must_use]
pub fn subsets_of(starting_pieces: &Inventory) -> Vec<Inventory> {
    let n = starting_pieces.len();
    let mut result = Vec::with_capacity(1 << n);
    for mask in 0..(1u32 << n) {
        let subset = starting_pieces
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, token)| *token)
            .collect();
        result.push(subset);
    }
    result
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{all_inventories, subsets_of, PieceKind, Player};

    #[test]
    fn two_pieces_is_just_the_kings() {
        let inventories = all_inventories(2);
        assert_eq!(inventories, vec![Vec::new()]);
    }

    #[test]
    fn three_pieces_covers_every_single_extra_piece() {
        let inventories = all_inventories(3);
        // 1 (bare kings) + 8 (one of each token).
        assert_eq!(inventories.len(), 1 + 8);
        assert!(inventories.contains(&vec![(PieceKind::Queen, Player::White)]));
        assert!(inventories.contains(&vec![(PieceKind::Rook, Player::Black)]));
    }

    #[test]
    fn below_minimum_piece_count_is_empty() {
        assert_eq!(all_inventories(1), Vec::<Vec<_>>::new());
    }

    #[test]
    fn subsets_include_empty_and_full() {
        let starting = vec![(PieceKind::Queen, Player::White), (PieceKind::Rook, Player::Black)];
        let subsets = subsets_of(&starting);
        assert_eq!(subsets.len(), 4);
        assert!(subsets.contains(&Vec::new()));
        assert!(subsets.contains(&starting));
    }
}
