//! Looks up a position in a built tablebase and reports the moves that keep
//! the forced mate on schedule.
//!
//! Grounded on the original retrograde-analysis implementation's
//! `get_depth_to_mate_for_state` (linear scan over layers) and the
//! move-selection loop in `get_next_move.cpp`, which tries every legal move
//! and reports the ones landing in the next-shallower layer.

use std::collections::HashSet;

use crate::chess::core::Piece;
use crate::chess::position::{Move, Position};
use crate::tablebase::codec::{self, Key};
use crate::tablebase::Tablebase;

/// How many half-moves from mate `position` is, according to `tablebase`, if
/// it appears in the tablebase at all.
#[must_use]
pub fn depth_to_mate(tablebase: &Tablebase, position: &Position) -> Option<usize> {
    let key = codec::encode(position);
    tablebase.iter().position(|layer| layer.contains(&key))
}

/// Every successor position (as a tablebase key) that keeps `position` on the
/// shortest known forced mate.
///
/// Returns an empty set if `position` is not in the tablebase (not a forced
/// win, or outside the material range it was built for) or is already
/// checkmate (depth 0, nothing left to move).
#[must_use]
pub fn best_moves(position: &Position, tablebase: &Tablebase) -> HashSet<Key> {
    let Some(depth) = depth_to_mate(tablebase, position) else {
        return HashSet::new();
    };
    if depth == 0 {
        return HashSet::new();
    }
    let next_layer = &tablebase[depth - 1];
    position
        .generate_moves()
        .into_iter()
        .map(|mv| codec::encode(&position.make_move(mv)))
        .filter(|key| next_layer.contains(key))
        .collect()
}

/// A recommended move: which piece, and where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    #[allow(missing_docs)]
    pub mv: Move,
    #[allow(missing_docs)]
    pub piece: Piece,
    /// Half-moves from mate once this move is played.
    pub resulting_depth: usize,
}

impl Recommendation {
    /// A human-readable description, e.g. "Move the queen from a4 to e8.".
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Move the {} from {} to {}.",
            self.piece.name(),
            self.mv.from,
            self.mv.to
        )
    }
}

/// Every [`Recommendation`] that reproduces one of the keys [`best_moves`]
/// would return, for callers (the `probe` binary) that want to describe the
/// moves rather than just the resulting keys.
#[must_use]
pub fn recommendations(position: &Position, tablebase: &Tablebase) -> Vec<Recommendation> {
    let Some(depth) = depth_to_mate(tablebase, position) else {
        return Vec::new();
    };
    if depth == 0 {
        return Vec::new();
    }
    let next_layer = &tablebase[depth - 1];
    position
        .generate_moves()
        .into_iter()
        .filter_map(|mv| {
            let piece = position.at(mv.from)?;
            let after = position.make_move(mv);
            if next_layer.contains(&codec::encode(&after)) {
                Some(Recommendation {
                    mv,
                    piece,
                    resulting_depth: depth - 1,
                })
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{best_moves, recommendations};
    use crate::chess::core::{PieceKind, Player};
    use crate::chess::position::Position;
    use crate::tablebase::fixedpoint::build;

    #[test]
    fn recommends_the_winning_move() {
        let starting = vec![(PieceKind::Queen, Player::White)];
        let tablebase = build(6, 3, Some(&starting)).unwrap();
        assert!(tablebase.len() >= 2, "build should discover at least one forced-win layer");
        let key = tablebase[1].iter().next().expect("layer 1 should be non-empty");
        let position = Position::try_from(key.as_str()).unwrap();

        let moves = best_moves(&position, &tablebase);
        assert!(!moves.is_empty(), "layer 1 positions have a winning move");
        for successor in &moves {
            assert!(tablebase[0].contains(successor));
        }

        let recs = recommendations(&position, &tablebase);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|rec| rec.resulting_depth == 0));
    }

    #[test]
    fn unknown_position_has_no_recommendation() {
        let starting = vec![(PieceKind::Queen, Player::White)];
        let tablebase = build(1, 3, Some(&starting)).unwrap();
        let position = Position::try_from("8/8/8/8/8/4k3/8/4K3 w").unwrap();
        assert_eq!(best_moves(&position, &tablebase), std::collections::HashSet::new());
        assert!(recommendations(&position, &tablebase).is_empty());
    }

    fn keys(strs: &[&str]) -> std::collections::HashSet<String> {
        strs.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn scenario_1_mate_in_1_kqvk() {
        let starting = vec![(PieceKind::Queen, Player::White)];
        let tablebase = build(1, 3, Some(&starting)).unwrap();
        let position = Position::try_from("4k3/Q7/5K2/8/8/8/8/8 w").unwrap();
        assert_eq!(best_moves(&position, &tablebase), keys(&["4k3/4Q3/5K2/8/8/8/8/8 b"]));
    }

    #[test]
    fn scenario_2_mate_in_9_kqvk() {
        let starting = vec![(PieceKind::Queen, Player::White)];
        let tablebase = build(9, 3, Some(&starting)).unwrap();
        let position = Position::try_from("8/4k3/8/3Q4/8/5K2/8/8 w").unwrap();
        assert_eq!(
            best_moves(&position, &tablebase),
            keys(&["8/4k3/8/3Q4/6K1/8/8/8 b", "8/4k3/8/3Q4/5K2/8/8/8 b"])
        );
    }

    #[test]
    fn scenario_3_mate_in_5_krvk() {
        let starting = vec![(PieceKind::Rook, Player::White)];
        let tablebase = build(5, 3, Some(&starting)).unwrap();
        let position = Position::try_from("5k2/8/8/3R1K2/8/8/8/8 w").unwrap();
        assert_eq!(best_moves(&position, &tablebase), keys(&["5k2/8/5K2/3R4/8/8/8/8 b"]));
    }

    #[test]
    fn scenario_4_no_forced_win_knvk() {
        let starting = vec![(PieceKind::Knight, Player::White)];
        let tablebase = build(6, 3, Some(&starting)).unwrap();
        let position = Position::try_from("5k2/8/5K2/2N5/8/8/8/8 b").unwrap();
        assert_eq!(best_moves(&position, &tablebase), std::collections::HashSet::new());
    }

    #[test]
    fn scenario_5_no_forced_win_kbvk() {
        let starting = vec![(PieceKind::Bishop, Player::White)];
        let tablebase = build(6, 3, Some(&starting)).unwrap();
        let position = Position::try_from("7k/8/8/1B6/8/4K3/8/8 w").unwrap();
        assert_eq!(best_moves(&position, &tablebase), std::collections::HashSet::new());
    }

    #[test]
    fn scenario_6_mate_in_2_with_uncapture_kqvkn() {
        let starting = vec![(PieceKind::Queen, Player::White), (PieceKind::Knight, Player::Black)];
        let tablebase = build(4, 4, Some(&starting)).unwrap();
        let position = Position::try_from("6k1/8/5K2/8/1n6/7Q/8/8 w").unwrap();
        assert_eq!(
            best_moves(&position, &tablebase),
            keys(&[
                "6k1/8/5K2/8/1n6/8/6Q1/8 b",
                "6k1/8/5K2/8/1n6/6Q1/8/8 b",
                "6k1/8/5K2/8/1n4Q1/8/8/8 b",
            ])
        );
    }

    #[test]
    fn scenario_7_zeroing_capture_kqvkn_to_kqvk() {
        let starting = vec![(PieceKind::Queen, Player::White), (PieceKind::Knight, Player::Black)];
        let tablebase = build(4, 4, Some(&starting)).unwrap();
        let position = Position::try_from("8/8/2Q2n1k/5K2/8/8/8/8 w").unwrap();
        assert_eq!(best_moves(&position, &tablebase), keys(&["8/8/2Q2K1k/8/8/8/8/8 b"]));
    }
}
