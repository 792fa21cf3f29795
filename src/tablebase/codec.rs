//! Canonical text encoding of positions used as tablebase keys.
//!
//! A key is `"<placement> <side>"`, the piece-placement and side-to-move
//! fields of a FEN string (there is no castling, en passant or move-clock
//! state to encode, since [`crate::chess::position::Position`] carries
//! none). This mirrors the original retrograde-analysis implementation's
//! `convert_array_to_FEN`/`convert_FEN_to_array`, which produced and consumed
//! the same two fields plus a constant `- - 0 1` suffix that this rewrite has
//! no use for.

use crate::chess::core::Player;
use crate::chess::position::Position;
use crate::tablebase::error::{Result, TablebaseError};

/// A tablebase key: the canonical `"<placement> <side>"` text encoding of a
/// [`Position`].
pub type Key = String;

/// Encodes `position` as a tablebase key.
#[must_use]
pub fn encode(position: &Position) -> Key {
    position.to_string()
}

/// Decodes a tablebase key back into a position.
///
/// # Errors
///
/// Returns [`TablebaseError::MalformedPosition`] if `key` is not a valid
/// `"<placement> <side>"` string describing a legal position.
pub fn decode(key: &str) -> Result<Position> {
    Position::try_from(key).map_err(|err| TablebaseError::MalformedPosition {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

/// Returns a copy of `position` with only the side to move changed. Used by
/// the probe to materialize opponent replies without re-parsing a key.
#[must_use]
pub fn with_side_to_move(position: &Position, side: Player) -> Position {
    Position::from_pieces(&position.pieces(), side)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{decode, encode, with_side_to_move};
    use crate::chess::core::Player;
    use crate::chess::position::Position;

    #[test]
    fn round_trips_mate_in_one() {
        let key = "4k3/Q7/5K2/8/8/8/8/8 w";
        let position = decode(key).unwrap();
        assert_eq!(encode(&position), key);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode("definitely not a position").is_err());
    }

    #[test]
    fn encode_matches_display() {
        let position = Position::try_from("4k3/Q7/5K2/8/8/8/8/8 w").unwrap();
        assert_eq!(encode(&position), position.to_string());
    }

    #[test]
    fn with_side_to_move_only_changes_the_side() {
        let position = Position::try_from("4k3/Q7/5K2/8/8/8/8/8 w").unwrap();
        let flipped = with_side_to_move(&position, Player::Black);
        assert_eq!(flipped.side_to_move(), Player::Black);
        assert_eq!(encode(&flipped), "4k3/Q7/5K2/8/8/8/8/8 b");
    }
}
