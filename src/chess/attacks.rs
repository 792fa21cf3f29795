//! Mappings of occupied squares to the attacked squares for each piece kind.
//! Knight and king attacks are precomputed per-square the way sliding-piece
//! attacks are in a full move generator, since a ≤5-piece board is far too
//! small to justify magic-bitboard/PEXT machinery: sliding attacks are instead
//! computed by stepping outward ray-by-ray and stopping at the first occupied
//! square, which is cheap enough at this scale and needs no `build.rs` code
//! generation.

use crate::chess::bitboard::Bitboard;
use crate::chess::core::{Direction, Square, BOARD_SIZE};

/// Precalculated attacks of a knight from each square.
pub(super) const KNIGHT_ATTACKS: [Bitboard; BOARD_SIZE as usize] = [
    Bitboard::from_bits(0x0000_0000_0002_0400),
    Bitboard::from_bits(0x0000_0000_0005_0800),
    Bitboard::from_bits(0x0000_0000_000A_1100),
    Bitboard::from_bits(0x0000_0000_0014_2200),
    Bitboard::from_bits(0x0000_0000_0028_4400),
    Bitboard::from_bits(0x0000_0000_0050_8800),
    Bitboard::from_bits(0x0000_0000_00A0_1000),
    Bitboard::from_bits(0x0000_0000_0040_2000),
    Bitboard::from_bits(0x0000_0000_0204_0004),
    Bitboard::from_bits(0x0000_0000_0508_0008),
    Bitboard::from_bits(0x0000_0000_0A11_0011),
    Bitboard::from_bits(0x0000_0000_1422_0022),
    Bitboard::from_bits(0x0000_0000_2844_0044),
    Bitboard::from_bits(0x0000_0000_5088_0088),
    Bitboard::from_bits(0x0000_0000_A010_0010),
    Bitboard::from_bits(0x0000_0000_4020_0020),
    Bitboard::from_bits(0x0000_0002_0400_0402),
    Bitboard::from_bits(0x0000_0005_0800_0805),
    Bitboard::from_bits(0x0000_000A_1100_110A),
    Bitboard::from_bits(0x0000_0014_2200_2214),
    Bitboard::from_bits(0x0000_0028_4400_4428),
    Bitboard::from_bits(0x0000_0050_8800_8850),
    Bitboard::from_bits(0x0000_00A0_1000_10A0),
    Bitboard::from_bits(0x0000_0040_2000_2040),
    Bitboard::from_bits(0x0000_0204_0004_0200),
    Bitboard::from_bits(0x0000_0508_0008_0500),
    Bitboard::from_bits(0x0000_0A11_0011_0A00),
    Bitboard::from_bits(0x0000_1422_0022_1400),
    Bitboard::from_bits(0x0000_2844_0044_2800),
    Bitboard::from_bits(0x0000_5088_0088_5000),
    Bitboard::from_bits(0x0000_A010_0010_A000),
    Bitboard::from_bits(0x0000_4020_0020_4000),
    Bitboard::from_bits(0x0002_0400_0402_0000),
    Bitboard::from_bits(0x0005_0800_0805_0000),
    Bitboard::from_bits(0x000A_1100_110A_0000),
    Bitboard::from_bits(0x0014_2200_2214_0000),
    Bitboard::from_bits(0x0028_4400_4428_0000),
    Bitboard::from_bits(0x0050_8800_8850_0000),
    Bitboard::from_bits(0x00A0_1000_10A0_0000),
    Bitboard::from_bits(0x0040_2000_2040_0000),
    Bitboard::from_bits(0x0204_0004_0200_0000),
    Bitboard::from_bits(0x0508_0008_0500_0000),
    Bitboard::from_bits(0x0A11_0011_0A00_0000),
    Bitboard::from_bits(0x1422_0022_1400_0000),
    Bitboard::from_bits(0x2844_0044_2800_0000),
    Bitboard::from_bits(0x5088_0088_5000_0000),
    Bitboard::from_bits(0xA010_0010_A000_0000),
    Bitboard::from_bits(0x4020_0020_4000_0000),
    Bitboard::from_bits(0x0400_0402_0000_0000),
    Bitboard::from_bits(0x0800_0805_0000_0000),
    Bitboard::from_bits(0x1100_110A_0000_0000),
    Bitboard::from_bits(0x2200_2214_0000_0000),
    Bitboard::from_bits(0x4400_4428_0000_0000),
    Bitboard::from_bits(0x8800_8850_0000_0000),
    Bitboard::from_bits(0x1000_10A0_0000_0000),
    Bitboard::from_bits(0x2000_2040_0000_0000),
    Bitboard::from_bits(0x0004_0200_0000_0000),
    Bitboard::from_bits(0x0008_0500_0000_0000),
    Bitboard::from_bits(0x0011_0A00_0000_0000),
    Bitboard::from_bits(0x0022_1400_0000_0000),
    Bitboard::from_bits(0x0044_2800_0000_0000),
    Bitboard::from_bits(0x0088_5000_0000_0000),
    Bitboard::from_bits(0x0010_A000_0000_0000),
    Bitboard::from_bits(0x0020_4000_0000_0000),
];

const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::UpLeft,
    Direction::Up,
    Direction::UpRight,
    Direction::Right,
    Direction::Left,
    Direction::DownLeft,
    Direction::Down,
    Direction::DownRight,
];

/// Attacked squares of a knight standing on `square`.
#[must_use]
pub(super) fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

/// Attacked squares of a king standing on `square`.
#[must_use]
pub(super) fn king_attacks(square: Square) -> Bitboard {
    let mut result = Bitboard::empty();
    for direction in ALL_DIRECTIONS {
        if let Some(target) = square.shift(direction) {
            result |= Bitboard::from(target);
        }
    }
    result
}

/// Casts a ray from `square` in `direction`, stopping at (and including) the
/// first occupied square.
fn ray(square: Square, direction: Direction, occupied: Bitboard) -> Bitboard {
    let mut result = Bitboard::empty();
    let mut current = square;
    while let Some(next) = current.shift(direction) {
        result |= Bitboard::from(next);
        if occupied.is_set(next) {
            break;
        }
        current = next;
    }
    result
}

/// Attacked squares of a rook standing on `square`, with `occupied` as the
/// set of all occupied squares on the board (blocking further sliding).
#[must_use]
pub(super) fn rook_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    Direction::ROOK
        .into_iter()
        .fold(Bitboard::empty(), |acc, direction| {
            acc | ray(square, direction, occupied)
        })
}

/// Attacked squares of a bishop standing on `square`, with `occupied` as the
/// set of all occupied squares on the board (blocking further sliding).
#[must_use]
pub(super) fn bishop_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    Direction::BISHOP
        .into_iter()
        .fold(Bitboard::empty(), |acc, direction| {
            acc | ray(square, direction, occupied)
        })
}

/// Attacked squares of a queen standing on `square`: the union of rook and
/// bishop attacks from the same square.
#[must_use]
pub(super) fn queen_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(square, occupied) | bishop_attacks(square, occupied)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{bishop_attacks, king_attacks, knight_attacks, rook_attacks};
    use crate::chess::bitboard::Bitboard;
    use crate::chess::core::Square;

    #[test]
    fn knight_attacks_from_corner() {
        #[rustfmt::skip]
        assert_eq!(
            format!("{:?}", knight_attacks(Square::A1)),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . 1 . . . . . .\n\
             . . 1 . . . . .\n\
             . . . . . . . ."
        );
    }

    #[test]
    fn king_attacks_from_corner() {
        #[rustfmt::skip]
        assert_eq!(
            format!("{:?}", king_attacks(Square::A1)),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             1 1 . . . . . .\n\
             . 1 . . . . . ."
        );
    }

    #[test]
    fn rook_attacks_blocked_by_occupancy() {
        let occupied = Bitboard::from(Square::E6) | Bitboard::from(Square::B4);
        let attacks = rook_attacks(Square::E4, occupied);
        #[rustfmt::skip]
        assert_eq!(
            format!("{:?}", attacks),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . 1 . . .\n\
             . . . . 1 . . .\n\
             1 1 1 1 . 1 1 1\n\
             . . . . 1 . . .\n\
             . . . . 1 . . .\n\
             . . . . 1 . . ."
        );
    }

    #[test]
    fn bishop_attacks_open_board() {
        let attacks = bishop_attacks(Square::D4, Bitboard::empty());
        #[rustfmt::skip]
        assert_eq!(
            format!("{:?}", attacks),
            "1 . . . . . . .\n\
             . 1 . . . . 1 .\n\
             . . 1 . 1 . . .\n\
             . . . . . . . .\n\
             . . 1 . 1 . . .\n\
             . 1 . . . 1 . .\n\
             1 . . . . . 1 .\n\
             . . . . . . . 1"
        );
    }
}
