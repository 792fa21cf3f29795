//! [`Bitboard`]-based representation for [`Board`]. Bitboard utilizes the fact
//! that modern processors operate on 64 bit integers, and the bit operations
//! can be performed simultaneously. This results in very efficient calculation
//! of possible attack vectors and other meaningful features that are
//! calculated to locate predecessor and successor positions.
//!
//! [Bitboard]: https://www.chessprogramming.org/Bitboards

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not};

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::chess::attacks;
use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Represents a set of squares and provides common operations (e.g. AND, OR,
/// XOR) over these sets. Each bit corresponds to one of 64 squares of the
/// chess board.
///
/// Mirroring [`Square`] semantics, the least significant bit corresponds to
/// A1, and the most significant bit to H8.
///
/// Bitboard is a thin wrapper around [u64].
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Bitboard(u64);

impl Bitboard {
    #[must_use]
    pub const fn data(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a bitboard directly from its raw bit pattern. Used for the
    /// precalculated attack tables in [`crate::chess::attacks`], which need a
    /// `const fn` constructor.
    #[must_use]
    pub(in crate::chess) const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[must_use]
    pub(in crate::chess) const fn is_set(&self, square: Square) -> bool {
        (self.0 & (1u64 << square as u8)) > 0
    }

    /// Iterates over the set squares, from A1 to H8.
    pub(in crate::chess) fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::iter().filter(|square| self.is_set(*square))
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.data().bitor(rhs.data()))
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0.bitor_assign(rhs.data());
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.data().bitand(rhs.data()))
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.data().bitxor(rhs.data()))
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0.bitand_assign(rhs.data());
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        (1u64 << square as u8).into()
    }
}

impl From<u64> for Bitboard {
    fn from(data: u64) -> Self {
        Self(data)
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format!("{:#066b}", self.data())
                .chars()
                .rev()
                .take(BOARD_SIZE as usize)
                .chunks(BOARD_WIDTH as usize)
                .into_iter()
                .map(|chunk| chunk
                    .map(|ch| match ch {
                        '1' => '1',
                        '0' => '.',
                        _ => unreachable!(),
                    })
                    .join(SQUARE_SEPARATOR))
                .collect::<Vec<String>>()
                .iter()
                .rev()
                .join(LINE_SEPARATOR)
        )
    }
}

/// Piece-centric representation of all material owned by one player. Uses
/// [Bitboard] to store a set of squares occupied by each piece kind. The main
/// user is [`crate::chess::position::Position`]; [Bitboard] is not very
/// useful on its own.
///
/// Defaults to an empty set, since there is no fixed starting inventory in an
/// endgame tablebase the way there is for a full game.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub(in crate::chess) struct BitboardSet {
    pub(in crate::chess) king: Bitboard,
    pub(in crate::chess) queen: Bitboard,
    pub(in crate::chess) rooks: Bitboard,
    pub(in crate::chess) bishops: Bitboard,
    pub(in crate::chess) knights: Bitboard,
}

impl BitboardSet {
    pub(in crate::chess) fn empty() -> Self {
        Self::default()
    }

    pub(in crate::chess) fn all(self) -> Bitboard {
        self.king | self.queen | self.rooks | self.bishops | self.knights
    }

    pub(in crate::chess) fn bitboard_for(&mut self, piece: PieceKind) -> &mut Bitboard {
        match piece {
            PieceKind::King => &mut self.king,
            PieceKind::Queen => &mut self.queen,
            PieceKind::Rook => &mut self.rooks,
            PieceKind::Bishop => &mut self.bishops,
            PieceKind::Knight => &mut self.knights,
        }
    }

    pub(in crate::chess) fn at(self, square: Square) -> Option<PieceKind> {
        if self.king.is_set(square) {
            return Some(PieceKind::King);
        }
        if self.queen.is_set(square) {
            return Some(PieceKind::Queen);
        }
        if self.rooks.is_set(square) {
            return Some(PieceKind::Rook);
        }
        if self.bishops.is_set(square) {
            return Some(PieceKind::Bishop);
        }
        if self.knights.is_set(square) {
            return Some(PieceKind::Knight);
        }
        None
    }
}

/// Piece-centric implementation of the chess board. This is the "back-end" of
/// [`crate::chess::position::Position`]; efficient board representation keeps
/// retrograde generation and checkmate enumeration tractable even though they
/// visit enormous numbers of candidate positions.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Board {
    pub(in crate::chess) white_pieces: BitboardSet,
    pub(in crate::chess) black_pieces: BitboardSet,
}

impl Board {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            white_pieces: BitboardSet::empty(),
            black_pieces: BitboardSet::empty(),
        }
    }

    /// Places `piece` on `square`, overwriting whatever was there.
    pub(in crate::chess) fn set(&mut self, square: Square, piece: Piece) {
        let set = match piece.owner {
            Player::White => &mut self.white_pieces,
            Player::Black => &mut self.black_pieces,
        };
        *set.bitboard_for(piece.kind) |= Bitboard::from(square);
    }

    /// Occupied squares, regardless of owner.
    #[must_use]
    pub(in crate::chess) fn occupied(self) -> Bitboard {
        self.white_pieces.all() | self.black_pieces.all()
    }

    /// Squares occupied by `player`'s pieces.
    #[must_use]
    pub(in crate::chess) fn occupied_by(self, player: Player) -> Bitboard {
        match player {
            Player::White => self.white_pieces.all(),
            Player::Black => self.black_pieces.all(),
        }
    }

    /// Squares a piece of `kind` standing on `square` attacks, given the
    /// board's current occupancy.
    ///
    /// By symmetry this is also the set of squares a piece of `kind` could
    /// have moved from to land on `square` -- the basis for retrograde
    /// (backward) move generation, which only ever needs to ask "where could
    /// this piece have come from".
    #[must_use]
    pub fn attack_targets(&self, square: Square, kind: PieceKind) -> Vec<Square> {
        let occupied = self.occupied();
        let targets = match kind {
            PieceKind::King => attacks::king_attacks(square),
            PieceKind::Knight => attacks::knight_attacks(square),
            PieceKind::Queen => attacks::queen_attacks(square, occupied),
            PieceKind::Rook => attacks::rook_attacks(square, occupied),
            PieceKind::Bishop => attacks::bishop_attacks(square, occupied),
        };
        targets.squares().collect()
    }

    /// WARNING: This is slow and inefficient for Bitboard-based piece-centric
    /// representation. Use with caution.
    #[must_use]
    pub fn at(self, square: Square) -> Option<Piece> {
        if let Some(kind) = self.white_pieces.at(square) {
            return Some(Piece {
                owner: Player::White,
                kind,
            });
        }
        if let Some(kind) = self.black_pieces.at(square) {
            return Some(Piece {
                owner: Player::Black,
                kind,
            });
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    /// Returns the board's piece placement field in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::iter() {
                let square = Square::new(file, rank);
                if let Some(piece) = self.at(square) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{}", piece.algebraic_symbol())?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let ascii_symbol = match self.at(Square::new(file, rank)) {
                    Some(piece) => piece.algebraic_symbol(),
                    None => '.',
                };
                write!(f, "{ascii_symbol}")?;
                if file != File::H {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != Rank::One {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Bitboard, BitboardSet, Board};
    use crate::chess::core::{Piece, PieceKind, Player, Square};

    #[test]
    fn basics() {
        assert_eq!(std::mem::size_of::<Bitboard>(), 8);
        assert_eq!(Bitboard::default().data(), u64::MIN);

        assert_eq!(Bitboard::from(Square::A1).data(), 1);
        assert_eq!(Bitboard::from(Square::B1).data(), 2);
        assert_eq!(Bitboard::from(Square::D1).data(), 8);
        assert_eq!(Bitboard::from(Square::H8).data(), 1u64 << 63);

        assert_eq!(
            Bitboard::from(Square::D1) | Bitboard::from(Square::B1),
            Bitboard::from(0b1000 | 0b10)
        );
    }

    #[test]
    fn set_is_empty_by_default() {
        let set = BitboardSet::empty();
        assert_eq!(set.all().data(), 0);
    }

    #[test]
    fn bitboard_dump() {
        #[rustfmt::skip]
        assert_eq!(
            format!("{:?}", Bitboard::default()),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ."
        );
        #[rustfmt::skip]
        assert_eq!(
            format!("{:?}", Bitboard::from(Square::G5) | Bitboard::from(Square::B8)),
            ". 1 . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . 1 .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ."
        );
    }

    #[test]
    fn board_dump_and_fen() {
        // Mate-in-1 KQvk position used throughout the tablebase tests:
        // 4k3/Q7/5K2/8/8/8/8/8.
        let mut board = Board::empty();
        board.set(
            Square::E8,
            Piece {
                owner: Player::Black,
                kind: PieceKind::King,
            },
        );
        board.set(
            Square::A7,
            Piece {
                owner: Player::White,
                kind: PieceKind::Queen,
            },
        );
        board.set(
            Square::F6,
            Piece {
                owner: Player::White,
                kind: PieceKind::King,
            },
        );

        assert_eq!(board.to_string(), "4k3/Q7/5K2/8/8/8/8/8");
    }

    #[test]
    fn board_empty_is_all_dots() {
        #[rustfmt::skip]
        assert_eq!(
            format!("{:?}", Board::empty()),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ."
        );
        assert_eq!(Board::empty().to_string(), "8/8/8/8/8/8/8/8");
    }
}
