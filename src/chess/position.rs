//! Board position: piece placement plus side to move.
//!
//! Unlike a full game position, [`Position`] intentionally carries no
//! castling rights, en passant target or move clocks -- a tablebase built by
//! retrograde analysis over a handful of pieces never needs them, and pawns
//! are not modeled at all (see [`crate::chess::core::PieceKind`]).

use std::fmt;

use anyhow::bail;
use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::attacks;
use crate::chess::bitboard::{Bitboard, Board};
use crate::chess::core::{Piece, Player, Square};

/// A single move: relocate whatever piece stands on `from` to `to`, capturing
/// anything that was on `to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Upper bound on the number of legal moves reachable from any position this
/// crate ever builds a tablebase for: five pieces, the most mobile of which
/// (a queen in the center) has at most 27 destinations.
const MAX_MOVES: usize = 5 * 27;

/// A list of moves, stack-allocated since [`MAX_MOVES`] bounds it tightly.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// A chess position: where the pieces are, and whose turn it is.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Player,
}

impl Position {
    /// Constructs a position directly from a board and side to move, without
    /// validating legality. Prefer [`Self::try_from`] (or
    /// [`Self::from_placement_and_side`]) when parsing untrusted input.
    #[must_use]
    pub const fn new(board: Board, side_to_move: Player) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// Builds a position directly from a list of (square, piece) pairs,
    /// without validating legality. Used by tablebase construction, which
    /// enumerates candidate placements and only keeps the legal ones (see
    /// [`Self::is_legal`]).
    #[must_use]
    pub fn from_pieces(pieces: &[(Square, Piece)], side_to_move: Player) -> Self {
        let mut board = Board::empty();
        for (square, piece) in pieces {
            board.set(*square, *piece);
        }
        Self {
            board,
            side_to_move,
        }
    }

    /// Parses a position from a FEN-style piece placement field (e.g.
    /// `"4k3/Q7/5K2/8/8/8/8/8"`) and a side-to-move field (`"w"` or `"b"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the placement field is malformed (wrong number of
    /// ranks, unknown symbol, rank not summing to 8 files) or the side field
    /// is neither `"w"` nor `"b"`, or if the resulting position is illegal
    /// (see [`Self::is_legal`]).
    pub fn from_placement_and_side(placement: &str, side: &str) -> anyhow::Result<Self> {
        let mut board = Board::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            bail!(
                "malformed placement: expected 8 ranks, got {}",
                ranks.len()
            );
        }
        for (rank_index, rank) in ranks.iter().enumerate() {
            let rank_number = 7 - rank_index as u8;
            let mut file_index = 0u8;
            for symbol in rank.chars() {
                if let Some(empty_squares) = symbol.to_digit(10) {
                    file_index += empty_squares as u8;
                    continue;
                }
                if file_index >= 8 {
                    bail!("malformed placement: rank {rank} overflows 8 files");
                }
                let piece = Piece::try_from(symbol)?;
                let square = Square::new(file_index.try_into()?, rank_number.try_into()?);
                board.set(square, piece);
                file_index += 1;
            }
            if file_index != 8 {
                bail!("malformed placement: rank {rank} does not sum to 8 files");
            }
        }
        let position = Self {
            board,
            side_to_move: side.try_into()?,
        };
        validate(&position)?;
        Ok(position)
    }

    /// Side to move.
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// The underlying piece placement.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Piece occupying `square`, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.board.at(square)
    }

    /// Every piece on the board, with its square. Used by tablebase
    /// construction, which needs to enumerate and replace individual pieces
    /// rather than play moves forward.
    #[must_use]
    pub fn pieces(&self) -> Vec<(Square, Piece)> {
        Square::iter()
            .filter_map(|square| self.at(square).map(|piece| (square, piece)))
            .collect()
    }

    fn us(&self) -> Player {
        self.side_to_move
    }

    fn them(&self) -> Player {
        self.side_to_move.opponent()
    }

    fn king_square(&self, player: Player) -> Option<Square> {
        let kings = match player {
            Player::White => self.board.white_pieces.king,
            Player::Black => self.board.black_pieces.king,
        };
        kings.squares().next()
    }

    /// Squares attacked by every piece `player` owns.
    fn attacked_by(&self, player: Player) -> Bitboard {
        let occupied = self.board.occupied();
        let pieces = match player {
            Player::White => &self.board.white_pieces,
            Player::Black => &self.board.black_pieces,
        };
        let mut result = Bitboard::empty();
        for square in pieces.king.squares() {
            result |= attacks::king_attacks(square);
        }
        for square in pieces.queen.squares() {
            result |= attacks::queen_attacks(square, occupied);
        }
        for square in pieces.rooks.squares() {
            result |= attacks::rook_attacks(square, occupied);
        }
        for square in pieces.bishops.squares() {
            result |= attacks::bishop_attacks(square, occupied);
        }
        for square in pieces.knights.squares() {
            result |= attacks::knight_attacks(square);
        }
        result
    }

    /// Whether `player`'s king is currently attacked.
    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        match self.king_square(player) {
            Some(king) => self.attacked_by(player.opponent()).is_set(king),
            None => false,
        }
    }

    /// Pseudo-legal moves for the side to move: every destination a piece can
    /// reach, including ones that would leave the mover's own king in check.
    fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let occupied = self.board.occupied();
        let own = self.board.occupied_by(self.us());
        let pieces = match self.us() {
            Player::White => &self.board.white_pieces,
            Player::Black => &self.board.black_pieces,
        };
        let mut push = |from: Square, targets: Bitboard| {
            for to in (targets & !own).squares() {
                moves.push(Move { from, to });
            }
        };
        for from in pieces.king.squares() {
            push(from, attacks::king_attacks(from));
        }
        for from in pieces.queen.squares() {
            push(from, attacks::queen_attacks(from, occupied));
        }
        for from in pieces.rooks.squares() {
            push(from, attacks::rook_attacks(from, occupied));
        }
        for from in pieces.bishops.squares() {
            push(from, attacks::bishop_attacks(from, occupied));
        }
        for from in pieces.knights.squares() {
            push(from, attacks::knight_attacks(from));
        }
        moves
    }

    /// Legal moves for the side to move: pseudo-legal moves that do not leave
    /// the mover's own king in check.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        self.pseudo_legal_moves()
            .into_iter()
            .filter(|mv| !self.make_move(*mv).is_in_check(self.us()))
            .collect()
    }

    /// Applies `mv`, returning the resulting position. Does not check
    /// legality; the caller is expected to only pass moves from
    /// [`Self::generate_moves`] or [`Self::pseudo_legal_moves`].
    #[must_use]
    pub fn make_move(&self, mv: Move) -> Self {
        let mut board = self.board;
        let piece = board.at(mv.from).expect("move origin must be occupied");
        let opponent_pieces = match self.them() {
            Player::White => &mut board.white_pieces,
            Player::Black => &mut board.black_pieces,
        };
        if let Some(captured) = opponent_pieces.at(mv.to) {
            *opponent_pieces.bitboard_for(captured) &= !Bitboard::from(mv.to);
        }
        let own_pieces = match self.us() {
            Player::White => &mut board.white_pieces,
            Player::Black => &mut board.black_pieces,
        };
        *own_pieces.bitboard_for(piece.kind) &= !Bitboard::from(mv.from);
        *own_pieces.bitboard_for(piece.kind) |= Bitboard::from(mv.to);
        Self {
            board,
            side_to_move: self.them(),
        }
    }

    /// The side to move has no legal moves and is in check: this position is
    /// a checkmate.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.us()) && self.generate_moves().is_empty()
    }

    /// The side to move has no legal moves and is not in check: this
    /// position is a stalemate.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.us()) && self.generate_moves().is_empty()
    }

    /// A position is legal if both kings are present exactly once, they are
    /// not adjacent, and the side not to move is not currently in check
    /// (which would mean the side to move captured a king on the previous
    /// move -- impossible in a real game).
    #[must_use]
    pub fn is_legal(&self) -> bool {
        validate(self).is_ok()
    }
}

fn validate(position: &Position) -> anyhow::Result<()> {
    let white_kings = position.board.white_pieces.king.squares().count();
    if white_kings != 1 {
        bail!("expected 1 white king, got {white_kings}");
    }
    let black_kings = position.board.black_pieces.king.squares().count();
    if black_kings != 1 {
        bail!("expected 1 black king, got {black_kings}");
    }
    let white_king = position.king_square(Player::White).unwrap();
    let black_king = position.king_square(Player::Black).unwrap();
    if attacks::king_attacks(white_king).is_set(black_king) {
        bail!("kings cannot be adjacent");
    }
    if position.is_in_check(position.them()) {
        bail!("side not to move cannot be in check");
    }
    Ok(())
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Parses a position from a two-field string: `"<placement> <side>"`,
    /// matching the key format [`crate::tablebase::codec`] uses.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let fields: Vec<&str> = input.split_ascii_whitespace().collect();
        let [placement, side] = fields[..] else {
            bail!(
                "malformed position: expected 2 fields, got {} in '{input}'",
                fields.len()
            );
        };
        Self::from_placement_and_side(placement, side)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.board, self.side_to_move)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.board)?;
        write!(f, "side to move: {}", self.side_to_move)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Position;
    use crate::chess::core::Player;

    #[test]
    fn parses_mate_in_one() {
        let position = Position::try_from("4k3/Q7/5K2/8/8/8/8/8 w").unwrap();
        assert_eq!(position.to_string(), "4k3/Q7/5K2/8/8/8/8/8 w");
        assert_eq!(position.side_to_move(), Player::White);
        assert!(position.is_legal());
    }

    #[test]
    fn rejects_missing_king() {
        assert!(Position::try_from("8/8/8/8/8/8/8/4K3 w").is_err());
    }

    #[test]
    fn rejects_adjacent_kings() {
        assert!(Position::try_from("8/8/8/8/8/8/4kK2/8 w").is_err());
    }

    #[test]
    fn rejects_malformed_placement() {
        assert!(Position::try_from("not-a-fen w").is_err());
        assert!(Position::try_from("4k3/Q7/5K2/8/8/8/8 w").is_err());
    }

    #[test]
    fn checkmate_after_queen_move() {
        let before = Position::try_from("4k3/8/5K2/8/Q7/8/8/8 w").unwrap();
        let mv = before
            .generate_moves()
            .into_iter()
            .find(|mv| mv.to.to_string() == "e7")
            .expect("Qa4-e7 should be a legal move");
        let after = before.make_move(mv);
        assert_eq!(after.to_string(), "4k3/4Q3/5K2/8/8/8/8/8 b");
        assert!(after.is_checkmate());
    }
}
