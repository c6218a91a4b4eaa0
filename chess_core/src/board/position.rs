use std::fmt;

use super::{Bitboard, Castling, Color, Move, MoveList, PieceType, Square};
use crate::move_gen::{generate_pseudo_legal_moves, is_square_attacked};

/// Whether [`Position::make_move`] should accept quiet moves or only
/// captures. `CapturesOnly` exists for quiescence-style search, which is
/// otherwise out of scope here, but costs nothing to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    AllMoves,
    CapturesOnly,
}

/// A read-only snapshot of a [`Position`]'s state, for external inspection.
/// This is exactly the data [`Position::make_move`] saves and
/// [`Position::unmake_move`] restores internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub pieces: [[Bitboard; 6]; 2],
    pub occupancy: [Bitboard; 3],
    pub side: Color,
    pub castling: Castling,
    pub enpassant: Option<Square>,
}

/// The full board state: twelve piece bitboards, the derived occupancies,
/// side to move, castling rights, and the en-passant target square.
///
/// `Position` is a plain value type (`Copy`, under 150 bytes) owned by the
/// caller; `make_move`/`unmake_move` take it by `&mut self` plus an
/// explicit snapshot rather than relying on any process-wide mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupancy: [Bitboard; 3],
    pub(crate) side: Color,
    pub(crate) castling: Castling,
    pub(crate) enpassant: Option<Square>,
}

impl Position {
    /// An empty board: no pieces, white to move, no castling rights, no
    /// en-passant square. Only useful as a base to fill in (e.g. by FEN
    /// parsing).
    pub fn empty() -> Self {
        Self {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupancy: [Bitboard::EMPTY; 3],
            side: Color::White,
            castling: Castling::empty(),
            enpassant: None,
        }
    }

    /// The standard chess starting position.
    pub fn starting_position() -> Self {
        super::fen::parse_fen(super::fen::STARTING_POSITION_FEN)
            .expect("starting position FEN is well-formed")
    }

    pub fn piece_bb(&self, color: Color, piece: PieceType) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy[color.index()]
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.enpassant
    }

    /// Valid only when the given color has exactly one king on the board.
    pub fn king_square(&self, color: Color) -> Square {
        self.piece_bb(color, PieceType::King).to_square()
    }

    /// Renders this position back into FEN text.
    pub fn to_fen(&self) -> String {
        super::fen::position_to_fen(self)
    }

    pub fn state(&self) -> State {
        State {
            pieces: self.pieces,
            occupancy: self.occupancy,
            side: self.side,
            castling: self.castling,
            enpassant: self.enpassant,
        }
    }

    pub(crate) fn recompute_occupancy(&mut self) {
        let white = self.pieces[Color::White.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        let black = self.pieces[Color::Black.index()]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb);

        self.occupancy[Color::White.index()] = white;
        self.occupancy[Color::Black.index()] = black;
        self.occupancy[Color::Both.index()] = white | black;
    }

    /// All pseudo-legal moves for the side to move: they respect each
    /// piece's movement rules but may leave the mover's own king in check.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        generate_pseudo_legal_moves(self, &mut moves);
        moves
    }

    /// Pseudo-legal moves filtered down to those that do not leave the
    /// mover's king in check. More expensive than `pseudo_legal_moves`,
    /// since every candidate is played and immediately undone; intended for
    /// callers (the move-text parser, tests) that need the legal set, not
    /// for the hot perft path, which filters one move at a time via
    /// `make_move`.
    pub fn legal_moves(&self) -> MoveList {
        let mut legal = MoveList::new();
        for mv in self.pseudo_legal_moves() {
            let mut copy = *self;
            if copy.make_move(mv, MoveMode::AllMoves).is_some() {
                legal.push(mv);
            }
        }
        legal
    }

    /// Applies `mv`, in place.
    ///
    /// Returns the pre-move snapshot (to later pass to `unmake_move`) if the
    /// move was legal. Returns `None`, leaving `self` unchanged, if `mode`
    /// is `CapturesOnly` and `mv` is not a capture, or if the move would
    /// leave the mover's own king attacked.
    pub fn make_move(&mut self, mv: Move, mode: MoveMode) -> Option<Position> {
        if mode == MoveMode::CapturesOnly && !mv.is_capture() {
            return None;
        }

        let snapshot = *self;

        let mover = mv.color();
        let opponent = mover.opponent();
        let piece = mv.piece_type();
        let source = mv.source();
        let target = mv.target();

        self.pieces[mover.index()][piece.index()].clear(source);
        self.pieces[mover.index()][piece.index()].set(target);

        if mv.is_capture() && !mv.is_en_passant() {
            for captured in PieceType::ALL {
                if self.pieces[opponent.index()][captured.index()].test(target) {
                    self.pieces[opponent.index()][captured.index()].clear(target);
                    break;
                }
            }
        }

        if let Some(promotion) = mv.promotion() {
            self.pieces[mover.index()][PieceType::Pawn.index()].clear(target);
            self.pieces[mover.index()][promotion.piece_type().index()].set(target);
        }

        if mv.is_en_passant() {
            let captured_square = match mover {
                Color::White => target.offset(-8),
                _ => target.offset(8),
            };
            self.pieces[opponent.index()][PieceType::Pawn.index()].clear(captured_square);
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(target);
            self.pieces[mover.index()][PieceType::Rook.index()].clear(rook_from);
            self.pieces[mover.index()][PieceType::Rook.index()].set(rook_to);
        }

        self.enpassant = mv.is_double_push().then(|| match mover {
            Color::White => target.offset(-8),
            _ => target.offset(8),
        });

        self.castling &= Castling::from_bits_truncate(castling_rights_mask(source))
            & Castling::from_bits_truncate(castling_rights_mask(target));

        self.recompute_occupancy();
        self.side = opponent;

        if is_square_attacked(self, self.king_square(mover), opponent) {
            *self = snapshot;
            return None;
        }

        Some(snapshot)
    }

    /// Restores a snapshot returned by a previous legal `make_move` call.
    pub fn unmake_move(&mut self, snapshot: Position) {
        *self = snapshot;
    }
}

fn castle_rook_squares(king_target: Square) -> (Square, Square) {
    if king_target == Square::G1 {
        (Square::H1, Square::F1)
    } else if king_target == Square::C1 {
        (Square::A1, Square::D1)
    } else if king_target == Square::G8 {
        (Square::H8, Square::F8)
    } else if king_target == Square::C8 {
        (Square::A8, Square::D8)
    } else {
        unreachable!("castle moves only ever target g1, c1, g8, or c8")
    }
}

/// The `castlingRights[from] & castlingRights[to]` decay table: most squares
/// leave all rights untouched; the king/rook home squares clear exactly the
/// rights that depend on the piece that started there.
fn castling_rights_mask(square: Square) -> u8 {
    if square == Square::E1 {
        0b1100
    } else if square == Square::A1 {
        0b1101
    } else if square == Square::H1 {
        0b1110
    } else if square == Square::E8 {
        0b0011
    } else if square == Square::A8 {
        0b0111
    } else if square == Square::H8 {
        0b1011
    } else {
        0b1111
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = Square::new_unchecked(rank, file);
                let mut ch = '.';
                for piece in PieceType::ALL {
                    if self.piece_bb(Color::White, piece).test(square) {
                        ch = piece.to_char(Color::White);
                    } else if self.piece_bb(Color::Black, piece).test(square) {
                        ch = piece.to_char(Color::Black);
                    }
                }
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} to move, castling {}",
            if self.side == Color::White {
                "white"
            } else {
                "black"
            },
            self.castling.as_fen_str()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::parse_fen;
    use pretty_assertions::assert_eq;

    #[test]
    fn occupancy_matches_piece_union() {
        let position = Position::starting_position();
        for color in [Color::White, Color::Black] {
            let union = PieceType::ALL
                .iter()
                .fold(Bitboard::EMPTY, |acc, &p| acc | position.piece_bb(color, p));
            assert_eq!(position.occupancy(color), union);
        }
        assert_eq!(
            position.occupancy(Color::Both),
            position.occupancy(Color::White) | position.occupancy(Color::Black)
        );
    }

    #[test]
    fn make_unmake_round_trips() {
        let mut position = Position::starting_position();
        let before = position;

        let mv = Move::new(
            Square::E2,
            Square::E4,
            Color::White,
            PieceType::Pawn,
            None,
            false,
            true,
            false,
            false,
        );

        let snapshot = position.make_move(mv, MoveMode::AllMoves).unwrap();
        assert_ne!(position, before);
        assert_eq!(position.en_passant(), Some(Square::E3));

        position.unmake_move(snapshot);
        assert_eq!(position, before);
    }

    #[test]
    fn illegal_move_leaves_position_unchanged() {
        // The knight on e2 is pinned: moving it off the e-file would expose
        // the white king on e1 to the black rook on e8.
        let mut position = parse_fen("4r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let before = position;

        let mv = Move::new(
            Square::E2,
            Square::F4,
            Color::White,
            PieceType::Knight,
            None,
            false,
            false,
            false,
            false,
        );

        assert!(position.make_move(mv, MoveMode::AllMoves).is_none());
        assert_eq!(position, before);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut position = parse_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();

        let castle = Move::new(
            Square::E1,
            Square::G1,
            Color::White,
            PieceType::King,
            None,
            false,
            false,
            false,
            true,
        );

        position.make_move(castle, MoveMode::AllMoves).unwrap();
        assert!(position
            .piece_bb(Color::White, PieceType::Rook)
            .test(Square::F1));
        assert!(position
            .piece_bb(Color::White, PieceType::King)
            .test(Square::G1));
        assert!(!position.castling().contains(Castling::WHITE_KINGSIDE));
    }

    #[test]
    fn moving_rook_clears_only_its_own_side_right() {
        let mut position = Position::starting_position();

        let mv = Move::new(
            Square::H1,
            Square::H4,
            Color::White,
            PieceType::Rook,
            None,
            false,
            false,
            false,
            false,
        );

        position.make_move(mv, MoveMode::AllMoves).unwrap();
        assert!(!position.castling().contains(Castling::WHITE_KINGSIDE));
        assert!(position.castling().contains(Castling::WHITE_QUEENSIDE));
    }

    #[test]
    fn moving_black_queenside_rook_clears_only_black_queenside_right() {
        let mut position = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();

        let mv = Move::new(
            Square::A8,
            Square::A4,
            Color::Black,
            PieceType::Rook,
            None,
            false,
            false,
            false,
            false,
        );

        position.make_move(mv, MoveMode::AllMoves).unwrap();
        assert!(!position.castling().contains(Castling::BLACK_QUEENSIDE));
        assert!(position.castling().contains(Castling::BLACK_KINGSIDE));
    }

    #[test]
    fn moving_black_kingside_rook_clears_only_black_kingside_right() {
        let mut position = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();

        let mv = Move::new(
            Square::H8,
            Square::H4,
            Color::Black,
            PieceType::Rook,
            None,
            false,
            false,
            false,
            false,
        );

        position.make_move(mv, MoveMode::AllMoves).unwrap();
        assert!(!position.castling().contains(Castling::BLACK_KINGSIDE));
        assert!(position.castling().contains(Castling::BLACK_QUEENSIDE));
    }

    #[test]
    fn en_passant_capture_removes_the_skipped_pawn() {
        let mut position = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();

        let mv = Move::new(
            Square::E5,
            Square::D6,
            Color::White,
            PieceType::Pawn,
            None,
            true,
            false,
            true,
            false,
        );

        position.make_move(mv, MoveMode::AllMoves).unwrap();
        assert!(position
            .piece_bb(Color::White, PieceType::Pawn)
            .test(Square::D6));
        assert!(!position.piece_bb(Color::Black, PieceType::Pawn).test(Square::D5));
    }
}
