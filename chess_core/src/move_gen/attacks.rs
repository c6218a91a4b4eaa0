//! Direct lookup tables for pawn/knight/king attacks, and the reverse attack
//! query [`is_square_attacked`] used by the legality filter in
//! [`crate::board::Position::make_move`] and by castling preconditions.

use std::sync::OnceLock;

use crate::board::{Bitboard, Color, PieceType, Position, Square};

use super::magic::MagicTables;
use super::masks::{
    black_pawn_attacks_from, king_attacks_from, knight_attacks_from, white_pawn_attacks_from,
};

/// Process-wide, read-only direct-lookup attack tables for the non-sliding
/// pieces. Slider attacks go through [`MagicTables`] instead.
pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
}

impl AttackTables {
    pub fn get() -> &'static AttackTables {
        static INSTANCE: OnceLock<AttackTables> = OnceLock::new();
        INSTANCE.get_or_init(AttackTables::new)
    }

    fn new() -> Self {
        let mut pawn = [[Bitboard::EMPTY; 64]; 2];
        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];

        for square in Square::all() {
            let from = Bitboard::from_square(square);
            pawn[Color::White.index()][square.index()] = white_pawn_attacks_from(from);
            pawn[Color::Black.index()][square.index()] = black_pawn_attacks_from(from);
            knight[square.index()] = knight_attacks_from(from);
            king[square.index()] = king_attacks_from(from);
        }

        Self { pawn, knight, king }
    }

    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.pawn[color.index()][square.index()]
    }

    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.knight[square.index()]
    }

    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.king[square.index()]
    }
}

/// True iff any piece of color `by` attacks `square` in `position`.
///
/// Uses reverse attack lookup: the squares that attack `square` are exactly
/// the squares a same-kind piece of the opposite color placed on `square`
/// would attack.
pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    let tables = AttackTables::get();

    if !(tables.pawn_attacks(by.opponent(), square) & position.piece_bb(by, PieceType::Pawn))
        .is_empty()
    {
        return true;
    }

    if !(tables.knight_attacks(square) & position.piece_bb(by, PieceType::Knight)).is_empty() {
        return true;
    }

    if !(tables.king_attacks(square) & position.piece_bb(by, PieceType::King)).is_empty() {
        return true;
    }

    let magic = MagicTables::get();
    let occupied = position.occupancy(Color::Both);

    let diagonal_attackers =
        position.piece_bb(by, PieceType::Bishop) | position.piece_bb(by, PieceType::Queen);
    if !(magic.bishop_attacks(square, occupied) & diagonal_attackers).is_empty() {
        return true;
    }

    let orthogonal_attackers =
        position.piece_bb(by, PieceType::Rook) | position.piece_bb(by, PieceType::Queen);
    if !(magic.rook_attacks(square, occupied) & orthogonal_attackers).is_empty() {
        return true;
    }

    false
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::parse_fen;
    use pretty_assertions::assert_eq;

    #[test]
    fn pawn_king_and_knight_reverse_lookup() {
        // White pawn on e4 attacks d5/f5; white knight on g1; black king e8.
        let position = parse_fen(
            "4k3/8/8/8/4P3/8/8/4K1N1 w - - 0 1",
        )
        .unwrap();

        assert!(is_square_attacked(&position, Square::D5, Color::White));
        assert!(is_square_attacked(&position, Square::F5, Color::White));
        assert!(!is_square_attacked(&position, Square::E5, Color::White));
        assert!(is_square_attacked(&position, Square::F3, Color::White));
        assert!(is_square_attacked(&position, Square::D1, Color::White));
    }

    #[test]
    fn slider_attacks_see_through_to_magic_tables() {
        let position = parse_fen("4k3/8/8/8/8/8/4K3/R7 w - - 0 1").unwrap();

        assert!(is_square_attacked(&position, Square::A8, Color::White));
        assert!(is_square_attacked(&position, Square::H1, Color::White));
        assert!(!is_square_attacked(&position, Square::A8, Color::Black));
    }

    #[test]
    fn blocked_slider_does_not_see_past_blocker() {
        let position = parse_fen("4k3/8/8/8/4r3/8/8/4R1K1 w - - 0 1").unwrap();

        assert!(is_square_attacked(&position, Square::E4, Color::White));
        assert!(!is_square_attacked(&position, Square::E8, Color::White));
    }
}
