//! Pseudo-legal move generation, per piece kind. Each generator iterates the
//! source squares of its piece/color, computes a target set restricted to
//! non-friendly squares, and emits a [`Move`] per target with the capture
//! flag set iff the target holds an enemy piece. Legality (own king not left
//! in check) is not checked here; that is [`crate::board::Position::make_move`]'s
//! job.

use crate::board::{Bitboard, Castling, Color, Move, MoveList, PieceType, Position, Promotion, Square};

use super::attacks::{is_square_attacked, AttackTables};
use super::magic::MagicTables;

pub fn generate_pseudo_legal_moves(position: &Position, moves: &mut MoveList) {
    let side = position.side();

    generate_pawn_moves(position, side, moves);
    generate_knight_moves(position, side, moves);
    generate_sliding_moves(position, side, PieceType::Bishop, moves);
    generate_sliding_moves(position, side, PieceType::Rook, moves);
    generate_sliding_moves(position, side, PieceType::Queen, moves);
    generate_king_moves(position, side, moves);
    generate_castling_moves(position, side, moves);
}

fn push_targets(
    moves: &mut MoveList,
    source: Square,
    targets: Bitboard,
    side: Color,
    piece: PieceType,
    enemy_occupancy: Bitboard,
) {
    for target in targets.bits() {
        let is_capture = enemy_occupancy.test(target);
        moves.push(Move::new(
            source, target, side, piece, None, is_capture, false, false, false,
        ));
    }
}

fn generate_knight_moves(position: &Position, side: Color, moves: &mut MoveList) {
    let own = position.occupancy(side);
    let enemy = position.occupancy(side.opponent());
    let tables = AttackTables::get();

    for source in position.piece_bb(side, PieceType::Knight).bits() {
        let targets = tables.knight_attacks(source).without(own);
        push_targets(moves, source, targets, side, PieceType::Knight, enemy);
    }
}

fn generate_king_moves(position: &Position, side: Color, moves: &mut MoveList) {
    let own = position.occupancy(side);
    let enemy = position.occupancy(side.opponent());
    let tables = AttackTables::get();

    for source in position.piece_bb(side, PieceType::King).bits() {
        let targets = tables.king_attacks(source).without(own);
        push_targets(moves, source, targets, side, PieceType::King, enemy);
    }
}

fn generate_sliding_moves(position: &Position, side: Color, piece: PieceType, moves: &mut MoveList) {
    let own = position.occupancy(side);
    let enemy = position.occupancy(side.opponent());
    let occupied = position.occupancy(Color::Both);
    let magic = MagicTables::get();

    for source in position.piece_bb(side, piece).bits() {
        let targets = match piece {
            PieceType::Bishop => magic.bishop_attacks(source, occupied),
            PieceType::Rook => magic.rook_attacks(source, occupied),
            PieceType::Queen => magic.queen_attacks(source, occupied),
            _ => unreachable!("generate_sliding_moves only handles sliders"),
        }
        .without(own);
        push_targets(moves, source, targets, side, piece, enemy);
    }
}

fn generate_pawn_moves(position: &Position, side: Color, moves: &mut MoveList) {
    let enemy = position.occupancy(side.opponent());
    let occupied = position.occupancy(Color::Both);
    let tables = AttackTables::get();

    let (push_offset, start_rank, promotion_rank) = match side {
        Color::White => (8i8, 1u8, 6u8),
        Color::Black => (-8i8, 6u8, 1u8),
        Color::Both => unreachable!("a pawn's color is always White or Black"),
    };

    for source in position.piece_bb(side, PieceType::Pawn).bits() {
        let on_promotion_rank = source.rank() == promotion_rank;
        let single_target = source.offset(push_offset);

        if !occupied.test(single_target) {
            emit_pawn_quiet_or_promotion(moves, source, single_target, side, on_promotion_rank);

            if source.rank() == start_rank {
                let double_target = single_target.offset(push_offset);
                if !occupied.test(double_target) {
                    moves.push(Move::new(
                        source,
                        double_target,
                        side,
                        PieceType::Pawn,
                        None,
                        false,
                        true,
                        false,
                        false,
                    ));
                }
            }
        }

        let attacks = tables.pawn_attacks(side, source);

        for target in (attacks & enemy).bits() {
            emit_pawn_capture_or_promotion(moves, source, target, side, on_promotion_rank);
        }

        if let Some(en_passant_square) = position.en_passant() {
            if attacks.test(en_passant_square) {
                moves.push(Move::new(
                    source,
                    en_passant_square,
                    side,
                    PieceType::Pawn,
                    None,
                    true,
                    false,
                    true,
                    false,
                ));
            }
        }
    }
}

fn emit_pawn_quiet_or_promotion(
    moves: &mut MoveList,
    source: Square,
    target: Square,
    side: Color,
    on_promotion_rank: bool,
) {
    if on_promotion_rank {
        for promotion in Promotion::ALL {
            moves.push(Move::new(
                source,
                target,
                side,
                PieceType::Pawn,
                Some(promotion),
                false,
                false,
                false,
                false,
            ));
        }
    } else {
        moves.push(Move::new(
            source,
            target,
            side,
            PieceType::Pawn,
            None,
            false,
            false,
            false,
            false,
        ));
    }
}

fn emit_pawn_capture_or_promotion(
    moves: &mut MoveList,
    source: Square,
    target: Square,
    side: Color,
    on_promotion_rank: bool,
) {
    if on_promotion_rank {
        for promotion in Promotion::ALL {
            moves.push(Move::new(
                source,
                target,
                side,
                PieceType::Pawn,
                Some(promotion),
                true,
                false,
                false,
                false,
            ));
        }
    } else {
        moves.push(Move::new(
            source,
            target,
            side,
            PieceType::Pawn,
            None,
            true,
            false,
            false,
            false,
        ));
    }
}

/// Emits the castle move for each of the four variants whose rights bit is
/// set, the transit/landing squares are empty, and neither the king's
/// current square nor any square it passes through is attacked. Checking the
/// king's current square here (rather than leaving it to the post-move
/// legality filter) closes the "castling out of check" gap left open by the
/// source this design is modeled after.
fn generate_castling_moves(position: &Position, side: Color, moves: &mut MoveList) {
    let occupied = position.occupancy(Color::Both);
    let opponent = side.opponent();
    let rights = position.castling();

    let (king_square, kingside_right, kingside_empty, kingside_safe, kingside_target) = match side
    {
        Color::White => (
            Square::E1,
            Castling::WHITE_KINGSIDE,
            [Square::F1, Square::G1],
            [Square::E1, Square::F1, Square::G1],
            Square::G1,
        ),
        _ => (
            Square::E8,
            Castling::BLACK_KINGSIDE,
            [Square::F8, Square::G8],
            [Square::E8, Square::F8, Square::G8],
            Square::G8,
        ),
    };

    if rights.contains(kingside_right)
        && kingside_empty.iter().all(|&sq| !occupied.test(sq))
        && kingside_safe
            .iter()
            .all(|&sq| !is_square_attacked(position, sq, opponent))
    {
        moves.push(Move::new(
            king_square,
            kingside_target,
            side,
            PieceType::King,
            None,
            false,
            false,
            false,
            true,
        ));
    }

    let (queenside_right, queenside_empty, queenside_safe, queenside_target) = match side {
        Color::White => (
            Castling::WHITE_QUEENSIDE,
            [Square::D1, Square::C1, Square::B1],
            [Square::E1, Square::D1, Square::C1],
            Square::C1,
        ),
        _ => (
            Castling::BLACK_QUEENSIDE,
            [Square::D8, Square::C8, Square::B8],
            [Square::E8, Square::D8, Square::C8],
            Square::C8,
        ),
    };

    if rights.contains(queenside_right)
        && queenside_empty.iter().all(|&sq| !occupied.test(sq))
        && queenside_safe
            .iter()
            .all(|&sq| !is_square_attacked(position, sq, opponent))
    {
        moves.push(Move::new(
            king_square,
            queenside_target,
            side,
            PieceType::King,
            None,
            false,
            false,
            false,
            true,
        ));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::parse_fen;
    use crate::test_utils::assert_in_any_order;

    fn moves_from(position: &Position, source: Square) -> Vec<Move> {
        let mut moves = MoveList::new();
        generate_pseudo_legal_moves(position, &mut moves);
        moves.into_iter().filter(|m| m.source() == source).collect()
    }

    #[test]
    fn knight_in_center_has_eight_targets() {
        let position = parse_fen("4k3/8/8/3N4/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(moves_from(&position, Square::D5).len(), 8);
    }

    #[test]
    fn pawn_double_push_only_from_start_rank() {
        let position = parse_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        let moves = moves_from(&position, Square::E3);
        assert_eq!(moves.len(), 1);
        assert!(!moves[0].is_double_push());
    }

    #[test]
    fn pawn_promotion_emits_four_moves() {
        let position = parse_fen("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let moves = moves_from(&position, Square::E7);
        assert_in_any_order(
            moves.iter().map(|m| m.promotion()),
            [
                Some(Promotion::Queen),
                Some(Promotion::Rook),
                Some(Promotion::Bishop),
                Some(Promotion::Knight),
            ],
        );
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let position = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let moves = moves_from(&position, Square::E5);
        let ep = moves.iter().find(|m| m.is_en_passant());
        assert!(ep.is_some());
        assert_eq!(ep.unwrap().target(), Square::D6);
    }

    #[test]
    fn castling_through_check_is_rejected() {
        // Black rook on f8 attacks f1 via the open f-file, which the white
        // king must pass through to castle kingside.
        let position = parse_fen("k4r2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let moves = moves_from(&position, Square::E1);
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn castling_out_of_check_is_rejected() {
        // Black rook on e8 attacks e1 via the open e-file: the white king
        // itself is in check, even though f1/g1 and d1/c1 are untouched.
        let position = parse_fen("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = moves_from(&position, Square::E1);
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn castling_available_when_clear() {
        let position = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = moves_from(&position, Square::E1);
        assert_eq!(moves.iter().filter(|m| m.is_castle()).count(), 2);
    }
}
