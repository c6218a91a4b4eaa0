//! FEN (Forsyth-Edwards Notation) parsing and emission.

use log::{debug, warn};
use thiserror::Error;

use super::{Bitboard, Castling, Color, PieceType, Position, Square};

/// The standard chess starting position, field 3 `KQkq` (both sides keep all
/// castling rights), field 4 `-` (no en-passant square).
pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Why a FEN string failed to parse. Each variant names the field that
/// rejected the input; a failed parse never mutates a caller's existing
/// [`Position`], since [`parse_fen`] builds a fresh one by value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 6 whitespace-separated fields, got {0}")]
    WrongFieldCount(usize),
    #[error("piece placement field must have 8 ranks separated by '/', got {0}")]
    WrongRankCount(usize),
    #[error("rank {rank} has {file} files instead of 8")]
    WrongFileCount { rank: u8, file: u8 },
    #[error("unrecognized character {0:?} in piece placement field")]
    InvalidPiecePlacement(char),
    #[error("side to move must be 'w' or 'b', got {0:?}")]
    InvalidSideToMove(String),
    #[error("castling field must be '-' or a combination of KQkq, got {0:?}")]
    InvalidCastling(String),
    #[error("en passant field must be '-' or a square like 'e3', got {0:?}")]
    InvalidEnPassant(String),
}

/// Parses a FEN string into a fresh [`Position`].
///
/// The first four whitespace-separated fields (piece placement, side to
/// move, castling rights, en-passant target) are consumed strictly; the
/// last two (halfmove clock, fullmove number) are read but otherwise
/// unused by the core, since neither draw detection nor move numbering is
/// in scope here.
pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        warn!("FEN parse failed: expected 6 fields, got {}", fields.len());
        return Err(FenError::WrongFieldCount(fields.len()));
    }

    let mut position = Position::empty();

    parse_piece_placement(&mut position, fields[0])?;

    position.side = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::InvalidSideToMove(other.to_owned())),
    };

    position.castling = parse_castling(fields[2])?;
    position.enpassant = parse_en_passant(fields[3])?;

    position.recompute_occupancy();

    debug!("parsed FEN: {fen}");
    Ok(position)
}

fn parse_piece_placement(position: &mut Position, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let mut file = 0u8;

        for c in rank_str.chars() {
            if file >= 8 {
                return Err(FenError::WrongFileCount { rank, file });
            }

            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPiecePlacement(c));
                }
                file += digit as u8;
                continue;
            }

            let (piece, color) =
                PieceType::from_char(c).ok_or(FenError::InvalidPiecePlacement(c))?;
            let square = Square::new(rank, file).ok_or(FenError::WrongFileCount { rank, file })?;
            position.pieces[color.index()][piece.index()].set(square);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::WrongFileCount { rank, file });
        }
    }

    Ok(())
}

fn parse_castling(field: &str) -> Result<Castling, FenError> {
    if field == "-" {
        return Ok(Castling::empty());
    }

    let mut rights = Castling::empty();
    for c in field.chars() {
        let flag = match c {
            'K' => Castling::WHITE_KINGSIDE,
            'Q' => Castling::WHITE_QUEENSIDE,
            'k' => Castling::BLACK_KINGSIDE,
            'q' => Castling::BLACK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling(field.to_owned())),
        };
        rights |= flag;
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    field
        .parse::<Square>()
        .map(Some)
        .map_err(|_| FenError::InvalidEnPassant(field.to_owned()))
}

/// Renders the position back into FEN text. Halfmove clock and fullmove
/// number are not tracked by [`Position`]; they are emitted as `0 1`, the
/// conventional placeholder for "unknown"/"start of game".
pub fn position_to_fen(position: &Position) -> String {
    let mut result = String::new();

    for rank in (0..8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8 {
            let square = Square::new_unchecked(rank, file);
            let mut found = None;
            for color in [Color::White, Color::Black] {
                for piece in PieceType::ALL {
                    if position.piece_bb(color, piece).test(square) {
                        found = Some(piece.to_char(color));
                    }
                }
            }
            match found {
                None => empty_run += 1,
                Some(c) => {
                    if empty_run > 0 {
                        result.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    result.push(c);
                }
            }
        }
        if empty_run > 0 {
            result.push((b'0' + empty_run) as char);
        }
        if rank > 0 {
            result.push('/');
        }
    }

    result.push(' ');
    result.push(if position.side() == Color::White {
        'w'
    } else {
        'b'
    });
    result.push(' ');
    result.push_str(&position.castling().as_fen_str());
    result.push(' ');
    match position.en_passant() {
        Some(sq) => result.push_str(&sq.to_string()),
        None => result.push('-'),
    }
    result.push_str(" 0 1");

    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::PieceType;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_starting_position() {
        let position = parse_fen(STARTING_POSITION_FEN).unwrap();
        assert_eq!(position.side(), Color::White);
        assert_eq!(position.castling(), Castling::all());
        assert_eq!(position.en_passant(), None);
        assert_eq!(
            position.piece_bb(Color::White, PieceType::Pawn),
            Bitboard::RANK_2
        );
        assert_eq!(
            position.piece_bb(Color::Black, PieceType::Pawn),
            Bitboard::RANK_7
        );
        assert!(position
            .piece_bb(Color::White, PieceType::King)
            .test(Square::E1));
    }

    #[test]
    fn occupancy_is_recomputed_after_parse() {
        let position = parse_fen(STARTING_POSITION_FEN).unwrap();
        assert_eq!(
            position.occupancy(Color::Both),
            position.occupancy(Color::White) | position.occupancy(Color::Black)
        );
    }

    #[test]
    fn parses_en_passant_square() {
        let position = parse_fen(
            "rnbqkb1r/pp1p1pPp/8/2p1pP2/1P1P4/3P3P/P1P1P3/RNBQKBNR w KQkq e6 0 1",
        )
        .unwrap();
        assert_eq!(position.en_passant(), Some(Square::E6));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenError::WrongFieldCount(4))
        );
    }

    #[test]
    fn rejects_unknown_piece_letter() {
        assert_eq!(
            parse_fen("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement('x'))
        );
    }

    #[test]
    fn rejects_wrong_rank_count() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
            Err(FenError::WrongRankCount(7))
        );
    }

    #[test]
    fn empty_board_parses_to_no_pieces() {
        let position = parse_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(position.occupancy(Color::Both), Bitboard::EMPTY);
    }

    #[test]
    fn round_trips_through_fen_text() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let position = parse_fen(fen).unwrap();
        assert_eq!(position_to_fen(&position), fen);
    }
}
