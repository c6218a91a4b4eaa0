//! Board state: squares, bitboards, pieces, moves, castling rights, FEN
//! parsing, and the [`Position`] type that ties them together.

mod bitboard;
mod castling;
mod fen;
mod moves;
mod piece;
mod position;
mod square;

pub use bitboard::{Bitboard, ParseBitboardError};
pub use castling::Castling;
pub use fen::{parse_fen, position_to_fen, FenError, STARTING_POSITION_FEN};
pub use moves::{parse_move_text, Move, MoveList, MoveTextError, MAX_MOVES};
pub use piece::{Color, PieceType, Promotion};
pub use position::{MoveMode, Position, State};
pub use square::{ParseSquareError, Square};
