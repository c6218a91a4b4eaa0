//! Attack generation: magic bitboards for sliders, direct lookup tables for
//! the rest, reverse attack queries, and the pseudo-legal move generator
//! built on top of them.

mod attacks;
mod generate;
pub mod magic;
pub mod masks;

pub use attacks::{is_square_attacked, AttackTables};
pub use generate::generate_pseudo_legal_moves;
