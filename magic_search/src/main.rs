//! Offline magic-number search. Prints a Rust array literal for the bishop
//! and rook magic tables, in the same shape baked into
//! `chess_core::move_gen::magic::{BISHOP_MAGICS, ROOK_MAGICS}`.
//!
//! This binary is how those constants were produced; the library itself
//! never performs a live search at runtime.

use chess_core::board::Square;
use chess_core::move_gen::magic::{find_magic, Xorshift32, BISHOP_RELEVANT_BITS, ROOK_RELEVANT_BITS};
use chess_core::move_gen::masks::{
    bishop_mask, dynamic_bishop_attacks, dynamic_rook_attacks, gen_ray_attacks, rook_mask,
};

fn search_all(
    label: &str,
    relevant_bits: &[u32; 64],
    mask_fn: impl Fn(Square, &[[chess_core::board::Bitboard; 8]; 64]) -> chess_core::board::Bitboard,
    dynamic_attacks_fn: impl Fn(
        chess_core::board::Bitboard,
        Square,
        &[[chess_core::board::Bitboard; 8]; 64],
    ) -> chess_core::board::Bitboard,
) {
    let rays = gen_ray_attacks();
    let mut rng = Xorshift32::new(Xorshift32::DEFAULT_SEED);

    println!("pub const {label}: [u64; 64] = [");
    for square in Square::all() {
        let mask = mask_fn(square, &rays);
        let bits = relevant_bits[square.index()];
        let magic = find_magic(square, mask, bits, &dynamic_attacks_fn, &rays, &mut rng)
            .unwrap_or_else(|| panic!("no magic found for {square} after 1e8 attempts"));
        println!("    0x{magic:016x},");
    }
    println!("];");
}

fn main() {
    env_logger::init();

    search_all(
        "BISHOP_MAGICS",
        &BISHOP_RELEVANT_BITS,
        bishop_mask,
        dynamic_bishop_attacks,
    );
    println!();
    search_all(
        "ROOK_MAGICS",
        &ROOK_RELEVANT_BITS,
        rook_mask,
        dynamic_rook_attacks,
    );
}
