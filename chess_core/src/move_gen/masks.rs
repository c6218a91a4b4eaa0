//! Mask construction and dynamic (non-magic) ray-walking attack computation.
//!
//! These functions are the "reference" implementations used to build the
//! lookup and magic tables in [`super::magic`] and [`super::attacks`], and to
//! cross-check them in tests. They are not used in the hot move-generation
//! path.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::board::{Bitboard, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Direction {
    East = 0,
    North = 1,
    NorthEast = 2,
    NorthWest = 3,
    West = 4,
    South = 5,
    SouthWest = 6,
    SouthEast = 7,
}

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::East,
    Direction::North,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::West,
    Direction::South,
    Direction::SouthWest,
    Direction::SouthEast,
];

fn step(dir: Direction, b: Bitboard) -> Bitboard {
    match dir {
        Direction::East => b.step_east(),
        Direction::North => b.step_north(),
        Direction::NorthEast => b.step_north_east(),
        Direction::NorthWest => b.step_north_west(),
        Direction::West => b.step_west(),
        Direction::South => b.step_south(),
        Direction::SouthWest => b.step_south_west(),
        Direction::SouthEast => b.step_south_east(),
    }
}

/// For every square and direction, the full unblocked ray (every square
/// reachable by repeated stepping, not including the origin).
pub fn gen_ray_attacks() -> [[Bitboard; 8]; 64] {
    let mut table = [[Bitboard::EMPTY; 8]; 64];
    for square in Square::all() {
        for &dir in &ALL_DIRECTIONS {
            let mut attacks = step(dir, Bitboard::from_square(square));
            loop {
                let extended = attacks | step(dir, attacks);
                if extended == attacks {
                    break;
                }
                attacks = extended;
            }
            table[square.index()][dir as usize] = attacks;
        }
    }
    table
}

fn positive_ray_attacks(
    occupied: Bitboard,
    square: Square,
    dir: Direction,
    rays: &[[Bitboard; 8]; 64],
) -> Bitboard {
    let attacks = rays[square.index()][dir as usize];
    let blockers = attacks & occupied;
    if blockers.is_empty() {
        return attacks;
    }
    let blocker_square = blockers.lsb_index();
    attacks ^ rays[blocker_square as usize][dir as usize]
}

fn negative_ray_attacks(
    occupied: Bitboard,
    square: Square,
    dir: Direction,
    rays: &[[Bitboard; 8]; 64],
) -> Bitboard {
    let attacks = rays[square.index()][dir as usize];
    let blockers = attacks & occupied;
    if blockers.is_empty() {
        return attacks;
    }
    let blocker_square = 63 - (blockers.0.leading_zeros() as u8);
    attacks ^ rays[blocker_square as usize][dir as usize]
}

/// The dynamic ray walker described for magic-table construction: march
/// along each relevant ray, stopping at (and including) the first blocker.
pub fn dynamic_bishop_attacks(
    occupied: Bitboard,
    square: Square,
    rays: &[[Bitboard; 8]; 64],
) -> Bitboard {
    positive_ray_attacks(occupied, square, Direction::NorthEast, rays)
        | negative_ray_attacks(occupied, square, Direction::SouthWest, rays)
        | positive_ray_attacks(occupied, square, Direction::NorthWest, rays)
        | negative_ray_attacks(occupied, square, Direction::SouthEast, rays)
}

pub fn dynamic_rook_attacks(
    occupied: Bitboard,
    square: Square,
    rays: &[[Bitboard; 8]; 64],
) -> Bitboard {
    positive_ray_attacks(occupied, square, Direction::North, rays)
        | negative_ray_attacks(occupied, square, Direction::South, rays)
        | positive_ray_attacks(occupied, square, Direction::East, rays)
        | negative_ray_attacks(occupied, square, Direction::West, rays)
}

/// Relevant-occupancy mask for a bishop: the four diagonals, excluding the
/// origin and excluding board-edge squares (a blocker on the edge cannot
/// itself block any further square).
pub fn bishop_mask(square: Square, rays: &[[Bitboard; 8]; 64]) -> Bitboard {
    let edge = Bitboard::RANK_1 | Bitboard::RANK_8 | Bitboard::A_FILE | Bitboard::H_FILE;
    (rays[square.index()][Direction::NorthEast as usize]
        | rays[square.index()][Direction::NorthWest as usize]
        | rays[square.index()][Direction::SouthWest as usize]
        | rays[square.index()][Direction::SouthEast as usize])
        .without(edge)
}

/// Relevant-occupancy mask for a rook: the rank and file, excluding the
/// origin and the far endpoint of each of the four rays.
pub fn rook_mask(square: Square, rays: &[[Bitboard; 8]; 64]) -> Bitboard {
    let vertical = (rays[square.index()][Direction::North as usize]
        | rays[square.index()][Direction::South as usize])
        .without(Bitboard::RANK_1 | Bitboard::RANK_8);
    let horizontal = (rays[square.index()][Direction::East as usize]
        | rays[square.index()][Direction::West as usize])
        .without(Bitboard::A_FILE | Bitboard::H_FILE);
    vertical | horizontal
}

pub fn knight_attacks_from(b: Bitboard) -> Bitboard {
    const NOT_A: Bitboard = Bitboard::A_FILE.not();
    const NOT_AB: Bitboard = Bitboard::A_FILE.or(Bitboard::B_FILE).not();
    const NOT_H: Bitboard = Bitboard::H_FILE.not();
    const NOT_GH: Bitboard = Bitboard::G_FILE.or(Bitboard::H_FILE).not();

    let mut attacks = Bitboard::EMPTY;
    attacks |= (b << 17) & NOT_A;
    attacks |= (b << 10) & NOT_AB;
    attacks |= (b >> 6) & NOT_AB;
    attacks |= (b >> 15) & NOT_A;
    attacks |= (b << 15) & NOT_H;
    attacks |= (b << 6) & NOT_GH;
    attacks |= (b >> 10) & NOT_GH;
    attacks |= (b >> 17) & NOT_H;
    attacks
}

pub fn king_attacks_from(b: Bitboard) -> Bitboard {
    let mut attacks = b.step_east() | b.step_west();
    let with_origin = b | attacks;
    attacks |= with_origin.step_north() | with_origin.step_south();
    attacks
}

pub fn white_pawn_attacks_from(b: Bitboard) -> Bitboard {
    b.step_north_east() | b.step_north_west()
}

pub fn black_pawn_attacks_from(b: Bitboard) -> Bitboard {
    b.step_south_east() | b.step_south_west()
}

/// The Parallel Bits Deposit / Scatter Bits operation: distributes the low
/// bits of `n` across the set bits of `mask`. Iterating `n` through
/// `0..1 << mask.pop_count()` enumerates every possible blocker arrangement
/// for that mask.
pub fn nth_blocker_arrangement_for_mask(mut n: usize, mask: Bitboard) -> Bitboard {
    let mut result = 0u64;
    for square in mask.bits() {
        result |= ((n & 1) as u64) << square.get();
        n >>= 1;
    }
    Bitboard(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn knight_attacks_from_center() {
        assert_eq!(
            knight_attacks_from(Bitboard::from_square(Square::D4)),
            "
                . . . . . . . .
                . . . . . . . .
                . . # . # . . .
                . # . . . # . .
                . . . . . . . .
                . # . . . # . .
                . . # . # . . .
                . . . . . . . .
            "
            .parse()
            .unwrap()
        );
    }

    #[test]
    fn rook_mask_excludes_edges() {
        let rays = gen_ray_attacks();
        assert_eq!(
            rook_mask(Square::A1, &rays),
            "
                . . . . . . . .
                # . . . . . . .
                # . . . . . . .
                # . . . . . . .
                # . . . . . . .
                # . . . . . . .
                # . . . . . . .
                . # # # # # # .
            "
            .parse()
            .unwrap()
        );
    }

    #[test]
    fn bishop_mask_excludes_edges() {
        let rays = gen_ray_attacks();
        assert_eq!(
            bishop_mask(Square::A1, &rays),
            "
                . . . . . . . .
                . . . . . . # .
                . . . . . # . .
                . . . . # . . .
                . . . # . . . .
                . . # . . . . .
                . # . . . . . .
                . . . . . . . .
            "
            .parse()
            .unwrap()
        );
    }

    #[test]
    fn dynamic_rook_attacks_stop_at_blocker() {
        let rays = gen_ray_attacks();
        let occupied: Bitboard = "
                . . . . . . . .
                . . . . # . . .
                . . . . . . . .
                . . . . # . . .
                . . # . # . . .
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
        "
        .parse()
        .unwrap();
        assert_eq!(
            dynamic_rook_attacks(occupied, Square::E4, &rays),
            "
                . . . . . . . .
                . . . . . . . .
                . . . . . . . .
                . . . . # . . .
                . . # # . # # #
                . . . . # . . .
                . . . . # . . .
                . . . . # . . .
            "
            .parse()
            .unwrap(),
        );
    }

    #[test]
    fn blocker_arrangement_scatters_bits() {
        let mask = Bitboard(0b11001010);
        assert_eq!(
            nth_blocker_arrangement_for_mask(5, mask),
            Bitboard(0b01000010)
        );
        assert_eq!(nth_blocker_arrangement_for_mask(0, mask), Bitboard(0));
        assert_eq!(
            nth_blocker_arrangement_for_mask(15, mask),
            Bitboard(0b11001010)
        );
    }
}
