//! Zobrist hashing for position identification
//!
//! Each (location, color) pair, each board width, each board height and each
//! player gets a 128-bit random key. A position hash is the XOR of the keys of
//! every stone plus the width and height keys, so placing or removing a stone
//! is a single XOR.
//!
//! Keys are generated in two phases. The player keys and then the cell keys
//! come from one seeded stream; the size keys come from a re-seeded stream.
//! Player and size keys therefore stay the same when `MAX_LEN` changes and
//! only the cell keys move.

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

use rand::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::board::{Color, Loc, Player, MAX_ARR_SIZE, MAX_LEN, NUM_COLORS};

/// Seed for the player and cell key stream
const CELL_SEED: u64 = 0x426f_6172_643a_3a69;
/// Seed for the size key stream
const SIZE_SEED: u64 = 0x5a4f_4252_4953_545f;

/// 128-bit hash value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash128 {
    pub hash0: u64,
    pub hash1: u64,
}

impl Hash128 {
    pub const ZERO: Hash128 = Hash128::new(0, 0);

    pub const fn new(hash0: u64, hash1: u64) -> Self {
        Self { hash0, hash1 }
    }

    fn draw(rng: &mut XorShiftRng) -> Self {
        let hash0 = rng.next_u64();
        let hash1 = rng.next_u64();
        Self { hash0, hash1 }
    }
}

impl BitXor for Hash128 {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self::new(self.hash0 ^ rhs.hash0, self.hash1 ^ rhs.hash1)
    }
}

impl BitXorAssign for Hash128 {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.hash0 ^= rhs.hash0;
        self.hash1 ^= rhs.hash1;
    }
}

impl fmt::Display for Hash128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}{:016X}", self.hash1, self.hash0)
    }
}

/// Reserved hash for "the game has been decided", for consumers that key
/// caches by position hash.
pub const GAME_IS_OVER: Hash128 = Hash128::new(0xb6f9_e465_597a_77ee, 0xf1d5_83d9_60a4_ce7f);

/// Zobrist key table.
///
/// Empty and wall cells hash to zero, so only stones contribute.
pub struct ZobristTable {
    board: [[Hash128; NUM_COLORS]; MAX_ARR_SIZE],
    player: [Hash128; NUM_COLORS],
    size_x: [Hash128; MAX_LEN + 1],
    size_y: [Hash128; MAX_LEN + 1],
}

impl ZobristTable {
    /// Create a Zobrist table with deterministic random values.
    #[must_use]
    pub fn new() -> Self {
        let mut rng = XorShiftRng::seed_from_u64(CELL_SEED);

        let mut player = [Hash128::ZERO; NUM_COLORS];
        for key in player.iter_mut() {
            *key = Hash128::draw(&mut rng);
        }

        // Cell keys second, so the player keys do not depend on MAX_LEN.
        let mut board = [[Hash128::ZERO; NUM_COLORS]; MAX_ARR_SIZE];
        for keys in board.iter_mut() {
            for (color, key) in keys.iter_mut().enumerate() {
                if color == Color::Black.index() || color == Color::White.index() {
                    *key = Hash128::draw(&mut rng);
                }
            }
        }

        let mut rng = XorShiftRng::seed_from_u64(SIZE_SEED);
        let mut size_x = [Hash128::ZERO; MAX_LEN + 1];
        let mut size_y = [Hash128::ZERO; MAX_LEN + 1];
        for (x, y) in size_x.iter_mut().zip(size_y.iter_mut()) {
            *x = Hash128::draw(&mut rng);
            *y = Hash128::draw(&mut rng);
        }

        Self {
            board,
            player,
            size_x,
            size_y,
        }
    }

    /// Key for a cell holding `color`
    #[inline]
    pub fn stone(&self, loc: Loc, color: Color) -> Hash128 {
        self.board[loc.index()][color.index()]
    }

    #[inline]
    pub fn player(&self, pla: Player) -> Hash128 {
        self.player[pla.index()]
    }

    #[inline]
    pub fn size_x(&self, width: usize) -> Hash128 {
        self.size_x[width]
    }

    #[inline]
    pub fn size_y(&self, height: usize) -> Hash128 {
        self.size_y[height]
    }

    /// Hash of a board with no stones
    #[inline]
    pub fn empty_board(&self, width: usize, height: usize) -> Hash128 {
        self.size_x(width) ^ self.size_y(height)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}
