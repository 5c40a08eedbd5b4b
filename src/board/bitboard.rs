//! Packed cell set for occupancy, line and threat masks

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Fixed-capacity set of cell indices in `0..128`, stored as two `u64` words.
///
/// The set knows nothing about board geometry. Cell indices are produced by
/// [`Loc::cell_index`](super::Loc::cell_index), which is row-major over
/// [`MAX_LEN`](super::MAX_LEN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: [u64; 2],
}

impl Bitboard {
    /// Number of indices the set can hold.
    pub const CAPACITY: usize = 128;

    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; 2] }
    }

    /// Bitboard with every index in `0..CAPACITY` set
    pub const fn full() -> Self {
        Self { bits: [u64::MAX; 2] }
    }

    /// Build a set from indices
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        let mut bb = Self::new();
        for idx in indices {
            bb.insert(idx);
        }
        bb
    }

    #[inline]
    fn split(idx: usize) -> (usize, u64) {
        debug_assert!(idx < Self::CAPACITY, "cell index {idx} out of range");
        (idx >> 6, 1u64 << (idx & 63))
    }

    /// Remove every index
    #[inline]
    pub fn clear(&mut self) {
        self.bits = [0; 2];
    }

    /// Check if an index is set
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        let (word, bit) = Self::split(idx);
        self.bits[word] & bit != 0
    }

    /// Set an index
    #[inline]
    pub fn insert(&mut self, idx: usize) {
        let (word, bit) = Self::split(idx);
        self.bits[word] |= bit;
    }

    /// Clear an index
    #[inline]
    pub fn remove(&mut self, idx: usize) {
        let (word, bit) = Self::split(idx);
        self.bits[word] &= !bit;
    }

    #[inline]
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        self | other
    }

    #[inline]
    #[must_use]
    pub fn intersect(self, other: Self) -> Self {
        self & other
    }

    #[inline]
    #[must_use]
    pub fn complement(self) -> Self {
        !self
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits[0] == 0 && self.bits[1] == 0
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits[0].count_ones() + self.bits[1].count_ones()
    }

    /// Smallest set index, `None` if the set is empty
    #[inline]
    pub fn lowest_index(&self) -> Option<usize> {
        if self.bits[0] != 0 {
            Some(self.bits[0].trailing_zeros() as usize)
        } else if self.bits[1] != 0 {
            Some(64 + self.bits[1].trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Iterate over set indices in ascending order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { rest: *self }
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: [self.bits[0] & rhs.bits[0], self.bits[1] & rhs.bits[1]],
        }
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: [self.bits[0] | rhs.bits[0], self.bits[1] | rhs.bits[1]],
        }
    }
}

impl Not for Bitboard {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self {
            bits: [!self.bits[0], !self.bits[1]],
        }
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Iterator over set indices in a Bitboard
pub struct BitboardIter {
    rest: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.rest.lowest_index()?;
        self.rest.remove(idx);
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rest.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIter {}
