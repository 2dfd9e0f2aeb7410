// SPDX-License-Identifier: MIT

//! Bit operations over byte slices.
//!
//! Used both for reading the on-disk allocation bitmap and for the in-memory
//! claim sets built while checking.

/// Extension trait for bitmap operations on byte slices.
///
/// Bit ordering is LSB first, which matches the xv6 on-disk bitmap:
/// - bit 0 is the LSB of byte 0
/// - bit 7 is the MSB of byte 0
/// - bit 8 is the LSB of byte 1
pub trait BitmapOps {
    /// Sets or clears a bit. Out-of-bounds positions are ignored.
    fn set_bit(&mut self, bit: usize, value: bool);

    /// Returns `false` if `bit` is out of bounds.
    fn get_bit(&self, bit: usize) -> bool;

    /// Sets `bit` and reports whether it was already set.
    ///
    /// Out-of-bounds positions report `false` and change nothing.
    fn test_and_set(&mut self, bit: usize) -> bool;

    /// Counts the set bits of the whole slice.
    fn count_ones(&self) -> usize;
}

impl BitmapOps for [u8] {
    #[inline]
    fn set_bit(&mut self, bit: usize, value: bool) {
        if let Some(byte) = self.get_mut(bit / 8) {
            let mask = 1u8 << (bit % 8);
            if value {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }

    #[inline]
    fn get_bit(&self, bit: usize) -> bool {
        self.get(bit / 8)
            .is_some_and(|b| (b & (1 << (bit % 8))) != 0)
    }

    #[inline]
    fn test_and_set(&mut self, bit: usize) -> bool {
        match self.get_mut(bit / 8) {
            Some(byte) => {
                let mask = 1u8 << (bit % 8);
                let was_set = *byte & mask != 0;
                *byte |= mask;
                was_set
            }
            None => false,
        }
    }

    fn count_ones(&self) -> usize {
        self.iter().map(|b| b.count_ones() as usize).sum()
    }
}
