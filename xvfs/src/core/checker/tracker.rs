// SPDX-License-Identifier: MIT

//! Reachability tracker for checker walks.
//!
//! Records which units (blocks, inodes) have been seen while walking the
//! inode table, one bit per unit.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::core::utils::bitmap::BitmapOps;

/// Tracks units seen during a walk.
///
/// Every tracker starts zeroed. Callers pass raw unit numbers; the base
/// offset is handled internally and out-of-range units are ignored.
///
/// # Example
/// ```ignore
/// use xvfs::core::checker::ReachabilityTracker;
///
/// // One bit per block of a 1024-block image
/// let mut tracker = ReachabilityTracker::new(0, 1024);
///
/// assert!(!tracker.claim(40));
/// assert!(tracker.claim(40)); // second claim reports the repeat
/// ```
#[derive(Debug, Clone)]
pub struct ReachabilityTracker {
    bitmap: Vec<u8>,
    base_unit: u32,
    count: usize,
}

impl ReachabilityTracker {
    /// Creates a tracker for `count` units starting at `base_unit`.
    pub fn new(base_unit: u32, count: usize) -> Self {
        Self {
            bitmap: vec![0u8; count.div_ceil(8)],
            base_unit,
            count,
        }
    }

    #[inline]
    fn index(&self, unit: u32) -> Option<usize> {
        let idx = unit.checked_sub(self.base_unit)? as usize;
        (idx < self.count).then_some(idx)
    }

    /// Marks a unit as seen.
    #[inline]
    pub fn mark(&mut self, unit: u32) {
        if let Some(idx) = self.index(unit) {
            self.bitmap.set_bit(idx, true);
        }
    }

    /// Marks a unit and returns `true` if it had already been marked.
    ///
    /// Out-of-range units are never reported as repeats.
    #[inline]
    pub fn claim(&mut self, unit: u32) -> bool {
        match self.index(unit) {
            Some(idx) => self.bitmap.test_and_set(idx),
            None => false,
        }
    }

    /// Number of units marked so far.
    pub fn marked(&self) -> usize {
        self.bitmap.count_ones()
    }

    /// Iterates over orphan units: set in `on_disk` but never marked here.
    ///
    /// `on_disk` is indexed the same way as the tracker (bit 0 = `base_unit`).
    /// At most `limit` orphans are reported.
    pub fn for_each_orphan<F>(&self, on_disk: &[u8], limit: usize, mut f: F)
    where
        F: FnMut(u32),
    {
        let mut found = 0usize;

        for (i, (disk_byte, reach_byte)) in on_disk.iter().zip(self.bitmap.iter()).enumerate() {
            if found >= limit {
                break;
            }

            let orphan_bits = disk_byte & !reach_byte;
            if orphan_bits == 0 {
                continue;
            }

            for bit in 0..8 {
                let idx = i * 8 + bit;
                if idx >= self.count {
                    break;
                }
                if (orphan_bits & (1 << bit)) != 0 {
                    f(self.base_unit + idx as u32);
                    found += 1;
                    if found >= limit {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_reports_repeats() {
        let mut tracker = ReachabilityTracker::new(0, 64);

        assert!(!tracker.claim(29));
        assert!(!tracker.claim(30));
        assert!(tracker.claim(29));
        assert_eq!(tracker.marked(), 2);
    }

    #[test]
    fn test_out_of_range() {
        let mut tracker = ReachabilityTracker::new(2, 10);

        tracker.mark(100);
        assert!(!tracker.claim(100));
        assert!(!tracker.claim(100));

        // Below the base unit
        tracker.mark(0);
        assert!(!tracker.claim(0));
        assert_eq!(tracker.marked(), 0);

        tracker.mark(2);
        assert!(tracker.claim(2));
        assert_eq!(tracker.marked(), 1);
    }

    #[test]
    fn test_for_each_orphan() {
        let mut tracker = ReachabilityTracker::new(0, 16);
        tracker.mark(0);
        tracker.mark(1);
        tracker.mark(9);

        // Blocks 0, 1, 2, 3, 9, 10 marked on disk
        let on_disk = [0b00001111u8, 0b00000110];

        let mut orphans = Vec::new();
        tracker.for_each_orphan(&on_disk, usize::MAX, |unit| orphans.push(unit));
        assert_eq!(orphans, vec![2, 3, 10]);

        let mut first = Vec::new();
        tracker.for_each_orphan(&on_disk, 1, |unit| first.push(unit));
        assert_eq!(first, vec![2]);
    }

    #[test]
    fn test_for_each_orphan_ignores_trailing_bits() {
        let tracker = ReachabilityTracker::new(0, 4);
        let on_disk = [0b11110000u8];

        let mut orphans = Vec::new();
        tracker.for_each_orphan(&on_disk, usize::MAX, |unit| orphans.push(unit));
        assert!(orphans.is_empty());
    }
}
