// SPDX-License-Identifier: MIT
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use xvio::prelude::*;

use crate::core::checker::FsCheckerResult;
use crate::fs::xv6::{inode::InodeTable, meta::Xv6Meta, types::Xv6Inode};

/// Which directory entries count toward an inode's tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyMode {
    /// Every name, `.` and `..` included.
    AllNames,
    /// Names other than `.` and `..`.
    ExcludeDots,
}

/// Per-inode count of directory entries naming it.
///
/// Built fresh from a full walk of every directory; counts start at zero.
#[derive(Debug, Clone)]
pub struct ReferenceTally {
    counts: Vec<u32>,
    /// `(directory, inum)` for entries naming an inode past the table.
    pub dangling: Vec<(u32, u32)>,
    pub dirs_visited: usize,
    pub entries_scanned: usize,
}

impl ReferenceTally {
    pub fn build<IO: ImageIO + ?Sized>(
        table: &InodeTable<'_, IO>,
        meta: &Xv6Meta,
        inodes: &[Xv6Inode],
        mode: TallyMode,
    ) -> FsCheckerResult<Self> {
        let mut tally = Self {
            counts: vec![0u32; meta.ninodes as usize],
            dangling: Vec::new(),
            dirs_visited: 0,
            entries_scanned: 0,
        };

        for (dir, inode) in inodes.iter().enumerate() {
            if !inode.is_dir() {
                continue;
            }
            tally.dirs_visited += 1;

            for block in table.dir_blocks(inode)? {
                for entry in table.dir_entries(block)? {
                    if entry.is_free() {
                        continue;
                    }
                    tally.entries_scanned += 1;
                    if mode == TallyMode::ExcludeDots && (entry.is_dot() || entry.is_dotdot()) {
                        continue;
                    }
                    match tally.counts.get_mut(entry.inum as usize) {
                        Some(count) => *count += 1,
                        None => tally.dangling.push((dir as u32, u32::from(entry.inum))),
                    }
                }
            }
        }
        Ok(tally)
    }

    /// Number of names for `inum`; zero past the table.
    #[inline]
    pub fn get(&self, inum: u32) -> u32 {
        self.counts.get(inum as usize).copied().unwrap_or(0)
    }
}
