// SPDX-License-Identifier: MIT
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use xvio::prelude::*;

use crate::core::utils::bitmap::BitmapOps;
use crate::core::{checker::*, errors::Violation};
use crate::fs::xv6::{inode::InodeTable, meta::Xv6Meta, types::Xv6Inode};
use crate::FsMeta;

/// Compares the on-disk bitmap with the blocks inodes reference.
///
/// First every block referenced by an in-use inode must be marked; then
/// every marked block of the data region must be referenced by some inode,
/// free inodes with leftover addresses included. Addresses outside the data region
/// were already reported by the address phase and are ignored here.
pub fn check_marks<IO: ImageIO + ?Sized>(
    io: &IO,
    table: &InodeTable<'_, IO>,
    meta: &Xv6Meta,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
    stats: &mut WalkerStats,
) -> FsCheckerResult<()> {
    let (offset, len) = meta.bitmap_range();
    let on_disk = io.read_at(offset, len)?;
    let mut in_use = ReachabilityTracker::new(0, meta.total_units());

    // Every inode feeds the use set; only in-use ones must have their marks.
    for (inum, inode) in inodes.iter().enumerate() {
        for addr in table.referenced_blocks(inode)? {
            if !meta.is_data_block(addr) {
                continue;
            }
            if inode.is_in_use() && !on_disk.get_bit(addr as usize) {
                crate::flag!(
                    rep,
                    opt,
                    Violation::MissingBitmapMark,
                    "inode {inum} uses block {addr}, bitmap bit is clear"
                );
            }
            in_use.mark(addr);
        }
    }
    stats.blocks_referenced = in_use.marked();

    let (start, end) = (meta.data_region_start(), meta.data_region_end());
    let mut orphans = Vec::new();
    in_use.for_each_orphan(on_disk, usize::MAX, |block| {
        if (start..=end).contains(&block) {
            orphans.push(block);
        }
    });

    for block in orphans {
        crate::flag!(
            rep,
            opt,
            Violation::MissingInodeMark,
            "block {block} is marked in the bitmap, no inode uses it"
        );
    }

    rep.push(Finding::info(
        "BMAP.SCAN",
        format!(
            "{} data blocks referenced, bitmap marks {}",
            stats.blocks_referenced,
            on_disk.count_ones()
        ),
    ));
    Ok(())
}
