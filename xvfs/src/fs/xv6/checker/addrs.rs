// SPDX-License-Identifier: MIT
use xvio::prelude::*;

use crate::core::{checker::*, errors::Violation};
use crate::fs::xv6::{
    inode::InodeTable,
    meta::Xv6Meta,
    types::{InodeKind, Xv6Inode},
};

/// Walks the inode table validating types, block addresses and the
/// `.`/`..` header of every directory.
pub fn check_addresses<IO: ImageIO + ?Sized>(
    table: &InodeTable<'_, IO>,
    meta: &Xv6Meta,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
    stats: &mut WalkerStats,
) -> FsCheckerResult<()> {
    for (inum, inode) in inodes.iter().enumerate() {
        stats.inodes_checked += 1;
        if !inode.is_in_use() {
            continue;
        }
        stats.inodes_in_use += 1;

        check_inode(table, meta, inum as u32, inode, opt, rep)?;
        crate::stop_if_failed!(rep, opt);
    }

    rep.push(Finding::info(
        "INODE.SCAN",
        format!(
            "{} inodes scanned, {} in use",
            stats.inodes_checked, stats.inodes_in_use
        ),
    ));
    Ok(())
}

fn check_inode<IO: ImageIO + ?Sized>(
    table: &InodeTable<'_, IO>,
    meta: &Xv6Meta,
    inum: u32,
    inode: &Xv6Inode,
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    if let InodeKind::Invalid(raw) = inode.kind() {
        crate::flag!(rep, opt, Violation::BadInode, "inode {inum} has type {raw}");
    }

    for (slot, &addr) in inode.direct().iter().enumerate() {
        if addr != 0 && !meta.is_data_block(addr) {
            crate::flag!(
                rep,
                opt,
                Violation::BadDirectAddress,
                "inode {inum} direct[{slot}] = {addr}, data region is {}..={}",
                meta.data_region_start(),
                meta.data_region_end()
            );
        }
    }

    let indirect = inode.indirect();
    if indirect != 0 && !meta.is_data_block(indirect) {
        crate::flag!(
            rep,
            opt,
            Violation::BadIndirectAddress,
            "inode {inum} indirect block = {indirect}, data region is {}..={}",
            meta.data_region_start(),
            meta.data_region_end()
        );
    }

    for (slot, addr) in table.indirect_entries(inode)?.into_iter().enumerate() {
        if addr != 0 && !meta.is_data_block(addr) {
            crate::flag!(
                rep,
                opt,
                Violation::BadIndirectAddress,
                "inode {inum} indirect[{slot}] = {addr}, data region is {}..={}",
                meta.data_region_start(),
                meta.data_region_end()
            );
        }
    }

    if inode.is_dir() && !has_dot_header(table, meta, inum, inode)? {
        crate::flag!(
            rep,
            opt,
            Violation::DirectoryNotFormatted,
            "directory inode {inum} does not start with \".\" and \"..\""
        );
    }

    Ok(())
}

/// Entry 0 of the first block must be `.` naming the directory itself and
/// entry 1 must be `..`.
fn has_dot_header<IO: ImageIO + ?Sized>(
    table: &InodeTable<'_, IO>,
    meta: &Xv6Meta,
    inum: u32,
    inode: &Xv6Inode,
) -> FsCheckerResult<bool> {
    let first = inode.direct()[0];
    if first == 0 || !meta.is_data_block(first) {
        return Ok(false);
    }
    let entries = table.dir_entries(first)?;
    match entries.get(..2) {
        Some([dot, dotdot]) => {
            Ok(dot.is_dot() && u32::from(dot.inum) == inum && dotdot.is_dotdot())
        }
        _ => Ok(false),
    }
}
