// SPDX-License-Identifier: MIT
use xvio::prelude::*;

use super::walker::{ReferenceTally, TallyMode};
use crate::core::{checker::*, errors::Violation};
use crate::fs::xv6::{inode::InodeTable, meta::Xv6Meta, types::Xv6Inode};

/// Cross-checks inode allocation against the names directories hold.
///
/// Sub-checks run in a fixed order: used inodes must be named, named inodes
/// must be used, file link counts must match, and finally a directory may be
/// named by at most one parent. The last one uses its own tally that leaves
/// out `.` and `..`.
pub fn check_directory<IO: ImageIO + ?Sized>(
    table: &InodeTable<'_, IO>,
    meta: &Xv6Meta,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
    stats: &mut WalkerStats,
) -> FsCheckerResult<()> {
    let names = ReferenceTally::build(table, meta, inodes, TallyMode::AllNames)?;
    stats.dirs_visited = names.dirs_visited;
    stats.entries_scanned = names.entries_scanned;
    stats.files_found = inodes.iter().filter(|i| i.is_file()).count();
    rep.push(Finding::info(
        "DIR.WALK",
        format!(
            "Walked {} dirs, {} entries, {} files",
            stats.dirs_visited, stats.entries_scanned, stats.files_found
        ),
    ));

    check_used_are_named(&names, inodes, opt, rep)?;
    crate::stop_if_failed!(rep, opt);

    check_named_are_used(&names, inodes, opt, rep)?;
    crate::stop_if_failed!(rep, opt);

    check_link_counts(&names, inodes, opt, rep)?;
    crate::stop_if_failed!(rep, opt);

    let parents = ReferenceTally::build(table, meta, inodes, TallyMode::ExcludeDots)?;
    check_single_parent(&parents, inodes, opt, rep)
}

fn check_used_are_named(
    names: &ReferenceTally,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    for (inum, inode) in inodes.iter().enumerate().skip(1) {
        if inode.is_in_use() && names.get(inum as u32) == 0 {
            crate::flag!(
                rep,
                opt,
                Violation::DirectoryMismatchInodeInUse,
                "inode {inum} is in use but no directory names it"
            );
        }
    }
    Ok(())
}

fn check_named_are_used(
    names: &ReferenceTally,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    for (inum, inode) in inodes.iter().enumerate().skip(1) {
        let count = names.get(inum as u32);
        if !inode.is_in_use() && count > 0 {
            crate::flag!(
                rep,
                opt,
                Violation::DirectoryMismatchInodeFree,
                "inode {inum} is free but named {count} time(s)"
            );
        }
    }
    for &(dir, inum) in &names.dangling {
        crate::flag!(
            rep,
            opt,
            Violation::DirectoryMismatchInodeFree,
            "directory {dir} names inode {inum}, past the inode table"
        );
    }
    Ok(())
}

fn check_link_counts(
    names: &ReferenceTally,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    for (inum, inode) in inodes.iter().enumerate().skip(1) {
        if !inode.is_file() {
            continue;
        }
        let count = names.get(inum as u32);
        if i64::from(count) != i64::from(inode.nlink()) {
            crate::flag!(
                rep,
                opt,
                Violation::BadReferenceCountFile,
                "file inode {inum} has nlink {} but {count} name(s)",
                inode.nlink()
            );
        }
    }
    Ok(())
}

fn check_single_parent(
    parents: &ReferenceTally,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    for (inum, inode) in inodes.iter().enumerate().skip(1) {
        if !inode.is_dir() {
            continue;
        }
        let count = parents.get(inum as u32);
        if count > 1 {
            crate::flag!(
                rep,
                opt,
                Violation::DirectoryMultipleReference,
                "directory inode {inum} is named {count} times"
            );
        }
    }
    Ok(())
}
