// SPDX-License-Identifier: MIT
use xvio::prelude::*;

use crate::core::{checker::*, errors::Violation};
use crate::fs::xv6::{inode::InodeTable, meta::Xv6Meta, types::Xv6Inode};
use crate::FsMeta;

/// Each direct address and indirect pointer may be claimed once.
pub fn check_direct_claims(
    meta: &Xv6Meta,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    let mut claims = ReachabilityTracker::new(0, meta.total_units());

    for (inum, inode) in inodes.iter().enumerate() {
        if !inode.is_in_use() {
            continue;
        }
        // direct slots followed by the indirect pointer
        for &addr in inode.addrs.iter() {
            if addr == 0 || !meta.is_data_block(addr) {
                continue;
            }
            if claims.claim(addr) {
                crate::flag!(
                    rep,
                    opt,
                    Violation::MultipleDirectBlocksInUse,
                    "block {addr} claimed again by inode {inum}"
                );
            }
        }
    }
    Ok(())
}

/// Each indirect leaf may be claimed once. Leaves are tracked apart from
/// direct claims, so a leaf that collides with a direct block is not
/// reported here.
pub fn check_indirect_claims<IO: ImageIO + ?Sized>(
    table: &InodeTable<'_, IO>,
    meta: &Xv6Meta,
    inodes: &[Xv6Inode],
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    let mut claims = ReachabilityTracker::new(0, meta.total_units());

    for (inum, inode) in inodes.iter().enumerate() {
        if !inode.is_in_use() {
            continue;
        }
        for addr in table.indirect_entries(inode)? {
            if addr == 0 || !meta.is_data_block(addr) {
                continue;
            }
            if claims.claim(addr) {
                crate::flag!(
                    rep,
                    opt,
                    Violation::MultipleIndirectBlocksInUse,
                    "indirect leaf {addr} claimed again by inode {inum}"
                );
            }
        }
    }
    Ok(())
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::fs::xv6::builder::Xv6ImageBuilder;
    use crate::fs::xv6::checker::Xv6CheckOptions;
    use crate::fs::xv6::constant::*;

    fn claims(img: &[u8]) -> VerifyReport {
        let io = MemImageIO::new(img);
        let meta = Xv6Meta::from_io(&io).unwrap();
        let table = InodeTable::new(&io, &meta);
        let inodes: Vec<Xv6Inode> = table.iter().map(|r| r.unwrap().1).collect();
        let opt = Xv6CheckOptions::collect_all();
        let mut rep = VerifyReport::default();
        check_direct_claims(&meta, &inodes, &opt, &mut rep).unwrap();
        check_indirect_claims(&table, &meta, &inodes, &opt, &mut rep).unwrap();
        rep
    }

    #[test]
    fn test_shared_direct_block() {
        let mut b = Xv6ImageBuilder::new();
        let a = b.create_file(XV6_ROOTINO, "a", 1);
        let c = b.create_file(XV6_ROOTINO, "c", 0);
        let shared = b.inode_mut(a).addrs[0];
        b.inode_mut(c).addrs[0] = shared;

        let found: Vec<Violation> = claims(&b.build()).violations().collect();
        assert_eq!(found, vec![Violation::MultipleDirectBlocksInUse]);
    }

    #[test]
    fn test_indirect_pointer_counts_as_direct_claim() {
        let mut b = Xv6ImageBuilder::new();
        let a = b.create_file(XV6_ROOTINO, "a", XV6_NDIRECT + 1);
        let c = b.create_file(XV6_ROOTINO, "c", 0);
        let pointer = b.inode_mut(a).indirect();
        b.inode_mut(c).addrs[2] = pointer;

        let found: Vec<Violation> = claims(&b.build()).violations().collect();
        assert_eq!(found, vec![Violation::MultipleDirectBlocksInUse]);
    }

    #[test]
    fn test_shared_leaf() {
        let mut b = Xv6ImageBuilder::new();
        let a = b.create_file(XV6_ROOTINO, "a", XV6_NDIRECT + 1);
        let c = b.create_file(XV6_ROOTINO, "c", XV6_NDIRECT + 1);
        let ind_a = b.inode_mut(a).indirect();
        let ind_c = b.inode_mut(c).indirect();
        let leaf = b.read_u32(ind_a as u64 * XV6_BSIZE as u64);
        b.write_u32(ind_c as u64 * XV6_BSIZE as u64, leaf);

        let found: Vec<Violation> = claims(&b.build()).violations().collect();
        assert_eq!(found, vec![Violation::MultipleIndirectBlocksInUse]);
    }

    #[test]
    fn test_leaf_colliding_with_direct_is_not_flagged() {
        let mut b = Xv6ImageBuilder::new();
        let a = b.create_file(XV6_ROOTINO, "a", 1);
        let c = b.create_file(XV6_ROOTINO, "c", XV6_NDIRECT + 1);
        let direct = b.inode_mut(a).addrs[0];
        let ind_c = b.inode_mut(c).indirect();
        b.write_u32(ind_c as u64 * XV6_BSIZE as u64 + 4, direct);

        assert!(claims(&b.build()).ok());
    }
}
