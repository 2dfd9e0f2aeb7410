// SPDX-License-Identifier: MIT
use xvio::prelude::*;

use crate::core::{checker::*, errors::Violation};
use crate::fs::xv6::{constant::*, inode::InodeTable, meta::Xv6Meta};

/// The root inode must be a directory whose `..` names the root itself.
pub fn check_root<IO: ImageIO + ?Sized>(
    table: &InodeTable<'_, IO>,
    meta: &Xv6Meta,
    opt: &impl VerifierOptionsLike,
    rep: &mut VerifyReport,
) -> FsCheckerResult<()> {
    if XV6_ROOTINO >= meta.ninodes {
        crate::flag!(
            rep,
            opt,
            Violation::RootDirDoesNotExist,
            "inode table holds {} inodes, no room for root",
            meta.ninodes
        );
        return Ok(());
    }

    let root = table.get(XV6_ROOTINO)?;
    if !root.is_dir() {
        crate::flag!(
            rep,
            opt,
            Violation::RootDirDoesNotExist,
            "root inode has type {}",
            root.kind
        );
        return Ok(());
    }

    let first = root.direct()[0];
    let parent = if first != 0 && meta.is_data_block(first) {
        Some(u32::from(table.entry_inum(first, 1)?))
    } else {
        None
    };

    match parent {
        Some(XV6_ROOTINO) => {
            rep.push(Finding::info("ROOT.OK", "root directory is its own parent"));
        }
        Some(other) => crate::flag!(
            rep,
            opt,
            Violation::RootDirDoesNotExist,
            "root \"..\" names inode {other}"
        ),
        None => crate::flag!(
            rep,
            opt,
            Violation::RootDirDoesNotExist,
            "root directory has no data block"
        ),
    }
    Ok(())
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::fs::xv6::builder::Xv6ImageBuilder;
    use crate::fs::xv6::checker::Xv6CheckOptions;
    use crate::fs::xv6::types::Xv6DirEntry;

    fn root_report(img: &[u8]) -> VerifyReport {
        let io = MemImageIO::new(img);
        let meta = Xv6Meta::from_io(&io).unwrap();
        let table = InodeTable::new(&io, &meta);
        let mut rep = VerifyReport::default();
        check_root(&table, &meta, &Xv6CheckOptions::default(), &mut rep).unwrap();
        rep
    }

    #[test]
    fn test_root_ok() {
        let rep = root_report(&Xv6ImageBuilder::new().build());
        assert!(rep.ok());
    }

    #[test]
    fn test_root_not_a_directory() {
        let mut b = Xv6ImageBuilder::new();
        b.inode_mut(XV6_ROOTINO).kind = XV6_T_FILE;
        let rep = root_report(&b.build());
        assert_eq!(rep.first_violation(), Some(Violation::RootDirDoesNotExist));
    }

    #[test]
    fn test_root_parent_elsewhere() {
        let mut b = Xv6ImageBuilder::new();
        let dir = b.mkdir(XV6_ROOTINO, "d");
        let block = b.inode_mut(XV6_ROOTINO).addrs[0];
        b.write_dirent(block, 1, Xv6DirEntry::dotdot(dir as u16));
        let rep = root_report(&b.build());
        assert_eq!(rep.first_violation(), Some(Violation::RootDirDoesNotExist));
        assert!(rep.first_error().unwrap().contains(&format!("inode {dir}")));
    }
}
