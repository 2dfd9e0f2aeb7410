// SPDX-License-Identifier: MIT

//! Inode table accessor.
//!
//! Decodes inode records, indirect blocks and directory blocks through the
//! image, never touching raw offsets outside [`Xv6Meta`]'s arithmetic.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use xvio::prelude::*;

use crate::core::errors::{FsParsingError, FsParsingResult};
use crate::fs::xv6::{
    constant::*,
    meta::Xv6Meta,
    types::{Xv6DirEntry, Xv6Inode},
};

pub struct InodeTable<'a, IO: ImageIO + ?Sized> {
    io: &'a IO,
    meta: &'a Xv6Meta,
}

impl<'a, IO: ImageIO + ?Sized> InodeTable<'a, IO> {
    pub fn new(io: &'a IO, meta: &'a Xv6Meta) -> Self {
        Self { io, meta }
    }

    /// Decodes inode `inum`.
    pub fn get(&self, inum: u32) -> FsParsingResult<Xv6Inode> {
        crate::ensure!(
            inum < self.meta.ninodes,
            FsParsingError::Invalid("inode number out of range")
        );
        Ok(self.io.read_struct(self.meta.inode_offset_for(inum))?)
    }

    /// Iterates `(inum, inode)` over the whole table, in inode order.
    pub fn iter(&self) -> impl Iterator<Item = FsParsingResult<(u32, Xv6Inode)>> + '_ {
        (0..self.meta.ninodes).map(move |inum| self.get(inum).map(|inode| (inum, inode)))
    }

    /// The 128 addresses held by the inode's indirect block.
    ///
    /// Empty when the indirect address is zero or outside the data region;
    /// zero slots are kept so callers see the raw table.
    pub fn indirect_entries(&self, inode: &Xv6Inode) -> FsParsingResult<Vec<u32>> {
        let addr = inode.indirect();
        if addr == 0 || !self.meta.is_data_block(addr) {
            return Ok(Vec::new());
        }
        let offset = addr as u64 * XV6_BSIZE as u64;
        let entries = (0..XV6_NINDIRECT as u64)
            .map(|slot| self.io.read_u32_at(offset + slot * 4))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Every nonzero address the inode claims: direct slots, then the
    /// indirect pointer, then the indirect leaves.
    pub fn referenced_blocks(&self, inode: &Xv6Inode) -> FsParsingResult<Vec<u32>> {
        let mut blocks: Vec<u32> = inode.direct().iter().copied().filter(|&a| a != 0).collect();
        if inode.indirect() != 0 {
            blocks.push(inode.indirect());
        }
        blocks.extend(
            self.indirect_entries(inode)?
                .into_iter()
                .filter(|&a| a != 0),
        );
        Ok(blocks)
    }

    /// Data blocks of a directory: direct slots then indirect leaves.
    ///
    /// Zero addresses and addresses outside the data region are skipped.
    pub fn dir_blocks(&self, inode: &Xv6Inode) -> FsParsingResult<Vec<u32>> {
        let mut blocks: Vec<u32> = inode
            .direct()
            .iter()
            .copied()
            .filter(|&a| a != 0 && self.meta.is_data_block(a))
            .collect();
        blocks.extend(
            self.indirect_entries(inode)?
                .into_iter()
                .filter(|&a| a != 0 && self.meta.is_data_block(a)),
        );
        Ok(blocks)
    }

    /// Inode number held by entry `slot` of directory block `block`.
    pub fn entry_inum(&self, block: u32, slot: usize) -> FsParsingResult<u16> {
        let offset = block as u64 * XV6_BSIZE as u64 + (slot * XV6_DIRENT_SIZE) as u64;
        Ok(self.io.read_u16_at(offset)?)
    }

    /// The 32 entries of directory block `block`, free slots included.
    pub fn dir_entries(&self, block: u32) -> FsParsingResult<Vec<Xv6DirEntry>> {
        let offset = block as u64 * XV6_BSIZE as u64;
        Ok(self.io.read_structs::<Xv6DirEntry>(offset, XV6_DPB)?)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::fs::xv6::builder::Xv6ImageBuilder;
    use crate::fs::xv6::types::InodeKind;

    #[test]
    fn test_root_decodes() {
        let img = Xv6ImageBuilder::new().build();
        let io = MemImageIO::new(&img);
        let meta = Xv6Meta::from_io(&io).unwrap();
        let table = InodeTable::new(&io, &meta);

        let root = table.get(XV6_ROOTINO).unwrap();
        assert_eq!(root.kind(), InodeKind::Directory);

        let blocks = table.dir_blocks(&root).unwrap();
        assert_eq!(blocks, vec![meta.data_region_start()]);

        let entries = table.dir_entries(blocks[0]).unwrap();
        assert_eq!(entries.len(), XV6_DPB);
        assert!(entries[0].is_dot());
        assert_eq!(entries[0].inum, 1);
        assert!(entries[1].is_dotdot());
        assert!(entries[2].is_free());
        assert_eq!(table.entry_inum(blocks[0], 1).unwrap(), 1);
        assert!(table.entry_inum(meta.size, 0).is_err());
    }

    #[test]
    fn test_get_rejects_out_of_range() {
        let img = Xv6ImageBuilder::new().build();
        let io = MemImageIO::new(&img);
        let meta = Xv6Meta::from_io(&io).unwrap();
        let table = InodeTable::new(&io, &meta);

        assert!(matches!(
            table.get(meta.ninodes),
            Err(FsParsingError::Invalid(_))
        ));
        assert_eq!(table.iter().count(), meta.ninodes as usize);
    }

    #[test]
    fn test_indirect_entries() {
        let mut b = Xv6ImageBuilder::new();
        let file = b.create_file(XV6_ROOTINO, "big", XV6_NDIRECT + 3);
        let img = b.build();
        let io = MemImageIO::new(&img);
        let meta = Xv6Meta::from_io(&io).unwrap();
        let table = InodeTable::new(&io, &meta);

        let inode = table.get(file).unwrap();
        assert_ne!(inode.indirect(), 0);

        let leaves = table.indirect_entries(&inode).unwrap();
        assert_eq!(leaves.len(), XV6_NINDIRECT);
        assert_eq!(leaves.iter().filter(|&&a| a != 0).count(), 3);

        // 12 direct + pointer + 3 leaves
        assert_eq!(table.referenced_blocks(&inode).unwrap().len(), XV6_NDIRECT + 4);
    }

    #[test]
    fn test_indirect_skipped_when_out_of_region() {
        let mut b = Xv6ImageBuilder::new();
        let file = b.create_file(XV6_ROOTINO, "f", 0);
        b.inode_mut(file).addrs[XV6_NDIRECT] = 5;
        let img = b.build();
        let io = MemImageIO::new(&img);
        let meta = Xv6Meta::from_io(&io).unwrap();
        let table = InodeTable::new(&io, &meta);

        let inode = table.get(file).unwrap();
        assert!(table.indirect_entries(&inode).unwrap().is_empty());
        assert_eq!(table.referenced_blocks(&inode).unwrap(), vec![5]);
    }
}
