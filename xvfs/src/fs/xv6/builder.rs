// SPDX-License-Identifier: MIT

//! In-memory xv6 image builder.
//!
//! Lays out a consistent image (boot block, superblock, inode table, bitmap
//! and data region) with a formatted root directory, then lets the caller
//! add directories, files and links or poke raw bytes to corrupt it. Used to
//! produce fixtures for the checker.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use zerocopy::IntoBytes;

use crate::core::utils::bitmap::BitmapOps;
use crate::fs::xv6::{
    constant::*,
    meta::Xv6Meta,
    types::{Xv6DirEntry, Xv6Inode},
};

pub struct Xv6ImageBuilder {
    meta: Xv6Meta,
    img: Vec<u8>,
    inodes: Vec<Xv6Inode>,
    next_inode: u32,
    next_block: u32,
}

impl Default for Xv6ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Xv6ImageBuilder {
    /// 1024 blocks, 200 inodes, no log: the geometry of the stock `fs.img`.
    pub fn new() -> Self {
        Self::with_geometry(1024, 200)
    }

    /// Every block up to the end of the bitmap is metadata; the rest is data.
    ///
    /// # Panics
    /// If `size` leaves no room for a data region.
    pub fn with_geometry(size: u32, ninodes: u32) -> Self {
        let used = ninodes / XV6_IPB + 3 + size / XV6_BPB + 1;
        assert!(size > used, "image of {size} blocks has no data region");

        let meta = Xv6Meta {
            size,
            nblocks: size - used,
            ninodes,
            nlog: 0,
        };

        let mut builder = Self {
            meta,
            img: vec![0u8; size as usize * XV6_BSIZE],
            inodes: vec![Xv6Inode::default(); ninodes as usize],
            next_inode: XV6_ROOTINO,
            next_block: meta.data_region_start(),
        };

        for block in 0..used {
            builder.set_bitmap(block, true);
        }

        let root = builder.alloc_inode(XV6_T_DIR);
        builder.inodes[root as usize].nlink = 1;
        let block = builder.append_block(root);
        builder.write_dirent(block, 0, Xv6DirEntry::dot(root as u16));
        builder.write_dirent(block, 1, Xv6DirEntry::dotdot(root as u16));
        builder
    }

    pub fn meta(&self) -> Xv6Meta {
        self.meta
    }

    /// Claims the next free inode with the given raw type and no links.
    pub fn alloc_inode(&mut self, kind: i16) -> u32 {
        let inum = self.next_inode;
        assert!(inum < self.meta.ninodes, "inode table is full");
        self.next_inode += 1;
        self.inodes[inum as usize] = Xv6Inode {
            kind,
            ..Default::default()
        };
        inum
    }

    /// Claims the next data block and marks it in the bitmap.
    pub fn alloc_block(&mut self) -> u32 {
        let block = self.next_block;
        assert!(block <= self.meta.data_region_end(), "data region is full");
        self.next_block += 1;
        self.set_bitmap(block, true);
        block
    }

    /// Allocates a block and attaches it to `inum`, spilling into the
    /// indirect block once the direct slots are used.
    pub fn append_block(&mut self, inum: u32) -> u32 {
        let block = self.alloc_block();
        let inode = &mut self.inodes[inum as usize];

        if let Some(slot) = inode.addrs[..XV6_NDIRECT].iter().position(|&a| a == 0) {
            inode.addrs[slot] = block;
            inode.size += XV6_BSIZE as u32;
            return block;
        }

        if self.inodes[inum as usize].indirect() == 0 {
            let pointer = self.alloc_block();
            self.inodes[inum as usize].addrs[XV6_NDIRECT] = pointer;
        }
        let base = self.inodes[inum as usize].indirect() as u64 * XV6_BSIZE as u64;
        let slot = (0..XV6_NINDIRECT)
            .find(|&i| self.read_u32(base + i as u64 * 4) == 0)
            .unwrap_or_else(|| panic!("inode {inum} is at its maximum size"));
        self.write_u32(base + slot as u64 * 4, block);
        self.inodes[inum as usize].size += XV6_BSIZE as u32;
        block
    }

    /// Creates a directory under `parent` holding `.` and `..`.
    pub fn mkdir(&mut self, parent: u32, name: &str) -> u32 {
        let inum = self.alloc_inode(XV6_T_DIR);
        self.inodes[inum as usize].nlink = 1;
        let block = self.append_block(inum);
        self.write_dirent(block, 0, Xv6DirEntry::dot(inum as u16));
        self.write_dirent(block, 1, Xv6DirEntry::dotdot(parent as u16));
        self.add_entry(parent, name, inum);
        self.inodes[parent as usize].nlink += 1;
        inum
    }

    /// Creates a regular file of `nblocks` data blocks named `name` in `dir`.
    pub fn create_file(&mut self, dir: u32, name: &str, nblocks: usize) -> u32 {
        assert!(nblocks <= XV6_MAXFILE, "file larger than {XV6_MAXFILE} blocks");
        let inum = self.alloc_inode(XV6_T_FILE);
        self.inodes[inum as usize].nlink = 1;
        for _ in 0..nblocks {
            self.append_block(inum);
        }
        self.add_entry(dir, name, inum);
        inum
    }

    /// Adds a name for `inum` in `dir` and bumps its link count.
    pub fn link(&mut self, dir: u32, name: &str, inum: u32) {
        self.add_entry(dir, name, inum);
        self.inodes[inum as usize].nlink += 1;
    }

    /// Writes a directory entry into the first free slot of `dir`, growing
    /// it by one block when full. Link counts are left alone.
    pub fn add_entry(&mut self, dir: u32, name: &str, inum: u32) {
        let entry = Xv6DirEntry::new(inum as u16, name.as_bytes());
        for block in self.blocks_of(dir) {
            let free = (0..XV6_DPB).find(|&slot| {
                let off = block as usize * XV6_BSIZE + slot * XV6_DIRENT_SIZE;
                self.img[off] == 0 && self.img[off + 1] == 0
            });
            if let Some(slot) = free {
                self.write_dirent(block, slot, entry);
                return;
            }
        }
        let block = self.append_block(dir);
        self.write_dirent(block, 0, entry);
    }

    /// Nonzero data blocks of `inum`: direct slots then indirect leaves.
    fn blocks_of(&self, inum: u32) -> Vec<u32> {
        let inode = &self.inodes[inum as usize];
        let mut blocks: Vec<u32> = inode.direct().iter().copied().filter(|&a| a != 0).collect();
        if inode.indirect() != 0 {
            let base = inode.indirect() as u64 * XV6_BSIZE as u64;
            blocks.extend(
                (0..XV6_NINDIRECT)
                    .map(|i| self.read_u32(base + i as u64 * 4))
                    .filter(|&a| a != 0),
            );
        }
        blocks
    }

    /// Inode record, serialized into the table by [`Self::build`].
    pub fn inode_mut(&mut self, inum: u32) -> &mut Xv6Inode {
        &mut self.inodes[inum as usize]
    }

    pub fn set_bitmap(&mut self, block: u32, used: bool) {
        let (offset, len) = self.meta.bitmap_range();
        let start = offset as usize;
        self.img[start..start + len].set_bit(block as usize, used);
    }

    pub fn write_dirent(&mut self, block: u32, slot: usize, entry: Xv6DirEntry) {
        let off = block as usize * XV6_BSIZE + slot * XV6_DIRENT_SIZE;
        self.img[off..off + XV6_DIRENT_SIZE].copy_from_slice(entry.as_bytes());
    }

    pub fn write_u32(&mut self, offset: u64, value: u32) {
        let off = offset as usize;
        self.img[off..off + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn read_u32(&self, offset: u64) -> u32 {
        let off = offset as usize;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.img[off..off + 4]);
        u32::from_le_bytes(raw)
    }

    /// Writes the superblock and inode table and returns the image bytes.
    pub fn build(mut self) -> Vec<u8> {
        let sb_off = XV6_SUPERBLOCK_BLOCK as usize * XV6_BSIZE;
        let sb = self.meta.superblock();
        self.img[sb_off..sb_off + sb.as_bytes().len()].copy_from_slice(sb.as_bytes());

        for (inum, inode) in self.inodes.iter().enumerate() {
            let off = self.meta.inode_offset_for(inum as u32) as usize;
            self.img[off..off + XV6_INODE_SIZE].copy_from_slice(inode.as_bytes());
        }
        self.img
    }
}
