// SPDX-License-Identifier: MIT

pub use crate::core::meta::*;

use xvio::prelude::*;

use crate::core::errors::{FsCheckerError, FsCheckerResult};
use crate::fs::xv6::{constant::*, types::Xv6Superblock};

/// Layout of an xv6 image, derived from the four superblock fields.
///
/// Every region boundary is computed on demand from `size`, `nblocks` and
/// `ninodes`; nothing else is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xv6Meta {
    pub size: u32,
    pub nblocks: u32,
    pub ninodes: u32,
    pub nlog: u32,
}

impl Xv6Meta {
    /// Builds the layout from a decoded superblock, rejecting geometry the
    /// region arithmetic cannot handle.
    pub fn new(sb: &Xv6Superblock) -> FsCheckerResult<Self> {
        crate::ensure!(
            sb.size != 0,
            FsCheckerError::Geometry("superblock size is zero")
        );
        crate::ensure!(
            sb.nblocks <= sb.size,
            FsCheckerError::Geometry("superblock nblocks exceeds size")
        );
        crate::ensure!(
            sb.ninodes != 0,
            FsCheckerError::Geometry("superblock ninodes is zero")
        );

        Ok(Self {
            size: sb.size,
            nblocks: sb.nblocks,
            ninodes: sb.ninodes,
            nlog: sb.nlog,
        })
    }

    /// Reads block 1 through the image and builds the layout.
    pub fn from_io<IO: ImageIO + ?Sized>(io: &IO) -> FsCheckerResult<Self> {
        let sb: Xv6Superblock =
            io.read_struct(XV6_SUPERBLOCK_BLOCK as u64 * XV6_BSIZE as u64)?;
        Self::new(&sb)
    }

    /// Superblock fields as they would be written back to disk.
    pub fn superblock(&self) -> Xv6Superblock {
        Xv6Superblock {
            size: self.size,
            nblocks: self.nblocks,
            ninodes: self.ninodes,
            nlog: self.nlog,
        }
    }

    /// Block holding inode `inum`.
    #[inline]
    pub fn inode_block_for(&self, inum: u32) -> u32 {
        inum / XV6_IPB + XV6_INODE_START_BLOCK
    }

    /// Absolute byte offset of inode `inum`.
    #[inline]
    pub fn inode_offset_for(&self, inum: u32) -> u64 {
        self.inode_block_for(inum) as u64 * XV6_BSIZE as u64
            + (inum % XV6_IPB) as u64 * XV6_INODE_SIZE as u64
    }

    #[inline]
    pub fn bitmap_start_block(&self) -> u32 {
        self.ninodes / XV6_IPB + 3
    }

    #[inline]
    pub fn bitmap_block_count(&self) -> u32 {
        self.size / XV6_BPB + 1
    }

    #[inline]
    pub fn data_region_start(&self) -> u32 {
        self.size - self.nblocks
    }

    #[inline]
    pub fn data_region_end(&self) -> u32 {
        self.size - 1
    }

    #[inline]
    pub fn is_data_block(&self, addr: u32) -> bool {
        self.is_valid_unit(addr)
    }

    /// Byte range of the on-disk bitmap.
    #[inline]
    pub fn bitmap_range(&self) -> (u64, usize) {
        (
            self.bitmap_start_block() as u64 * XV6_BSIZE as u64,
            self.bitmap_block_count() as usize * XV6_BSIZE,
        )
    }
}

impl FsMeta<u32> for Xv6Meta {
    fn first_data_unit(&self) -> u32 {
        self.data_region_start()
    }

    fn last_data_unit(&self) -> u32 {
        self.data_region_end()
    }

    fn total_units(&self) -> usize {
        self.size as usize
    }
}
