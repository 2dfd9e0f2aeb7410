// SPDX-License-Identifier: MIT
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

pub use crate::core::checker::*;
use crate::fs::xv6::{constant::XV6_BSIZE, inode::InodeTable, meta::Xv6Meta, types::Xv6Inode};
use xvio::prelude::*;

mod addrs;
mod bitmap;
mod directory;
mod root;
mod unique;
mod walker;

pub use walker::{ReferenceTally, TallyMode};

#[derive(Clone, Debug)]
pub struct Xv6CheckOptions {
    pub phases: VerifyPhases,
    /// Stop at the first violation (the reporting contract of `fcheck`).
    pub fail_fast: bool,
}

impl Default for Xv6CheckOptions {
    fn default() -> Self {
        Self {
            phases: VerifyPhases::ALL,
            fail_fast: true,
        }
    }
}

impl Xv6CheckOptions {
    /// Every phase, every violation.
    pub fn collect_all() -> Self {
        Self {
            phases: VerifyPhases::ALL,
            fail_fast: false,
        }
    }
}

impl VerifierOptionsLike for Xv6CheckOptions {
    fn phases(&self) -> VerifyPhases {
        self.phases
    }
    fn fail_fast(&self) -> bool {
        self.fail_fast
    }
}

/// Consistency checker over one xv6 image.
///
/// Holds the image, its layout and the statistics gathered so far; there is
/// no other state shared between phases.
pub struct Xv6Checker<'a, IO: ImageIO + ?Sized> {
    io: &'a IO,
    meta: &'a Xv6Meta,
    pub stats: WalkerStats,
}

impl<'a, IO: ImageIO + ?Sized> Xv6Checker<'a, IO> {
    pub fn new(io: &'a IO, meta: &'a Xv6Meta) -> Self {
        Self {
            io,
            meta,
            stats: WalkerStats::new(),
        }
    }

    fn table(&self) -> InodeTable<'a, IO> {
        InodeTable::new(self.io, self.meta)
    }

    /// Decodes the whole inode table, in inode order.
    fn load_inodes(&self) -> FsCheckerResult<Vec<Xv6Inode>> {
        let inodes = self
            .table()
            .iter()
            .map(|item| item.map(|(_, inode)| inode))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(inodes)
    }
}

impl<'a, IO: ImageIO + ?Sized> FsChecker for Xv6Checker<'a, IO> {
    type Options = Xv6CheckOptions;

    fn check_addresses(
        &mut self,
        opt: &Self::Options,
        rep: &mut VerifyReport,
    ) -> FsCheckerResult<()> {
        let table = self.table();
        let inodes = self.load_inodes()?;
        addrs::check_addresses(&table, self.meta, &inodes, opt, rep, &mut self.stats)
    }

    fn check_root(&mut self, opt: &Self::Options, rep: &mut VerifyReport) -> FsCheckerResult<()> {
        root::check_root(&self.table(), self.meta, opt, rep)
    }

    fn check_bitmap(&mut self, opt: &Self::Options, rep: &mut VerifyReport) -> FsCheckerResult<()> {
        let table = self.table();
        let inodes = self.load_inodes()?;
        bitmap::check_marks(self.io, &table, self.meta, &inodes, opt, rep, &mut self.stats)
    }

    fn check_uniqueness(
        &mut self,
        opt: &Self::Options,
        rep: &mut VerifyReport,
    ) -> FsCheckerResult<()> {
        let table = self.table();
        let inodes = self.load_inodes()?;
        unique::check_direct_claims(self.meta, &inodes, opt, rep)?;
        crate::stop_if_failed!(rep, opt);
        unique::check_indirect_claims(&table, self.meta, &inodes, opt, rep)
    }

    fn check_directory(
        &mut self,
        opt: &Self::Options,
        rep: &mut VerifyReport,
    ) -> FsCheckerResult<()> {
        let table = self.table();
        let inodes = self.load_inodes()?;
        directory::check_directory(&table, self.meta, &inodes, opt, rep, &mut self.stats)
    }

    /// Ensures the inode table and the bitmap lie inside the image.
    fn fast_check(&mut self) -> FsCheckerResult {
        let last_inode_block = self.meta.inode_block_for(self.meta.ninodes - 1);
        self.io.read_block(last_inode_block, XV6_BSIZE)?;
        let last_bitmap_block = self.meta.bitmap_start_block() + self.meta.bitmap_block_count() - 1;
        self.io.read_block(last_bitmap_block, XV6_BSIZE)?;
        Ok(())
    }
}
