// SPDX-License-Identifier: MIT
//! xv6 Superblock structure

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// xv6 Superblock (16 bytes at the start of block 1).
///
/// Only these four fields exist on disk; the rest of the layout is derived
/// from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct Xv6Superblock {
    /// Size of the image in blocks
    pub size: u32,
    /// Number of data blocks
    pub nblocks: u32,
    /// Number of inodes
    pub ninodes: u32,
    /// Number of log blocks
    pub nlog: u32,
}

const _: () = assert!(core::mem::size_of::<Xv6Superblock>() == 16);
