// SPDX-License-Identifier: MIT
//! xv6 on-disk inode (`dinode`)

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::fs::xv6::constant::*;

/// Decoded inode type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InodeKind {
    Unused,
    Directory,
    File,
    Device,
    /// Any other raw type value.
    Invalid(i16),
}

impl From<i16> for InodeKind {
    fn from(raw: i16) -> Self {
        match raw {
            XV6_T_UNUSED => InodeKind::Unused,
            XV6_T_DIR => InodeKind::Directory,
            XV6_T_FILE => InodeKind::File,
            XV6_T_DEV => InodeKind::Device,
            other => InodeKind::Invalid(other),
        }
    }
}

/// xv6 inode record (64 bytes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct Xv6Inode {
    /// File type (0 = unused)
    pub kind: i16,
    /// Major device number (devices only)
    pub major: i16,
    /// Minor device number (devices only)
    pub minor: i16,
    /// Number of directory entries naming this inode
    pub nlink: i16,
    /// Size of file in bytes
    pub size: u32,
    /// Direct block addresses followed by the indirect block address
    pub addrs: [u32; XV6_NDIRECT + 1],
}

const _: () = assert!(core::mem::size_of::<Xv6Inode>() == XV6_INODE_SIZE);

impl Xv6Inode {
    #[inline]
    pub fn kind(&self) -> InodeKind {
        InodeKind::from(self.kind)
    }

    /// Any nonzero type counts as in use, including invalid ones.
    #[inline]
    pub fn is_in_use(&self) -> bool {
        self.kind != XV6_T_UNUSED
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == XV6_T_DIR
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == XV6_T_FILE
    }

    #[inline]
    pub fn direct(&self) -> &[u32] {
        &self.addrs[..XV6_NDIRECT]
    }

    #[inline]
    pub fn indirect(&self) -> u32 {
        self.addrs[XV6_NDIRECT]
    }

    #[inline]
    pub fn nlink(&self) -> i16 {
        self.nlink
    }
}
