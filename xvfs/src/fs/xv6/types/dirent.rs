// SPDX-License-Identifier: MIT
//! xv6 Directory Entry structure

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::fs::xv6::constant::*;

/// xv6 directory entry (16 bytes).
///
/// The name is NUL padded; a name of exactly `XV6_DIRSIZ` bytes has no
/// terminator. An entry with `inum == 0` is a free slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct Xv6DirEntry {
    pub inum: u16,
    pub name: [u8; XV6_DIRSIZ],
}

const _: () = assert!(core::mem::size_of::<Xv6DirEntry>() == XV6_DIRENT_SIZE);

impl Xv6DirEntry {
    /// Builds an entry, truncating `name` to `XV6_DIRSIZ` bytes.
    pub fn new(inum: u16, name: &[u8]) -> Self {
        let mut raw = [0u8; XV6_DIRSIZ];
        let len = name.len().min(XV6_DIRSIZ);
        raw[..len].copy_from_slice(&name[..len]);
        Self { inum, name: raw }
    }

    pub fn dot(inum: u16) -> Self {
        Self::new(inum, XV6_DOT_NAME)
    }

    pub fn dotdot(inum: u16) -> Self {
        Self::new(inum, XV6_DOTDOT_NAME)
    }

    /// Name bytes up to the first NUL.
    pub fn name(&self) -> &[u8] {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(XV6_DIRSIZ);
        &self.name[..end]
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.inum == 0
    }

    #[inline]
    pub fn is_dot(&self) -> bool {
        self.name() == XV6_DOT_NAME
    }

    #[inline]
    pub fn is_dotdot(&self) -> bool {
        self.name() == XV6_DOTDOT_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_stops_at_nul() {
        let entry = Xv6DirEntry::new(5, b"README");
        assert_eq!(entry.name(), b"README");
        assert!(!entry.is_dot());
        assert_eq!(entry.as_bytes()[0..2], 5u16.to_le_bytes());
    }

    #[test]
    fn test_full_length_name_has_no_terminator() {
        let entry = Xv6DirEntry::new(7, b"fourteen_chars");
        assert_eq!(entry.name(), b"fourteen_chars");

        let long = Xv6DirEntry::new(7, b"much_longer_than_fourteen");
        assert_eq!(long.name().len(), XV6_DIRSIZ);
    }

    #[test]
    fn test_dot_entries() {
        assert!(Xv6DirEntry::dot(1).is_dot());
        assert!(Xv6DirEntry::dotdot(1).is_dotdot());
        assert!(!Xv6DirEntry::dotdot(1).is_dot());
        // ".x" is neither
        let e = Xv6DirEntry::new(2, b".x");
        assert!(!e.is_dot() && !e.is_dotdot());
        assert!(Xv6DirEntry::default().is_free());
    }
}
