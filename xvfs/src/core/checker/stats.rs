// SPDX-License-Identifier: MIT

/// Common statistics collected while checking an image.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkerStats {
    /// Number of inode records scanned.
    pub inodes_checked: usize,
    /// Number of in-use inodes among them.
    pub inodes_in_use: usize,
    /// Number of directories walked.
    pub dirs_visited: usize,
    /// Number of regular files found.
    pub files_found: usize,
    /// Number of directory entries scanned.
    pub entries_scanned: usize,
    /// Number of distinct data blocks referenced by any inode.
    pub blocks_referenced: usize,
}

impl WalkerStats {
    pub fn new() -> Self {
        Self::default()
    }
}
