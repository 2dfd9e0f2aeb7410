// SPDX-License-Identifier: MIT

// === Disk Layout Parameters ===

pub const XV6_BSIZE: usize = 512;
pub const XV6_SUPERBLOCK_BLOCK: u32 = 1;
pub const XV6_INODE_START_BLOCK: u32 = 2;

// === Inode Table ===

pub const XV6_INODE_SIZE: usize = 64;
pub const XV6_IPB: u32 = (XV6_BSIZE / XV6_INODE_SIZE) as u32; // inodes per block
pub const XV6_NDIRECT: usize = 12;
pub const XV6_NINDIRECT: usize = XV6_BSIZE / 4; // addresses per indirect block
pub const XV6_MAXFILE: usize = XV6_NDIRECT + XV6_NINDIRECT;
pub const XV6_ROOTINO: u32 = 1;

// === Inode Types ===

pub const XV6_T_UNUSED: i16 = 0;
pub const XV6_T_DIR: i16 = 1;
pub const XV6_T_FILE: i16 = 2;
pub const XV6_T_DEV: i16 = 3;

// === Directories ===

pub const XV6_DIRSIZ: usize = 14;
pub const XV6_DIRENT_SIZE: usize = 16;
pub const XV6_DPB: usize = XV6_BSIZE / XV6_DIRENT_SIZE; // entries per block
pub const XV6_DOT_NAME: &[u8] = b".";
pub const XV6_DOTDOT_NAME: &[u8] = b"..";

// === Bitmap ===

pub const XV6_BPB: u32 = (XV6_BSIZE * 8) as u32; // bitmap bits per block
