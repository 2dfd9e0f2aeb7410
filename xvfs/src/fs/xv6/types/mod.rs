// SPDX-License-Identifier: MIT

mod dirent;
mod inode;
mod superblock;

pub use dirent::*;
pub use inode::*;
pub use superblock::*;
