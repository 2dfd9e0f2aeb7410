// SPDX-License-Identifier: MIT

use std::fs;
use std::io::Error;
use std::path::Path;

use crate::{ImageIO, ImageIOResult, check_bounds};

/// File-backed implementation of `ImageIO`.
///
/// The whole file is read into memory once at open time; every later access
/// is served from that immutable copy.
#[derive(Debug)]
pub struct FileImageIO {
    buffer: Vec<u8>,
}

impl FileImageIO {
    /// Loads the image at `path`.
    ///
    /// Returns the raw `std::io::Error` so callers can tell a missing file
    /// from a permission problem.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let buffer = fs::read(path)?;
        Ok(Self { buffer })
    }
}

impl ImageIO for FileImageIO {
    #[inline]
    fn len(&self) -> u64 {
        self.buffer.len() as u64
    }

    #[inline(always)]
    fn read_at(&self, offset: u64, len: usize) -> ImageIOResult<&[u8]> {
        let range = check_bounds(offset, len, self.len())?;
        Ok(&self.buffer[range])
    }
}
