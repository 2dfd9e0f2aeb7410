// SPDX-License-Identifier: MIT

use crate::{ImageIO, ImageIOResult, check_bounds};

/// In-memory implementation of `ImageIO` over a borrowed byte slice.
///
/// Useful for tests and for callers that already hold the image bytes.
#[derive(Debug, Clone, Copy)]
pub struct MemImageIO<'a> {
    buffer: &'a [u8],
}

impl<'a> MemImageIO<'a> {
    #[inline]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }
}

impl<'a> ImageIO for MemImageIO<'a> {
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
