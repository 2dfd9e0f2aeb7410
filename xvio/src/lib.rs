// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod errors;
#[macro_use]
mod macros;

// Backend modules
mod mem;

#[cfg(feature = "std")]
mod file;

// Prelude re-exports (central entrypoint)
pub mod prelude {
    pub use super::ImageIO;
    pub use super::ImageIOExt;
    pub use super::ImageIOStructExt;
    pub use super::errors::*;

    pub use super::mem::MemImageIO;

    #[cfg(feature = "std")]
    pub use super::file::FileImageIO;
}

// Internal use
use errors::*;

// Traits

/// Read-only image access.
///
/// The image is an immutable byte sequence held in memory for the whole run.
/// Implementations hand out borrowed slices and must reject any range that
/// does not lie entirely inside the image.
pub trait ImageIO {
    /// Total image length in bytes.
    fn len(&self) -> u64;

    /// Returns `true` when the image holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows `len` bytes starting at `offset` (absolute).
    fn read_at(&self, offset: u64, len: usize) -> ImageIOResult<&[u8]>;
}

/// Extension helpers for ImageIO.
///
/// Provides:
/// - block-indexed reads
/// - fixed-size array reads
/// - little-endian primitive reads (read_u16/u32)
pub trait ImageIOExt: ImageIO {
    /// Borrows block `index` of `block_size` bytes.
    ///
    /// The byte offset is computed with checked arithmetic, so a corrupt
    /// block number can never wrap around into a valid range.
    #[inline(always)]
    fn read_block(&self, index: u32, block_size: usize) -> ImageIOResult<&[u8]> {
        let offset = (index as u64)
            .checked_mul(block_size as u64)
            .ok_or(ImageIOError::OutOfRange {
                offset: u64::MAX,
                len: block_size,
                size: self.len(),
            })?;
        self.read_at(offset, block_size)
    }

    /// Copies `N` bytes at `offset` into an owned array.
    #[inline(always)]
    fn read_array<const N: usize>(&self, offset: u64) -> ImageIOResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_at(offset, N)?);
        Ok(out)
    }

    // Implements read helpers for primitive types
    imageio_impl_primitive_read!(u16, u32);
}

impl<T: ImageIO + ?Sized> ImageIOExt for T {}

/// Extension trait for decoding on-disk structs using zerocopy.
///
/// Requires the struct to implement zerocopy traits for safe conversion,
/// which rules out any layout-dependent pointer casts on corrupt data.
pub trait ImageIOStructExt: ImageIO {
    /// Reads a struct of type `T` from the given offset.
    fn read_struct<T: zerocopy::FromBytes + zerocopy::KnownLayout + zerocopy::Immutable>(
        &self,
        offset: u64,
    ) -> ImageIOResult<T> {
        let size = core::mem::size_of::<T>();
        let bytes = self.read_at(offset, size)?;
        T::read_from_bytes(bytes).map_err(|_| ImageIOError::Other("read_struct failed"))
    }

    /// Reads `count` consecutive structs of type `T` starting at `offset`.
    #[cfg(feature = "alloc")]
    fn read_structs<T: zerocopy::FromBytes + zerocopy::KnownLayout + zerocopy::Immutable>(
        &self,
        offset: u64,
        count: usize,
    ) -> ImageIOResult<alloc::vec::Vec<T>> {
        let size = core::mem::size_of::<T>();
        let total = size.checked_mul(count).ok_or(ImageIOError::OutOfRange {
            offset,
            len: usize::MAX,
            size: self.len(),
        })?;
        let bytes = self.read_at(offset, total)?;
        bytes
            .chunks_exact(size)
            .map(|chunk| {
                T::read_from_bytes(chunk).map_err(|_| ImageIOError::Other("read_structs failed"))
            })
            .collect()
    }
}

impl<T: ImageIO + ?Sized> ImageIOStructExt for T {}

/// Shared bounds check used by every backend.
///
/// Fails when `offset + len` overflows or runs past `size`.
#[inline]
pub(crate) fn check_bounds(
    offset: u64,
    len: usize,
    size: u64,
) -> ImageIOResult<core::ops::Range<usize>> {
    let out_of_range = ImageIOError::OutOfRange { offset, len, size };
    let end = offset.checked_add(len as u64).ok_or(out_of_range)?;
    if end > size {
        return Err(out_of_range);
    }
    let start = usize::try_from(offset).map_err(|_| out_of_range)?;
    let end = usize::try_from(end).map_err(|_| out_of_range)?;
    Ok(start..end)
}
