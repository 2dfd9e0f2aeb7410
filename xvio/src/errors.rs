// SPDX-License-Identifier: MIT

use core::fmt;

/// Result type for ImageIO operations.
pub type ImageIOResult<T = ()> = core::result::Result<T, ImageIOError>;

/// Error type for ImageIO operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageIOError {
    /// The requested byte range does not fit inside the image.
    OutOfRange { offset: u64, len: usize, size: u64 },
    Other(&'static str),
}

impl ImageIOError {
    pub fn msg(&self) -> &'static str {
        match self {
            ImageIOError::OutOfRange { .. } => "Out of range access",
            ImageIOError::Other(msg) => msg,
        }
    }
}

impl From<&'static str> for ImageIOError {
    #[inline]
    fn from(msg: &'static str) -> Self {
        ImageIOError::Other(msg)
    }
}

impl fmt::Display for ImageIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        if let ImageIOError::OutOfRange { offset, len, size } = self {
            write!(f, " ({len} bytes at offset {offset}, image is {size} bytes)")?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ImageIOError {}
