// SPDX-License-Identifier: MIT

/// Implements little-endian read helpers for primitive types on ImageIO.
macro_rules! imageio_impl_primitive_read {
    ($($ty:ty),+ $(,)?) => {
        $(
            paste::paste! {
                #[inline(always)]
                fn [<read_ $ty _at>](&self, offset: u64) -> ImageIOResult<$ty> {
                    let buf = self.read_array::<{ core::mem::size_of::<$ty>() }>(offset)?;
                    Ok(<$ty>::from_le_bytes(buf))
                }
            }
        )+
    };
}
