// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

// Core Modules
pub mod core;
pub mod fs;

// Reusable types and traits
pub use crate::core::traits::*;

/// xv6 filesystem layout and consistency checks.
///
/// See [`xv6::Xv6Checker`], [`xv6::Xv6Meta`], and [`xv6::Xv6ImageBuilder`].
pub mod xv6 {
    pub use super::fs::xv6::prelude::*;
}
