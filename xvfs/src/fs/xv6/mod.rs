// SPDX-License-Identifier: MIT
#[cfg(any(test, feature = "builder"))]
pub mod builder;
pub mod checker;
pub mod constant;
pub mod inode;
pub mod meta;
pub mod types;

// Public Interface
pub mod traits {
    #[cfg(any(test, feature = "builder"))]
    pub use super::builder::Xv6ImageBuilder;
    pub use super::checker::{Xv6CheckOptions, Xv6Checker};
    pub use super::inode::InodeTable;
    pub use super::meta::Xv6Meta;
}

pub mod prelude {
    pub use super::constant::*;
    pub use super::traits::*;
    pub use super::types::*;
    pub use crate::core::checker::{
        Finding, ReportDisplayOpts, Severity, VerifyPhases, VerifyReport,
    };
    pub use crate::core::errors::*;
    pub use crate::core::traits::*;
    pub use xvio::prelude::*;
}
