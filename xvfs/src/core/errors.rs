// SPDX-License-Identifier: MIT

use core::fmt;

pub use xvio::errors::*;

/// Structural violations detected by the checker.
///
/// Each kind maps to one fixed diagnostic message; the reporter prints it as
/// `ERROR: <message>.` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    BadInode,
    BadDirectAddress,
    BadIndirectAddress,
    RootDirDoesNotExist,
    DirectoryNotFormatted,
    MissingBitmapMark,
    MissingInodeMark,
    MultipleDirectBlocksInUse,
    MultipleIndirectBlocksInUse,
    DirectoryMismatchInodeInUse,
    DirectoryMismatchInodeFree,
    BadReferenceCountFile,
    DirectoryMultipleReference,
}

impl Violation {
    pub fn msg(&self) -> &'static str {
        match self {
            Violation::BadInode => "bad inode",
            Violation::BadDirectAddress => "bad direct address in inode",
            Violation::BadIndirectAddress => "bad indirect address in inode",
            Violation::RootDirDoesNotExist => "root directory does not exist",
            Violation::DirectoryNotFormatted => "directory not properly formatted",
            Violation::MissingBitmapMark => "address used by inode but marked free in bitmap",
            Violation::MissingInodeMark => "bitmap marks block in use but it is not in use",
            Violation::MultipleDirectBlocksInUse => "direct address used more than once",
            Violation::MultipleIndirectBlocksInUse => "indirect address used more than once",
            Violation::DirectoryMismatchInodeInUse => {
                "inode marked use but not found in a directory"
            }
            Violation::DirectoryMismatchInodeFree => {
                "inode referred to in directory but marked free"
            }
            Violation::BadReferenceCountFile => "bad reference count for file",
            Violation::DirectoryMultipleReference => {
                "directory appears more than once in file system"
            }
        }
    }

    /// Short finding code used in verbose reports.
    pub fn code(&self) -> &'static str {
        match self {
            Violation::BadInode => "INODE.TYPE",
            Violation::BadDirectAddress => "INODE.DIRECT",
            Violation::BadIndirectAddress => "INODE.INDIRECT",
            Violation::RootDirDoesNotExist => "ROOT.MISSING",
            Violation::DirectoryNotFormatted => "DIR.FORMAT",
            Violation::MissingBitmapMark => "BMAP.FREE",
            Violation::MissingInodeMark => "BMAP.ORPHAN",
            Violation::MultipleDirectBlocksInUse => "DUP.DIRECT",
            Violation::MultipleIndirectBlocksInUse => "DUP.INDIRECT",
            Violation::DirectoryMismatchInodeInUse => "DIR.UNREF",
            Violation::DirectoryMismatchInodeFree => "DIR.FREEREF",
            Violation::BadReferenceCountFile => "FILE.NLINK",
            Violation::DirectoryMultipleReference => "DIR.MULTI",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsParsingError {
    IO(ImageIOError),
    Invalid(&'static str),
    Other(&'static str),
}

impl FsParsingError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsParsingError::IO(_) => "IO error",
            FsParsingError::Invalid(msg) => msg,
            FsParsingError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsParsingError::IO(e) => Some(FsError::IO(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {src}")?;
            current = src.source();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsCheckerError {
    IO(ImageIOError),
    Parsing(FsParsingError),
    /// Superblock geometry that the layout arithmetic cannot work with.
    Geometry(&'static str),
    Other(&'static str),
}

impl FsCheckerError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsCheckerError::IO(_) => "IO error",
            FsCheckerError::Parsing(_) => "Parsing error",
            FsCheckerError::Geometry(msg) => msg,
            FsCheckerError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsCheckerError::IO(e) => Some(FsError::IO(*e)),
            FsCheckerError::Parsing(e) => Some(FsError::Parsing(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsCheckerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        let mut current = self.source();
        while let Some(src) = current {
            write!(f, "\n  caused by: {}", src.msg())?;
            if let FsError::IO(io) = src {
                write!(f, " ({io})")?;
            }
            current = src.source();
        }
        Ok(())
    }
}

/// Top-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    IO(ImageIOError),
    Parsing(FsParsingError),
    Checker(FsCheckerError),
    Other(&'static str),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::IO(e) => write!(f, "{e}"),
            FsError::Parsing(e) => write!(f, "{e}"),
            FsError::Checker(e) => write!(f, "{e}"),
            FsError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl FsError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsError::IO(e) => e.msg(),
            FsError::Parsing(e) => e.msg(),
            FsError::Checker(e) => e.msg(),
            FsError::Other(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsError::Parsing(e) => e.source(),
            FsError::Checker(e) => e.source(),
            FsError::IO(_) => None,
            FsError::Other(_) => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FsParsingError {}

#[cfg(feature = "std")]
impl std::error::Error for FsCheckerError {}

#[cfg(feature = "std")]
impl std::error::Error for FsError {}

// === type Fs*Result ===

pub type FsParsingResult<T = ()> = Result<T, FsParsingError>;
pub type FsCheckerResult<T = ()> = Result<T, FsCheckerError>;

crate::fs_error_wiring! {
    top => FsError {
        ImageIOError   : IO,
        FsParsingError : Parsing,
        FsCheckerError : Checker,
    },
    str_into => [
        FsParsingError,
        FsCheckerError,
    ],
    sub => {
        ImageIOError   => [ FsParsingError::IO, FsCheckerError::IO ],
        FsParsingError => [ FsCheckerError::Parsing ]
    },
}
