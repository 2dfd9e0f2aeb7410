// SPDX-License-Identifier: MIT

mod stats;
mod tracker;
mod types;

pub use stats::WalkerStats;
pub use tracker::ReachabilityTracker;
pub use types::{
    Finding, ReportDisplay, ReportDisplayOpts, Severity, VerifierOptionsLike, VerifyPhases,
    VerifyReport,
};

pub use crate::core::errors::{FsCheckerError, FsCheckerResult};

/// Signature shared by every phase of a checker.
pub type PhaseFn<C, O> = fn(&mut C, &O, &mut VerifyReport) -> FsCheckerResult<()>;

/// Trait for verifying the integrity of a filesystem.
///
/// Implemented per filesystem to run its consistency checks. Phases run in a
/// fixed order; a phase that is not selected by the options is skipped, and a
/// fail-fast run stops after the first phase that recorded an error.
pub trait FsChecker: Sized {
    type Options: VerifierOptionsLike + Default;

    fn check_with(&mut self, opt: &Self::Options) -> FsCheckerResult<VerifyReport> {
        let mut rep = VerifyReport::default();
        self.check_into(opt, &mut rep)?;
        Ok(rep)
    }

    /// Runs the selected phases into `rep`.
    ///
    /// Findings recorded before an error stay in `rep`, so a caller can still
    /// report them when a later phase fails to read the image.
    fn check_into(&mut self, opt: &Self::Options, rep: &mut VerifyReport) -> FsCheckerResult<()> {
        let phases: [(VerifyPhases, PhaseFn<Self, Self::Options>); 5] = [
            (VerifyPhases::ADDRESSES, Self::check_addresses),
            (VerifyPhases::ROOT, Self::check_root),
            (VerifyPhases::BITMAP, Self::check_bitmap),
            (VerifyPhases::UNIQUENESS, Self::check_uniqueness),
            (VerifyPhases::DIRECTORY, Self::check_directory),
        ];

        for (phase, run) in phases {
            if !opt.phases().contains(phase) {
                continue;
            }
            run(self, opt, rep)?;
            if opt.fail_fast() && rep.has_error() {
                break;
            }
        }
        Ok(())
    }

    fn check_all(&mut self) -> FsCheckerResult<VerifyReport> {
        self.check_with(&Self::Options::default())
    }

    /// Cheap sanity check run before any phase.
    fn fast_check(&mut self) -> FsCheckerResult {
        Ok(())
    }

    fn check_addresses(
        &mut self,
        _opt: &Self::Options,
        _rep: &mut VerifyReport,
    ) -> FsCheckerResult<()> {
        Ok(())
    }
    fn check_root(&mut self, _opt: &Self::Options, _rep: &mut VerifyReport) -> FsCheckerResult<()> {
        Ok(())
    }
    fn check_bitmap(
        &mut self,
        _opt: &Self::Options,
        _rep: &mut VerifyReport,
    ) -> FsCheckerResult<()> {
        Ok(())
    }
    fn check_uniqueness(
        &mut self,
        _opt: &Self::Options,
        _rep: &mut VerifyReport,
    ) -> FsCheckerResult<()> {
        Ok(())
    }
    fn check_directory(
        &mut self,
        _opt: &Self::Options,
        _rep: &mut VerifyReport,
    ) -> FsCheckerResult<()> {
        Ok(())
    }
}
