// SPDX-License-Identifier: MIT
// xvck/src/main.rs

mod report;
mod utils;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, error::ErrorKind};
use xvfs::xv6::*;

use crate::utils::{LogLevel, set_log_level};

const USAGE: &str = "Usage: fcheck <file_system_image>";

#[derive(Parser)]
#[command(
    name = "fcheck",
    version,
    about = "Read-only consistency checker for xv6 file system images"
)]
struct Cli {
    /// xv6 image to check
    image: PathBuf,

    /// Report every violation instead of stopping at the first one
    #[arg(long)]
    all: bool,

    /// Print a summary (-v) or every finding (-vv) on stdout
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Extra positional arguments, accepted and ignored
    #[arg(hide = true)]
    ignored: Vec<OsString>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    set_log_level(LogLevel::from_verbosity(cli.verbose));

    let io = match FileImageIO::open(&cli.image) {
        Ok(io) => io,
        Err(e) => {
            eprintln!("image not found: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut rep = VerifyReport::default();
    let outcome = run(&io, &cli, &mut rep);
    report::emit(&rep, if outcome.is_ok() { cli.verbose } else { 0 });

    match outcome {
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
        Ok(()) if rep.has_error() => ExitCode::FAILURE,
        Ok(()) => ExitCode::SUCCESS,
    }
}

/// Runs the check into `rep`; violations found before a read error are kept.
fn run(io: &FileImageIO, cli: &Cli, rep: &mut VerifyReport) -> anyhow::Result<()> {
    if !cli.ignored.is_empty() {
        log_info!("ignoring {} extra argument(s)", cli.ignored.len());
    }
    let meta = Xv6Meta::from_io(io).context("cannot load superblock")?;
    log_info!(
        "{}: {} blocks, {} data blocks from {}, {} inodes",
        cli.image.display(),
        meta.size,
        meta.nblocks,
        meta.data_region_start(),
        meta.ninodes
    );

    let mut checker = Xv6Checker::new(io, &meta);
    checker
        .fast_check()
        .context("image is shorter than its superblock claims")?;

    let opt = if cli.all {
        Xv6CheckOptions::collect_all()
    } else {
        Xv6CheckOptions::default()
    };
    checker.check_into(&opt, rep).context("check aborted")?;

    let stats = checker.stats;
    log_verbose!(
        "{} inodes scanned, {} in use, {} blocks referenced",
        stats.inodes_checked,
        stats.inodes_in_use,
        stats.blocks_referenced
    );
    log_verbose!(
        "{} directories, {} entries, {} files",
        stats.dirs_visited,
        stats.entries_scanned,
        stats.files_found
    );
    Ok(())
}
