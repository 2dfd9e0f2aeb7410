// SPDX-License-Identifier: MIT
// xvck/src/report.rs

use colored::*;
use xvfs::xv6::{ReportDisplayOpts, Severity, VerifyReport};

/// Prints the violations of `rep` on stderr.
///
/// Each violation is one `ERROR: <message>.` line, uncoloured so it can be
/// matched by scripts. With `-v` a coloured summary goes to stdout, with
/// `-vv` every finding does too.
pub fn emit(rep: &VerifyReport, verbose: u8) {
    for v in rep.violations() {
        eprintln!("ERROR: {}.", v.msg());
    }

    if verbose >= 2 {
        print!(
            "{}",
            rep.display_with(ReportDisplayOpts {
                prefix: "[fcheck] ",
                pad_code: 14,
                ..ReportDisplayOpts::default()
            })
        );
    }
    if verbose >= 1 {
        println!("{}", summary(rep));
    }
}

fn summary(rep: &VerifyReport) -> String {
    let errors = rep.count(Severity::Error);
    let verdict = if errors == 0 {
        "clean".green().bold()
    } else {
        "inconsistent".red().bold()
    };
    format!(
        "[fcheck] {verdict}: errors={errors} infos={}",
        rep.count(Severity::Info)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use xvfs::xv6::{Finding, Violation};

    #[test]
    fn test_summary_verdict() {
        colored::control::set_override(false);
        let mut rep = VerifyReport::default();
        rep.push(Finding::info("ROOT.OK", "root present"));
        assert_eq!(summary(&rep), "[fcheck] clean: errors=0 infos=1");

        rep.push(Finding::violation(Violation::BadInode, "x"));
        assert!(summary(&rep).starts_with("[fcheck] inconsistent: errors=1"));
    }
}
