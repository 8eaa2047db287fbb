use anyhow::{Context, Result};
use clap::ArgMatches;
use std::io::Write;
use std::path::{Path, PathBuf};

use npycompare::{compare, load_npy, ComparisonOptions, Report, Verdict};

use crate::options::resolve_options;

/// Load both arrays, compare them and write the report to `out`.
pub fn run_comparison<W: Write>(matches: &ArgMatches, out: &mut W) -> Result<Verdict> {
    let options = resolve_options(matches)?;
    let a_path: &PathBuf = matches.get_one("a").context("missing first input file")?;
    let b_path: &PathBuf = matches.get_one("b").context("missing second input file")?;
    compare_files(a_path, b_path, &options, out)
}

pub fn compare_files<W: Write>(
    a_path: &Path,
    b_path: &Path,
    options: &ComparisonOptions,
    out: &mut W,
) -> Result<Verdict> {
    let a = load_npy(a_path)?;
    let b = load_npy(b_path)?;

    let verdict = compare(&a, &b, options);
    write!(out, "{}", Report::new(&verdict, &a, &b)).context("Failed to write report")?;
    out.flush().context("Failed to write report")?;

    log::info!("Comparison finished with exit code {}", verdict.exit_code());
    Ok(verdict)
}
