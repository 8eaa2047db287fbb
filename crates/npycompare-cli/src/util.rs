use anyhow::{Context, Result};
use std::{fs::File, path::PathBuf};

/// Argument parser for input files: the path must name a regular file that can be opened.
pub fn validate_readable_file(path: &str) -> Result<PathBuf> {
    let pb = PathBuf::from(path);

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    if !pb.is_file() {
        anyhow::bail!("Not a regular file: {}", path);
    }
    File::open(&pb).with_context(|| format!("Cannot open file: {}", path))?;

    Ok(pb)
}

/// Argument parser for tolerances.
pub fn parse_tolerance(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid float value: {}", value))?;
    if !parsed.is_finite() || parsed < 0.0 {
        anyhow::bail!("Tolerance must be finite and non-negative: {}", value);
    }
    Ok(parsed)
}
