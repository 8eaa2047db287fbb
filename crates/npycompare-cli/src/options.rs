use anyhow::{Context, Result};
use clap::ArgMatches;
use std::fs;
use std::path::Path;

use npycompare::ComparisonOptions;

/// Read comparison options from a JSON file.
///
/// A well-formed file deserializes directly. Otherwise fields that are
/// missing or have the wrong type keep their defaults.
pub fn load_options_file<P: AsRef<Path>>(config_path: P) -> Result<ComparisonOptions> {
    let config_path = config_path.as_ref();
    let config_json = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

    let partial: serde_json::Value = serde_json::from_str(&config_json)
        .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
    if let Ok(options) = serde_json::from_value::<ComparisonOptions>(partial.clone()) {
        return Ok(options);
    }
    let mut options = ComparisonOptions::default();

    macro_rules! load_or_default {
        ($field:ident) => {
            if let Some(val) = partial.get(stringify!($field)) {
                if let Ok(parsed) = serde_json::from_value(val.clone()) {
                    options.$field = parsed;
                } else {
                    log::warn!(
                        "Config Invalid value for '{}', using default: {:?}",
                        stringify!($field),
                        options.$field
                    );
                }
            } else {
                log::debug!(
                    "Config Missing field '{}', using default: {:?}",
                    stringify!($field),
                    options.$field
                );
            }
        };
    }

    load_or_default!(exact);
    load_or_default!(abs_tol);
    load_or_default!(rel_tol);

    Ok(options)
}

/// Resolve options: defaults, then the optional config file, then command-line flags.
pub fn resolve_options(matches: &ArgMatches) -> Result<ComparisonOptions> {
    let mut options = match matches.get_one::<std::path::PathBuf>("config") {
        Some(config_path) => {
            log::info!("Using comparison options from {:?}", config_path);
            load_options_file(config_path)?
        }
        None => ComparisonOptions::default(),
    };

    if matches.get_flag("exact") {
        options.exact = true;
    }
    if let Some(abs_tol) = matches.get_one::<f64>("abs_tol") {
        options.abs_tol = *abs_tol;
    }
    if let Some(rel_tol) = matches.get_one::<f64>("rel_tol") {
        options.rel_tol = *rel_tol;
    }

    options.validate()?;
    log::debug!("Comparison options: {:?}", options);
    Ok(options)
}
