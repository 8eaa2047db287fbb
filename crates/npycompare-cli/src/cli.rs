use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

use crate::util::{parse_tolerance, validate_readable_file};

pub fn build_cli() -> Command {
    Command::new("compare_npy")
        .version(clap::crate_version!())
        .about("Compares 2 npy files to make sure that they are (almost) equal")
        .after_help(
            "Exit status is 0 when the arrays are equal or all-close, 1 when they differ, \
             and 2 when the shapes differ or an input cannot be used.",
        )
        .arg(
            Arg::new("a")
                .value_name("a.npy")
                .help("first file to compare")
                .required(true)
                .value_parser(validate_readable_file)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("b")
                .value_name("b.npy")
                .help("second file to compare")
                .required(true)
                .value_parser(validate_readable_file)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("exact")
                .long("exact")
                .help("must be exactly equal instead of close")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("abs_tol")
                .long("abs-tol")
                .value_name("FLOAT")
                .help("absolute tolerance when measuring closeness (default=1e-8)")
                .value_parser(parse_tolerance),
        )
        .arg(
            Arg::new("rel_tol")
                .long("rel-tol")
                .value_name("FLOAT")
                .help("relative tolerance when measuring closeness (default=1e-5)")
                .value_parser(parse_tolerance),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help(
                    "JSON file with any of exact, abs_tol and rel_tol. \
                     Command-line flags override values from this file.",
                )
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
}
