//! npycompare: equality and closeness checks for pairs of `.npy` arrays.
//!
//! The crate loads two arrays, checks that their shapes agree, and then
//! decides whether they are exactly equal, all-close under absolute/relative
//! tolerances, or different. For the last case it gathers NaN counts, the
//! share of close elements, and the locations of the largest absolute and
//! relative differences.
//!
//! Everything is computed on `f64` values in row-major order, except that
//! integer arrays are tested for equality on their exact values; see
//! [`io::ElementKind`] for how the source dtype is preserved for printing.
pub mod compare;
pub mod config;
pub mod error;
pub mod io;
pub mod report;
pub mod stats;

pub use compare::{compare, Extremum, MismatchStats, Verdict};
pub use config::ComparisonOptions;
pub use error::CompareError;
pub use io::{load_npy, ElementKind, LoadedArray};
pub use report::Report;
