use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use ndarray_npy::ReadNpyError;

/// Failures that stop a comparison before any elementwise work happens.
#[derive(Debug)]
pub enum CompareError {
    /// The file could not be opened or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a well-formed `.npy` payload.
    Npy {
        path: PathBuf,
        source: ReadNpyError,
    },
    /// The header names a dtype that has no numeric interpretation here (complex, string, object).
    UnsupportedDType {
        path: PathBuf,
        source: ReadNpyError,
    },
    InvalidTolerance {
        name: &'static str,
        value: f64,
    },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompareError::Io { path, .. } => write!(f, "Failed to read {}", path.display()),
            CompareError::Npy { path, .. } => {
                write!(f, "Failed to parse npy file {}", path.display())
            }
            CompareError::UnsupportedDType { path, .. } => {
                write!(f, "Unsupported dtype in {}", path.display())
            }
            CompareError::InvalidTolerance { name, value } => write!(
                f,
                "Tolerance '{}' must be finite and non-negative, got {}",
                name, value
            ),
        }
    }
}

impl Error for CompareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompareError::Io { source, .. } => Some(source),
            CompareError::Npy { source, .. } | CompareError::UnsupportedDType { source, .. } => {
                Some(source)
            }
            CompareError::InvalidTolerance { .. } => None,
        }
    }
}
