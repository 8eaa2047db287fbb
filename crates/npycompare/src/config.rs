use serde::Deserialize;

use crate::error::CompareError;

pub const DEFAULT_ABS_TOL: f64 = 1e-8;
pub const DEFAULT_REL_TOL: f64 = 1e-5;

/// How strictly two arrays must agree.
///
/// `abs_tol` and `rel_tol` only matter when `exact` is false.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ComparisonOptions {
    pub exact: bool,
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            exact: false,
            abs_tol: DEFAULT_ABS_TOL,
            rel_tol: DEFAULT_REL_TOL,
        }
    }
}

impl ComparisonOptions {
    pub fn exact() -> Self {
        Self {
            exact: true,
            ..Self::default()
        }
    }

    pub fn with_tolerances(abs_tol: f64, rel_tol: f64) -> Self {
        Self {
            exact: false,
            abs_tol,
            rel_tol,
        }
    }

    /// Reject tolerances that would make the closeness predicate meaningless.
    pub fn validate(&self) -> Result<(), CompareError> {
        for (name, value) in [("abs_tol", self.abs_tol), ("rel_tol", self.rel_tol)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CompareError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}
