use ndarray::ArrayD;

use crate::config::ComparisonOptions;
use crate::io::LoadedArray;
use crate::stats::{
    abs_difference, all_close, all_equal, argmax_first, count_close, count_nan,
    integer_difference, relative_difference, unravel_index, Closeness,
};

/// Location of an extreme difference.
///
/// The inputs at `index` are read back from the arrays themselves, so integer
/// values keep full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub index: Vec<usize>,
}

/// Diagnostics gathered when two arrays are neither equal nor close.
#[derive(Debug, Clone, PartialEq)]
pub struct MismatchStats {
    pub nan_a: usize,
    pub nan_b: usize,
    pub num_close: usize,
    pub total: usize,
    pub max_abs: Option<Extremum>,
    pub max_rel: Option<Extremum>,
}

impl MismatchStats {
    pub fn close_percentage(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.num_close as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    ShapeMismatch { a: Vec<usize>, b: Vec<usize> },
    Equal,
    AllClose,
    NotClose(MismatchStats),
}

impl Verdict {
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Equal | Verdict::AllClose => 0,
            Verdict::NotClose(_) => 1,
            Verdict::ShapeMismatch { .. } => 2,
        }
    }
}

/// Decide how two arrays relate under `options`.
///
/// No elementwise work happens when the shapes differ.
pub fn compare(a: &LoadedArray, b: &LoadedArray, options: &ComparisonOptions) -> Verdict {
    if a.shape() != b.shape() {
        log::debug!("Shape mismatch: {:?} vs {:?}", a.shape(), b.shape());
        return Verdict::ShapeMismatch {
            a: a.shape().to_vec(),
            b: b.shape().to_vec(),
        };
    }

    let closeness = Closeness::new(options, a.kind.promote(b.kind));
    if options.exact {
        if same_values(a, b) {
            return Verdict::Equal;
        }
    } else if all_close(&a.values, &b.values, &closeness) {
        return if same_values(a, b) {
            Verdict::Equal
        } else {
            Verdict::AllClose
        };
    }

    Verdict::NotClose(mismatch_stats(a, b, &closeness))
}

/// Elementwise `==`, on exact integers when both sides have them.
fn same_values(a: &LoadedArray, b: &LoadedArray) -> bool {
    match (&a.integers, &b.integers) {
        (Some(x), Some(y)) => all_equal(x, y),
        _ => all_equal(&a.values, &b.values),
    }
}

/// Shapes of `a` and `b` must match.
pub fn mismatch_stats(a: &LoadedArray, b: &LoadedArray, closeness: &Closeness) -> MismatchStats {
    let diff = match (&a.integers, &b.integers) {
        (Some(x), Some(y)) => integer_difference(x, y),
        _ => abs_difference(&a.values, &b.values),
    };
    let (a, b) = (&a.values, &b.values);
    let relative = relative_difference(a, b, &diff);

    let stats = MismatchStats {
        nan_a: count_nan(a),
        nan_b: count_nan(b),
        num_close: count_close(a, b, closeness),
        total: a.len(),
        max_abs: locate_max(&diff),
        max_rel: locate_max(&relative),
    };
    log::debug!(
        "{} of {} values close; {} NaN in a, {} NaN in b",
        stats.num_close,
        stats.total,
        stats.nan_a,
        stats.nan_b
    );
    stats
}

fn locate_max(values: &ArrayD<f64>) -> Option<Extremum> {
    let flat = argmax_first(values)?;
    let index = unravel_index(flat, values.shape());
    Some(Extremum {
        value: values[&index[..]],
        index,
    })
}
