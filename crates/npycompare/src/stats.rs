use ndarray::{ArrayD, Zip};

use crate::config::ComparisonOptions;
use crate::io::ElementKind;

/// Elementwise closeness test.
///
/// Finite pairs are close when `|x - y| <= abs_tol + rel_tol * |y|`. Any pair
/// involving an infinity or NaN is close only if `x == y`, so matching
/// infinities pass and NaN never does.
#[inline]
pub fn is_close(x: f64, y: f64, abs_tol: f64, rel_tol: f64) -> bool {
    if x.is_finite() && y.is_finite() {
        (x - y).abs() <= abs_tol + rel_tol * y.abs()
    } else {
        x == y
    }
}

/// [`is_close`] carried out in single precision.
#[inline]
pub fn is_close_f32(x: f32, y: f32, abs_tol: f32, rel_tol: f32) -> bool {
    if x.is_finite() && y.is_finite() {
        (x - y).abs() <= abs_tol + rel_tol * y.abs()
    } else {
        x == y
    }
}

/// Tolerances together with the precision the closeness test runs in.
///
/// Pairs whose common kind is `float32` are tested in `f32`, tolerances
/// included, so results at the tolerance boundary match single-precision
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Closeness {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub single_precision: bool,
}

impl Closeness {
    pub fn new(options: &ComparisonOptions, kind: ElementKind) -> Self {
        Self {
            abs_tol: options.abs_tol,
            rel_tol: options.rel_tol,
            single_precision: kind == ElementKind::Float32,
        }
    }

    #[inline]
    pub fn test(&self, x: f64, y: f64) -> bool {
        if self.single_precision {
            is_close_f32(x as f32, y as f32, self.abs_tol as f32, self.rel_tol as f32)
        } else {
            is_close(x, y, self.abs_tol, self.rel_tol)
        }
    }
}

/// Larger of two values, propagating NaN from either side.
#[inline]
pub fn nan_max(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        f64::NAN
    } else {
        x.max(y)
    }
}

pub fn count_nan(values: &ArrayD<f64>) -> usize {
    values.iter().filter(|v| v.is_nan()).count()
}

/// Both arrays must have the same shape.
pub fn all_equal<T: PartialEq>(a: &ArrayD<T>, b: &ArrayD<T>) -> bool {
    Zip::from(a).and(b).all(|x, y| x == y)
}

pub fn all_close(a: &ArrayD<f64>, b: &ArrayD<f64>, closeness: &Closeness) -> bool {
    Zip::from(a).and(b).all(|&x, &y| closeness.test(x, y))
}

pub fn count_close(a: &ArrayD<f64>, b: &ArrayD<f64>, closeness: &Closeness) -> usize {
    Zip::from(a)
        .and(b)
        .fold(0, |acc, &x, &y| acc + usize::from(closeness.test(x, y)))
}

pub fn abs_difference(a: &ArrayD<f64>, b: &ArrayD<f64>) -> ArrayD<f64> {
    Zip::from(a).and(b).map_collect(|&x, &y| (x - y).abs())
}

/// `|a - b|` taken on exact integers, rounded to `f64` only at the end.
pub fn integer_difference(a: &ArrayD<i128>, b: &ArrayD<i128>) -> ArrayD<f64> {
    Zip::from(a).and(b).map_collect(|&x, &y| (x - y).abs() as f64)
}

/// `diff / max(|a|, |b|)`, with 0 wherever both inputs are zero.
pub fn relative_difference(a: &ArrayD<f64>, b: &ArrayD<f64>, diff: &ArrayD<f64>) -> ArrayD<f64> {
    Zip::from(a).and(b).and(diff).map_collect(|&x, &y, &d| {
        let scale = nan_max(x.abs(), y.abs());
        if scale == 0.0 {
            0.0
        } else {
            d / scale
        }
    })
}

/// Flat row-major position of the largest value, first occurrence winning ties.
///
/// A NaN counts as larger than every number, so the first NaN is returned
/// whenever one is present. Returns `None` for an empty array.
pub fn argmax_first(values: &ArrayD<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (pos, &value) in values.iter().enumerate() {
        match best {
            None => best = Some((pos, value)),
            Some((_, current)) if current.is_nan() => break,
            Some((_, current)) => {
                if value.is_nan() || value > current {
                    best = Some((pos, value));
                }
            }
        }
    }
    best.map(|(pos, _)| pos)
}

/// Multi-dimensional index of a flat row-major position.
pub fn unravel_index(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (axis, &dim) in shape.iter().enumerate().rev() {
        if dim == 0 {
            continue;
        }
        index[axis] = flat % dim;
        flat /= dim;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, ArrayD, IxDyn};

    fn dyn1(values: &[f64]) -> ArrayD<f64> {
        arr1(values).into_dyn()
    }

    #[test]
    fn is_close_uses_b_as_reference() {
        // rel_tol scales by |y| only
        assert!(is_close(100.0, 110.0, 0.0, 0.1));
        assert!(!is_close(110.0, 100.0, 0.0, 0.09));
    }

    #[test]
    fn is_close_non_finite() {
        assert!(is_close(f64::INFINITY, f64::INFINITY, 1e-8, 1e-5));
        assert!(!is_close(f64::INFINITY, f64::NEG_INFINITY, 1e-8, 1e-5));
        assert!(!is_close(f64::INFINITY, 1.0, 1e-8, 1e-5));
        assert!(!is_close(f64::NAN, f64::NAN, 1e-8, 1e-5));
    }

    #[test]
    fn single_precision_tolerance_rounds_like_f32() {
        // 1.19209289e-7 rounds up to f32::EPSILON in single precision
        let opts = ComparisonOptions::with_tolerances(1.19209289e-7, 0.0);
        let x = 1.0;
        let y = f64::from(1.0f32 + f32::EPSILON);

        assert!(Closeness::new(&opts, ElementKind::Float32).test(x, y));
        assert!(!Closeness::new(&opts, ElementKind::Float64).test(x, y));
        assert!(!Closeness::new(&opts, ElementKind::Int(64)).single_precision);
    }

    #[test]
    fn count_nan_counts_each_array() {
        assert_eq!(count_nan(&dyn1(&[f64::NAN, 1.0, f64::NAN])), 2);
        assert_eq!(count_nan(&dyn1(&[1.0, 2.0])), 0);
    }

    #[test]
    fn all_equal_treats_signed_zero_as_equal() {
        assert!(all_equal(&dyn1(&[0.0, 1.0]), &dyn1(&[-0.0, 1.0])));
        assert!(!all_equal(&dyn1(&[f64::NAN]), &dyn1(&[f64::NAN])));
    }

    #[test]
    fn integer_difference_does_not_round_inputs() {
        let a = arr1(&[9_007_199_254_740_993i128, i128::from(u64::MAX)]).into_dyn();
        let b = arr1(&[9_007_199_254_740_992i128, 0]).into_dyn();
        assert!(!all_equal(&a, &b));
        let diff = integer_difference(&a, &b);
        assert_eq!(diff.iter().copied().collect::<Vec<_>>(), vec![1.0, u64::MAX as f64]);
    }

    #[test]
    fn count_close_on_small_pair() {
        let closeness = Closeness::new(&ComparisonOptions::default(), ElementKind::Float64);
        let a = dyn1(&[1.0, 2.0, 3.0, 4.0]);
        let b = dyn1(&[1.0, 2.0 + 1e-9, 3.5, f64::NAN]);
        assert_eq!(count_close(&a, &b, &closeness), 2);
        assert!(!all_close(&a, &b, &closeness));
    }

    #[test]
    fn relative_difference_zero_when_both_zero() {
        let a = dyn1(&[0.0, 2.0, -4.0]);
        let b = dyn1(&[0.0, 1.0, 4.0]);
        let diff = abs_difference(&a, &b);
        let rel = relative_difference(&a, &b, &diff);
        assert_eq!(rel.iter().copied().collect::<Vec<_>>(), vec![0.0, 0.5, 2.0]);
    }

    #[test]
    fn argmax_first_breaks_ties_in_row_major_order() {
        let values = arr2(&[[1.0, 5.0], [5.0, 2.0]]).into_dyn();
        assert_eq!(argmax_first(&values), Some(1));
    }

    #[test]
    fn argmax_first_prefers_first_nan() {
        assert_eq!(argmax_first(&dyn1(&[3.0, f64::NAN, 9.0, f64::NAN])), Some(1));
        assert_eq!(argmax_first(&dyn1(&[])), None);
    }

    #[test]
    fn unravel_index_row_major() {
        assert_eq!(unravel_index(3, &[2, 2]), vec![1, 1]);
        assert_eq!(unravel_index(5, &[2, 3, 1]), vec![1, 2, 0]);
        assert_eq!(unravel_index(0, &[]), Vec::<usize>::new());
    }

    #[test]
    fn abs_difference_keeps_shape() {
        let a = ArrayD::from_shape_vec(IxDyn(&[2, 1]), vec![1.0, -2.0]).unwrap();
        let b = ArrayD::from_shape_vec(IxDyn(&[2, 1]), vec![3.0, 2.0]).unwrap();
        let diff = abs_difference(&a, &b);
        assert_eq!(diff.shape(), &[2, 1]);
        assert_eq!(diff.iter().copied().collect::<Vec<_>>(), vec![2.0, 4.0]);
    }
}
