//! Plain-text rendering of a [`Verdict`].
//!
//! Scalars, shapes and indices are written the way NumPy prints them, so the
//! output reads the same as a quick interactive check of the two arrays.
use std::fmt;

use crate::compare::{Extremum, MismatchStats, Verdict};
use crate::io::{ElementKind, LoadedArray};

/// A verdict together with the two arrays it was computed from.
pub struct Report<'a> {
    verdict: &'a Verdict,
    a: &'a LoadedArray,
    b: &'a LoadedArray,
}

impl<'a> Report<'a> {
    pub fn new(verdict: &'a Verdict, a: &'a LoadedArray, b: &'a LoadedArray) -> Self {
        Self { verdict, a, b }
    }

    fn write_extremum(
        &self,
        f: &mut fmt::Formatter,
        label: &str,
        extremum: &Extremum,
        kind: ElementKind,
    ) -> fmt::Result {
        writeln!(
            f,
            "max {} difference is {} at {} with {} and {}",
            label,
            format_scalar(extremum.value, kind),
            format_tuple(&extremum.index),
            format_element(self.a, &extremum.index)?,
            format_element(self.b, &extremum.index)?
        )
    }

    fn write_mismatch(&self, f: &mut fmt::Formatter, stats: &MismatchStats) -> fmt::Result {
        writeln!(f, "not equal/allclose")?;
        if stats.nan_a > 0 {
            writeln!(f, "a has {} NANs", stats.nan_a)?;
        }
        if stats.nan_b > 0 {
            writeln!(f, "b has {} NANs", stats.nan_b)?;
        }
        writeln!(
            f,
            "there are {} ({:.2}%) close values",
            stats.num_close,
            stats.close_percentage()
        )?;
        let (kind_a, kind_b) = (self.a.kind, self.b.kind);
        if let Some(max_abs) = &stats.max_abs {
            self.write_extremum(f, "absolute", max_abs, kind_a.promote(kind_b))?;
        }
        if let Some(max_rel) = &stats.max_rel {
            self.write_extremum(f, "relative", max_rel, kind_a.promote_ratio(kind_b))?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.verdict {
            Verdict::ShapeMismatch { a, b } => {
                writeln!(f, "unequal shapes: {} {}", format_tuple(a), format_tuple(b))
            }
            Verdict::Equal => writeln!(f, "equal"),
            Verdict::AllClose => writeln!(f, "all-close"),
            Verdict::NotClose(stats) => self.write_mismatch(f, stats),
        }
    }
}

/// `()`, `(5,)` or `(2, 3)`.
pub fn format_tuple(values: &[usize]) -> String {
    match values {
        [single] => format!("({},)", single),
        _ => {
            let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// One element of `array`, preferring its exact integer value.
fn format_element(array: &LoadedArray, index: &[usize]) -> Result<String, fmt::Error> {
    if let Some(value) = array.get_integer(index) {
        return Ok(value.to_string());
    }
    let value = array.get(index).ok_or(fmt::Error)?;
    Ok(format_scalar(value, array.kind))
}

pub fn format_scalar(value: f64, kind: ElementKind) -> String {
    match kind {
        ElementKind::Float64 => format_float(value, format!("{:?}", value)),
        ElementKind::Float32 => format_float(value, format!("{:?}", value as f32)),
        ElementKind::Int(_) => format!("{:.0}", value),
        ElementKind::Bool if value != 0.0 => "True".to_string(),
        ElementKind::Bool => "False".to_string(),
    }
}

fn format_float(value: f64, shortest: String) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }
    // exponents carry an explicit sign and at least two digits: 1e-05, 1e+16
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}
