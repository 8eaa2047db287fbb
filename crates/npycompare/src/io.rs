//! Loading `.npy` files into a common in-memory form.
//!
//! Every supported dtype is widened to `f64` so the comparison code works on a
//! single element type. The original dtype class is kept in [`ElementKind`]
//! so values can be printed the way they appear in the source file. Integer
//! arrays also keep a lossless `i128` copy, since 64-bit values above 2^53 do
//! not survive the trip through `f64`.
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use ndarray_npy::{ReadNpyError, ReadNpyExt};

use crate::error::CompareError;

/// Printing class of an array's dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Float32,
    Float64,
    /// Signed or unsigned integer of the given width in bits.
    Int(u8),
    Bool,
}

impl ElementKind {
    /// Whether every value of this kind is exactly representable as `f32`.
    fn fits_float32(self) -> bool {
        match self {
            ElementKind::Float32 | ElementKind::Bool => true,
            ElementKind::Int(bits) => bits <= 16,
            ElementKind::Float64 => false,
        }
    }

    /// Kind of `|a - b|` for inputs of kinds `self` and `other`.
    ///
    /// `float32` only widens when the other side has more than 16 bits.
    pub fn promote(self, other: ElementKind) -> ElementKind {
        use ElementKind::*;
        match (self, other) {
            (Float64, _) | (_, Float64) => Float64,
            (Float32, k) | (k, Float32) if k.fits_float32() => Float32,
            (Float32, _) | (_, Float32) => Float64,
            (Int(x), Int(y)) => Int(x.max(y)),
            (Int(bits), Bool) | (Bool, Int(bits)) => Int(bits),
            (Bool, Bool) => Int(8),
        }
    }

    /// Kind of a ratio computed from inputs of kinds `self` and `other`.
    pub fn promote_ratio(self, other: ElementKind) -> ElementKind {
        match self.promote(other) {
            ElementKind::Float32 => ElementKind::Float32,
            _ => ElementKind::Float64,
        }
    }
}

/// One array read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedArray {
    pub kind: ElementKind,
    pub values: ArrayD<f64>,
    /// Exact element values, present for integer dtypes only.
    pub integers: Option<ArrayD<i128>>,
}

impl LoadedArray {
    pub fn new(kind: ElementKind, values: ArrayD<f64>) -> Self {
        Self {
            kind,
            values,
            integers: None,
        }
    }

    pub fn from_integers(kind: ElementKind, integers: ArrayD<i128>) -> Self {
        Self {
            kind,
            values: integers.mapv(|v| v as f64),
            integers: Some(integers),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.values.get(IxDyn(index)).copied()
    }

    pub fn get_integer(&self, index: &[usize]) -> Option<i128> {
        self.integers.as_ref()?.get(IxDyn(index)).copied()
    }
}

macro_rules! try_dtype {
    ($bytes:expr, int $ty:ty, $bits:expr) => {
        match ArrayD::<$ty>::read_npy($bytes) {
            Ok(array) => {
                return Ok(LoadedArray::from_integers(
                    ElementKind::Int($bits),
                    array.mapv(i128::from),
                ))
            }
            Err(ReadNpyError::WrongDescriptor(_)) => {}
            Err(err) => return Err(err),
        }
    };
    ($bytes:expr, $ty:ty, $kind:expr, $widen:expr) => {
        match ArrayD::<$ty>::read_npy($bytes) {
            Ok(array) => return Ok(LoadedArray::new($kind, array.mapv($widen))),
            Err(ReadNpyError::WrongDescriptor(_)) => {}
            Err(err) => return Err(err),
        }
    };
}

/// Decode an in-memory `.npy` payload.
///
/// The dtype is found by trying each supported element type in turn; a
/// `WrongDescriptor` error from the final candidate means the dtype is not
/// supported at all.
pub fn decode_npy(bytes: &[u8]) -> Result<LoadedArray, ReadNpyError> {
    try_dtype!(bytes, f64, ElementKind::Float64, |v| v);
    try_dtype!(bytes, f32, ElementKind::Float32, f64::from);
    try_dtype!(bytes, int i64, 64);
    try_dtype!(bytes, int i32, 32);
    try_dtype!(bytes, int i16, 16);
    try_dtype!(bytes, int i8, 8);
    try_dtype!(bytes, int u64, 64);
    try_dtype!(bytes, int u32, 32);
    try_dtype!(bytes, int u16, 16);
    try_dtype!(bytes, int u8, 8);

    let array = ArrayD::<bool>::read_npy(bytes)?;
    Ok(LoadedArray::new(
        ElementKind::Bool,
        array.mapv(|v| if v { 1.0 } else { 0.0 }),
    ))
}

/// Read a `.npy` file fully into memory.
pub fn load_npy<P: AsRef<Path>>(path: P) -> Result<LoadedArray, CompareError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CompareError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let array = decode_npy(&bytes).map_err(|source| match source {
        ReadNpyError::WrongDescriptor(_) => CompareError::UnsupportedDType {
            path: path.to_path_buf(),
            source,
        },
        _ => CompareError::Npy {
            path: path.to_path_buf(),
            source,
        },
    })?;

    log::info!(
        "Loaded {}: shape {:?}, kind {:?}",
        path.display(),
        array.shape(),
        array.kind
    );
    Ok(array)
}
