//! Numeric sample normalization
//!
//! Statistics work on one canonical `f64` per value. Fingerprints use an
//! exact key instead: integers keep every digit (widened through `i128`) and
//! an integral float maps onto the same integer, so `2` and `2.0` describe
//! the same value while `2^53` and `2^53 + 1` stay distinct.

use std::cmp::Ordering;
use std::fmt;

/// A numeric value that can appear in a dataset
pub trait Sample: Copy {
    /// Convert to `f64` without canonicalization
    fn to_f64(self) -> f64;

    /// Exact key used for fingerprinting
    fn to_exact(self) -> Exact;
}

macro_rules! impl_int_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn to_exact(self) -> Exact {
                    Exact::Int(self as i128)
                }
            }
        )*
    };
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn to_exact(self) -> Exact {
                    Exact::from_f64(self as f64)
                }
            }
        )*
    };
}

impl_int_sample!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_float_sample!(f32, f64);

/// 2^127, first magnitude outside `i128`
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Exact representation of one sample.
///
/// Renders as plain integer digits for `Int` and as shortest round-trip float
/// text (`0.5`, `1e300`, `NaN`, `-inf`) for `Float`. Float text always holds a
/// `.`, `e`, or letters, so the two forms never produce the same string.
#[derive(Debug, Clone, Copy)]
pub enum Exact {
    /// Integer, or an integral float inside the `i128` range
    Int(i128),
    /// Every other float, already canonical
    Float(f64),
}

impl Exact {
    /// Key for a float: integral values become `Int`
    pub fn from_f64(v: f64) -> Self {
        let v = canonical(v);
        if v.is_finite() && v.fract() == 0.0 && v.abs() < I128_BOUND {
            Exact::Int(v as i128)
        } else {
            Exact::Float(v)
        }
    }

    fn approx(&self) -> f64 {
        match *self {
            Exact::Int(i) => i as f64,
            Exact::Float(f) => f,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Exact::Int(_) => 0,
            Exact::Float(_) => 1,
        }
    }

    /// Total order: by approximate magnitude, then kind, then exact value.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.approx()
            .total_cmp(&other.approx())
            .then_with(|| self.rank().cmp(&other.rank()))
            .then_with(|| match (self, other) {
                (Exact::Int(a), Exact::Int(b)) => a.cmp(b),
                (Exact::Float(a), Exact::Float(b)) => a.total_cmp(b),
                _ => Ordering::Equal,
            })
    }
}

impl fmt::Display for Exact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exact::Int(i) => write!(f, "{}", i),
            Exact::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// Canonical form of a single value: `-0.0` becomes `0.0`, every NaN payload
/// collapses to one quiet NaN.
#[inline]
pub fn canonical<T: Sample>(value: T) -> f64 {
    let v = value.to_f64();
    if v.is_nan() {
        f64::NAN
    } else if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Canonicalize a whole dataset
pub fn normalize<T: Sample>(data: &[T]) -> Vec<f64> {
    data.iter().map(|&v| canonical(v)).collect()
}

/// Exact keys of a dataset, sorted ascending
pub fn exact_sorted<T: Sample>(data: &[T]) -> Vec<Exact> {
    let mut values: Vec<Exact> = data.iter().map(|&v| v.to_exact()).collect();
    values.sort_by(Exact::total_cmp);
    values
}
