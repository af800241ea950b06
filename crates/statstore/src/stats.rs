//! Descriptive statistics
//!
//! Only central tendency and dispersion live here. All inputs go through the
//! same normalization as fingerprinting.

use std::fmt;

use crate::bundle::ResultBundle;
use crate::error::{Error, Result};
use crate::sample::{normalize, Sample};

fn non_empty<T: Sample>(data: &[T]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(Error::invalid_argument("dataset cannot be empty"));
    }
    Ok(normalize(data))
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance_of(values: &[f64], mean: f64) -> f64 {
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    ss / (values.len() - 1) as f64
}

/// Arithmetic mean of a dataset
///
/// # Errors
/// * `Error::InvalidArgument` - if `data` is empty
pub fn sample_mean<T: Sample>(data: &[T]) -> Result<f64> {
    let values = non_empty(data)?;
    Ok(mean_of(&values))
}

/// Unbiased sample variance (n - 1 denominator)
///
/// # Errors
/// * `Error::InvalidArgument` - if `data` has fewer than two values
pub fn sample_variance<T: Sample>(data: &[T]) -> Result<f64> {
    if data.len() < 2 {
        return Err(Error::invalid_argument(
            "sample variance requires at least two values",
        ));
    }
    let values = normalize(data);
    Ok(variance_of(&values, mean_of(&values)))
}

/// Sample standard deviation
pub fn sample_std_dev<T: Sample>(data: &[T]) -> Result<f64> {
    sample_variance(data).map(f64::sqrt)
}

/// Summarize a dataset into a result bundle.
///
/// Always contains `count`, `sum`, `mean`, `min` and `max`; `variance` and
/// `std_dev` are added once there are at least two values. A NaN anywhere in
/// the input makes every derived value except `count` NaN.
pub fn describe<T: Sample>(data: &[T]) -> Result<ResultBundle> {
    let values = non_empty(data)?;
    let sum: f64 = values.iter().sum();
    let mean = sum / values.len() as f64;
    let (min, max) = if values.iter().any(|v| v.is_nan()) {
        (f64::NAN, f64::NAN)
    } else {
        (
            values.iter().copied().fold(f64::INFINITY, f64::min),
            values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        )
    };

    let mut bundle = ResultBundle::new()
        .with("count", values.len() as f64)
        .with("sum", sum)
        .with("mean", mean)
        .with("min", min)
        .with("max", max);

    if values.len() >= 2 {
        let variance = variance_of(&values, mean);
        bundle.insert("variance", variance);
        bundle.insert("std_dev", variance.sqrt());
    }

    Ok(bundle)
}

/// Human-readable mean, rendered as `Sample Mean: 2.00`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanReport {
    /// The computed mean
    pub mean: f64,
}

impl MeanReport {
    /// Compute the mean and wrap it for display
    pub fn compute<T: Sample>(data: &[T]) -> Result<Self> {
        sample_mean(data).map(|mean| Self { mean })
    }
}

impl fmt::Display for MeanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sample Mean: {:.2}", self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(sample_mean(&[1, 2, 3]).unwrap(), 2.0);
        assert_eq!(sample_mean(&[1.5, 2.5]).unwrap(), 2.0);
        assert_eq!(sample_mean(&[7u8]).unwrap(), 7.0);
        // float division, not integer
        assert_eq!(sample_mean(&[1, 2]).unwrap(), 1.5);
    }

    #[test]
    fn test_mean_empty() {
        let err = sample_mean::<f64>(&[]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument("dataset cannot be empty".to_string())
        );
    }

    #[test]
    fn test_variance() {
        let data = [2, 4, 4, 4, 5, 5, 7, 9];
        let var = sample_variance(&data).unwrap();
        assert!((var - 32.0 / 7.0).abs() < 1e-12);
        let sd = sample_std_dev(&data).unwrap();
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_variance_too_small() {
        assert!(matches!(
            sample_variance(&[1.0]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            sample_std_dev::<i32>(&[]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_describe() {
        let bundle = describe(&[3, 1, 2]).unwrap();
        assert_eq!(bundle.get("count"), Some(3.0));
        assert_eq!(bundle.get("sum"), Some(6.0));
        assert_eq!(bundle.get("mean"), Some(2.0));
        assert_eq!(bundle.get("min"), Some(1.0));
        assert_eq!(bundle.get("max"), Some(3.0));
        assert_eq!(bundle.get("variance"), Some(1.0));
        assert_eq!(bundle.get("std_dev"), Some(1.0));
    }

    #[test]
    fn test_describe_single_value() {
        let bundle = describe(&[5.0]).unwrap();
        assert_eq!(bundle.get("mean"), Some(5.0));
        assert_eq!(bundle.get("variance"), None);
        assert_eq!(bundle.len(), 5);
        assert!(describe::<f32>(&[]).is_err());
    }

    #[test]
    fn test_describe_nan_propagates() {
        let bundle = describe(&[f64::NAN, 1.0, 3.0]).unwrap();
        assert_eq!(bundle.get("count"), Some(3.0));
        for label in ["sum", "mean", "min", "max", "variance", "std_dev"] {
            assert!(bundle.get(label).unwrap().is_nan(), "{} should be NaN", label);
        }

        let all_nan = describe(&[f64::NAN]).unwrap();
        assert!(all_nan.get("min").unwrap().is_nan());
        assert!(all_nan.get("max").unwrap().is_nan());
    }

    #[test]
    fn test_mean_report() {
        let report = MeanReport::compute(&[1, 2, 3]).unwrap();
        assert_eq!(report.to_string(), "Sample Mean: 2.00");
        assert_eq!(
            MeanReport::compute(&[1, 2]).unwrap().to_string(),
            "Sample Mean: 1.50"
        );
    }
}
