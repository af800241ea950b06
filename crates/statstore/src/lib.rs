//! # statstore
//!
//! Order-independent dataset fingerprints and descriptive statistics.
//!
//! ## Pieces
//! - **Sample**: integers and floats normalize to `f64` for statistics and to
//!   an exact key for fingerprints
//! - **Fingerprint**: SHA-256 over the sorted exact keys
//! - **ResultBundle**: labeled statistics derived from a dataset
//! - **Stats**: mean, variance, standard deviation, `describe`

#![warn(missing_docs)]

mod bundle;
mod error;
mod fingerprint;
mod sample;
mod stats;

pub use bundle::ResultBundle;
pub use error::{Error, Result};
pub use fingerprint::{canonical_form, fingerprint, Fingerprint, FINGERPRINT_LEN};
pub use sample::{exact_sorted, normalize, Exact, Sample};
pub use stats::{describe, sample_mean, sample_std_dev, sample_variance, MeanReport};
