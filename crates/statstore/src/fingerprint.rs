//! Dataset fingerprinting
//!
//! A fingerprint identifies a dataset by its multiset of values:
//! 1. Map every value to its exact key (integers keep all digits)
//! 2. Sort ascending
//! 3. Serialize as `[v1,v2,...]`
//! 4. SHA-256 the bytes, render as lowercase hex
//!
//! The text form never depends on locale, and an integral float serializes
//! exactly like the equal integer (`2` and `2.0` both become `2`).

use std::fmt;

use sha2::{Digest, Sha256};

use crate::sample::{exact_sorted, Sample};

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 64;

/// Content digest of a dataset, independent of value order
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Rebuild a fingerprint from its hex text.
    ///
    /// Returns `None` unless `hex` is exactly 64 hex digits. Uppercase digits
    /// are folded to lowercase.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != FINGERPRINT_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Fingerprint(hex.to_ascii_lowercase()))
    }

    /// Hex text of the digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical text that gets hashed into the fingerprint
pub fn canonical_form<T: Sample>(data: &[T]) -> String {
    let sorted = exact_sorted(data);
    let mut out = String::with_capacity(2 + sorted.len() * 8);
    out.push('[');
    for (i, v) in sorted.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&v.to_string());
    }
    out.push(']');
    out
}

/// Compute the fingerprint of a dataset
///
/// # Arguments
/// * `data` - Values in any order; may be empty
///
/// # Returns
/// * `Fingerprint` - Identical for every permutation of the same values
pub fn fingerprint<T: Sample>(data: &[T]) -> Fingerprint {
    let text = canonical_form(data);
    Fingerprint(format!("{:x}", Sha256::digest(text.as_bytes())))
}
