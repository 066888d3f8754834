// SPDX-License-Identifier: Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Shared value types for the Smithy runtime core.
//!
//! This crate has no knowledge of any wire format. It exists so
//! `smithy-schema`, `smithy-serde`, and every codec built on top of them
//! share one definition of "what a value is" — [`Document`], [`Blob`],
//! [`Number`], [`DateTime`], [`ShapeId`].

pub mod document;
pub mod number;
pub mod shape_id;
pub mod timestamp;

pub use document::Document;
pub use number::Number;
pub use shape_id::ShapeId;
pub use timestamp::DateTime;

/// An opaque sequence of bytes (the Smithy `blob` shape).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(Vec<u8>);

impl Blob {
    /// Wrap a byte vector as a blob.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the underlying bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the blob, returning the underlying bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// Arbitrary-precision integer, represented as its canonical decimal text.
///
/// A full bignum implementation is out of scope for this core — only
/// round-tripping `bigInteger`/`bigDecimal` through the serde kernel and
/// comparing by numeric value is required; this wrapper normalizes
/// sign and leading zeros so equality matches numeric equality for any
/// input that fits the common case of unsigned/negative decimal digit
/// strings produced by a real bignum library upstream.
#[derive(Debug, Clone)]
pub struct BigInteger(String);

impl BigInteger {
    /// Build from a decimal digit string (optionally `-`-prefixed).
    #[must_use]
    pub fn new(digits: impl Into<String>) -> Self {
        Self(normalize_integer_text(&digits.into()))
    }

    /// The canonical decimal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for BigInteger {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for BigInteger {}

/// Arbitrary-precision decimal, represented as its canonical decimal text.
///
/// See [`BigInteger`] for why this is text-backed rather than a true
/// bignum type.
#[derive(Debug, Clone)]
pub struct BigDecimal(String);

impl BigDecimal {
    /// Build from decimal text (e.g. `"1.50"`, `"-3"`).
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(normalize_decimal_text(&text.into()))
    }

    /// The canonical decimal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for BigDecimal {}

fn normalize_integer_text(s: &str) -> String {
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    if neg && trimmed != "0" {
        format!("-{trimmed}")
    } else {
        trimmed.to_string()
    }
}

fn normalize_decimal_text(s: &str) -> String {
    if let Some((int_part, frac_part)) = s.split_once('.') {
        let int_norm = normalize_integer_text(int_part);
        let frac_trimmed = frac_part.trim_end_matches('0');
        if frac_trimmed.is_empty() {
            int_norm
        } else {
            format!("{int_norm}.{frac_trimmed}")
        }
    } else {
        normalize_integer_text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_integer_normalizes_leading_zeros() {
        assert_eq!(BigInteger::new("007"), BigInteger::new("7"));
        assert_eq!(BigInteger::new("-00"), BigInteger::new("0"));
    }

    #[test]
    fn big_decimal_normalizes_trailing_zeros() {
        assert_eq!(BigDecimal::new("1.50"), BigDecimal::new("1.5"));
        assert_eq!(BigDecimal::new("2.0"), BigDecimal::new("2"));
    }
}
