//! Validation for the sanctioned amount typed into the approve popup.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Largest integer an `f64` represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A finite loan amount strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SanctionedAmount(f64);

/// Reasons a typed amount is rejected before any request is sent.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Nothing (or only whitespace) was entered.
    #[error("sanctioned amount is required")]
    Missing,
    /// The input is not a finite number.
    #[error("sanctioned amount must be a number")]
    NotANumber,
    /// The number is zero or negative.
    #[error("sanctioned amount must be greater than zero")]
    NotPositive,
}

impl SanctionedAmount {
    /// Parses operator input, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Missing`] for blank input,
    /// [`AmountError::NotANumber`] for anything that does not parse as a
    /// finite number, and [`AmountError::NotPositive`] for values `<= 0`.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Missing);
        }

        let value: f64 = trimmed.parse().map_err(|_| AmountError::NotANumber)?;
        Self::new(value)
    }

    /// Wraps an already-numeric amount.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::NotANumber`] for NaN or infinite values and
    /// [`AmountError::NotPositive`] for values `<= 0`.
    pub fn new(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotANumber);
        }
        if value <= 0.0 {
            return Err(AmountError::NotPositive);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the value as an integer when it has no fractional part.
    fn as_whole_number(self) -> Option<u64> {
        if self.0.fract() != 0.0 || self.0 > MAX_EXACT_INTEGER {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is positive, integral and below 2^53"
        )]
        let whole = self.0 as u64;
        Some(whole)
    }
}

/// Whole amounts go on the wire as JSON integers (`5000`, not `5000.0`).
impl Serialize for SanctionedAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_whole_number() {
            Some(whole) => serializer.serialize_u64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}
