//! Caller-side input validation.
//!
//! The stores never enforce these rules; services run them before a draft
//! or patch reaches a store so an invalid request leaves state untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Highest accepted probability percentage.
pub const PROBABILITY_MAX: u8 = 100;

/// Validation failure for a draft or patch.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Required text field is blank after trim.
    EmptyField(&'static str),
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Amount must be strictly positive.
    NonPositiveAmount { field: &'static str, value: f64 },
    /// Amount must not be negative.
    NegativeAmount { field: &'static str, value: f64 },
    /// Amount is NaN or infinite.
    NonFiniteAmount(&'static str),
    /// Probability exceeds `PROBABILITY_MAX`.
    ProbabilityOutOfRange(u8),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} is required"),
            Self::InvalidEmail(value) => write!(f, "email is invalid: `{value}`"),
            Self::NonPositiveAmount { field, value } => {
                write!(f, "{field} must be greater than 0, got {value}")
            }
            Self::NegativeAmount { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NonFiniteAmount(field) => write!(f, "{field} must be a finite number"),
            Self::ProbabilityOutOfRange(value) => {
                write!(f, "probability must be within 0..={PROBABILITY_MAX}, got {value}")
            }
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ModelValidationError> {
    require_text("email", value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(ModelValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ModelValidationError> {
    if !value.is_finite() {
        return Err(ModelValidationError::NonFiniteAmount(field));
    }
    if value <= 0.0 {
        return Err(ModelValidationError::NonPositiveAmount { field, value });
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), ModelValidationError> {
    if !value.is_finite() {
        return Err(ModelValidationError::NonFiniteAmount(field));
    }
    if value < 0.0 {
        return Err(ModelValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

pub(crate) fn require_probability(value: u8) -> Result<(), ModelValidationError> {
    if value > PROBABILITY_MAX {
        return Err(ModelValidationError::ProbabilityOutOfRange(value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_email, require_positive, require_text, ModelValidationError};

    #[test]
    fn email_requires_at_and_dot() {
        assert!(require_email("jane@acme.com").is_ok());
        assert_eq!(
            require_email("jane.acme.com").unwrap_err(),
            ModelValidationError::InvalidEmail("jane.acme.com".to_string())
        );
        assert_eq!(
            require_email("   ").unwrap_err(),
            ModelValidationError::EmptyField("email")
        );
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            require_text("name", " \t").unwrap_err(),
            ModelValidationError::EmptyField("name")
        );
    }

    #[test]
    fn positive_amount_rejects_zero_and_nan() {
        assert!(require_positive("value", 0.0).is_err());
        assert_eq!(
            require_positive("value", f64::NAN).unwrap_err(),
            ModelValidationError::NonFiniteAmount("value")
        );
        assert!(require_positive("value", 0.01).is_ok());
    }
}
