//! Validation utilities.

use crate::{FieldError, SunlogError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `SunlogError` on failure.
    fn validate_request(&self) -> Result<(), SunlogError> {
        self.validate().map_err(validation_errors_to_sunlog_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `SunlogError`.
#[must_use]
pub fn validation_errors_to_sunlog_error(errors: ValidationErrors) -> SunlogError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    SunlogError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a latitude in decimal degrees.
    pub fn valid_latitude(value: f64) -> Result<(), ValidationError> {
        if !(-90.0..=90.0).contains(&value) {
            return Err(ValidationError::new("latitude_out_of_range"));
        }
        Ok(())
    }

    /// Validates a longitude in decimal degrees.
    pub fn valid_longitude(value: f64) -> Result<(), ValidationError> {
        if !(-180.0..=180.0).contains(&value) {
            return Err(ValidationError::new("longitude_out_of_range"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Minsk").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_valid_latitude() {
        assert!(valid_latitude(53.9).is_ok());
        assert!(valid_latitude(-90.0).is_ok());
        assert!(valid_latitude(90.0).is_ok());
        assert!(valid_latitude(90.1).is_err());
        assert!(valid_latitude(-123.0).is_err());
    }

    #[test]
    fn test_valid_longitude() {
        assert!(valid_longitude(27.56).is_ok());
        assert!(valid_longitude(-180.0).is_ok());
        assert!(valid_longitude(180.0).is_ok());
        assert!(valid_longitude(181.0).is_err());
    }
}
