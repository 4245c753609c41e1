//! Common validation rules shared across request payloads.

use validator::ValidationError;

use crate::models::user::PassportNumber;

/// Validates passport number format.
///
/// Requirements:
/// - Exactly two whitespace-separated tokens: series and number
pub fn validate_passport_number(passport: &str) -> Result<(), ValidationError> {
    if PassportNumber::parse(passport).is_none() {
        return Err(ValidationError::new("passport_format"));
    }
    Ok(())
}
