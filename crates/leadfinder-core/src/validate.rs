//! Input validation for search submissions.
//!
//! Validation is pure and invoked explicitly by callers before any state
//! transition; nothing here reacts to mutable state.

use regex::Regex;
use thiserror::Error;

/// Hard cap on zip codes per search submission.
pub const MAX_ZIP_CODES: usize = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter valid zip codes (5 digits each, separated by commas).")]
    InvalidZipCodes,

    #[error("Please enter no more than 50 zip codes.")]
    TooManyZipCodes,

    #[error("select at least one business type")]
    NoBusinessTypes,

    #[error("unknown business type \"{0}\" (expected car_wash or car_detailer)")]
    UnknownBusinessType(String),
}

/// Parse raw user text into a list of 5-digit zip codes.
///
/// Strips all whitespace and trailing commas first. The remaining text must
/// be a comma-joined sequence of 5-digit groups; order is preserved and
/// duplicates are not removed.
///
/// # Errors
///
/// - [`ValidationError::InvalidZipCodes`] — any other shape (letters, wrong
///   digit count, empty input, doubled or leading commas).
/// - [`ValidationError::TooManyZipCodes`] — more than [`MAX_ZIP_CODES`] codes.
pub fn parse_zip_codes(raw: &str) -> Result<Vec<String>, ValidationError> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let stripped = stripped.trim_end_matches(',');

    let re = Regex::new(r"^([0-9]{5},)*[0-9]{5}$").expect("valid zip list regex");
    if !re.is_match(stripped) {
        return Err(ValidationError::InvalidZipCodes);
    }

    let codes: Vec<String> = stripped.split(',').map(str::to_owned).collect();
    if codes.len() > MAX_ZIP_CODES {
        return Err(ValidationError::TooManyZipCodes);
    }
    Ok(codes)
}

/// Drop any token that is not exactly 5 ASCII digits.
///
/// Re-validation applied by the session controller right before sending a
/// request: the submitting UI may hold a stale validity flag.
#[must_use]
pub fn sanitize_zip_codes(codes: &[String]) -> Vec<String> {
    codes
        .iter()
        .filter(|code| code.len() == 5 && code.chars().all(|c| c.is_ascii_digit()))
        .cloned()
        .collect()
}

/// Require at least one selected business type.
///
/// # Errors
///
/// Returns [`ValidationError::NoBusinessTypes`] when the selection is empty.
pub fn validate_included_types(types: &[String]) -> Result<(), ValidationError> {
    if types.is_empty() {
        return Err(ValidationError::NoBusinessTypes);
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
