//! Centralized validation of user-supplied options.

/// Maximum length of a JSON field name accepted on the command line
pub const MAX_FIELD_NAME_LENGTH: usize = 256;

/// Option validation error types
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty value provided")]
    Empty,
    #[error("Value too long: exceeds {MAX_FIELD_NAME_LENGTH} characters")]
    TooLong,
    #[error("Value must not contain tabs or line breaks")]
    ControlCharacter,
}

/// Validate the name of the score statistic field.
///
/// # Examples
///
/// ```
/// use loci_score_join::utils::validation::validate_field_name;
///
/// assert!(validate_field_name("stat").is_ok());
/// assert!(validate_field_name("").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::Empty` for a blank name, `ValidationError::TooLong`
/// past [`MAX_FIELD_NAME_LENGTH`], or `ValidationError::ControlCharacter` if it
/// contains control characters.
pub fn validate_field_name(name: &str) -> Result<String, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if name.len() > MAX_FIELD_NAME_LENGTH {
        return Err(ValidationError::TooLong);
    }
    if name.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter);
    }
    Ok(name.to_string())
}

/// Validate the marker written in place of a missing score.
///
/// The marker becomes a TSV cell, so it may be empty but must not contain
/// a tab or a line break.
///
/// # Errors
///
/// Returns `ValidationError::ControlCharacter` if the marker contains `\t`, `\n` or `\r`.
pub fn validate_na_value(value: &str) -> Result<String, ValidationError> {
    if value.contains(&['\t', '\n', '\r'][..]) {
        return Err(ValidationError::ControlCharacter);
    }
    Ok(value.to_string())
}
