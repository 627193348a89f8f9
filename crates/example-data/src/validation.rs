//! Fixture validation rules mirroring the exchange's constraints.
//!
//! Keeping these rules in sync with the exchange domain ensures generated
//! ledgers are always accepted when loaded.
//!
//! # Validation Rules
//!
//! - Project descriptions hold at least 50 characters once trimmed
//! - Password digests are 64 lowercase hexadecimal characters

/// Minimum number of characters in a trimmed project description.
pub const PROJECT_DESCRIPTION_MIN: usize = 50;

/// Length of a hex-encoded SHA-256 digest.
const SHA256_HEX_LEN: usize = 64;

/// Returns `true` if the description is long enough to publish.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_project_description;
///
/// assert!(!is_valid_project_description("Too short"));
/// assert!(is_valid_project_description(&"a".repeat(50)));
/// assert!(!is_valid_project_description(&format!("  {}  ", "a".repeat(49))));
/// ```
#[must_use]
pub fn is_valid_project_description(description: &str) -> bool {
    description.trim().chars().count() >= PROJECT_DESCRIPTION_MIN
}

/// Returns `true` if the value looks like a lowercase SHA-256 hex digest.
#[must_use]
pub fn is_valid_password_digest(digest: &str) -> bool {
    digest.len() == SHA256_HEX_LEN
        && digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
