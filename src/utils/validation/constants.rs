//! Constants used throughout the validation system

/// Maximum length for long-form content
pub const MAX_CONTENT_LENGTH: usize = 2_000;
/// Maximum length for short-form content
pub const MAX_SHORT_CONTENT_LENGTH: usize = 250;
/// Minimum length for a password
pub const MIN_PASSWORD_LENGTH: usize = 6;
/// Maximum length for a password
pub const MAX_PASSWORD_LENGTH: usize = 64;
