//! Represents a validated email address.
//!
//! This module provides a type-safe wrapper around email addresses that ensures
//! they meet standard email format requirements. It uses the validator crate
//! to perform validation according to HTML5 email specifications.

use anyhow::{bail, Result};
use std::fmt;
use validator::ValidateEmail;

/// A validated email address that is guaranteed to meet format requirements.
/// This type can only be constructed through validation, ensuring that any
/// instance is a properly formatted email address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmailInput {
    // The validated and normalized email address
    email: String,
}

impl EmailInput {
    /// Creates a new `EmailInput` after validating the provided email string.
    ///
    /// The email address is trimmed of whitespace, validated against HTML5
    /// email format requirements and normalized to lowercase. Two inputs that
    /// differ only by case therefore produce the same `EmailInput`, which is
    /// what makes the account uniqueness check case-insensitive.
    pub fn new(email: &str) -> Result<Self> {
        let email_trimmed = email.trim();

        // Check for empty input first
        if email_trimmed.is_empty() {
            bail!("Email address cannot be empty");
        }

        // Check maximum reasonable length
        if email_trimmed.len() > 254 {
            bail!("Email address exceeds maximum length of 254 characters");
        }

        // Validate email format
        if !email_trimmed.validate_email() {
            bail!("Invalid email format");
        }

        // Convert to lowercase for consistency
        let normalized_email = email_trimmed.to_lowercase();

        Ok(Self {
            email: normalized_email,
        })
    }

    /// Returns a string slice of the validated email address
    pub fn as_str(&self) -> &str {
        &self.email
    }
}

/// Implements Display to allow printing the email address
impl fmt::Display for EmailInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Allows using EmailInput wherever a string reference is needed
impl AsRef<str> for EmailInput {
    fn as_ref(&self) -> &str {
        &self.email
    }
}
