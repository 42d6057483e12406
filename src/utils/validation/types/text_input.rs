//! Provides a secure and validated text content representation.
//!
//! This module ensures that text content meets safety requirements by:
//! - Validating length constraints
//! - Checking for control characters that could be dangerous
//! - Preventing HTML injection
//! - Normalizing whitespace

use ammonia::is_html;
use anyhow::{bail, Context, Result};
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use validator::ValidateNonControlCharacter;

use crate::utils::validation::{MAX_CONTENT_LENGTH, MAX_SHORT_CONTENT_LENGTH};

/// Represents validated textual content that is guaranteed to be safe for use.
/// This type can only be constructed through validation, ensuring that any
/// instance meets our security and formatting requirements.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextInput {
    // The validated and normalized text content
    text_content: String,
}

impl TextInput {
    /// Creates a new TextInput instance for long-form content such as the
    /// reason of an appointment or the body of a contact message. This
    /// applies the maximum length constraint for long content.
    pub fn new_long_form(content: &str) -> Result<Self> {
        Self::new(content, MAX_CONTENT_LENGTH)
            .context("Failed to create long-form content")
    }

    /// Creates a new TextInput instance for short-form content like names,
    /// dates or specialties. This applies stricter length constraints.
    pub fn new_short_form(content: &str) -> Result<Self> {
        Self::new(content, MAX_SHORT_CONTENT_LENGTH)
            .context("Failed to create short-form content")
    }

    /// Internal function that performs the actual validation and creation.
    /// This ensures consistent validation rules across different content types.
    fn new(content: &str, max_length: usize) -> Result<Self> {
        // First, normalize whitespace by trimming
        let trimmed = content.trim();

        // Perform our validation checks in order of complexity
        if trimmed.is_empty() {
            bail!("Content cannot be empty");
        }

        if trimmed.len() > max_length {
            bail!("Content exceeds maximum length of {} characters", max_length);
        }

        if !trimmed.validate_non_control_character() {
            bail!("Content contains invalid control characters");
        }

        if is_html(trimmed) {
            bail!("Content cannot contain HTML");
        }

        // Normalize Unicode characters to ensure consistent representation
        let normalized = trimmed.nfkc().collect::<String>();

        Ok(Self {
            text_content: normalized,
        })
    }

    /// Returns the validated content as a string slice
    pub fn as_str(&self) -> &str {
        &self.text_content
    }
}

/// Implements Display to allow printing the text content
impl fmt::Display for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text_content)
    }
}

/// Allows using TextInput wherever a string reference is needed
impl AsRef<str> for TextInput {
    fn as_ref(&self) -> &str {
        &self.text_content
    }
}
