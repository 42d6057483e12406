//! Represents a validated plaintext password.
//!
//! The wrapper only checks length bounds: passwords are otherwise passed
//! through untouched, with no trimming or normalization, so that whatever
//! the user typed at registration also works at login. The value is meant
//! to be hashed right away and never stored or logged.

use anyhow::{bail, Result};
use std::fmt;

use crate::utils::validation::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// A plaintext password that satisfies the length policy.
/// This type can only be constructed through validation.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordInput {
    // The raw password, kept exactly as submitted
    password: String,
}

impl PasswordInput {
    /// Creates a new `PasswordInput` after checking the length policy.
    pub fn new(password: &str) -> Result<Self> {
        if password.len() < MIN_PASSWORD_LENGTH {
            bail!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            );
        }

        if password.len() > MAX_PASSWORD_LENGTH {
            bail!(
                "Password exceeds maximum length of {} characters",
                MAX_PASSWORD_LENGTH
            );
        }

        Ok(Self {
            password: password.to_string(),
        })
    }

    /// Returns the password as a string slice, for hashing
    pub fn as_str(&self) -> &str {
        &self.password
    }

    /// Consumes the wrapper and returns the raw password
    pub fn into_string(self) -> String {
        self.password
    }
}

/// Debug never prints the password itself
impl fmt::Debug for PasswordInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordInput(***)")
    }
}
