//! Type definitions for the validation system

mod email_input;
mod password_input;
mod text_input;

// Re-export commonly used types and functions
pub use email_input::EmailInput;
pub use password_input::PasswordInput;
pub use text_input::TextInput;
