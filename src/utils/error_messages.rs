//! Represents all possible errors in the application

pub const PAGE_ERROR: &str = "Page rendering failed";

pub const LOGIN_ERROR: &str = "Login failed";

pub const REGISTRATION_ERROR: &str = "Registration failed";

pub const CONTACT_ERROR: &str = "Message could not be saved";

pub const STORE_ERROR: &str = "Storage failure";
