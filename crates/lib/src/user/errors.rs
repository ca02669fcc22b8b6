//! Error types for the user directory
use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User already exists: {email}")]
    DuplicateUser { email: String },

    #[error("User does not exist: {email}")]
    UnknownUser { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {reason}")]
    HashingFailed { reason: String },
}

impl UserError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UserError::UnknownUser { .. })
    }

    /// Check if this error indicates the account already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, UserError::DuplicateUser { .. })
    }

    /// Check if this error is a rejected password.
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, UserError::InvalidCredentials)
    }
}

impl From<UserError> for crate::Error {
    fn from(err: UserError) -> Self {
        crate::Error::User(err)
    }
}
