//! Core data types for the user directory

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user account as stored in a shard file.
///
/// The on-disk field names are kept short (`uid`, `eml`, `pwd`, `slt`).
/// `Debug` output redacts the password hash and salt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique id (UUID v4, hyphenated). Also the shard key.
    #[serde(rename = "uid")]
    pub(crate) uid: String,

    /// Normalized email, unique across all users
    #[serde(rename = "eml")]
    pub(crate) email: String,

    /// Base64 password digest
    #[serde(rename = "pwd")]
    pub(crate) password_hash: String,

    /// Base64 per-user salt, fixed at creation
    #[serde(rename = "slt")]
    pub(crate) salt: String,
}

impl User {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("salt", &"<redacted>")
            .finish()
    }
}

/// Changes accepted by [`UserDirectory::update`](super::UserDirectory::update).
///
/// An absent or empty `new_password` leaves the stored hash untouched.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(rename = "newPassword", default)]
    pub new_password: Option<String>,
}

impl UserUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// An update that replaces the password.
    pub fn with_password(new_password: impl Into<String>) -> Self {
        Self {
            new_password: Some(new_password.into()),
        }
    }

    /// The new password, if one was supplied and is non-empty.
    pub fn password(&self) -> Option<&str> {
        self.new_password.as_deref().filter(|p| !p.is_empty())
    }
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("new_password", &self.password().map(|_| "<redacted>"))
            .finish()
    }
}

/// Normalize an email for indexing: trim surrounding whitespace and byte
/// order marks, lower-case.
pub fn normalize_email(email: &str) -> String {
    email
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_lowercase()
}
