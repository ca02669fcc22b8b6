//!
//! Shardusers: user accounts over sharded JSON flat files.
//! This library provides the user data store behind a small account and session service.
//!
//! ## Core Concepts
//!
//! * **Shards (`shard::ShardStore`)**: A directory of JSON files, one per two-character uid
//!   prefix. Each file holds an array of user records and is rewritten whole on every change.
//! * **Users (`user::User`)**: The sole record type: uid, normalized email, salted password hash.
//! * **Directory (`user::UserDirectory`)**: In-memory indexes by uid and by email, built from the
//!   shards at startup and kept in step with them by `create`, `read`, `update` and `delete`.
//! * **Sessions (`session::SessionRegistry`)**: Process-lifetime session tokens mapped to uids.
//!   Sessions are never persisted and are lost on restart.

pub mod constants;
pub mod session;
pub mod shard;
pub mod user;

pub use session::SessionRegistry;
pub use shard::ShardStore;
pub use user::{User, UserDirectory, UserUpdate};

/// Result type used throughout the shardusers library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the shardusers library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured shard file errors from the shard module
    #[error(transparent)]
    Shard(shard::ShardError),

    /// Structured account errors from the user module
    #[error(transparent)]
    User(user::UserError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Shard(_) => "shard",
            Error::User(_) => "user",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_not_found(),
            Error::Shard(_) => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_conflict(),
            Error::Shard(_) => false,
        }
    }

    /// Check if this error is authentication-related.
    pub fn is_authentication_error(&self) -> bool {
        match self {
            Error::User(user_err) => user_err.is_authentication_error(),
            Error::Shard(_) => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Shard(shard_err) => shard_err.is_io_error(),
            Error::User(_) => false,
        }
    }

    /// Check if this error indicates on-disk data that cannot be trusted.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Shard(shard_err) => shard_err.is_integrity_error(),
            Error::User(_) => false,
        }
    }
}
