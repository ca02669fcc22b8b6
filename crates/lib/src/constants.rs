//! Constants used throughout the shardusers library.
//!
//! Central definitions for the shard file layout and the sizes of the
//! random values minted for users and sessions.

/// Number of leading uid characters that name a record's shard file.
pub const SHARD_KEY_LEN: usize = 2;

/// Suffix of the scratch file a shard is written to before it replaces the live file.
pub const SHARD_TMP_SUFFIX: &str = ".tmp";

/// Per-user salt length in bytes (before base64 encoding).
pub const SALT_BYTES: usize = 32;

/// Raw password digest length in bytes (before base64 encoding).
pub const HASH_BYTES: usize = 32;

/// Session token length in bytes (before base64 encoding).
pub const SESSION_TOKEN_BYTES: usize = 16;
