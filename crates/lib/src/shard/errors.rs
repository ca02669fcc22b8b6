//! Error types for shard file storage.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing shard files.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ShardError {
    /// A shard file did not contain a valid JSON array of user records.
    #[error("Corrupt shard '{shard}'")]
    CorruptShard {
        /// Name of the shard file
        shard: String,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The same uid or email was found in more than one record while indexing.
    #[error("Duplicate record for {key} in shard '{shard}'")]
    DuplicateRecord {
        /// Name of the shard file holding the second occurrence
        shard: String,
        /// The uid or email that was already indexed
        key: String,
    },

    /// A record sits in a shard file other than the one its uid maps to.
    #[error("Record {uid} found in shard '{shard}' but belongs in '{expected}'")]
    MisplacedRecord {
        /// Name of the shard file holding the record
        shard: String,
        /// The record's uid
        uid: String,
        /// The shard the uid maps to
        expected: String,
    },

    /// A uid that cannot name a shard file.
    #[error("Invalid shard key for uid '{uid}'")]
    InvalidShardKey {
        /// The offending uid
        uid: String,
    },

    /// Serializing a shard's records failed.
    #[error("Serialization failed for shard '{shard}'")]
    SerializationFailed {
        /// Name of the shard file
        shard: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error at {}", path.display())]
    FileIo {
        /// The file or directory being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ShardError {
    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            ShardError::FileIo { .. } | ShardError::SerializationFailed { .. }
        )
    }

    /// Check if this error means the files on disk cannot be trusted.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            ShardError::CorruptShard { .. }
                | ShardError::DuplicateRecord { .. }
                | ShardError::MisplacedRecord { .. }
        )
    }

    /// Get the shard name if this error is about a specific shard.
    pub fn shard(&self) -> Option<&str> {
        match self {
            ShardError::CorruptShard { shard, .. }
            | ShardError::DuplicateRecord { shard, .. }
            | ShardError::MisplacedRecord { shard, .. }
            | ShardError::SerializationFailed { shard, .. } => Some(shard),
            _ => None,
        }
    }
}

impl From<ShardError> for crate::Error {
    fn from(err: ShardError) -> Self {
        crate::Error::Shard(err)
    }
}
