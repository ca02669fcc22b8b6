//! Sharded flat-file persistence for user records.
//!
//! A shard store owns one directory. Each regular file in it is a shard: a JSON
//! array of user records whose uids share the same two-character prefix, and the
//! file is named by that prefix. Shards are read whole and written whole.
//!
//! Writes land in `<shard>.tmp` first and are renamed over the live file, so a
//! crash mid-write leaves the previous contents intact. The store itself does no
//! locking; callers serialize mutations (see [`crate::user::UserDirectory`]).

mod errors;

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

pub use errors::ShardError;

use crate::{
    Result,
    constants::{SHARD_KEY_LEN, SHARD_TMP_SUFFIX},
    user::{User, UserIndex},
};

/// Compute the shard a uid belongs to: its first two characters.
///
/// Only ASCII alphanumeric prefixes are accepted, so a uid can never name a
/// file outside the store directory.
pub fn shard_key(uid: &str) -> Result<&str> {
    match uid.get(..SHARD_KEY_LEN) {
        Some(key) if key.bytes().all(|b| b.is_ascii_alphanumeric()) => Ok(key),
        _ => Err(ShardError::InvalidShardKey {
            uid: uid.to_string(),
        }
        .into()),
    }
}

/// A directory of shard files.
#[derive(Debug)]
pub struct ShardStore {
    dir: PathBuf,
    shards: BTreeSet<String>,
}

impl ShardStore {
    /// Open the store rooted at `dir`, creating the directory if it is missing.
    ///
    /// Existing shard files are enumerated but not parsed; see [`ShardStore::load_index`].
    /// Subdirectories and leftover `*.tmp` files are ignored.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| io_error(&dir, source))?;

        let mut shards = BTreeSet::new();
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|source| io_error(&dir, source))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| io_error(&dir, source))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| io_error(&entry.path(), source))?;
            if !file_type.is_file() {
                continue;
            }

            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };
            if name.ends_with(SHARD_TMP_SUFFIX) {
                tracing::debug!(file = %name, "Skipping interrupted shard write");
                continue;
            }
            shards.insert(name);
        }

        tracing::info!(dir = %dir.display(), shards = ?shards, "Shard store opened");
        Ok(Self { dir, shards })
    }

    /// The directory this store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all shard files known to this store, in sorted order.
    pub fn shard_names(&self) -> impl Iterator<Item = &str> {
        self.shards.iter().map(String::as_str)
    }

    /// Number of shard files known to this store.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Parse every shard and build the uid and email indexes.
    ///
    /// This is the only point where all shards are read together. Any shard that
    /// is not a JSON array of user records aborts the load, as does a uid or email
    /// that appears in more than one record, or a record whose uid maps to a
    /// different shard. Writes only ever touch the shard a uid maps to.
    pub async fn load_index(&self) -> Result<UserIndex> {
        let mut index = UserIndex::new();

        for shard in &self.shards {
            let users = self.read_shard(shard).await?;
            tracing::debug!(shard = %shard, records = users.len(), "Loading shard");

            for user in users {
                if index.get(user.uid()).is_some() {
                    return Err(ShardError::DuplicateRecord {
                        shard: shard.clone(),
                        key: user.uid().to_string(),
                    }
                    .into());
                }
                if index.contains_email(user.email()) {
                    return Err(ShardError::DuplicateRecord {
                        shard: shard.clone(),
                        key: user.email().to_string(),
                    }
                    .into());
                }
                let expected = shard_key(user.uid())?;
                if expected != shard.as_str() {
                    return Err(ShardError::MisplacedRecord {
                        shard: shard.clone(),
                        uid: user.uid().to_string(),
                        expected: expected.to_string(),
                    }
                    .into());
                }
                index.insert(user);
            }
        }

        Ok(index)
    }

    /// Write `user` to its shard, replacing the record with the same uid or
    /// appending it if the shard has none.
    pub async fn save(&mut self, user: &User) -> Result<()> {
        let shard = shard_key(user.uid())?.to_string();
        let mut users = self.read_shard(&shard).await?;

        match users.iter_mut().find(|existing| existing.uid() == user.uid()) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }

        self.write_shard(&shard, &users).await?;
        self.shards.insert(shard);
        Ok(())
    }

    /// Remove the record with `uid` from its shard.
    ///
    /// Returns `false` and leaves the file untouched if the shard or the record
    /// does not exist.
    pub async fn remove(&mut self, uid: &str) -> Result<bool> {
        let shard = shard_key(uid)?;
        let mut users = self.read_shard(shard).await?;

        let Some(position) = users.iter().position(|user| user.uid() == uid) else {
            return Ok(false);
        };
        users.remove(position);

        self.write_shard(shard, &users).await?;
        Ok(true)
    }

    /// Read a shard's records. A shard with no file yet is empty.
    async fn read_shard(&self, shard: &str) -> Result<Vec<User>> {
        let path = self.dir.join(shard);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| {
                ShardError::CorruptShard {
                    shard: shard.to_string(),
                    source,
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(io_error(&path, source)),
        }
    }

    /// Replace a shard's contents with `users`.
    async fn write_shard(&self, shard: &str, users: &[User]) -> Result<()> {
        let json = serde_json::to_vec(users).map_err(|source| ShardError::SerializationFailed {
            shard: shard.to_string(),
            source,
        })?;

        let path = self.dir.join(shard);
        let tmp_path = self.dir.join(format!("{shard}{SHARD_TMP_SUFFIX}"));
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|source| io_error(&tmp_path, source))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|source| io_error(&path, source))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> crate::Error {
    ShardError::FileIo {
        path: path.to_path_buf(),
        source,
    }
    .into()
}
