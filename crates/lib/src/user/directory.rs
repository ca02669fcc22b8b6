use std::path::Path;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{User, UserError, UserIndex, UserUpdate, crypto, normalize_email};
use crate::{Result, shard::ShardStore};

/// The account directory: business rules over the shard store's indexes.
///
/// One write lock covers both indexes and the shard files. Every mutation
/// changes the index and writes the owning shard while holding it, and puts
/// the index back the way it was if the write fails. Concurrent writers are
/// therefore serialized store-wide and a failed call leaves no trace.
///
/// Password hashing never runs under the lock. `update` and `delete` verify
/// against a snapshot of the record, then re-check under the write lock that
/// the record is unchanged and verify again if it is not.
#[derive(Debug)]
pub struct UserDirectory {
    state: RwLock<DirectoryState>,
}

#[derive(Debug)]
struct DirectoryState {
    shards: ShardStore,
    index: UserIndex,
}

impl DirectoryState {
    /// Find the user for a normalized email.
    fn find(&self, email: &str) -> Result<&User> {
        Ok(self
            .index
            .get_by_email(email)
            .ok_or_else(|| UserError::UnknownUser {
                email: email.to_string(),
            })?)
    }
}

impl UserDirectory {
    /// Open the shard directory at `dir` and index every user in it.
    ///
    /// Fails if any shard is corrupt.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let shards = ShardStore::open(dir).await?;
        let index = shards.load_index().await?;
        tracing::info!(
            users = index.len(),
            shards = shards.shard_count(),
            "User directory indexed"
        );
        Ok(Self::from_parts(shards, index))
    }

    /// Build a directory from an opened store and its loaded index.
    pub fn from_parts(shards: ShardStore, index: UserIndex) -> Self {
        Self {
            state: RwLock::new(DirectoryState { shards, index }),
        }
    }

    /// Create a user.
    ///
    /// Fails with [`UserError::DuplicateUser`] if the normalized email is taken.
    pub async fn create(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);

        // Hashing does not depend on directory state, so keep it outside the lock.
        let salt = crypto::generate_salt();
        let password_hash = crypto::hash_password(password, &salt)?;

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        if state.index.contains_email(&email) {
            return Err(UserError::DuplicateUser { email }.into());
        }

        let user = User {
            uid: Uuid::new_v4().to_string(),
            email,
            password_hash,
            salt,
        };

        state.index.insert(user.clone());
        if let Err(e) = state.shards.save(&user).await {
            state.index.remove(&user.uid);
            tracing::error!(uid = %user.uid, error = %e, "Failed to persist new user");
            return Err(e);
        }

        tracing::debug!(uid = %user.uid, "Created user");
        Ok(user)
    }

    /// Authenticate and return the user's record.
    ///
    /// Fails with [`UserError::UnknownUser`] or [`UserError::InvalidCredentials`].
    pub async fn read(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);
        self.authenticate(&email, password).await
    }

    /// Authenticate, apply `changes`, and persist the record.
    ///
    /// The record is rewritten to its shard even when `changes` is empty.
    pub async fn update(&self, email: &str, password: &str, changes: UserUpdate) -> Result<User> {
        let email = normalize_email(email);

        loop {
            let current = self.authenticate(&email, password).await?;
            let mut updated = current.clone();
            if let Some(new_password) = changes.password() {
                updated.password_hash = crypto::hash_password(new_password, &updated.salt)?;
            }

            let mut guard = self.state.write().await;
            let state = &mut *guard;
            if *state.find(&email)? != current {
                tracing::debug!(uid = %current.uid, "User changed during update, retrying");
                continue;
            }

            state.index.insert(updated.clone());
            if let Err(e) = state.shards.save(&updated).await {
                state.index.insert(current);
                tracing::error!(uid = %updated.uid, error = %e, "Failed to persist user update");
                return Err(e);
            }

            tracing::debug!(uid = %updated.uid, password_changed = changes.password().is_some(), "Updated user");
            return Ok(updated);
        }
    }

    /// Authenticate and delete the user from the indexes and its shard.
    pub async fn delete(&self, email: &str, password: &str) -> Result<()> {
        let email = normalize_email(email);

        loop {
            let current = self.authenticate(&email, password).await?;

            let mut guard = self.state.write().await;
            let state = &mut *guard;
            if *state.find(&email)? != current {
                tracing::debug!(uid = %current.uid, "User changed during delete, retrying");
                continue;
            }

            state.index.remove(&current.uid);
            return match state.shards.remove(&current.uid).await {
                Ok(removed) => {
                    if !removed {
                        tracing::warn!(uid = %current.uid, "Deleted user was missing from its shard");
                    }
                    tracing::debug!(uid = %current.uid, "Deleted user");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(uid = %current.uid, error = %e, "Failed to persist user deletion");
                    state.index.insert(current);
                    Err(e)
                }
            };
        }
    }

    /// Snapshot the record for a normalized email and check the password
    /// against it once the read lock is released.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = self.state.read().await.find(email)?.clone();

        crypto::verify_password(password, &user.salt, &user.password_hash).inspect_err(|e| {
            if e.is_authentication_error() {
                tracing::warn!(uid = %user.uid, "Rejected password");
            }
        })?;
        Ok(user)
    }

    /// Look up a user by uid without a password check.
    pub async fn lookup_by_uid(&self, uid: &str) -> Option<User> {
        self.state.read().await.index.get(uid).cloned()
    }

    /// Look up a user by email without a password check.
    pub async fn lookup_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.state.read().await.index.get_by_email(&email).cloned()
    }

    /// Number of indexed users.
    pub async fn len(&self) -> usize {
        self.state.read().await.index.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.index.is_empty()
    }

    /// Snapshot of every user, sorted by email.
    pub async fn users(&self) -> Vec<User> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.index.iter().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }

    /// Names of the shard files backing this directory.
    pub async fn shard_names(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.shards.shard_names().map(str::to_string).collect()
    }
}
