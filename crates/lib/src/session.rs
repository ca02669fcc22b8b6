//! Session registry for the account service
//!
//! Maps opaque session tokens to user uids and back. Sessions live only in
//! process memory and are lost on restart.

use std::{collections::HashMap, sync::Arc};

use base64ct::{Base64, Encoding};
use rand::{RngCore, rngs::OsRng};
use tokio::sync::RwLock;

use crate::{
    constants::SESSION_TOKEN_BYTES,
    user::{User, UserDirectory},
};

/// Session token (random bytes, base64 encoded)
pub type SessionToken = String;

#[derive(Debug, Default)]
struct Sessions {
    by_token: HashMap<SessionToken, String>,
    by_uid: HashMap<String, SessionToken>,
}

/// In-memory session store
///
/// A user has at most one session: logging in again returns the existing
/// token. Token → uid and uid → token are kept in separate maps.
///
/// Cloning is cheap and clones share the same sessions.
#[derive(Clone, Debug, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<Sessions>>,
}

impl SessionRegistry {
    /// Create a new empty session registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for an authenticated user
    ///
    /// # Returns
    /// The user's existing token if a session is open, otherwise a fresh one
    pub async fn login(&self, user: &User) -> SessionToken {
        let mut sessions = self.sessions.write().await;
        if let Some(token) = sessions.by_uid.get(user.uid()) {
            return token.clone();
        }

        let token = loop {
            let candidate = generate_token();
            if !sessions.by_token.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions
            .by_token
            .insert(token.clone(), user.uid().to_string());
        sessions
            .by_uid
            .insert(user.uid().to_string(), token.clone());
        tracing::debug!(uid = %user.uid(), "Session opened");
        token
    }

    /// Get the uid a session token belongs to
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.sessions.read().await.by_token.get(token).cloned()
    }

    /// Get the user behind a session token
    ///
    /// A token whose user no longer exists in `directory` is dropped.
    pub async fn restore(&self, token: &str, directory: &UserDirectory) -> Option<User> {
        let uid = self.resolve(token).await?;
        match directory.lookup_by_uid(&uid).await {
            Some(user) => Some(user),
            None => {
                tracing::debug!(uid = %uid, "Dropping session of missing user");
                self.revoke_user(&uid).await;
                None
            }
        }
    }

    /// Destroy a session by token
    ///
    /// # Returns
    /// Whether a session existed
    pub async fn logout(&self, token: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.by_token.remove(token) {
            Some(uid) => {
                sessions.by_uid.remove(&uid);
                true
            }
            None => false,
        }
    }

    /// Destroy whatever session a user has open
    pub async fn revoke_user(&self, uid: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.by_uid.remove(uid) {
            Some(token) => {
                sessions.by_token.remove(&token);
                true
            }
            None => false,
        }
    }

    /// Get the number of open sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.by_token.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.by_token.is_empty()
    }
}

fn generate_token() -> SessionToken {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    Base64::encode_string(&bytes)
}
