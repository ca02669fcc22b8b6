use std::collections::HashMap;

use super::User;

/// In-memory lookup tables over every known user: uid → record and email → uid.
///
/// The two maps are only changed together, through [`UserIndex::insert`] and
/// [`UserIndex::remove`], so they always describe the same set of users.
#[derive(Debug, Default)]
pub struct UserIndex {
    by_uid: HashMap<String, User>,
    by_email: HashMap<String, String>,
}

impl UserIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_uid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uid.is_empty()
    }

    pub fn get(&self, uid: &str) -> Option<&User> {
        self.by_uid.get(uid)
    }

    /// Look up a uid by normalized email.
    pub fn uid_for_email(&self, email: &str) -> Option<&str> {
        self.by_email.get(email).map(String::as_str)
    }

    /// Look up a record by normalized email.
    pub fn get_by_email(&self, email: &str) -> Option<&User> {
        self.uid_for_email(email).and_then(|uid| self.get(uid))
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.by_email.contains_key(email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.by_uid.values()
    }

    /// Insert or replace the record for `user.uid()`, returning the previous one.
    pub fn insert(&mut self, user: User) -> Option<User> {
        let previous = self.by_uid.insert(user.uid.clone(), user.clone());
        if let Some(previous) = &previous
            && previous.email != user.email
        {
            self.by_email.remove(&previous.email);
        }
        self.by_email.insert(user.email, user.uid);
        previous
    }

    /// Remove the record for `uid` from both maps.
    pub fn remove(&mut self, uid: &str) -> Option<User> {
        let user = self.by_uid.remove(uid)?;
        self.by_email.remove(&user.email);
        Some(user)
    }
}
