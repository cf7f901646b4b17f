//! The root of the model: every registered user, keyed by username

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{Entity, ModelError, Result};
use super::user::User;
use super::validate_name;

/// All users known to the application
///
/// This is the unit that is saved to and loaded from the data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserList {
    #[serde(default)]
    users: BTreeMap<String, User>,
}

impl UserList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user with the default tag types
    ///
    /// # Errors
    ///
    /// * `ModelError::InvalidOperation` if the username is blank
    /// * `ModelError::AlreadyExists` if the username is taken
    pub fn add_user(&mut self, username: &str) -> Result<&mut User> {
        validate_name(Entity::User, username)?;
        if self.users.contains_key(username) {
            return Err(ModelError::already_exists(Entity::User, username));
        }
        tracing::info!(user = %username, "user added");
        Ok(self
            .users
            .entry(username.to_string())
            .or_insert_with(|| User::new(username)))
    }

    /// Insert a fully built user
    ///
    /// # Errors
    ///
    /// Returns `ModelError::AlreadyExists` if the username is taken.
    pub fn insert_user(&mut self, user: User) -> Result<&mut User> {
        let username = user.username().to_string();
        if self.users.contains_key(&username) {
            return Err(ModelError::already_exists(Entity::User, username));
        }
        Ok(self.users.entry(username).or_insert(user))
    }

    /// Remove a user and everything they own; `false` if absent
    pub fn delete_user(&mut self, username: &str) -> bool {
        let removed = self.users.remove(username).is_some();
        if removed {
            tracing::info!(user = %username, "user deleted");
        }
        removed
    }

    #[must_use]
    pub fn has_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    #[must_use]
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.get_mut(username)
    }

    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if the user does not exist.
    pub fn require_user(&self, username: &str) -> Result<&User> {
        self.user(username)
            .ok_or_else(|| ModelError::not_found(Entity::User, username))
    }

    /// # Errors
    ///
    /// Returns `ModelError::NotFound` if the user does not exist.
    pub fn require_user_mut(&mut self, username: &str) -> Result<&mut User> {
        self.users
            .get_mut(username)
            .ok_or_else(|| ModelError::not_found(Entity::User, username))
    }

    /// Usernames in sorted order
    #[must_use]
    pub fn usernames(&self) -> Vec<&str> {
        self.users.keys().map(String::as_str).collect()
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
