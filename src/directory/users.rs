use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use super::{DirectoryError, Result};

/// Stored user record. The identifier doubles as the login name and never
/// changes after the record is created.
#[derive(Clone, Debug)]
pub struct User {
    identifier: String,
    first_name: String,
    last_name: String,
    secret: SecretString,
}

impl User {
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        secret: SecretString,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            secret,
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Replace every mutable field with the ones from `other`; this is also how
    /// the secret gets rotated.
    fn apply(&mut self, other: User) {
        self.first_name = other.first_name;
        self.last_name = other.last_name;
        self.secret = other.secret;
    }
}

/// Compare a supplied login pair with a stored record.
#[must_use]
pub fn verify(record: &User, identifier: &str, secret: &str) -> bool {
    record.identifier == identifier && record.secret.expose_secret() == secret
}

/// Public projection of a [`User`], the only shape that is ever serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            identifier: user.identifier.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl UserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `user` unless its identifier is already taken.
    ///
    /// # Errors
    /// Returns [`DirectoryError::AlreadyExists`] and leaves the directory untouched
    /// when a record with the same identifier exists.
    pub fn insert(&self, user: User) -> Result<()> {
        let mut users = self.users.write();

        if users.contains_key(&user.identifier) {
            return Err(DirectoryError::AlreadyExists(user.identifier));
        }

        users.insert(user.identifier.clone(), user);

        Ok(())
    }

    /// Return a snapshot of the record stored under `identifier`.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NotFound`] if there is no such user.
    pub fn get_by_identifier(&self, identifier: &str) -> Result<User> {
        self.users
            .read()
            .get(identifier)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(identifier.to_string()))
    }

    /// Replace the mutable fields of the record that shares `user`'s identifier.
    ///
    /// # Errors
    /// Returns [`DirectoryError::NotFound`] if there is no such user.
    pub fn update(&self, user: User) -> Result<()> {
        let mut users = self.users.write();

        match users.get_mut(&user.identifier) {
            Some(stored) => {
                stored.apply(user);
                Ok(())
            }
            None => Err(DirectoryError::NotFound(user.identifier)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}
