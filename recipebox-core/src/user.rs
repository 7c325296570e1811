use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A user record as held by the document store.
///
/// Users are owned elsewhere; recipes only hold a [`UserId`] reference.
/// The `password` field never leaves the store: anything returned to a
/// client goes through [`PublicUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Stored credential. Stripped on populate.
    pub password: String,
}

impl User {
    /// Creates a user with a freshly generated id.
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_id(UserId::generate(), name, email, password)
    }

    /// Creates a user with a caller-chosen id.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// A [`User`] with its credential field removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
