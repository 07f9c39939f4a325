//! User (author) model.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A site user. In this system every user is an article author.
///
/// The password is accepted on input (seeding) but never serialized, and
/// `Debug` redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl User {
    /// Username of the placeholder author.
    pub const UNKNOWN_USERNAME: &'static str = "unknown";

    /// Placeholder author returned when an article's author cannot be resolved.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            id: UserId::new(0),
            username: Self::UNKNOWN_USERNAME.to_owned(),
            password: String::new(),
            full_name: "Unknown Author".to_owned(),
            bio: Some("No information available".to_owned()),
            avatar_url: Some(String::new()),
        }
    }

    /// Whether this is the [`User::unknown`] placeholder.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.id.as_i32() == 0 && self.username == Self::UNKNOWN_USERNAME
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("bio", &self.bio)
            .field("avatar_url", &self.avatar_url)
            .finish()
    }
}
