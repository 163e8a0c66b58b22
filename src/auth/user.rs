//! User records of the mock user directory.

use serde::{Deserialize, Deserializer, Serialize};

/// Role string that grants board management and post editing.
pub const ADMIN_ROLE: &str = "admin";

/// Role assigned to newly registered users.
pub const DEFAULT_ROLE: &str = "user";

/// User record as served by the user directory.
///
/// The directory may hand out numeric or string ids; both are kept as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address (login identifier).
    #[serde(default)]
    pub email: String,
    /// Role ("admin" or anything else).
    #[serde(default)]
    pub role: String,
    /// Plain-text password as stored by the mock directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Check if this user has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Data for creating a user in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
