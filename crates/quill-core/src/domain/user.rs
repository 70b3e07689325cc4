use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization role attached to a user.
///
/// `Admin` is the single content-mutation role; everyone else registers as
/// `Member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    /// Parse a stored role string. Unknown values fall back to `Member`,
    /// the least-privileged role.
    pub fn from_str_or_member(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::Member,
        }
    }
}

/// User entity - an account in the system. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Fields transferred when creating a user. Listing them explicitly keeps
/// unexpected input out of the persisted record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
