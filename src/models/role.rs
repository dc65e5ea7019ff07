//! Roles and role records resolved from the auth service

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role held by a user, as reported by the auth service.
///
/// Only the exact lowercase values are recognised. Anything else, including
/// other casings, is kept verbatim so it can be relayed and reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Student,
    Faculty,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Other(s) => s.as_str(),
        }
    }

    pub fn is_faculty(&self) -> bool {
        matches!(self, Role::Faculty)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "student" => Role::Student,
            "faculty" => Role::Faculty,
            _ => Role::Other(s.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Result of a user lookup on the auth service
#[derive(Debug, Clone, Serialize)]
pub struct RoleRecord {
    pub university_id: String,
    pub role: Role,
    /// The backend record, untouched
    pub raw_record: Value,
}
