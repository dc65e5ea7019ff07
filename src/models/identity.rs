//! Verified caller identity

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Outcome of a successful token verification. Lives for one request.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    /// Opaque user id issued by the auth service
    pub subject: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    /// The bearer token the caller presented, re-attached to outbound calls
    #[serde(skip_serializing)]
    pub raw_credential: String,
}

impl Identity {
    /// Value for an outbound `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.raw_credential)
    }
}

/// Body returned by the auth service's token verification endpoint
#[derive(Debug, Deserialize)]
pub struct VerifiedToken {
    pub uid: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}
