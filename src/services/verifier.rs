//! Bearer token verification delegated to the auth service

use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{identity::VerifiedToken, Identity, Role},
};

use super::downstream::AuthBackend;

#[derive(Clone)]
pub struct TokenVerifier {
    auth: Arc<dyn AuthBackend>,
    fallback_role: Role,
}

impl TokenVerifier {
    pub fn new(auth: Arc<dyn AuthBackend>, fallback_role: Role) -> Self {
        Self { auth, fallback_role }
    }

    /// Verify the raw `Authorization` header of an inbound request.
    ///
    /// A missing or malformed header fails before the auth service is called.
    /// A non-200 answer is relayed with the auth service's status and body text.
    pub async fn verify(&self, authorization: Option<&str>) -> AppResult<Identity> {
        let header = authorization
            .ok_or_else(|| AppError::Unauthenticated("Missing Authorization header".to_string()))?;
        let token = bearer_token(header)?;

        tracing::debug!("Authenticating: verifying bearer token with auth service");
        let response = self.auth.verify_token(header).await?;

        if response.status != StatusCode::OK {
            tracing::warn!("Token verification rejected with status {}", response.status);
            return Err(AppError::UpstreamRejected {
                status: response.status,
                detail: Value::String(response.text()),
            });
        }

        let verified: VerifiedToken = serde_json::from_slice(&response.body)
            .map_err(|e| AppError::Internal(format!("Auth verification error: {}", e)))?;

        let role = match verified.role {
            Some(role) => Role::from(role),
            None => {
                tracing::warn!(
                    "Auth service returned no role for uid {:?}, using fallback role {}",
                    verified.uid,
                    self.fallback_role
                );
                self.fallback_role.clone()
            }
        };

        Ok(Identity {
            subject: verified.uid,
            email: verified.email,
            role,
            raw_credential: token.to_string(),
        })
    }
}

/// Token part of a `Bearer <token>` header
fn bearer_token(header: &str) -> AppResult<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("Invalid Authorization header".to_string()))
}
