//! Role lookup used by privileged writes

use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Role, RoleRecord},
};

use super::downstream::AuthBackend;

#[derive(Clone)]
pub struct RoleResolver {
    auth: Arc<dyn AuthBackend>,
}

impl RoleResolver {
    pub fn new(auth: Arc<dyn AuthBackend>) -> Self {
        Self { auth }
    }

    /// Look a user up by university id.
    ///
    /// The auth service answers `{"user": [...]}`; an empty list is `NotFound`,
    /// anything other than a list is a contract violation. The first match wins.
    pub async fn resolve(&self, university_id: &str) -> AppResult<RoleRecord> {
        let response = self.auth.get_user(university_id).await?;
        if response.status != StatusCode::OK {
            tracing::warn!(
                "User lookup for {} rejected with status {}",
                university_id,
                response.status
            );
            return Err(response.rejected());
        }

        let body: Value = serde_json::from_slice(&response.body)
            .map_err(|e| AppError::Internal(format!("User lookup decode error: {}", e)))?;

        let users = body
            .get("user")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                AppError::UpstreamContractViolation(
                    "Auth service user lookup did not return a `user` list".to_string(),
                )
            })?;

        let Some(record) = users.first() else {
            return Err(AppError::NotFound(format!(
                "No user found with uni {}",
                university_id
            )));
        };

        let role = record
            .get("role")
            .and_then(Value::as_str)
            .map(Role::from)
            .ok_or_else(|| {
                AppError::UpstreamContractViolation(format!(
                    "Auth service returned user {} without a role",
                    university_id
                ))
            })?;

        let university_id = record
            .get("uni")
            .and_then(Value::as_str)
            .unwrap_or(university_id)
            .to_string();

        Ok(RoleRecord {
            university_id,
            role,
            raw_record: record.clone(),
        })
    }

    /// Resolve a user and require the faculty role.
    pub async fn require_faculty(&self, university_id: &str) -> AppResult<RoleRecord> {
        tracing::debug!("Authorizing: checking faculty role of {}", university_id);
        let record = self.resolve(university_id).await?;

        if !record.role.is_faculty() {
            tracing::info!("Rejected {}: role {} is not faculty", university_id, record.role);
            return Err(AppError::Forbidden(format!(
                "User {} has role '{}', only faculty can perform this action",
                record.university_id, record.role
            )));
        }

        Ok(record)
    }
}
