//! Account operations relayed to the auth service

use std::sync::Arc;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{LoginRequest, SignupRequest},
};

use super::{backend::Forwarded, downstream::AuthBackend};

const SERVICE: &str = "Auth";

#[derive(Clone)]
pub struct AccountsService {
    auth: Arc<dyn AuthBackend>,
}

impl AccountsService {
    pub fn new(auth: Arc<dyn AuthBackend>) -> Self {
        Self { auth }
    }

    /// Create an account
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<Forwarded> {
        request.validate()?;
        let forwarded = self.auth.signup(request).await?.into_forwarded(SERVICE)?;
        tracing::info!("Signup relayed for uni {}", request.uni);
        Ok(forwarded)
    }

    /// Log in and relay the auth service's session payload
    pub async fn login(&self, request: &LoginRequest) -> AppResult<Forwarded> {
        request.validate()?;
        self.auth.login(request).await?.into_forwarded(SERVICE)
    }

    /// Raw user lookup by university id
    pub async fn get_user(&self, uni: &str) -> AppResult<Forwarded> {
        self.auth.get_user(uni).await?.into_forwarded(SERVICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        services::{backend::BackendResponse, downstream::MockAuthBackend},
    };
    use axum::http::StatusCode;
    use serde_json::json;

    fn signup_request(email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            uni: "abc123".to_string(),
            role: "student".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_relays_success() {
        let mut mock = MockAuthBackend::new();
        mock.expect_signup()
            .withf(|request| request.uni == "abc123")
            .times(1)
            .returning(|_| Ok(BackendResponse::json(StatusCode::OK, json!({"uid": "u9"}))));

        let forwarded = AccountsService::new(Arc::new(mock))
            .signup(&signup_request("ada@columbia.edu"))
            .await
            .unwrap();
        assert_eq!(forwarded.status, StatusCode::OK);
        assert_eq!(forwarded.body, json!({"uid": "u9"}));
    }

    #[tokio::test]
    async fn test_signup_error_keeps_backend_status_and_detail() {
        let mut mock = MockAuthBackend::new();
        mock.expect_signup().times(1).returning(|_| {
            Ok(BackendResponse::json(
                StatusCode::CONFLICT,
                json!({"detail": "Email already registered"}),
            ))
        });

        let err = AccountsService::new(Arc::new(mock))
            .signup(&signup_request("ada@columbia.edu"))
            .await
            .unwrap_err();
        match err {
            AppError::UpstreamRejected { status, detail } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert_eq!(detail, json!("Email already registered"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_auth() {
        let mut mock = MockAuthBackend::new();
        mock.expect_signup().times(0);

        let err = AccountsService::new(Arc::new(mock))
            .signup(&signup_request("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_error_with_text_body() {
        let mut mock = MockAuthBackend::new();
        mock.expect_login()
            .times(1)
            .returning(|_| Ok(BackendResponse::new(StatusCode::UNAUTHORIZED, "Login Failed")));

        let err = AccountsService::new(Arc::new(mock))
            .login(&LoginRequest {
                email: "ada@columbia.edu".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        match err {
            AppError::UpstreamRejected { status, detail } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(detail, json!("Login Failed"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
