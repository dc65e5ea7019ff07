//! Account endpoints, relayed to the auth service without authentication

use axum::extract::State;

use crate::{
    error::AppResult,
    models::{LoginRequest, SignupRequest, UserLookupQuery},
    services::backend::Forwarded,
    AppState,
};

use super::{ApiJson, ApiQuery};

/// Create an account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = Object),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 503, description = "Auth service unavailable", body = crate::error::ErrorResponse),
        (status = 504, description = "Auth service timeout", body = crate::error::ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> AppResult<Forwarded> {
    state.services.accounts.signup(&request).await
}

/// Log in
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued by the auth service", body = Object),
        (status = 401, description = "Login failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Forwarded> {
    state.services.accounts.login(&request).await
}

/// Look a user up by university id
#[utoipa::path(
    get,
    path = "/auth/get-user",
    tag = "auth",
    params(UserLookupQuery),
    responses(
        (status = 200, description = "Matching users", body = Object)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserLookupQuery>,
) -> AppResult<Forwarded> {
    state.services.accounts.get_user(&query.uni).await
}
