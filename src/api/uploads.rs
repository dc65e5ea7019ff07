//! Upload and catalog endpoints

use axum::extract::{Path, State};

use crate::{error::AppResult, models::UploadRequest, services::backend::Forwarded, AppState};

use super::{ApiJson, AuthenticatedUser};

/// Start a video upload (faculty only)
#[utoipa::path(
    post,
    path = "/start_upload",
    tag = "uploads",
    security(("bearer_auth" = [])),
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Upload started", body = Object),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Professor is not faculty", body = crate::error::ErrorResponse),
        (status = 404, description = "Professor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn start_upload(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    ApiJson(request): ApiJson<UploadRequest>,
) -> AppResult<Forwarded> {
    state.services.uploads.start_upload(&identity, &request).await
}

/// List course offerings
#[utoipa::path(
    get,
    path = "/offerings",
    tag = "catalog",
    responses(
        (status = 200, description = "Offerings", body = Object)
    )
)]
pub async fn offerings(State(state): State<AppState>) -> AppResult<Forwarded> {
    state.services.uploads.offerings().await
}

/// List courses
#[utoipa::path(
    get,
    path = "/courses",
    tag = "catalog",
    responses(
        (status = 200, description = "Courses", body = Object)
    )
)]
pub async fn courses(State(state): State<AppState>) -> AppResult<Forwarded> {
    state.services.uploads.courses().await
}

/// List the offerings of one professor
#[utoipa::path(
    get,
    path = "/prof_offer/{prof_uni}",
    tag = "catalog",
    params(("prof_uni" = String, Path, description = "Professor university id")),
    responses(
        (status = 200, description = "Offerings taught by the professor", body = Object)
    )
)]
pub async fn prof_offerings(
    State(state): State<AppState>,
    Path(prof_uni): Path<String>,
) -> AppResult<Forwarded> {
    state.services.uploads.prof_offerings(&prof_uni).await
}
