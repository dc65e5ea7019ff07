//! Video endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{ListingEnvelope, SearchQuery},
    services::backend::Forwarded,
    AppState,
};

use super::{ApiQuery, AuthenticatedUser};

/// Search videos
#[utoipa::path(
    get,
    path = "/videos/search",
    tag = "videos",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "Normalized listing", body = ListingEnvelope),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid filters", body = crate::error::ErrorResponse),
        (status = 502, description = "Unrecognised search response", body = crate::error::ErrorResponse),
        (status = 504, description = "Search service timeout", body = crate::error::ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<ListingEnvelope>> {
    let envelope = state.services.videos.search(&identity, &query).await?;
    Ok(Json(envelope))
}

/// Get a single video
#[utoipa::path(
    get,
    path = "/videos/{video_id}",
    tag = "videos",
    security(("bearer_auth" = [])),
    params(("video_id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video details", body = Object),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(video_id): Path<String>,
) -> AppResult<Forwarded> {
    state.services.videos.get_video(&identity, &video_id).await
}
