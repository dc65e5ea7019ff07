//! API handlers for the gateway's REST endpoints

pub mod accounts;
pub mod health;
pub mod openapi;
pub mod uploads;
pub mod videos;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::Identity, AppState};

/// Extractor for a caller verified by the auth service
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        tracing::debug!("Authenticating: {} {}", parts.method, parts.uri.path());

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| AppError::Unauthenticated("Invalid Authorization header".to_string()))
            })
            .transpose()?;

        let identity = state.services.verifier.verify(header).await?;
        Ok(AuthenticatedUser(identity))
    }
}

/// JSON body extractor whose rejections use the gateway's error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the gateway's error shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // The frontend is served from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health
        .route("/", get(health::root))
        .route("/healthz", get(health::health_check))
        // Accounts
        .route("/auth/signup", post(accounts::signup))
        .route("/auth/login", post(accounts::login))
        .route("/auth/get-user", get(accounts::get_user))
        // Videos
        .route("/videos/search", get(videos::search))
        .route("/videos/:video_id", get(videos::get_video))
        // Uploads and catalog
        .route("/start_upload", post(uploads::start_upload))
        .route("/offerings", get(uploads::offerings))
        .route("/courses", get(uploads::courses))
        .route("/prof_offer/:prof_uni", get(uploads::prof_offerings))
        .with_state(state);

    routes
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
