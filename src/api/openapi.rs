//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{accounts, health, uploads, videos};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Composite Service",
        version = "1.0.0",
        description = "Gateway in front of the auth, search and upload services"
    ),
    paths(
        // Health
        health::root,
        health::health_check,
        // Auth
        accounts::signup,
        accounts::login,
        accounts::get_user,
        // Videos
        videos::search,
        videos::get_video,
        // Uploads
        uploads::start_upload,
        uploads::offerings,
        uploads::courses,
        uploads::prof_offerings,
    ),
    components(
        schemas(
            crate::models::SignupRequest,
            crate::models::LoginRequest,
            crate::models::SearchQuery,
            crate::models::ListingEnvelope,
            crate::models::Link,
            crate::models::UploadRequest,
            health::HealthResponse,
            health::RootResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "auth", description = "Accounts, relayed to the auth service"),
        (name = "videos", description = "Video search and lookup"),
        (name = "uploads", description = "Video uploads"),
        (name = "catalog", description = "Courses and offerings")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/healthz",
            "/auth/signup",
            "/auth/login",
            "/auth/get-user",
            "/videos/search",
            "/videos/{video_id}",
            "/start_upload",
            "/offerings",
            "/courses",
            "/prof_offer/{prof_uni}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
