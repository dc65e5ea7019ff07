//! Typed contracts of the auth, search and upload services

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{LoginRequest, SearchQuery, SignupRequest, UploadRequest},
};

use super::backend::{BackendResponse, HttpBackend};

/// Auth service: token verification, user lookup and account operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `GET /auth/verify-token`, sending the caller's header unmodified
    async fn verify_token(&self, authorization: &str) -> AppResult<BackendResponse>;

    /// `GET /auth/get-user?uni=<id>`
    async fn get_user(&self, uni: &str) -> AppResult<BackendResponse>;

    async fn signup(&self, request: &SignupRequest) -> AppResult<BackendResponse>;

    async fn login(&self, request: &LoginRequest) -> AppResult<BackendResponse>;
}

/// Search service. Every call carries the caller's bearer credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search_videos(&self, query: &SearchQuery, authorization: &str) -> AppResult<BackendResponse>;

    async fn get_video(&self, video_id: &str, authorization: &str) -> AppResult<BackendResponse>;
}

/// Upload service: upload start and the course catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadBackend: Send + Sync {
    async fn start_upload(&self, request: &UploadRequest, authorization: &str) -> AppResult<BackendResponse>;

    async fn offerings(&self) -> AppResult<BackendResponse>;

    async fn courses(&self) -> AppResult<BackendResponse>;

    async fn prof_offerings(&self, prof_uni: &str) -> AppResult<BackendResponse>;
}

pub struct HttpAuthBackend(pub HttpBackend);

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn verify_token(&self, authorization: &str) -> AppResult<BackendResponse> {
        self.0.get("/auth/verify-token", &[], Some(authorization)).await
    }

    async fn get_user(&self, uni: &str) -> AppResult<BackendResponse> {
        self.0
            .get("/auth/get-user", &[("uni", uni.to_string())], None)
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> AppResult<BackendResponse> {
        self.0.post_json("/auth/signup", request, None).await
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<BackendResponse> {
        self.0.post_json("/auth/login", request, None).await
    }
}

pub struct HttpSearchBackend(pub HttpBackend);

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search_videos(&self, query: &SearchQuery, authorization: &str) -> AppResult<BackendResponse> {
        self.0
            .get("/search/videos", &query.to_params(), Some(authorization))
            .await
    }

    async fn get_video(&self, video_id: &str, authorization: &str) -> AppResult<BackendResponse> {
        let path = format!("/search/videos/{}", urlencoding::encode(video_id));
        self.0.get(&path, &[], Some(authorization)).await
    }
}

pub struct HttpUploadBackend(pub HttpBackend);

#[async_trait]
impl UploadBackend for HttpUploadBackend {
    async fn start_upload(&self, request: &UploadRequest, authorization: &str) -> AppResult<BackendResponse> {
        self.0
            .post_json("/videos/start_upload", request, Some(authorization))
            .await
    }

    // The catalog endpoints are POSTs on the upload service, sent an empty object.
    async fn offerings(&self) -> AppResult<BackendResponse> {
        self.0.post_json("/videos/offer", &serde_json::json!({}), None).await
    }

    async fn courses(&self) -> AppResult<BackendResponse> {
        self.0.post_json("/videos/courses", &serde_json::json!({}), None).await
    }

    async fn prof_offerings(&self, prof_uni: &str) -> AppResult<BackendResponse> {
        let path = format!("/videos/prof_offer/{}", urlencoding::encode(prof_uni));
        self.0.post_json(&path, &serde_json::json!({}), None).await
    }
}
