//! Delegation services

pub mod accounts;
pub mod backend;
pub mod downstream;
pub mod listing;
pub mod roles;
pub mod uploads;
pub mod verifier;
pub mod videos;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, models::Role};

use backend::HttpBackend;
use downstream::{AuthBackend, HttpAuthBackend, HttpSearchBackend, HttpUploadBackend, SearchBackend, UploadBackend};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub verifier: verifier::TokenVerifier,
    pub accounts: accounts::AccountsService,
    pub videos: videos::VideosService,
    pub uploads: uploads::UploadsService,
}

impl Services {
    /// Create all services talking HTTP to the configured backends
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = HttpBackend::client(config.backends.timeout())?;

        let auth = HttpBackend::new("Auth", config.backends.auth(), client.clone());
        let search = HttpBackend::new("Search", config.backends.search(), client.clone());
        let upload = HttpBackend::new("Upload", config.backends.upload(), client);
        let search_configured = search.is_configured();

        Ok(Self::with_backends(
            Arc::new(HttpAuthBackend(auth)),
            Arc::new(HttpSearchBackend(search)),
            Arc::new(HttpUploadBackend(upload)),
            Role::from(config.auth.fallback_role.as_str()),
            search_configured,
        ))
    }

    /// Wire services over arbitrary backend implementations
    pub fn with_backends(
        auth: Arc<dyn AuthBackend>,
        search: Arc<dyn SearchBackend>,
        upload: Arc<dyn UploadBackend>,
        fallback_role: Role,
        search_configured: bool,
    ) -> Self {
        let roles = roles::RoleResolver::new(auth.clone());

        Self {
            verifier: verifier::TokenVerifier::new(auth.clone(), fallback_role),
            accounts: accounts::AccountsService::new(auth),
            videos: videos::VideosService::new(search),
            uploads: uploads::UploadsService::new(upload, roles, search_configured),
        }
    }
}
