//! Upload start and catalog listings delegated to the upload service

use std::sync::Arc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Identity, UploadRequest},
};

use super::{backend::Forwarded, downstream::UploadBackend, roles::RoleResolver};

const SERVICE: &str = "Upload";

#[derive(Clone)]
pub struct UploadsService {
    upload: Arc<dyn UploadBackend>,
    roles: RoleResolver,
    /// Catalog routes are only served when the search service is configured too
    search_configured: bool,
}

impl UploadsService {
    pub fn new(upload: Arc<dyn UploadBackend>, roles: RoleResolver, search_configured: bool) -> Self {
        Self {
            upload,
            roles,
            search_configured,
        }
    }

    /// Start an upload. The professor named in the request must resolve to a
    /// faculty user before the upload service is contacted.
    pub async fn start_upload(&self, identity: &Identity, request: &UploadRequest) -> AppResult<Forwarded> {
        request.validate()?;

        let record = self.roles.require_faculty(&request.prof_uni).await?;

        tracing::debug!(
            "Forwarding: upload '{}' for offering {} by {}",
            request.video_title,
            request.offering_id,
            record.university_id
        );
        let forwarded = self
            .upload
            .start_upload(request, &identity.bearer())
            .await?
            .into_forwarded(SERVICE)?;

        tracing::info!(
            "Upload started for offering {} by {}",
            request.offering_id,
            record.university_id
        );
        Ok(forwarded)
    }

    pub async fn offerings(&self) -> AppResult<Forwarded> {
        self.ensure_catalog_configured()?;
        self.upload.offerings().await?.into_forwarded(SERVICE)
    }

    pub async fn courses(&self) -> AppResult<Forwarded> {
        self.ensure_catalog_configured()?;
        self.upload.courses().await?.into_forwarded(SERVICE)
    }

    /// Offerings taught by one professor
    pub async fn prof_offerings(&self, prof_uni: &str) -> AppResult<Forwarded> {
        self.ensure_catalog_configured()?;
        self.upload.prof_offerings(prof_uni).await?.into_forwarded(SERVICE)
    }

    fn ensure_catalog_configured(&self) -> AppResult<()> {
        if self.search_configured {
            Ok(())
        } else {
            Err(AppError::Configuration("SEARCH_SERVICE_URL not set".to_string()))
        }
    }
}
