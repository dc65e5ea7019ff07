//! Video search and lookup delegated to the search service

use axum::http::StatusCode;
use std::sync::Arc;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{BackendListing, Identity, ListingEnvelope, SearchQuery},
};

use super::{backend::Forwarded, downstream::SearchBackend, listing};

const SERVICE: &str = "Search";

#[derive(Clone)]
pub struct VideosService {
    search: Arc<dyn SearchBackend>,
}

impl VideosService {
    pub fn new(search: Arc<dyn SearchBackend>) -> Self {
        Self { search }
    }

    /// Search videos on behalf of a verified caller and normalize the listing
    pub async fn search(&self, identity: &Identity, query: &SearchQuery) -> AppResult<ListingEnvelope> {
        query.validate()?;

        tracing::debug!("Forwarding: video search for {:?}", identity.subject);
        let response = self.search.search_videos(query, &identity.bearer()).await?;
        if response.status != StatusCode::OK {
            tracing::warn!("Video search rejected with status {}", response.status);
            return Err(response.rejected());
        }

        let listing = BackendListing::from_value(response.json_body(SERVICE)?)?;

        tracing::debug!("Normalizing: video search listing");
        Ok(listing::normalize(listing, query))
    }

    /// Fetch a single video on behalf of a verified caller
    pub async fn get_video(&self, identity: &Identity, video_id: &str) -> AppResult<Forwarded> {
        tracing::debug!("Forwarding: video {} for {:?}", video_id, identity.subject);
        self.search
            .get_video(video_id, &identity.bearer())
            .await?
            .into_forwarded(SERVICE)
    }
}
