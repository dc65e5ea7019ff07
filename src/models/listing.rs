//! Listing shapes: what the search service may return and what clients get

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Navigation link attached to a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Listing body already paginated by the backend.
///
/// Pagination fields and links are relayed as the backend sent them.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedListing {
    pub items: Vec<Value>,
    #[serde(default)]
    pub page_size: Option<Value>,
    #[serde(default)]
    pub offset: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<Value>,
}

/// `links: null` counts as no links
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The two listing shapes the search service answers with
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BackendListing {
    Paginated(PaginatedListing),
    Bare(Vec<Value>),
}

impl BackendListing {
    /// Resolve a decoded body into one of the known shapes.
    pub fn from_value(body: Value) -> AppResult<Self> {
        serde_json::from_value(body).map_err(|e| {
            AppError::UpstreamContractViolation(format!(
                "Search service returned an unrecognised listing: {}",
                e
            ))
        })
    }
}

/// Listing returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ListingEnvelope {
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>)]
    pub page_size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>)]
    pub offset: Option<Value>,
    /// Backend links first, then the self link
    #[schema(value_type = Vec<Link>)]
    pub links: Vec<Value>,
}
