//! Normalization of search listings into the client envelope

use serde_json::json;

use crate::models::{BackendListing, ListingEnvelope, SearchQuery};

/// Flatten a backend listing and append the self link of `query`.
///
/// Items keep their order; links supplied by the backend are kept as they are
/// and the self link always comes last.
pub fn normalize(listing: BackendListing, query: &SearchQuery) -> ListingEnvelope {
    let mut envelope = match listing {
        BackendListing::Paginated(page) => ListingEnvelope {
            items: page.items,
            page_size: page.page_size,
            offset: page.offset,
            links: page.links,
        },
        BackendListing::Bare(items) => ListingEnvelope {
            items,
            page_size: None,
            offset: None,
            links: Vec::new(),
        },
    };

    envelope
        .links
        .push(json!({"rel": "self", "href": query.self_href()}));
    envelope
}
