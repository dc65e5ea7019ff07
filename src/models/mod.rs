//! Data models for the composite gateway

pub mod account;
pub mod identity;
pub mod listing;
pub mod role;
pub mod search;
pub mod upload;

// Re-export commonly used types
pub use account::{LoginRequest, SignupRequest, UserLookupQuery};
pub use identity::Identity;
pub use listing::{BackendListing, Link, ListingEnvelope};
pub use role::{Role, RoleRecord};
pub use search::SearchQuery;
pub use upload::UploadRequest;
