//! Composite Gateway
//!
//! Authenticates clients against the auth service, authorizes privileged
//! writes with role data from that same service, and delegates to the search
//! and upload services, returning one stable response shape.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers.
///
/// Configuration is consumed while the services are built; handlers only
/// reach the backends through `services`.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state for a configuration, wiring HTTP clients to every backend
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let services = services::Services::new(config)?;
        Ok(Self {
            services: Arc::new(services),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_builds_without_backend_addresses() {
        let state = AppState::new(&AppConfig::default()).unwrap();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.services, &clone.services));
    }
}
