//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::RosterService;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the in-memory
/// roster registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    rosters: RosterService,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                rosters: RosterService::new(),
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the roster registry.
    #[must_use]
    pub fn rosters(&self) -> &RosterService {
        &self.inner.rosters
    }
}
