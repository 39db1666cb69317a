use std::sync::Arc;

use anyhow::Result;
use vatcal_core::Region;
use vatcal_core::cache::EventCache;
use vatcal_core::feed::VatsimFeed;

use crate::config::ServerConfig;

/// Shared application state
pub struct AppState<F> {
    pub cache: Arc<EventCache<F>>,
    pub default_region: Region,
}

// Manual impl: cloning only bumps the Arc, so F itself need not be Clone
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        AppState {
            cache: Arc::clone(&self.cache),
            default_region: self.default_region,
        }
    }
}

impl<F> AppState<F> {
    pub fn new(cache: EventCache<F>, default_region: Region) -> Self {
        AppState {
            cache: Arc::new(cache),
            default_region,
        }
    }
}

impl AppState<VatsimFeed> {
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let feed = VatsimFeed::with_options(&config.upstream_url, config.request_timeout())?;
        Ok(AppState::new(EventCache::new(feed), config.default_region))
    }
}
