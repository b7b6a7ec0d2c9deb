// Application State Module

use super::config::Config;
use crate::source::CachedSource;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub source: CachedSource,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let source = CachedSource::new(config.source.data_source());
        Self { config, source }
    }
}
