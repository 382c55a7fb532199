// Application state module
// Holds the resolved configuration shared by connection tasks

use std::sync::atomic::AtomicBool;

use super::types::Config;

/// Application state shared across all connection tasks
pub struct AppState {
    pub config: Config,

    // Cached config value for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config,
            cached_access_log,
        }
    }
}
