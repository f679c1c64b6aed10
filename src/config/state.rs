// Application state module
// Holds the loaded configuration and the user store shared by all connections

use std::sync::Arc;

use super::types::Config;
use crate::users::{SharedUserStore, UserStore};

/// Application state
pub struct AppState {
    pub config: Config,
    pub users: SharedUserStore,
}

impl AppState {
    /// Create `AppState` with a user store built from the `users` config section
    pub fn new(config: &Config) -> Self {
        let users = if config.users.seed {
            UserStore::seeded(config.users.id_strategy)
        } else {
            UserStore::empty(config.users.id_strategy)
        };

        Self::with_store(config, Arc::new(users))
    }

    pub fn with_store(config: &Config, users: SharedUserStore) -> Self {
        Self {
            config: config.clone(),
            users,
        }
    }
}
