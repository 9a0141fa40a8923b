//! Application state for the Practice Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::PracticeStore;

/// Shared application state.
///
/// Holds the immutable configuration (country rules, practice defaults) and
/// the practice store. Configuration reads never lock; store access goes
/// through a read-write lock.
#[derive(Clone)]
pub struct AppState {
    /// The loaded practice configuration.
    config: Arc<ConfigLoader>,
    /// Schedules, bookings and invoice counters.
    store: Arc<RwLock<PracticeStore>>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new(config: ConfigLoader) -> Self {
        let store = PracticeStore::new(config.default_schedule().clone());
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a handle to the shared store.
    pub fn store(&self) -> Arc<RwLock<PracticeStore>> {
        Arc::clone(&self.store)
    }
}
