// src/state.rs

use std::{sync::Arc, time::Duration};

use axum::extract::FromRef;

use crate::{config::Config, quiz::catalog::Catalog, sessions::SessionRegistry, store::ResultStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResultStore>,
    pub catalog: Arc<Catalog>,
    pub sessions: SessionRegistry,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ResultStore>, catalog: Catalog, config: Config) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            sessions: SessionRegistry::with_ttl(Duration::from_secs(config.session_ttl_secs)),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<dyn ResultStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for SessionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
