use std::sync::Arc;

use crate::config::Config;
use crate::embeddings::Embedder;
use crate::matching::roles::RoleStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; nothing in it is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub roles: RoleStore,
    /// Loaded sentence-embedding model. Default: MiniLmEmbedder.
    pub embedder: Arc<dyn Embedder>,
}

impl AppState {
    pub fn new(config: Config, embedder: Arc<dyn Embedder>) -> Self {
        let roles = RoleStore::new(config.job_roles_dir.clone());
        Self {
            config,
            roles,
            embedder,
        }
    }
}
