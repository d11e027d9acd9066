use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{MemoryUserStore, MongoDB, UserStore};
use crate::graphql::{build_schema, BookSchema};
use crate::services::AuthService;

/// Process-wide handles passed into the HTTP app. Cloned per worker.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
    pub store: Arc<dyn UserStore>,
    pub schema: BookSchema,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = MongoDB::new(&config.mongodb_uri).await?;
        Ok(Self::from_parts(config, Arc::new(db)))
    }

    pub fn from_parts(config: AppConfig, store: Arc<dyn UserStore>) -> Self {
        let auth = AuthService::new(&config.jwt);
        let schema = build_schema(store.clone(), auth.clone());

        Self {
            config: Arc::new(config),
            auth,
            store,
            schema,
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::from_parts(config, Arc::new(MemoryUserStore::new()))
    }
}
