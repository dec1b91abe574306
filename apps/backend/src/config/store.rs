//! Store selection.
//!
//! `REDIS_URL` set: snapshots persist in Redis and survive restarts.
//! Unset: a process-local in-memory store, suitable for development
//! and single-node deployments.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::store::{GameStore, InMemoryStore, RedisStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Redis { url: String },
    Memory,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_redis_url(env::var("REDIS_URL").ok())
    }

    fn from_redis_url(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => StoreConfig::Redis { url },
            _ => StoreConfig::Memory,
        }
    }

    pub async fn connect(&self) -> Result<Arc<dyn GameStore>, AppError> {
        match self {
            StoreConfig::Redis { url } => {
                let store = RedisStore::connect(url)
                    .await
                    .map_err(|err| AppError::config(err.to_string()))?;
                info!("using redis snapshot store");
                Ok(Arc::new(store))
            }
            StoreConfig::Memory => {
                info!("using in-memory snapshot store");
                Ok(Arc::new(InMemoryStore::new()))
            }
        }
    }
}
