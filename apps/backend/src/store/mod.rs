//! Snapshot persistence.
//!
//! One authoritative `Game` JSON blob per room, stored under a
//! room-scoped key with a bounded TTL so abandoned rooms self-expire.
//! The store is injected into the service layer behind [`GameStore`];
//! production uses Redis, tests and single-node deployments use the
//! in-memory implementation.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Game;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub use memory::InMemoryStore;
pub use redis::RedisStore;

/// Retention window for a room's snapshot.
pub const GAME_TTL_SECS: u64 = 86_400;

/// Room-scoped storage key.
pub fn game_key(room_code: &str) -> String {
    format!("game:{room_code}")
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("stored snapshot corrupt: {0}")]
    Corrupt(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(detail) => {
                DomainError::infra(InfraErrorKind::StoreUnavailable, detail)
            }
            StoreError::Corrupt(detail) => {
                DomainError::infra(InfraErrorKind::DataCorruption, detail)
            }
        }
    }
}

/// Keyed snapshot storage. Writes refresh the TTL.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get(&self, room_code: &str) -> Result<Option<Game>, StoreError>;
    async fn put(&self, game: &Game) -> Result<(), StoreError>;
    async fn delete(&self, room_code: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_room_scoped() {
        assert_eq!(game_key("ABCD"), "game:ABCD");
    }
}
