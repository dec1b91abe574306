//! Redis-backed snapshot store.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::Game;

use super::{game_key, GameStore, StoreError, GAME_TTL_SECS};

pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Open a multiplexed connection; fails fast on a bad URL so
    /// misconfiguration surfaces at startup, not first request.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)
            .map_err(|err| StoreError::Unavailable(format!("invalid REDIS_URL: {err}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|err| StoreError::Unavailable(format!("redis connect failed: {err}")))?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl GameStore for RedisStore {
    async fn get(&self, room_code: &str) -> Result<Option<Game>, StoreError> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn
            .get(game_key(room_code))
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        match raw {
            None => Ok(None),
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|err| StoreError::Corrupt(format!("room {room_code}: {err}"))),
        }
    }

    async fn put(&self, game: &Game) -> Result<(), StoreError> {
        let json = serde_json::to_string(game)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let mut conn = self.manager.clone();
        conn.set_ex::<_, _, ()>(game_key(&game.room_code), json, GAME_TTL_SECS)
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    async fn delete(&self, room_code: &str) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(game_key(room_code))
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}
