//! In-memory store for tests and single-node deployments.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Game;

use super::{game_key, GameStore, StoreError, GAME_TTL_SECS};

struct Entry {
    game: Game,
    expires_at: Instant,
}

#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn get(&self, room_code: &str) -> Result<Option<Game>, StoreError> {
        let key = game_key(room_code);
        let mut entries = self.entries.lock();
        // Lazy expiry: drop the entry on first read past its deadline.
        let expired = entries
            .get(&key)
            .is_some_and(|e| e.expires_at <= Instant::now());
        if expired {
            entries.remove(&key);
            return Ok(None);
        }
        Ok(entries.get(&key).map(|e| e.game.clone()))
    }

    async fn put(&self, game: &Game) -> Result<(), StoreError> {
        let entry = Entry {
            game: game.clone(),
            expires_at: Instant::now() + Duration::from_secs(GAME_TTL_SECS),
        };
        self.entries.lock().insert(game_key(&game.room_code), entry);
        Ok(())
    }

    async fn delete(&self, room_code: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(&game_key(room_code));
        Ok(())
    }
}
