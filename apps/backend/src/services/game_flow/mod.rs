//! Orchestration over the pure rules engine.
//!
//! `GameFlowService` owns the store round-trip for every action:
//! load snapshot, run the domain mutation, drive any bot turns, save.
//! The domain layer never touches the store; bots never touch it either.

mod bot_coordinator;
mod player_actions;

use std::sync::Arc;

use crate::ai::{BotPlayer, HeuristicBot};
use crate::domain::Game;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::store::GameStore;

pub struct GameFlowService {
    store: Arc<dyn GameStore>,
    bot: Arc<dyn BotPlayer>,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self {
            store,
            bot: Arc::new(HeuristicBot),
        }
    }

    pub fn with_bot(store: Arc<dyn GameStore>, bot: Arc<dyn BotPlayer>) -> Self {
        Self { store, bot }
    }

    /// Load a room's snapshot or fail with a domain not-found.
    async fn load(&self, room_code: &str) -> Result<Game, DomainError> {
        self.store
            .get(room_code)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Game, format!("no game in room {room_code}"))
            })
    }

    async fn save(&self, game: &Game) -> Result<(), DomainError> {
        self.store.put(game).await.map_err(DomainError::from)
    }
}
