//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::services::GameFlowService;
use crate::store::GameStore;

pub struct AppState {
    pub game_flow: GameFlowService,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self {
            game_flow: GameFlowService::new(store),
        }
    }
}
