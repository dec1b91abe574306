//! Player-facing actions: each is one load → guard → mutate → save
//! round-trip against the store.

use tracing::info;

use crate::domain::deck::roll_papayoo_die;
use crate::domain::passing::{confirm_selection, stage_selection};
use crate::domain::transitions::{
    collect_trick, init_game, play_card, roll_die, start_next_round, SeatSpec,
};
use crate::domain::{CardId, Game, MaxRounds, Phase, Suit};
use crate::errors::domain::DomainError;

use super::GameFlowService;

impl GameFlowService {
    /// Deal a new game for a room going active.
    pub async fn create_game(
        &self,
        room_code: String,
        seats: Vec<SeatSpec>,
        max_rounds: MaxRounds,
    ) -> Result<Game, DomainError> {
        let game = init_game(room_code, seats, max_rounds, &mut rand::rng())?;
        self.save(&game).await?;
        info!(room = %game.room_code, players = game.player_count, "game created");
        Ok(game)
    }

    /// Current snapshot, unredacted. Callers must redact before
    /// returning it to a viewer.
    pub async fn state(&self, room_code: &str) -> Result<Game, DomainError> {
        self.load(room_code).await
    }

    /// Stage a seat's pass selection.
    pub async fn select_cards(
        &self,
        room_code: &str,
        player_id: &str,
        card_ids: Vec<CardId>,
    ) -> Result<Game, DomainError> {
        let mut game = self.load(room_code).await?;
        let seat = game.seat_of(player_id)?;
        stage_selection(&mut game, seat, card_ids)?;
        game.touch();
        self.save(&game).await?;
        Ok(game)
    }

    /// Confirm a seat's pass selection. Bot selections are filled in
    /// on the same call, so a lone human never waits on bots.
    pub async fn confirm_pass(
        &self,
        room_code: &str,
        player_id: &str,
    ) -> Result<Game, DomainError> {
        let mut game = self.load(room_code).await?;
        let seat = game.seat_of(player_id)?;
        confirm_selection(&mut game, seat)?;
        if game.phase == Phase::Passing {
            self.fill_bot_passes(&mut game)?;
        }
        self.save(&game).await?;
        Ok(game)
    }

    /// Fix the papayoo suit; rolls the die server-side when the client
    /// did not supply one. Bot seats then play until a human is up.
    pub async fn roll_die(
        &self,
        room_code: &str,
        suit: Option<Suit>,
    ) -> Result<Game, DomainError> {
        let mut game = self.load(room_code).await?;
        let suit = suit.unwrap_or_else(|| roll_papayoo_die(&mut rand::rng()));
        roll_die(&mut game, suit)?;
        self.run_bot_turns(&mut game)?;
        self.save(&game).await?;
        Ok(game)
    }

    /// Play one card for the acting seat, then drive any bot turns.
    pub async fn play_card(
        &self,
        room_code: &str,
        player_id: &str,
        card_id: CardId,
    ) -> Result<Game, DomainError> {
        let mut game = self.load(room_code).await?;
        let seat = game.seat_of(player_id)?;
        play_card(&mut game, seat, card_id)?;
        self.run_bot_turns(&mut game)?;
        self.save(&game).await?;
        Ok(game)
    }

    /// Clear a completed trick and resume play.
    pub async fn collect_trick(&self, room_code: &str) -> Result<Game, DomainError> {
        let mut game = self.load(room_code).await?;
        collect_trick(&mut game)?;
        self.run_bot_turns(&mut game)?;
        self.save(&game).await?;
        Ok(game)
    }

    /// Reshuffle and deal the next round.
    pub async fn new_round(&self, room_code: &str) -> Result<Game, DomainError> {
        let mut game = self.load(room_code).await?;
        start_next_round(&mut game, &mut rand::rng())?;
        self.save(&game).await?;
        Ok(game)
    }

    /// Drop a room's snapshot entirely (abandon / back to lobby).
    pub async fn abandon_game(&self, room_code: &str) -> Result<(), DomainError> {
        self.store
            .delete(room_code)
            .await
            .map_err(DomainError::from)?;
        info!(room = room_code, "game abandoned");
        Ok(())
    }
}
