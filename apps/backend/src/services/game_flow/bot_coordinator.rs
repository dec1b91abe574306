//! Bot turn driving.
//!
//! After any human action the table may be a run of consecutive bot
//! seats. They are played out here in one explicit, bounded loop; the
//! loop stops as soon as a human must act, a trick completes (so
//! pollers see the full table before it is collected), or the round
//! ends.

use tracing::{debug, warn};

use crate::ai::PlayContext;
use crate::domain::transitions::play_card;
use crate::domain::{Card, Game, Phase, VoidTable};
use crate::errors::domain::DomainError;

use super::GameFlowService;

impl GameFlowService {
    /// Play consecutive bot turns until a human is up or the phase
    /// leaves `playing`. At most one card per seat per trick, so the
    /// loop is bounded by the deck size.
    pub(super) fn run_bot_turns(&self, game: &mut Game) -> Result<(), DomainError> {
        let mut budget = 60;
        while game.phase == Phase::Playing && game.current_player_ref().is_bot {
            if budget == 0 {
                warn!(room = %game.room_code, "bot loop budget exhausted");
                return Err(DomainError::validation_other(
                    "bot turn loop failed to terminate",
                ));
            }
            budget -= 1;

            let seat = game.current_player;
            let card = self.pick_bot_card(game, seat)?;
            debug!(room = %game.room_code, seat, card_id = card.id, "bot plays");
            play_card(game, seat, card.id)?;
        }
        Ok(())
    }

    fn pick_bot_card(&self, game: &Game, seat: usize) -> Result<Card, DomainError> {
        let voids = VoidTable::from_game(game);
        let trick_cards: Vec<Card> = game.current_trick.iter().map(|p| p.card).collect();
        let player = &game.players[seat];
        let ctx = PlayContext {
            hand: &player.hand,
            current_trick_cards: &trick_cards,
            lead_suit: game.lead_suit,
            papayoo_suit: game.papayoo_suit.ok_or_else(|| {
                DomainError::validation_other("bot cannot play before the die is rolled")
            })?,
            player_count: game.player_count,
            player_id: &player.id,
            voids: &voids,
        };
        self.bot.choose_play(&ctx).ok_or_else(|| {
            DomainError::validation_other(format!("bot {} has no playable card", player.id))
        })
    }

    /// Fill confirmed pass selections for every bot that has none yet.
    pub(super) fn fill_bot_passes(&self, game: &mut Game) -> Result<(), DomainError> {
        use crate::domain::passing::{confirm_selection, stage_selection};

        for seat in 0..game.player_count {
            if game.phase != Phase::Passing {
                break;
            }
            let player = &game.players[seat];
            if !player.is_bot || !player.cards_to_pass.is_empty() {
                continue;
            }
            let picks = self.bot.choose_pass(&player.hand, game.cards_to_pass);
            stage_selection(game, seat, picks)?;
            confirm_selection(game, seat)?;
        }
        Ok(())
    }
}
