//! Per-viewer projection of the authoritative snapshot.
//!
//! Every externally-facing read goes through [`redact_for`]: other
//! seats' hands become opaque placeholders (count preserved), staged
//! selections are visible only to their owner, and confirmed passes
//! are never shown. The authoritative `Game` is never mutated here.

use serde::Serialize;

use super::cards_types::{Card, CardId, Suit};
use super::rules::MaxRounds;
use super::state::{Game, Phase, TrickPlay};
use super::tricks::legal_plays;

/// A card as one viewer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HandCard {
    Visible(Card),
    Hidden { hidden: bool },
}

impl HandCard {
    fn hidden() -> Self {
        HandCard::Hidden { hidden: true }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedPlayer {
    pub id: String,
    pub name: String,
    pub is_bot: bool,
    pub hand: Vec<HandCard>,
    pub collected_cards: Vec<Card>,
    pub selected_cards: Vec<CardId>,
    pub cards_to_pass: Vec<CardId>,
    pub score: i32,
    pub last_round_points: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedGame {
    pub room_code: String,
    pub player_count: usize,
    pub players: Vec<RedactedPlayer>,
    pub phase: Phase,
    pub round_number: u32,
    pub max_rounds: MaxRounds,
    pub papayoo_suit: Option<Suit>,
    pub current_player: usize,
    pub lead_suit: Option<Suit>,
    pub current_trick: Vec<TrickPlay>,
    pub trick_count: u32,
    pub cards_to_pass: usize,
    pub last_update: i64,
    pub message: String,
    /// Ids the viewer may legally play right now; empty for spectators
    /// and out-of-turn seats.
    pub legal_plays: Vec<CardId>,
}

/// Project the snapshot for one viewer. `None` produces a spectator
/// view with every hand hidden.
pub fn redact_for(game: &Game, viewer_seat: Option<usize>) -> RedactedGame {
    let players = game
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let own = viewer_seat == Some(seat);
            RedactedPlayer {
                id: p.id.clone(),
                name: p.name.clone(),
                is_bot: p.is_bot,
                hand: if own {
                    p.hand.iter().copied().map(HandCard::Visible).collect()
                } else {
                    p.hand.iter().map(|_| HandCard::hidden()).collect()
                },
                collected_cards: p.collected_cards.clone(),
                selected_cards: if own { p.selected_cards.clone() } else { Vec::new() },
                cards_to_pass: Vec::new(),
                score: p.score,
                last_round_points: p.last_round_points,
            }
        })
        .collect();

    let legal = match viewer_seat {
        Some(seat) if game.phase == Phase::Playing && game.current_player == seat => {
            legal_plays(&game.players[seat].hand, game.lead_suit)
                .iter()
                .map(|c| c.id)
                .collect()
        }
        _ => Vec::new(),
    };

    RedactedGame {
        room_code: game.room_code.clone(),
        player_count: game.player_count,
        players,
        phase: game.phase,
        round_number: game.round_number,
        max_rounds: game.max_rounds,
        papayoo_suit: game.papayoo_suit,
        current_player: game.current_player,
        lead_suit: game.lead_suit,
        current_trick: game.current_trick.clone(),
        trick_count: game.trick_count,
        cards_to_pass: game.cards_to_pass,
        last_update: game.last_update,
        message: game.message.clone(),
        legal_plays: legal,
    }
}
