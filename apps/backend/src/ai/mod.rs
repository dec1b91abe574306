//! Bot players.
//!
//! Bots are pure decision functions over a read-only view of the table:
//! they never mutate game state and never see hidden information beyond
//! their own hand and the public record of plays.

pub mod heuristic;

use crate::domain::{Card, CardId, Suit, VoidTable};

pub use heuristic::HeuristicBot;

/// Everything a bot may consult when choosing a card to play.
pub struct PlayContext<'a> {
    pub hand: &'a [Card],
    pub current_trick_cards: &'a [Card],
    pub lead_suit: Option<Suit>,
    pub papayoo_suit: Suit,
    pub player_count: usize,
    pub player_id: &'a str,
    pub voids: &'a VoidTable,
}

/// A strategy for one bot seat. Implementations must be deterministic
/// over their inputs so replays and tests are stable.
pub trait BotPlayer: Send + Sync {
    /// Pick `count` card ids from `hand` to pass.
    fn choose_pass(&self, hand: &[Card], count: usize) -> Vec<CardId>;

    /// Pick a card to play; `None` only for an empty hand.
    fn choose_play(&self, ctx: &PlayContext<'_>) -> Option<Card>;
}
