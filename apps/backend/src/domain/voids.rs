//! Observed suit voids, derived from play history.
//!
//! A seat is void in a suit once it has been seen discarding off-suit
//! while that suit was led. The table is rebuilt from the round's trick
//! record on demand and never guesses beyond observed plays.

use std::collections::{HashMap, HashSet};

use super::cards_types::Suit;
use super::state::{Game, TrickPlay};

#[derive(Debug, Default, Clone)]
pub struct VoidTable {
    voids: HashMap<String, HashSet<Suit>>,
}

impl VoidTable {
    /// Derive the table from completed tricks plus the trick in progress.
    pub fn from_game(game: &Game) -> Self {
        let mut table = Self::from_tricks(&game.trick_history);
        table.observe_trick(&game.current_trick);
        table
    }

    pub fn from_tricks(tricks: &[Vec<TrickPlay>]) -> Self {
        let mut table = VoidTable::default();
        for trick in tricks {
            table.observe_trick(trick);
        }
        table
    }

    fn observe_trick(&mut self, trick: &[TrickPlay]) {
        let Some(lead) = trick.first().map(|p| p.card.suit) else {
            return;
        };
        for play in &trick[1..] {
            if play.card.suit != lead {
                self.voids
                    .entry(play.player_id.clone())
                    .or_default()
                    .insert(lead);
            }
        }
    }

    pub fn is_void(&self, player_id: &str, suit: Suit) -> bool {
        self.voids
            .get(player_id)
            .is_some_and(|suits| suits.contains(&suit))
    }

    /// True if any seat other than `player_id` is known void in `suit`.
    pub fn any_opponent_void(&self, player_id: &str, suit: Suit) -> bool {
        self.count_opponents_void(player_id, suit) > 0
    }

    /// How many seats other than `player_id` are known void in `suit`.
    pub fn count_opponents_void(&self, player_id: &str, suit: Suit) -> usize {
        self.voids
            .iter()
            .filter(|(id, suits)| id.as_str() != player_id && suits.contains(&suit))
            .count()
    }
}
