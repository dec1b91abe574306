//! Deck construction, shuffling and dealing.
//!
//! All functions here are pure over their inputs; randomness is always
//! injected so callers (and tests) control determinism.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::domain::{DomainError, ValidationKind};

use super::cards_types::{Card, Suit};
use super::rules::{MAX_PLAYERS, MIN_PLAYERS};

/// Canonical 60-card deck: the four classic suits with values 1..=10
/// (ids 0..=39), then the Payoo suit with values 1..=20 (ids 40..=59).
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(60);
    let mut id = 0u8;
    for suit in Suit::CLASSIC {
        for value in 1..=10u8 {
            deck.push(Card { id, suit, value });
            id += 1;
        }
    }
    for value in 1..=20u8 {
        deck.push(Card {
            id,
            suit: Suit::Payoo,
            value,
        });
        id += 1;
    }
    deck
}

/// Fisher-Yates shuffle via the injected RNG.
pub fn shuffle(deck: &mut [Card], rng: &mut impl Rng) {
    deck.shuffle(rng);
}

/// Deal the full deck round-robin into `player_count` sorted hands.
///
/// Every card is distributed; hand sizes differ by at most one when
/// 60 does not divide evenly.
pub fn deal(deck: &[Card], player_count: usize) -> Result<Vec<Vec<Card>>, DomainError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!("player count must be {MIN_PLAYERS}..={MAX_PLAYERS}, got {player_count}"),
        ));
    }
    let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(60 / player_count + 1); player_count];
    for (i, card) in deck.iter().enumerate() {
        hands[i % player_count].push(*card);
    }
    for hand in &mut hands {
        sort_hand(hand);
    }
    Ok(hands)
}

/// Sort a hand in display order: suit rank, then ascending value.
pub fn sort_hand(hand: &mut [Card]) {
    hand.sort();
}

/// Roll the papayoo die: uniformly pick one of the four classic suits.
pub fn roll_papayoo_die(rng: &mut impl Rng) -> Suit {
    Suit::CLASSIC[rng.random_range(0..Suit::CLASSIC.len())]
}
