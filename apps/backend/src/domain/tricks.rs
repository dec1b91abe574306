//! Suit-following legality and trick resolution.
//!
//! There is no trump: a trick is won by the highest value of the lead
//! suit, and off-suit cards (including high Payoos) can never win.

use crate::errors::domain::{DomainError, ValidationKind};

use super::cards_types::{Card, Suit};
use super::state::{Game, TrickPlay};

/// A card is legal if it follows the lead suit, or the hand is void in it.
pub fn is_legal_play(hand: &[Card], card: &Card, lead_suit: Option<Suit>) -> bool {
    match lead_suit {
        None => true,
        Some(lead) => card.suit == lead || !hand.iter().any(|c| c.suit == lead),
    }
}

/// The subset of `hand` that may be played against `lead_suit`.
pub fn legal_plays(hand: &[Card], lead_suit: Option<Suit>) -> Vec<Card> {
    match lead_suit {
        None => hand.to_vec(),
        Some(lead) => {
            let following: Vec<Card> = hand.iter().filter(|c| c.suit == lead).copied().collect();
            if following.is_empty() {
                hand.to_vec()
            } else {
                following
            }
        }
    }
}

/// Guard version of [`is_legal_play`] for the transition layer.
pub fn require_legal_play(
    hand: &[Card],
    card: &Card,
    lead_suit: Option<Suit>,
) -> Result<(), DomainError> {
    if is_legal_play(hand, card, lead_suit) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            format!(
                "must follow {:?}, cannot play {:?} {}",
                lead_suit, card.suit, card.value
            ),
        ))
    }
}

/// Index into `trick` of the winning play: the highest value among
/// cards of the lead suit (the first card played).
///
/// Returns `None` for an empty trick.
pub fn trick_winner(trick: &[TrickPlay]) -> Option<usize> {
    let lead = trick.first()?.card.suit;
    trick
        .iter()
        .enumerate()
        .filter(|(_, play)| play.card.suit == lead)
        .max_by_key(|(_, play)| play.card.value)
        .map(|(i, _)| i)
}

/// Seat index of the winner of the game's in-progress trick.
pub fn trick_winner_seat(game: &Game) -> Option<usize> {
    let winner = trick_winner(&game.current_trick)?;
    let id = &game.current_trick[winner].player_id;
    game.players.iter().position(|p| &p.id == id)
}
