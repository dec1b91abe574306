//! Point arithmetic.
//!
//! Papayoo is a shedding game: points are penalties. A Payoo card is
//! always worth its face value; the 7 of the round's papayoo suit is
//! worth 40; every other card is worth nothing.

use super::cards_types::{Card, Suit};

/// Penalty for taking the papayoo (the 7 of the rolled suit).
pub const PAPAYOO_POINTS: i32 = 40;

/// Points a single card carries for the given papayoo suit.
pub fn card_points(card: &Card, papayoo_suit: Suit) -> i32 {
    if card.suit == Suit::Payoo {
        i32::from(card.value)
    } else if card.suit == papayoo_suit && card.value == 7 {
        PAPAYOO_POINTS
    } else {
        0
    }
}

/// Total points carried by a set of cards (a trick, or a player's
/// collected pile).
pub fn pile_points(cards: &[Card], papayoo_suit: Suit) -> i32 {
    cards.iter().map(|c| card_points(c, papayoo_suit)).sum()
}

/// True if the trick so far carries any points.
pub fn trick_has_points(cards: &[Card], papayoo_suit: Suit) -> bool {
    cards.iter().any(|c| card_points(c, papayoo_suit) > 0)
}
