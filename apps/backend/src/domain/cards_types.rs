//! Core card-related types: Card, Suit, CardId

/// Card id, unique within one 60-card deck instance (0..=59).
pub type CardId = u8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
    /// The fifth suit (values 1..=20); its cards always score face value.
    Payoo,
}

impl Suit {
    /// The four suits eligible to become the papayoo suit.
    pub const CLASSIC: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    /// Fixed display/sort rank: Spade < Heart < Diamond < Club < Payoo.
    pub fn sort_rank(self) -> u8 {
        match self {
            Suit::Spade => 0,
            Suit::Heart => 1,
            Suit::Diamond => 2,
            Suit::Club => 3,
            Suit::Payoo => 4,
        }
    }

    pub fn is_classic(self) -> bool {
        !matches!(self, Suit::Payoo)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub value: u8,
}

// Note: Ord on Card is only for stable hand sorting: suit display order, then
// ascending value. Trick resolution compares values within the lead suit only.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.sort_rank().cmp(&other.suit.sort_rank()) {
            std::cmp::Ordering::Equal => self.value.cmp(&other.value),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
