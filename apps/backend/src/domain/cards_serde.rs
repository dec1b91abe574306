//! Serialization for card types.
//!
//! Wire tokens match the snapshot JSON consumed by polling clients:
//! suits are lowercase strings, cards are `{id, suit, value}` objects.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Suit};

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = match self {
            Suit::Spade => "spade",
            Suit::Heart => "heart",
            Suit::Diamond => "diamond",
            Suit::Club => "club",
            Suit::Payoo => "payoo",
        };
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "spade" => Ok(Suit::Spade),
            "heart" => Ok(Suit::Heart),
            "diamond" => Ok(Suit::Diamond),
            "club" => Ok(Suit::Club),
            "payoo" => Ok(Suit::Payoo),
            _ => Err(serde::de::Error::custom(format!("Invalid suit: {s}"))),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct CardWire {
    id: u8,
    suit: Suit,
    value: u8,
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CardWire {
            id: self.id,
            suit: self.suit,
            value: self.value,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CardWire::deserialize(deserializer)?;
        Ok(Card {
            id: wire.id,
            suit: wire.suit,
            value: wire.value,
        })
    }
}
