//! Fixed table rules: player limits, pass counts, game length.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 8;

/// Cumulative score at which an infinite-length game ends.
pub const TARGET_SCORE: i32 = 250;

/// Default number of rounds for a fixed-length game.
pub const DEFAULT_MAX_ROUNDS: u32 = 4;

/// How many cards each seat passes before a round, by table size.
pub fn cards_to_pass(player_count: usize) -> usize {
    match player_count {
        3 | 4 => 5,
        5 => 4,
        _ => 3,
    }
}

/// Game length: a fixed round count, or play until someone reaches
/// [`TARGET_SCORE`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MaxRounds {
    Finite(u32),
    Infinite,
}

impl MaxRounds {
    /// True once `round_number` has exhausted a finite game.
    pub fn is_final_round(self, round_number: u32) -> bool {
        match self {
            MaxRounds::Finite(n) => round_number >= n,
            MaxRounds::Infinite => false,
        }
    }
}

impl Default for MaxRounds {
    fn default() -> Self {
        MaxRounds::Finite(DEFAULT_MAX_ROUNDS)
    }
}

// Wire format: a JSON number for finite games, the string "infinite"
// otherwise.
impl Serialize for MaxRounds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MaxRounds::Finite(n) => serializer.serialize_u32(*n),
            MaxRounds::Infinite => serializer.serialize_str("infinite"),
        }
    }
}

impl<'de> Deserialize<'de> for MaxRounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MaxRoundsVisitor;

        impl Visitor<'_> for MaxRoundsVisitor {
            type Value = MaxRounds;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a positive round count or the string \"infinite\"")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v == 0 {
                    return Err(E::custom("maxRounds must be at least 1"));
                }
                u32::try_from(v)
                    .map(MaxRounds::Finite)
                    .map_err(|_| E::custom("maxRounds out of range"))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v <= 0 {
                    return Err(E::custom("maxRounds must be at least 1"));
                }
                self.visit_u64(v as u64)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v == "infinite" {
                    Ok(MaxRounds::Infinite)
                } else {
                    Err(E::custom(format!("invalid maxRounds: {v}")))
                }
            }
        }

        deserializer.deserialize_any(MaxRoundsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_counts_by_table_size() {
        assert_eq!(cards_to_pass(3), 5);
        assert_eq!(cards_to_pass(4), 5);
        assert_eq!(cards_to_pass(5), 4);
        assert_eq!(cards_to_pass(6), 3);
        assert_eq!(cards_to_pass(7), 3);
        assert_eq!(cards_to_pass(8), 3);
    }

    #[test]
    fn max_rounds_serde() {
        assert_eq!(
            serde_json::to_string(&MaxRounds::Finite(4)).unwrap(),
            "4"
        );
        assert_eq!(
            serde_json::to_string(&MaxRounds::Infinite).unwrap(),
            "\"infinite\""
        );
        assert_eq!(
            serde_json::from_str::<MaxRounds>("7").unwrap(),
            MaxRounds::Finite(7)
        );
        assert_eq!(
            serde_json::from_str::<MaxRounds>("\"infinite\"").unwrap(),
            MaxRounds::Infinite
        );
        assert!(serde_json::from_str::<MaxRounds>("0").is_err());
        assert!(serde_json::from_str::<MaxRounds>("\"forever\"").is_err());
    }

    #[test]
    fn finite_games_end_at_max_rounds() {
        assert!(!MaxRounds::Finite(4).is_final_round(3));
        assert!(MaxRounds::Finite(4).is_final_round(4));
        assert!(!MaxRounds::Infinite.is_final_round(1_000));
    }
}
