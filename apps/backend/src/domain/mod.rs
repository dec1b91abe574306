//! Pure rules engine: no I/O, no persistence, no HTTP.
//!
//! The service layer owns orchestration (store round-trips, bot
//! chaining); everything in this module operates on an in-memory
//! `Game` value and is deterministic given an injected RNG.

pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod passing;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod transitions;
pub mod tricks;
pub mod voids;

pub use cards_types::{Card, CardId, Suit};
pub use player_view::{redact_for, HandCard, RedactedGame};
pub use rules::{cards_to_pass, MaxRounds, MAX_PLAYERS, MIN_PLAYERS, TARGET_SCORE};
pub use state::{Game, Phase, Player, TrickPlay};
pub use transitions::{init_game, PlayOutcome, SeatSpec};
pub use voids::VoidTable;

#[cfg(test)]
mod tests_game_flow;
#[cfg(test)]
mod tests_props;
