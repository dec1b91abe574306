//! Authoritative game snapshot and invariant helpers.
//!
//! The `Game` struct is the single source of truth for one room. It is
//! mutated only by the transition functions in this domain layer, then
//! handed to the store for persistence. Field names serialize in
//! camelCase to match the snapshot JSON consumed by polling clients.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

use super::cards_types::{Card, CardId, Suit};
use super::rules::MaxRounds;

/// Per-round / per-game phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Passing,
    RollingDie,
    Playing,
    TrickEnd,
    RoundEnd,
    GameEnd,
}

/// One card laid on the table, attributed to the seat that played it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickPlay {
    pub player_id: String,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub is_bot: bool,
    /// Sorted; only ever revealed to this seat.
    pub hand: Vec<Card>,
    /// Cards taken in won tricks this round.
    pub collected_cards: Vec<Card>,
    /// Staged (unconfirmed) pass selection.
    pub selected_cards: Vec<CardId>,
    /// Confirmed pass selection, awaiting table-wide rotation.
    pub cards_to_pass: Vec<CardId>,
    pub score: i32,
    pub last_round_points: i32,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_bot: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_bot,
            hand: Vec::new(),
            collected_cards: Vec::new(),
            selected_cards: Vec::new(),
            cards_to_pass: Vec::new(),
            score: 0,
            last_round_points: 0,
        }
    }

    pub fn has_card(&self, card_id: CardId) -> bool {
        self.hand.iter().any(|c| c.id == card_id)
    }
}

/// The authoritative snapshot for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub room_code: String,
    pub player_count: usize,
    pub players: Vec<Player>,
    pub phase: Phase,
    pub round_number: u32,
    pub max_rounds: MaxRounds,
    pub papayoo_suit: Option<Suit>,
    /// Seat index of the player expected to act.
    pub current_player: usize,
    pub lead_suit: Option<Suit>,
    pub current_trick: Vec<TrickPlay>,
    /// Completed tricks this round, in play order.
    pub trick_history: Vec<Vec<TrickPlay>>,
    pub trick_count: u32,
    /// How many cards each seat passes this round.
    pub cards_to_pass: usize,
    /// Unix millis of the last mutation; polling clients use this to
    /// detect staleness.
    pub last_update: i64,
    /// Human-readable status line shown to all seats.
    pub message: String,
}

/// Current wall-clock time as unix milliseconds.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

impl Game {
    /// Seat index after `seat`, wrapping around the table.
    pub fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.player_count
    }

    pub fn current_player_ref(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// Resolve a player id to its seat index; fails closed on unknown ids.
    pub fn seat_of(&self, player_id: &str) -> Result<usize, DomainError> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Player,
                    format!("no player {player_id} in room {}", self.room_code),
                )
            })
    }

    /// Touch the snapshot after a mutation.
    pub fn stamp(&mut self, message: impl Into<String>) {
        self.last_update = now_millis();
        self.message = message.into();
    }

    /// Bump `last_update` without changing the status line.
    pub fn touch(&mut self) {
        self.last_update = now_millis();
    }
}

/// Guard: the game must be in `expected`.
pub fn require_phase(game: &Game, expected: Phase) -> Result<(), DomainError> {
    if game.phase == expected {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("expected phase {expected:?}, game is in {:?}", game.phase),
        ))
    }
}

/// Guard: `seat` must be the seat expected to act.
pub fn require_current_player(game: &Game, seat: usize) -> Result<(), DomainError> {
    if game.current_player == seat {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!(
                "seat {seat} acted but seat {} is current",
                game.current_player
            ),
        ))
    }
}

/// Guard: the acting seat must hold `card_id`.
pub fn require_card_in_hand(player: &Player, card_id: CardId) -> Result<Card, DomainError> {
    player
        .hand
        .iter()
        .find(|c| c.id == card_id)
        .copied()
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("card {card_id} is not in {}'s hand", player.id),
            )
        })
}
