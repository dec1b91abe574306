//! Error codes for the Papayoo backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Papayoo backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Action invalid for the current phase
    PhaseMismatch,
    /// Acting seat is not the current player
    OutOfTurn,
    /// Card not in hand
    CardNotInHand,
    /// Must follow suit
    MustFollowSuit,
    /// Wrong pass-selection size or duplicate card ids
    WrongSelectionCount,
    /// Player count outside 3..=8
    InvalidPlayerCount,
    /// Suit not eligible for the requested operation
    InvalidSuit,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource not found
    /// Game not found
    GameNotFound,
    /// Player not found
    PlayerNotFound,
    /// General not found error
    NotFound,

    // System errors
    /// Snapshot store unavailable (transient; caller may retry)
    StoreUnavailable,
    /// Stored snapshot could not be decoded
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Canonical wire string for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::PhaseMismatch => "PHASE_MISMATCH",
            ErrorCode::OutOfTurn => "OUT_OF_TURN",
            ErrorCode::CardNotInHand => "CARD_NOT_IN_HAND",
            ErrorCode::MustFollowSuit => "MUST_FOLLOW_SUIT",
            ErrorCode::WrongSelectionCount => "WRONG_SELECTION_COUNT",
            ErrorCode::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            ErrorCode::InvalidSuit => "INVALID_SUIT",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::GameNotFound => "GAME_NOT_FOUND",
            ErrorCode::PlayerNotFound => "PLAYER_NOT_FOUND",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::DataCorruption => "DATA_CORRUPTION",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
