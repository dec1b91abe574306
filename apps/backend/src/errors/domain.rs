//! Domain-level error type used across the domain and service layers.
//!
//! This error type is HTTP- and store-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds: the rule an action violated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Action targets a phase the game is not in.
    PhaseMismatch,
    /// Acting seat is not the current player.
    OutOfTurn,
    /// Card id not present in the acting player's hand.
    CardNotInHand,
    /// Play violates suit-following legality.
    MustFollowSuit,
    /// Pass selection has the wrong size or duplicate ids.
    WrongSelectionCount,
    /// Player count outside the supported 3..=8 range.
    InvalidPlayerCount,
    /// Supplied suit is not eligible (e.g. Payoo as papayoo suit).
    InvalidSuit,
    Other(String),
}

/// Domain-level not found entities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Other(String),
}

/// Infra error kinds to distinguish operational failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or rule violation.
    Validation(ValidationKind, String),
    /// Missing resource in domain terms.
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures (the only retryable category).
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}
