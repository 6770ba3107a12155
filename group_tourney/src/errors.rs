//! Error types for tournament operations.

use crate::{roster::PersonId, schedule::MatchId, slots::GroupId};
use thiserror::Error;

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Tournament operation errors
///
/// No variant is fatal. Every failure leaves the state untouched; only
/// constraint violations are reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// Privileged event from a session that never logged in
    #[error("Admin privilege required")]
    PrivilegeDenied,

    /// Malformed or out-of-range input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Not enough selected people to fill every slot
    #[error("Need at least {needed} selected players to randomize (currently {current}).")]
    InsufficientPlayers { needed: usize, current: usize },

    /// Not enough selected referee captains for the captain slots
    #[error(
        "Need at least {needed} selected players marked as Ref + Captain for slot A (currently {current})."
    )]
    InsufficientCaptains { needed: usize, current: usize },

    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),
}

impl TournamentError {
    /// Whether the caller should be told about this failure.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            TournamentError::InsufficientPlayers { .. }
                | TournamentError::InsufficientCaptains { .. }
        )
    }
}
