//! Errors raised by the results engine and the match store.

use crate::models::game::MatchId;
use crate::models::tournament::{TournamentFormat, TournamentId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a knockout match has no winner yet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeterminedReason {
    /// At least one score is missing.
    NotPlayed,
    /// Both scores present and level; knockout matches cannot end level.
    Draw,
    /// One side is still waiting on the winner of an earlier match.
    AwaitingPriorResult,
}

impl std::fmt::Display for UndeterminedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UndeterminedReason::NotPlayed => write!(f, "match not yet played"),
            UndeterminedReason::Draw => write!(f, "knockout match ended in a draw"),
            UndeterminedReason::AwaitingPriorResult => write!(f, "waiting on an earlier result"),
        }
    }
}

/// Errors that can occur while validating match data or computing results.
#[derive(Debug, Error)]
pub enum ResultsError {
    /// A match record is missing required fields or carries impossible values.
    #[error("Invalid match data: {reason}")]
    InvalidMatchData { reason: String },

    /// A knockout match has no decisive winner.
    #[error("Match {match_id} has no winner: {reason}")]
    UndeterminedWinner {
        match_id: MatchId,
        reason: UndeterminedReason,
    },

    /// Format string is neither "Tables" nor "Knockout".
    #[error("Unsupported tournament format: {0:?}")]
    UnsupportedFormat(String),

    /// Standings were requested for a format that has none.
    #[error("{0} tournaments have no standings table")]
    NoStandings(TournamentFormat),

    /// Fixture generation needs at least two teams.
    #[error("Need at least 2 teams to generate fixtures (found {found})")]
    NotEnoughTeams { found: usize },

    #[error("Tournament {0} not found")]
    TournamentNotFound(TournamentId),

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ResultsError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ResultsError::InvalidMatchData {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input (as opposed to lookups that missed).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ResultsError::InvalidMatchData { .. }
                | ResultsError::UndeterminedWinner { .. }
                | ResultsError::UnsupportedFormat(_)
                | ResultsError::NoStandings(_)
                | ResultsError::NotEnoughTeams { .. }
                | ResultsError::Csv(_)
        )
    }
}
