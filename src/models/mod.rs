//! Data structures for the results engine: matches, standings, tournaments, errors.

mod error;
mod game;
mod standing;
mod tournament;

pub use error::{ResultsError, UndeterminedReason};
pub use game::{BracketRound, Entrant, Match, MatchId, RawMatchRecord, MAX_ROUND};
pub use standing::{ScoringRules, TeamStanding};
pub use tournament::{
    OddRoundPolicy, Tournament, TournamentFormat, TournamentId, TournamentOptions,
};
