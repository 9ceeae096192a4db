//! Tournament results engine: library with models, results logic, and a match store adapter.

pub mod import;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    build_full_bracket, champion, compute_results, compute_results_with, compute_standings,
    compute_standings_with, generate_first_round, generate_round_robin, next_round,
    reconcile_bracket, unrecorded_fixtures, validate_knockout, winner_of, BracketRounds,
    TournamentResults,
};
pub use models::{
    BracketRound, Entrant, Match, MatchId, OddRoundPolicy, RawMatchRecord, ResultsError,
    ScoringRules, TeamStanding, Tournament, TournamentFormat, TournamentId, TournamentOptions,
    UndeterminedReason, MAX_ROUND,
};
pub use store::{results_for, InMemoryStore, MatchStore};
