//! Results logic: standings, knockout brackets, the format facade, fixture setup.

mod bracket;
mod results;
mod setup;
mod standings;

pub use bracket::{
    build_full_bracket, champion, next_round, reconcile_bracket, unrecorded_fixtures,
    validate_knockout, winner_of, BracketRounds,
};
pub use results::{compute_results, compute_results_with, TournamentResults};
pub use setup::{generate_first_round, generate_round_robin};
pub use standings::{compute_standings, compute_standings_with, rank_order};
