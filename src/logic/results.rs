//! Results facade: pick the calculator for a tournament format.

use crate::logic::bracket::{champion, reconcile_bracket, validate_knockout};
use crate::logic::standings::compute_standings_with;
use crate::models::{
    BracketRound, Match, ResultsError, TeamStanding, TournamentFormat, TournamentOptions,
};
use serde::{Deserialize, Serialize};

/// Output of [`compute_results`]: a table for round robin, rounds for knockout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentResults {
    Standings(Vec<TeamStanding>),
    Bracket(Vec<BracketRound>),
}

impl TournamentResults {
    pub fn format(&self) -> TournamentFormat {
        match self {
            TournamentResults::Standings(_) => TournamentFormat::Tables,
            TournamentResults::Bracket(_) => TournamentFormat::Knockout,
        }
    }

    pub fn standings(&self) -> Option<&[TeamStanding]> {
        match self {
            TournamentResults::Standings(s) => Some(s),
            TournamentResults::Bracket(_) => None,
        }
    }

    /// Standings table, or `NoStandings` for a knockout bracket.
    pub fn require_standings(&self) -> Result<&[TeamStanding], ResultsError> {
        self.standings()
            .ok_or_else(|| ResultsError::NoStandings(self.format()))
    }

    pub fn rounds(&self) -> Option<&[BracketRound]> {
        match self {
            TournamentResults::Bracket(r) => Some(r),
            TournamentResults::Standings(_) => None,
        }
    }

    /// Table leader or bracket winner, if there is one yet.
    pub fn leader(&self) -> Option<&str> {
        match self {
            TournamentResults::Standings(s) => s.first().map(|row| row.team_name.as_str()),
            TournamentResults::Bracket(r) => champion(r),
        }
    }
}

/// Compute results for a format given by name ("Tables" or "Knockout") with default options.
///
/// Any other format string is `UnsupportedFormat`; there is no fallback.
pub fn compute_results(format: &str, matches: &[Match]) -> Result<TournamentResults, ResultsError> {
    compute_results_with(format.parse()?, matches, &TournamentOptions::default())
}

/// Compute results for a typed format with explicit options.
///
/// Knockout input is rejected if any completed match ended level.
pub fn compute_results_with(
    format: TournamentFormat,
    matches: &[Match],
    options: &TournamentOptions,
) -> Result<TournamentResults, ResultsError> {
    match format {
        TournamentFormat::Tables => Ok(TournamentResults::Standings(compute_standings_with(
            matches,
            &options.scoring,
        ))),
        TournamentFormat::Knockout => {
            validate_knockout(matches)?;
            Ok(TournamentResults::Bracket(
                reconcile_bracket(matches, options.odd_round).collect(),
            ))
        }
    }
}
