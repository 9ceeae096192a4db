//! Tournament, TournamentFormat, and the options that drive result computation.

use crate::models::error::ResultsError;
use crate::models::game::{Match, MatchId};
use crate::models::standing::ScoringRules;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How results are derived from matches.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TournamentFormat {
    /// Round robin; results are a standings table.
    Tables,
    /// Single elimination; results are bracket rounds.
    Knockout,
}

impl FromStr for TournamentFormat {
    type Err = ResultsError;

    /// Exact match only. Unknown strings are an error, never a silent default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tables" => Ok(TournamentFormat::Tables),
            "Knockout" => Ok(TournamentFormat::Knockout),
            other => Err(ResultsError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentFormat::Tables => write!(f, "Tables"),
            TournamentFormat::Knockout => write!(f, "Knockout"),
        }
    }
}

/// What to do with the unpaired last match of an odd-length knockout round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddRoundPolicy {
    /// Leave it out of the next round.
    #[default]
    Drop,
    /// Its winner advances against a bye.
    Bye,
}

/// Knobs for standings and bracket computation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentOptions {
    pub scoring: ScoringRules,
    pub odd_round: OddRoundPolicy,
}

/// A named competition and the matches recorded for it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub options: TournamentOptions,
    pub matches: Vec<Match>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty tournament. The name is trimmed and must not be blank.
    pub fn new(
        name: impl Into<String>,
        format: TournamentFormat,
        options: TournamentOptions,
    ) -> Result<Self, ResultsError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ResultsError::invalid("tournament name is empty"));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            format,
            options,
            matches: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    fn match_mut(&mut self, id: MatchId) -> Result<&mut Match, ResultsError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ResultsError::MatchNotFound(id))
    }

    /// Add a match. Ids must be unique within the tournament.
    pub fn add_match(&mut self, m: Match) -> Result<MatchId, ResultsError> {
        if self.match_by_id(m.id).is_some() {
            return Err(ResultsError::invalid(format!("duplicate match id {}", m.id)));
        }
        let id = m.id;
        self.matches.push(m);
        self.touch();
        Ok(id)
    }

    /// Set (or overwrite) the score of a match.
    pub fn record_score(&mut self, id: MatchId, score_a: u32, score_b: u32) -> Result<(), ResultsError> {
        self.match_mut(id)?.set_score(score_a, score_b);
        self.touch();
        Ok(())
    }

    /// Mark a match as not yet played again.
    pub fn clear_score(&mut self, id: MatchId) -> Result<(), ResultsError> {
        self.match_mut(id)?.clear_score();
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
