//! Match, Entrant, and BracketRound, plus the loosely typed record the store hands us.

use crate::models::error::ResultsError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Highest accepted round label. Derived rounds only ever add a few dozen on top of this.
pub const MAX_ROUND: u32 = 1 << 16;

/// One side of a match.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entrant {
    /// A real team, by name.
    Team(String),
    /// Whoever wins the given match; that match has no decisive result yet.
    WinnerOf(MatchId),
    /// Free pass: the other side advances without playing.
    Bye,
}

impl Entrant {
    /// Team name if this entrant is a real team.
    pub fn team_name(&self) -> Option<&str> {
        match self {
            Entrant::Team(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, Entrant::Team(_))
    }
}

impl std::fmt::Display for Entrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entrant::Team(name) => write!(f, "{}", name),
            Entrant::WinnerOf(id) => write!(f, "winner of {}", id),
            Entrant::Bye => write!(f, "bye"),
        }
    }
}

/// A single fixture between two entrants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team_a: Entrant,
    pub team_b: Entrant,
    /// None if not yet played.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// Knockout round number; None for table format.
    pub round: Option<u32>,
}

impl Match {
    /// Create an unplayed match between two named teams with a fresh id.
    pub fn new(
        team_a: impl Into<String>,
        team_b: impl Into<String>,
        round: Option<u32>,
    ) -> Result<Self, ResultsError> {
        let team_a = validate_team_name(Some(team_a.into()), "team_a")?;
        let team_b = validate_team_name(Some(team_b.into()), "team_b")?;
        if let Some(r) = round.filter(|r| *r > MAX_ROUND) {
            return Err(ResultsError::invalid(format!("round {} out of range (max {})", r, MAX_ROUND)));
        }
        if team_a == team_b {
            return Err(ResultsError::invalid(format!("team {:?} cannot play itself", team_a)));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            team_a: Entrant::Team(team_a),
            team_b: Entrant::Team(team_b),
            score_a: None,
            score_b: None,
            round,
        })
    }

    /// Create a completed match. Mostly useful for tests and imports.
    pub fn scored(
        team_a: impl Into<String>,
        team_b: impl Into<String>,
        score_a: u32,
        score_b: u32,
        round: Option<u32>,
    ) -> Result<Self, ResultsError> {
        let mut m = Self::new(team_a, team_b, round)?;
        m.set_score(score_a, score_b);
        Ok(m)
    }

    /// Build a match from already-resolved entrants (bracket derivation).
    pub(crate) fn between(id: MatchId, team_a: Entrant, team_b: Entrant, round: Option<u32>) -> Self {
        Self {
            id,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
            round,
        }
    }

    /// Both scores present.
    pub fn is_completed(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    pub fn set_score(&mut self, score_a: u32, score_b: u32) {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
    }

    pub fn clear_score(&mut self) {
        self.score_a = None;
        self.score_b = None;
    }

    /// Same two entrants in the same order.
    pub fn same_pairing(&self, other: &Match) -> bool {
        self.team_a == other.team_a && self.team_b == other.team_b
    }

    /// Same two entrants, either side.
    pub fn same_entrants(&self, other: &Match) -> bool {
        self.same_pairing(other) || (self.team_a == other.team_b && self.team_b == other.team_a)
    }
}

/// One elimination stage of a knockout tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketRound {
    pub round: u32,
    pub matches: Vec<Match>,
}

impl BracketRound {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Match document as the store holds it: every field optional, scores signed.
/// Convert with `Match::try_from` to validate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMatchRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub team_a: Option<String>,
    #[serde(default)]
    pub team_b: Option<String>,
    #[serde(default)]
    pub score_a: Option<i64>,
    #[serde(default)]
    pub score_b: Option<i64>,
    #[serde(default)]
    pub round: Option<i64>,
}

impl TryFrom<RawMatchRecord> for Match {
    type Error = ResultsError;

    fn try_from(raw: RawMatchRecord) -> Result<Self, Self::Error> {
        let round = raw
            .round
            .map(|r| u32::try_from(r).map_err(|_| ResultsError::invalid(format!("round {} out of range", r))))
            .transpose()?;
        let mut m = Match::new(
            validate_team_name(raw.team_a, "team_a")?,
            validate_team_name(raw.team_b, "team_b")?,
            round,
        )?;
        if let Some(id) = raw.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            m.id = Uuid::parse_str(id)
                .map_err(|_| ResultsError::invalid(format!("match id {:?} is not a UUID", id)))?;
        }
        m.score_a = validate_score(raw.score_a, "score_a")?;
        m.score_b = validate_score(raw.score_b, "score_b")?;
        Ok(m)
    }
}

fn validate_team_name(name: Option<String>, field: &str) -> Result<String, ResultsError> {
    let name = name.ok_or_else(|| ResultsError::invalid(format!("{} is missing", field)))?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ResultsError::invalid(format!("{} is empty", field)));
    }
    Ok(trimmed.to_string())
}

fn validate_score(score: Option<i64>, field: &str) -> Result<Option<u32>, ResultsError> {
    score
        .map(|s| {
            u32::try_from(s).map_err(|_| ResultsError::invalid(format!("{} must be non-negative, got {}", field, s)))
        })
        .transpose()
}
