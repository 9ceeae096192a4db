//! TeamStanding and the scoring rules that turn results into points.

use serde::{Deserialize, Serialize};

/// Points awarded per result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for ScoringRules {
    /// Conventional 3/1/0.
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// A team's aggregated record in a round-robin tournament. Derived, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_name: String,
    /// Completed matches played; always `wins + draws + losses`.
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    /// Goals scored (goals-for).
    pub goals: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamStanding {
    /// Empty row for a team. All counters start at zero.
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            ..Self::default()
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals) - i64::from(self.goals_against)
    }

    /// Record a win with the given score line.
    pub fn add_win(&mut self, scored: u32, conceded: u32) {
        self.wins = self.wins.saturating_add(1);
        self.add_played(scored, conceded);
    }

    pub fn add_draw(&mut self, scored: u32, conceded: u32) {
        self.draws = self.draws.saturating_add(1);
        self.add_played(scored, conceded);
    }

    pub fn add_loss(&mut self, scored: u32, conceded: u32) {
        self.losses = self.losses.saturating_add(1);
        self.add_played(scored, conceded);
    }

    /// Recompute `points` from the counters. Saturates at `u32::MAX`.
    pub fn apply_scoring(&mut self, rules: &ScoringRules) {
        self.points = self
            .wins
            .saturating_mul(rules.win)
            .saturating_add(self.draws.saturating_mul(rules.draw))
            .saturating_add(self.losses.saturating_mul(rules.loss));
    }

    // Counters saturate rather than wrap on absurd score lines.
    fn add_played(&mut self, scored: u32, conceded: u32) {
        self.played = self.played.saturating_add(1);
        self.goals = self.goals.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
    }
}
