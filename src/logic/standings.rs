//! Round-robin table: aggregate completed matches into ranked team standings.

use crate::models::{Match, ScoringRules, TeamStanding};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Compute the standings table with the default 3/1/0 scoring.
///
/// 1. Every team named in any match gets a row (pending-only teams stay at zero).
/// 2. Each completed match is tallied exactly once: higher score wins, equal scores draw.
/// 3. Rows are ranked by points, then goals scored, then team name.
pub fn compute_standings(matches: &[Match]) -> Vec<TeamStanding> {
    compute_standings_with(matches, &ScoringRules::default())
}

/// Same as [`compute_standings`] with a custom points scheme.
pub fn compute_standings_with(matches: &[Match], rules: &ScoringRules) -> Vec<TeamStanding> {
    let mut table: BTreeMap<&str, TeamStanding> = BTreeMap::new();

    for m in matches {
        for name in [m.team_a.team_name(), m.team_b.team_name()].into_iter().flatten() {
            table.entry(name).or_insert_with(|| TeamStanding::new(name));
        }
    }

    for m in matches {
        let (Some(a), Some(b)) = (m.team_a.team_name(), m.team_b.team_name()) else {
            continue;
        };
        let (Some(score_a), Some(score_b)) = (m.score_a, m.score_b) else {
            continue;
        };
        apply_result(&mut table, a, score_a, b, score_b);
    }

    let mut standings: Vec<TeamStanding> = table
        .into_values()
        .map(|mut s| {
            s.apply_scoring(rules);
            s
        })
        .collect();
    standings.sort_by(rank_order);
    standings
}

/// Ranking comparator: points desc, goals desc, team name asc.
pub fn rank_order(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goals.cmp(&a.goals))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

fn apply_result(
    table: &mut BTreeMap<&str, TeamStanding>,
    a: &str,
    score_a: u32,
    b: &str,
    score_b: u32,
) {
    // Rows exist for both names from the first pass.
    match score_a.cmp(&score_b) {
        Ordering::Greater => {
            if let Some(s) = table.get_mut(a) {
                s.add_win(score_a, score_b);
            }
            if let Some(s) = table.get_mut(b) {
                s.add_loss(score_b, score_a);
            }
        }
        Ordering::Less => {
            if let Some(s) = table.get_mut(a) {
                s.add_loss(score_a, score_b);
            }
            if let Some(s) = table.get_mut(b) {
                s.add_win(score_b, score_a);
            }
        }
        Ordering::Equal => {
            if let Some(s) = table.get_mut(a) {
                s.add_draw(score_a, score_b);
            }
            if let Some(s) = table.get_mut(b) {
                s.add_draw(score_b, score_a);
            }
        }
    }
}
