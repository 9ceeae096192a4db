//! Setup phase: generate the initial fixtures for a list of teams.

use crate::models::{Entrant, Match, ResultsError};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Every pair of teams plays once. No round labels; order follows the input list.
pub fn generate_round_robin(teams: &[String]) -> Result<Vec<Match>, ResultsError> {
    let teams = validate_teams(teams)?;
    let mut matches = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            matches.push(Match::new(a.as_str(), b.as_str(), None)?);
        }
    }
    Ok(matches)
}

/// Shuffle teams and pair them into round 1 of a knockout bracket.
/// With an odd number of teams the last one drawn gets a bye.
pub fn generate_first_round<R: Rng + ?Sized>(
    teams: &[String],
    rng: &mut R,
) -> Result<Vec<Match>, ResultsError> {
    let mut teams = validate_teams(teams)?;
    teams.shuffle(rng);

    let pairs = teams.chunks_exact(2);
    let leftover = pairs.remainder();
    let mut matches = pairs
        .map(|pair| Match::new(pair[0].as_str(), pair[1].as_str(), Some(1)))
        .collect::<Result<Vec<_>, _>>()?;
    if let [last] = leftover {
        matches.push(Match::between(
            Uuid::new_v4(),
            Entrant::Team(last.clone()),
            Entrant::Bye,
            Some(1),
        ));
    }
    Ok(matches)
}

/// Trim names; reject blanks and duplicates (case-insensitive); need at least two.
fn validate_teams(teams: &[String]) -> Result<Vec<String>, ResultsError> {
    let mut out: Vec<String> = Vec::with_capacity(teams.len());
    for name in teams {
        let name = name.trim();
        if name.is_empty() {
            return Err(ResultsError::invalid("team name is empty"));
        }
        if out.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            return Err(ResultsError::invalid(format!("duplicate team {:?}", name)));
        }
        out.push(name.to_string());
    }
    if out.len() < 2 {
        return Err(ResultsError::NotEnoughTeams { found: out.len() });
    }
    Ok(out)
}
