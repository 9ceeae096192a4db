//! Single-elimination bracket: match winners, next-round pairings, and the full bracket.

use crate::models::{
    BracketRound, Entrant, Match, MatchId, OddRoundPolicy, ResultsError, UndeterminedReason,
};
use std::collections::BTreeMap;
use std::iter::FusedIterator;
use uuid::Uuid;

const BYE_SEED: &[u8] = b"bye";

/// Winner of a knockout match.
///
/// A team facing a bye wins without playing. Otherwise both scores must be present and
/// unequal; a draw, a missing score, or a placeholder entrant is `UndeterminedWinner`.
/// Two byes is `InvalidMatchData`.
pub fn winner_of(m: &Match) -> Result<&str, ResultsError> {
    let undetermined = |reason| ResultsError::UndeterminedWinner {
        match_id: m.id,
        reason,
    };

    let (a, b) = match (&m.team_a, &m.team_b) {
        (Entrant::Team(a), Entrant::Team(b)) => (a, b),
        (Entrant::Team(a), Entrant::Bye) => return Ok(a),
        (Entrant::Bye, Entrant::Team(b)) => return Ok(b),
        (Entrant::Bye, Entrant::Bye) => {
            return Err(ResultsError::invalid(format!("match {} has no team on either side", m.id)))
        }
        _ => return Err(undetermined(UndeterminedReason::AwaitingPriorResult)),
    };
    let (Some(score_a), Some(score_b)) = (m.score_a, m.score_b) else {
        return Err(undetermined(UndeterminedReason::NotPlayed));
    };
    match score_a.cmp(&score_b) {
        std::cmp::Ordering::Greater => Ok(a),
        std::cmp::Ordering::Less => Ok(b),
        std::cmp::Ordering::Equal => Err(undetermined(UndeterminedReason::Draw)),
    }
}

/// Pair winners of matches (0,1), (2,3), ... into the next round.
///
/// Undecided matches advance a `WinnerOf` placeholder instead of a team. A round of one
/// match is the final and yields nothing. The unpaired last match of an odd-length round
/// is dropped or given a bye depending on `policy`; a leftover that is itself a bye match
/// always advances, so a team drawn a bye is never knocked out unplayed. Derived ids are a
/// function of the parent ids, so the same input always produces the same round.
pub fn next_round(current: &[Match], policy: OddRoundPolicy) -> Vec<Match> {
    if current.len() <= 1 {
        return Vec::new();
    }
    let round = Some(round_number(current).saturating_add(1));

    let pairs = current.chunks_exact(2);
    let leftover = pairs.remainder();
    let mut next: Vec<Match> = pairs
        .map(|pair| {
            Match::between(
                derived_id(pair[0].id, pair[1].id.as_bytes()),
                advancing(&pair[0]),
                advancing(&pair[1]),
                round,
            )
        })
        .collect();

    if let [last] = leftover {
        if policy == OddRoundPolicy::Drop && !has_bye(last) {
            return next;
        }
        next.push(Match::between(
            derived_id(last.id, BYE_SEED),
            advancing(last),
            Entrant::Bye,
            round,
        ));
    }
    next
}

fn has_bye(m: &Match) -> bool {
    m.team_a == Entrant::Bye || m.team_b == Entrant::Bye
}

/// Every round from `first_round` through the final, computed lazily.
pub fn build_full_bracket(first_round: &[Match], policy: OddRoundPolicy) -> BracketRounds {
    BracketRounds {
        pending: Some(first_round.to_vec()),
        policy,
        recorded: BTreeMap::new(),
    }
}

/// Build the bracket from a tournament's stored matches.
///
/// The lowest round present is the first round. Derived later-round matches are replaced by
/// a stored match of the same round holding the same two entrants (either side), preferring
/// the one with the derived id, so recorded scores drive progression. Stored matches that no
/// longer fit the bracket are ignored.
pub fn reconcile_bracket(matches: &[Match], policy: OddRoundPolicy) -> BracketRounds {
    let mut recorded: BTreeMap<u32, Vec<Match>> = BTreeMap::new();
    for m in matches {
        recorded.entry(m.round.unwrap_or(1)).or_default().push(m.clone());
    }
    let first = recorded.pop_first().map(|(_, first)| first);
    BracketRounds {
        pending: first,
        policy,
        recorded,
    }
}

/// Reject completed knockout matches that ended level.
pub fn validate_knockout(matches: &[Match]) -> Result<(), ResultsError> {
    match matches
        .iter()
        .find(|m| m.is_completed() && m.score_a == m.score_b)
    {
        Some(m) => Err(ResultsError::UndeterminedWinner {
            match_id: m.id,
            reason: UndeterminedReason::Draw,
        }),
        None => Ok(()),
    }
}

/// Winner of the final, once it is decided.
pub fn champion(rounds: &[BracketRound]) -> Option<&str> {
    match rounds.last()?.matches.as_slice() {
        [final_match] => winner_of(final_match).ok(),
        _ => None,
    }
}

/// Derived team-vs-team matches the store does not hold yet.
pub fn unrecorded_fixtures(rounds: &[BracketRound], recorded: &[Match]) -> Vec<Match> {
    rounds
        .iter()
        .flat_map(|r| r.matches.iter())
        .filter(|m| m.team_a.is_team() && m.team_b.is_team())
        .filter(|m| {
            !recorded
                .iter()
                .any(|r| r.id == m.id || (r.round == m.round && r.same_entrants(m)))
        })
        .cloned()
        .collect()
}

/// Lazy sequence of bracket rounds; see [`build_full_bracket`].
#[derive(Clone, Debug)]
pub struct BracketRounds {
    pending: Option<Vec<Match>>,
    policy: OddRoundPolicy,
    /// Stored matches by round, consulted as each round is derived.
    recorded: BTreeMap<u32, Vec<Match>>,
}

impl Iterator for BracketRounds {
    type Item = BracketRound;

    fn next(&mut self) -> Option<BracketRound> {
        let matches = self.pending.take().filter(|m| !m.is_empty())?;
        if matches.len() > 1 {
            let mut next = next_round(&matches, self.policy);
            self.substitute_recorded(&mut next);
            self.pending = Some(next);
        }
        Some(BracketRound {
            round: round_number(&matches),
            matches,
        })
    }
}

impl FusedIterator for BracketRounds {}

impl BracketRounds {
    fn substitute_recorded(&mut self, next: &mut [Match]) {
        let Some(round) = next.first().and_then(|m| m.round) else {
            return;
        };
        let Some(stored) = self.recorded.remove(&round) else {
            return;
        };
        for derived in next.iter_mut() {
            let found = stored
                .iter()
                .find(|s| s.id == derived.id && s.same_entrants(derived))
                .or_else(|| stored.iter().find(|s| s.same_entrants(derived)));
            if let Some(found) = found {
                *derived = found.clone();
            }
        }
    }
}

/// Team (or placeholder) that moves on from `m`.
fn advancing(m: &Match) -> Entrant {
    if m.team_a == Entrant::Bye && m.team_b == Entrant::Bye {
        return Entrant::Bye;
    }
    match winner_of(m) {
        Ok(name) => Entrant::Team(name.to_string()),
        Err(_) => Entrant::WinnerOf(m.id),
    }
}

/// Round label of a round; unlabelled first rounds count as round 1.
fn round_number(matches: &[Match]) -> u32 {
    matches.iter().find_map(|m| m.round).unwrap_or(1)
}

fn derived_id(parent: MatchId, salt: &[u8]) -> MatchId {
    Uuid::new_v5(&parent, salt)
}
