//! Match store adapter: where match records come from and where score updates go.
//!
//! The engine never reaches a store on its own. Callers hold a [`MatchStore`] and pass it to
//! [`results_for`], which fetches, validates, and computes in one step.

use crate::logic::{
    compute_results_with, generate_first_round, generate_round_robin, reconcile_bracket,
    unrecorded_fixtures, validate_knockout, TournamentResults,
};
use crate::models::{
    BracketRound, Match, MatchId, RawMatchRecord, ResultsError, Tournament, TournamentFormat,
    TournamentId, TournamentOptions,
};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Read side of a match store.
pub trait MatchStore {
    fn tournament_format(&self, id: TournamentId) -> Result<TournamentFormat, ResultsError>;

    fn tournament_options(&self, id: TournamentId) -> Result<TournamentOptions, ResultsError>;

    /// All matches of a tournament, already validated.
    fn matches(&self, id: TournamentId) -> Result<Vec<Match>, ResultsError>;
}

/// Fetch a tournament's matches from `store` and compute its results.
pub fn results_for<S: MatchStore + ?Sized>(
    store: &S,
    id: TournamentId,
) -> Result<TournamentResults, ResultsError> {
    let format = store.tournament_format(id)?;
    let options = store.tournament_options(id)?;
    let matches = store.matches(id)?;
    log::debug!(
        "Computing {} results for tournament {} from {} match(es)",
        format,
        id,
        matches.len()
    );
    compute_results_with(format, &matches, &options)
}

/// Tournaments held in memory, keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tournaments: HashMap<TournamentId, Tournament>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    /// Create an empty tournament and return it.
    pub fn create_tournament(
        &mut self,
        name: impl Into<String>,
        format: TournamentFormat,
        options: TournamentOptions,
    ) -> Result<&Tournament, ResultsError> {
        let tournament = Tournament::new(name, format, options)?;
        let id = tournament.id;
        log::info!("Created {} tournament {:?} ({})", format, tournament.name, id);
        Ok(self.tournaments.entry(id).or_insert(tournament))
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, ResultsError> {
        self.tournaments
            .get(&id)
            .ok_or(ResultsError::TournamentNotFound(id))
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Result<&mut Tournament, ResultsError> {
        self.tournaments
            .get_mut(&id)
            .ok_or(ResultsError::TournamentNotFound(id))
    }

    pub fn remove(&mut self, id: TournamentId) -> Result<Tournament, ResultsError> {
        self.tournaments
            .remove(&id)
            .ok_or(ResultsError::TournamentNotFound(id))
    }

    /// Keep only tournaments for which `keep` returns true. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Tournament) -> bool) -> usize {
        let before = self.tournaments.len();
        self.tournaments.retain(|_, t| keep(t));
        before - self.tournaments.len()
    }

    /// Validate a raw record and add it to the tournament.
    pub fn add_match(
        &mut self,
        id: TournamentId,
        record: RawMatchRecord,
    ) -> Result<MatchId, ResultsError> {
        let m = Match::try_from(record)?;
        self.tournament_mut(id)?.add_match(m)
    }

    /// Validate every record, then add them all. Nothing is added if any record is invalid.
    pub fn import_matches(
        &mut self,
        id: TournamentId,
        records: Vec<RawMatchRecord>,
    ) -> Result<usize, ResultsError> {
        let matches = records
            .into_iter()
            .map(Match::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let tournament = self.tournament_mut(id)?;

        let mut seen: HashSet<MatchId> = tournament.matches.iter().map(|m| m.id).collect();
        if let Some(dup) = matches.iter().find(|m| !seen.insert(m.id)) {
            return Err(ResultsError::invalid(format!("duplicate match id {}", dup.id)));
        }

        let count = matches.len();
        for m in matches {
            tournament.add_match(m)?;
        }
        log::info!("Imported {} match(es) into tournament {}", count, id);
        Ok(count)
    }

    pub fn record_score(
        &mut self,
        id: TournamentId,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
    ) -> Result<(), ResultsError> {
        self.tournament_mut(id)?
            .record_score(match_id, score_a, score_b)?;
        log::debug!("Recorded {}-{} for match {} in tournament {}", score_a, score_b, match_id, id);
        Ok(())
    }

    pub fn clear_score(&mut self, id: TournamentId, match_id: MatchId) -> Result<(), ResultsError> {
        self.tournament_mut(id)?.clear_score(match_id)
    }

    /// Create the opening fixtures: all pairings for Tables, a shuffled round 1 for Knockout.
    /// Only valid while the tournament has no matches.
    pub fn generate_fixtures<R: Rng + ?Sized>(
        &mut self,
        id: TournamentId,
        teams: &[String],
        rng: &mut R,
    ) -> Result<usize, ResultsError> {
        let tournament = self.tournament_mut(id)?;
        if !tournament.matches.is_empty() {
            return Err(ResultsError::invalid("tournament already has matches"));
        }
        let fixtures = match tournament.format {
            TournamentFormat::Tables => generate_round_robin(teams)?,
            TournamentFormat::Knockout => generate_first_round(teams, rng)?,
        };
        let count = fixtures.len();
        for m in fixtures {
            tournament.add_match(m)?;
        }
        log::info!("Generated {} fixture(s) for {} team(s) in tournament {}", count, teams.len(), id);
        Ok(count)
    }

    /// Persist bracket matches whose two teams are now known but which are not stored yet,
    /// so their scores can be recorded. Returns the ids added.
    pub fn advance_bracket(&mut self, id: TournamentId) -> Result<Vec<MatchId>, ResultsError> {
        let tournament = self.tournament_mut(id)?;
        if tournament.format != TournamentFormat::Knockout {
            return Err(ResultsError::invalid("only knockout tournaments have a bracket"));
        }
        validate_knockout(&tournament.matches)?;
        let rounds: Vec<BracketRound> =
            reconcile_bracket(&tournament.matches, tournament.options.odd_round).collect();
        let fixtures = unrecorded_fixtures(&rounds, &tournament.matches);

        let mut added = Vec::with_capacity(fixtures.len());
        for m in fixtures {
            added.push(tournament.add_match(m)?);
        }
        if !added.is_empty() {
            log::info!("Advanced bracket of tournament {}: {} new match(es)", id, added.len());
        }
        Ok(added)
    }
}

impl MatchStore for InMemoryStore {
    fn tournament_format(&self, id: TournamentId) -> Result<TournamentFormat, ResultsError> {
        Ok(self.tournament(id)?.format)
    }

    fn tournament_options(&self, id: TournamentId) -> Result<TournamentOptions, ResultsError> {
        Ok(self.tournament(id)?.options)
    }

    fn matches(&self, id: TournamentId) -> Result<Vec<Match>, ResultsError> {
        Ok(self.tournament(id)?.matches.clone())
    }
}
