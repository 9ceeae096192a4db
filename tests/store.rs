//! Integration tests for the in-memory match store and fetch-then-compute.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tournament_results::{
    results_for, Entrant, InMemoryStore, RawMatchRecord, ResultsError, TournamentFormat,
    TournamentId, TournamentOptions, MAX_ROUND,
};
use uuid::Uuid;

fn store_with(format: TournamentFormat) -> (InMemoryStore, TournamentId) {
    let mut store = InMemoryStore::new();
    let id = store
        .create_tournament("Cup", format, TournamentOptions::default())
        .unwrap()
        .id;
    (store, id)
}

fn record(a: &str, b: &str, score_a: Option<i64>, score_b: Option<i64>) -> RawMatchRecord {
    RawMatchRecord {
        team_a: Some(a.to_string()),
        team_b: Some(b.to_string()),
        score_a,
        score_b,
        ..RawMatchRecord::default()
    }
}

fn teams(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn blank_tournament_name_is_rejected() {
    let mut store = InMemoryStore::new();
    assert!(matches!(
        store.create_tournament("  ", TournamentFormat::Tables, TournamentOptions::default()),
        Err(ResultsError::InvalidMatchData { .. })
    ));
    assert!(store.is_empty());
}

#[test]
fn missing_tournament_is_reported() {
    let store = InMemoryStore::new();
    let id = Uuid::new_v4();
    assert!(matches!(
        results_for(&store, id),
        Err(ResultsError::TournamentNotFound(missing)) if missing == id
    ));
}

#[test]
fn add_match_validates_at_boundary() {
    let (mut store, id) = store_with(TournamentFormat::Tables);
    let missing_team = RawMatchRecord {
        team_a: Some("A".to_string()),
        ..RawMatchRecord::default()
    };
    assert!(matches!(
        store.add_match(id, missing_team),
        Err(ResultsError::InvalidMatchData { .. })
    ));
    assert!(matches!(
        store.add_match(id, record("A", "A", None, None)),
        Err(ResultsError::InvalidMatchData { .. })
    ));
    assert!(matches!(
        store.add_match(id, record("A", "B", Some(-2), Some(0))),
        Err(ResultsError::InvalidMatchData { .. })
    ));
    assert!(store.tournament(id).unwrap().matches.is_empty());
}

#[test]
fn record_score_then_compute() {
    let (mut store, id) = store_with(TournamentFormat::Tables);
    let ab = store.add_match(id, record("A", "B", None, None)).unwrap();
    store.add_match(id, record("A", "C", Some(1), Some(1))).unwrap();
    store.record_score(id, ab, 2, 1).unwrap();

    let results = results_for(&store, id).unwrap();
    let table = results.standings().unwrap();
    assert_eq!(table[0].team_name, "A");
    assert_eq!(table[0].points, 4);

    store.clear_score(id, ab).unwrap();
    let results = results_for(&store, id).unwrap();
    assert_eq!(results.standings().unwrap()[0].points, 1);
}

#[test]
fn record_score_on_unknown_match() {
    let (mut store, id) = store_with(TournamentFormat::Tables);
    let match_id = Uuid::new_v4();
    assert!(matches!(
        store.record_score(id, match_id, 1, 0),
        Err(ResultsError::MatchNotFound(missing)) if missing == match_id
    ));
}

#[test]
fn import_is_all_or_nothing() {
    let (mut store, id) = store_with(TournamentFormat::Tables);
    let records = vec![record("A", "B", Some(1), Some(0)), record("C", "", None, None)];
    assert!(store.import_matches(id, records).is_err());
    assert!(store.tournament(id).unwrap().matches.is_empty());

    let dup = Uuid::new_v4().to_string();
    let records = vec![
        RawMatchRecord {
            id: Some(dup.clone()),
            ..record("A", "B", None, None)
        },
        RawMatchRecord {
            id: Some(dup),
            ..record("C", "D", None, None)
        },
    ];
    assert!(store.import_matches(id, records).is_err());
    assert!(store.tournament(id).unwrap().matches.is_empty());

    let records = vec![record("A", "B", Some(1), Some(0)), record("C", "D", None, None)];
    assert_eq!(store.import_matches(id, records).unwrap(), 2);
}

#[test]
fn round_robin_fixtures() {
    let (mut store, id) = store_with(TournamentFormat::Tables);
    let mut rng = StdRng::seed_from_u64(7);
    let count = store
        .generate_fixtures(id, &teams(&["A", "B", "C", "D"]), &mut rng)
        .unwrap();
    assert_eq!(count, 6);
    assert!(store
        .tournament(id)
        .unwrap()
        .matches
        .iter()
        .all(|m| m.round.is_none() && !m.is_completed()));

    // Fixtures only once.
    assert!(store
        .generate_fixtures(id, &teams(&["A", "B"]), &mut rng)
        .is_err());
}

#[test]
fn fixtures_need_two_distinct_teams() {
    let (mut store, id) = store_with(TournamentFormat::Knockout);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        store.generate_fixtures(id, &teams(&["A"]), &mut rng),
        Err(ResultsError::NotEnoughTeams { found: 1 })
    ));
    assert!(matches!(
        store.generate_fixtures(id, &teams(&["A", "a"]), &mut rng),
        Err(ResultsError::InvalidMatchData { .. })
    ));
}

#[test]
fn knockout_fixtures_give_odd_team_a_bye() {
    let (mut store, id) = store_with(TournamentFormat::Knockout);
    let mut rng = StdRng::seed_from_u64(42);
    store
        .generate_fixtures(id, &teams(&["A", "B", "C", "D", "E"]), &mut rng)
        .unwrap();
    let matches = &store.tournament(id).unwrap().matches;
    assert_eq!(matches.len(), 3);
    assert!(matches.iter().all(|m| m.round == Some(1)));
    assert_eq!(matches.iter().filter(|m| m.team_b == Entrant::Bye).count(), 1);
}

#[test]
fn advance_bracket_persists_decided_pairings() {
    let (mut store, id) = store_with(TournamentFormat::Knockout);
    let first = [
        record("A", "B", Some(2), Some(0)),
        record("C", "D", Some(0), Some(1)),
    ];
    let records: Vec<RawMatchRecord> = first
        .into_iter()
        .map(|r| RawMatchRecord {
            round: Some(1),
            ..r
        })
        .collect();
    store.import_matches(id, records).unwrap();

    let added = store.advance_bracket(id).unwrap();
    assert_eq!(added.len(), 1);
    // Nothing new the second time.
    assert!(store.advance_bracket(id).unwrap().is_empty());

    store.record_score(id, added[0], 0, 2).unwrap();
    let results = results_for(&store, id).unwrap();
    assert_eq!(results.leader(), Some("D"));
}

#[test]
fn advance_bracket_needs_knockout() {
    let (mut store, id) = store_with(TournamentFormat::Tables);
    assert!(store.advance_bracket(id).is_err());
}

#[test]
fn retain_removes_tournaments() {
    let (mut store, id) = store_with(TournamentFormat::Tables);
    assert_eq!(store.retain(|t| t.id != id), 1);
    assert!(matches!(
        store.tournament(id),
        Err(ResultsError::TournamentNotFound(_))
    ));
}

#[test]
fn odd_knockout_keeps_bye_team_in_bracket() {
    let (mut store, id) = store_with(TournamentFormat::Knockout);
    let mut rng = StdRng::seed_from_u64(42);
    store
        .generate_fixtures(id, &teams(&["A", "B", "C", "D", "E"]), &mut rng)
        .unwrap();
    let bye_team = store
        .tournament(id)
        .unwrap()
        .matches
        .iter()
        .find(|m| m.team_b == Entrant::Bye)
        .map(|m| m.team_a.clone())
        .unwrap();

    let results = results_for(&store, id).unwrap();
    let rounds = results.rounds().unwrap();
    let sizes: Vec<usize> = rounds.iter().map(|r| r.len()).collect();
    assert_eq!(sizes, [3, 2, 1]);
    assert!(rounds[1]
        .matches
        .iter()
        .any(|m| m.team_a == bye_team || m.team_b == bye_team));
    assert_eq!(rounds[2].matches[0].team_b, bye_team);
}

#[test]
fn round_label_is_bounded_at_boundary() {
    let (mut store, id) = store_with(TournamentFormat::Knockout);
    let huge = RawMatchRecord {
        round: Some(i64::from(u32::MAX)),
        ..record("A", "B", None, None)
    };
    assert!(matches!(
        store.add_match(id, huge),
        Err(ResultsError::InvalidMatchData { .. })
    ));
    let max = RawMatchRecord {
        round: Some(i64::from(MAX_ROUND)),
        ..record("A", "B", None, None)
    };
    assert!(store.add_match(id, max).is_ok());
}
