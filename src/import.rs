//! CSV import of match records and export of standings tables.
//!
//! Match CSV header: `id,team_a,team_b,score_a,score_b,round`. Empty cells mean "absent";
//! the `id` and `round` columns may be left out entirely.

use crate::models::{Match, RawMatchRecord, ResultsError, TeamStanding};
use serde::Serialize;
use std::io;

/// Parse match rows without validating them.
pub fn read_match_records<R: io::Read>(reader: R) -> Result<Vec<RawMatchRecord>, ResultsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<RawMatchRecord>() {
        records.push(row?);
    }
    Ok(records)
}

/// Parse and validate match rows. Fails on the first invalid row.
pub fn read_matches<R: io::Read>(reader: R) -> Result<Vec<Match>, ResultsError> {
    read_match_records(reader)?
        .into_iter()
        .map(Match::try_from)
        .collect()
}

#[derive(Serialize)]
struct StandingRow<'a> {
    team: &'a str,
    played: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    goals: u32,
    goals_against: u32,
    goal_difference: i64,
    points: u32,
}

/// Write a standings table as CSV, in the order given.
pub fn write_standings<W: io::Write>(writer: W, standings: &[TeamStanding]) -> Result<(), ResultsError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for s in standings {
        wtr.serialize(StandingRow {
            team: &s.team_name,
            played: s.played,
            wins: s.wins,
            draws: s.draws,
            losses: s.losses,
            goals: s.goals,
            goals_against: s.goals_against,
            goal_difference: s.goal_difference(),
            points: s.points,
        })?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
