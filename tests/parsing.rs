use std::fs;
use std::path::PathBuf;

use oddsheet::flatten::{
    self, Cell, OUTCOME_HEADER, SCORE_HEADER, SLOT_HEADER, flatten_event_outcomes, flatten_events,
    score_rows,
};
use oddsheet::model::{Event, ScoreEvent, Snapshot};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn odds_fixture_flattens_to_one_row_per_market() {
    let raw = read_fixture("odds_response.json");
    let events: Vec<Event> = serde_json::from_str(&raw).expect("fixture should parse");
    assert_eq!(events.len(), 2);

    let rows = flatten_events(&events);
    // First event: 2 markets + 1 market over two bookmakers; second event
    // has no bookmakers and contributes nothing.
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert_eq!(row.len(), SLOT_HEADER.len());
    }

    let h2h = &rows[0];
    assert_eq!(h2h[2], Cell::text("draftkings"));
    assert_eq!(h2h[7], Cell::text("Kansas City Chiefs"));
    assert_eq!(h2h[8], Cell::Number(-210.0));
    assert_eq!(h2h[13], Cell::Empty);

    let totals = &rows[1];
    assert_eq!(totals[6], Cell::text("totals"));
    assert_eq!(totals[7], Cell::text("Over"));
    assert_eq!(totals[9], Cell::Number(41.5));
    assert_eq!(totals[13], Cell::Empty);

    let spreads = &rows[2];
    assert_eq!(spreads[2], Cell::text("fanduel"));
    assert_eq!(spreads[9], Cell::Number(-5.5));
    assert_eq!(spreads[12], Cell::Number(5.5));
}

#[test]
fn event_odds_fixture_yields_one_row_per_outcome() {
    let raw = read_fixture("event_odds_response.json");
    let event: Event = serde_json::from_str(&raw).expect("fixture should parse");

    let rows = flatten_event_outcomes(&event);
    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert_eq!(row.len(), OUTCOME_HEADER.len());
    }

    // Rows keep upstream order, including the duplicate Over labels.
    assert_eq!(rows[0][7], Cell::text("Over"));
    assert_eq!(rows[0][8], Cell::text("Patrick Mahomes"));
    assert_eq!(rows[2][8], Cell::text("Aidan O'Connell"));
    assert_eq!(rows[2][10], Cell::Number(0.5));
    // Per-outcome rows carry the market last_update, not the bookmaker one.
    assert_eq!(rows[0][3], Cell::text("2024-01-07T17:40:55Z"));
    assert_eq!(rows[3][3], Cell::text("2024-01-07T17:41:30Z"));
}

#[test]
fn historical_fixture_keeps_cursors_and_prefixes_timestamp() {
    let raw = read_fixture("historical_snapshot.json");
    let snapshot: Snapshot<Vec<Event>> = serde_json::from_str(&raw).expect("fixture should parse");
    assert_eq!(snapshot.timestamp, "2023-09-10T11:55:04Z");
    assert_eq!(
        snapshot.previous_timestamp.as_deref(),
        Some("2023-09-10T11:50:04Z")
    );

    let rows = flatten::snapshot_rows(&snapshot.timestamp, &snapshot.data);
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row[0], Cell::text("2023-09-10T11:55:04Z"));
        assert_eq!(row.len(), SLOT_HEADER.len() + 1);
    }

    // Outcomes arrive away-first here; name matching must still land the
    // home team in the home slot.
    assert_eq!(rows[0][8], Cell::text("New York Yankees"));
    assert_eq!(rows[0][9], Cell::Number(110.0));
    assert_eq!(rows[0][11], Cell::text("Milwaukee Brewers"));
}

#[test]
fn scores_fixture_handles_live_and_pregame_rows() {
    let raw = read_fixture("scores_response.json");
    let events: Vec<ScoreEvent> = serde_json::from_str(&raw).expect("fixture should parse");

    let rows = score_rows(&events);
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.len(), SCORE_HEADER.len());
    }

    let completed = &rows[0];
    assert_eq!(completed[2], Cell::Bool(true));
    assert_eq!(completed[5], Cell::text("10"));
    assert_eq!(completed[7], Cell::text("17"));

    let pregame = &rows[1];
    assert_eq!(pregame[2], Cell::Bool(false));
    assert_eq!(pregame[3], Cell::Empty);
    assert_eq!(pregame[5], Cell::Empty);
    assert_eq!(pregame[7], Cell::Empty);
}

#[test]
fn flattening_fixture_twice_is_byte_identical() {
    let raw = read_fixture("odds_response.json");
    let events: Vec<Event> = serde_json::from_str(&raw).expect("fixture should parse");
    assert_eq!(flatten_events(&events), flatten_events(&events));
}
