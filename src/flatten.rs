use crate::model::{Bookmaker, Event, Market, Outcome, ScoreEvent};

/// One scalar spreadsheet cell. `Empty` leaves the cell unwritten, which is
/// how absent outcome slots and missing points come out in the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(v) => Cell::Text(v.to_string()),
            None => Cell::Empty,
        }
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        match value {
            Some(v) => Cell::Number(v),
            None => Cell::Empty,
        }
    }
}

pub type Row = Vec<Cell>;

pub const SLOT_HEADER: &[&str] = &[
    "id",
    "commence_time",
    "bookmaker",
    "last_update",
    "home_team",
    "away_team",
    "market",
    "label_1",
    "odd_1",
    "point_1",
    "label_2",
    "odd_2",
    "point_2",
    "odd_draw",
];

pub const OUTCOME_HEADER: &[&str] = &[
    "id",
    "commence_time",
    "bookmaker",
    "last_update",
    "home_team",
    "away_team",
    "market",
    "label",
    "description",
    "price",
    "point",
];

pub const SCORE_HEADER: &[&str] = &[
    "id",
    "commence_time",
    "completed",
    "last_update",
    "home_team",
    "home_score",
    "away_team",
    "away_score",
];

/// How a market's outcomes map onto the home/away/draw output slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketKind {
    /// Outcomes named after the two teams, no draw line.
    TwoWay,
    /// Team-named outcomes plus an optional literal `Draw` outcome.
    ThreeWay,
    /// `Over` fills the home slot and `Under` the away slot.
    Totals,
}

impl MarketKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "totals" | "alternate_totals" => MarketKind::Totals,
            "spreads" | "alternate_spreads" => MarketKind::TwoWay,
            _ => MarketKind::ThreeWay,
        }
    }
}

/// First outcome whose name is string-exact equal to `token`. Duplicate
/// names keep the first hit; no match is not an error.
fn find_outcome<'a>(outcomes: &'a [Outcome], token: &str) -> Option<&'a Outcome> {
    outcomes.iter().find(|o| o.name == token)
}

fn select_slots<'a>(
    market: &'a Market,
    home_team: &str,
    away_team: &str,
) -> (Option<&'a Outcome>, Option<&'a Outcome>, Option<&'a Outcome>) {
    match MarketKind::from_key(&market.key) {
        MarketKind::Totals => (
            find_outcome(&market.outcomes, "Over"),
            find_outcome(&market.outcomes, "Under"),
            None,
        ),
        MarketKind::TwoWay => (
            find_outcome(&market.outcomes, home_team),
            find_outcome(&market.outcomes, away_team),
            None,
        ),
        MarketKind::ThreeWay => (
            find_outcome(&market.outcomes, home_team),
            find_outcome(&market.outcomes, away_team),
            find_outcome(&market.outcomes, "Draw"),
        ),
    }
}

fn slot_row(event: &Event, bookmaker: &Bookmaker, market: &Market) -> Row {
    let (home, away, draw) = select_slots(market, &event.home_team, &event.away_team);
    vec![
        Cell::text(&event.id),
        Cell::text(&event.commence_time),
        Cell::text(&bookmaker.key),
        Cell::text(&bookmaker.last_update),
        Cell::text(&event.home_team),
        Cell::text(&event.away_team),
        Cell::text(&market.key),
        Cell::opt_text(home.map(|o| o.name.as_str())),
        Cell::opt_number(home.map(|o| o.price)),
        Cell::opt_number(home.and_then(|o| o.point)),
        Cell::opt_text(away.map(|o| o.name.as_str())),
        Cell::opt_number(away.map(|o| o.price)),
        Cell::opt_number(away.and_then(|o| o.point)),
        Cell::opt_number(draw.map(|o| o.price)),
    ]
}

/// Slot mode: one row per (event, bookmaker, market) triple, in upstream
/// order. Empty bookmaker or market lists contribute nothing.
pub fn flatten_events(events: &[Event]) -> Vec<Row> {
    let mut rows = Vec::new();
    for event in events {
        for bookmaker in &event.bookmakers {
            for market in &bookmaker.markets {
                rows.push(slot_row(event, bookmaker, market));
            }
        }
    }
    rows
}

fn outcome_row(event: &Event, bookmaker: &Bookmaker, market: &Market, outcome: &Outcome) -> Row {
    vec![
        Cell::text(&event.id),
        Cell::text(&event.commence_time),
        Cell::text(&bookmaker.key),
        Cell::opt_text(market.last_update.as_deref()),
        Cell::text(&event.home_team),
        Cell::text(&event.away_team),
        Cell::text(&market.key),
        Cell::text(&outcome.name),
        Cell::opt_text(outcome.description.as_deref()),
        Cell::Number(outcome.price),
        Cell::opt_number(outcome.point),
    ]
}

/// Per-outcome mode for markets with unbounded outcome counts (player
/// props): one row per leaf outcome, no slot classification.
pub fn flatten_event_outcomes(event: &Event) -> Vec<Row> {
    let mut rows = Vec::new();
    for bookmaker in &event.bookmakers {
        for market in &bookmaker.markets {
            for outcome in &market.outcomes {
                rows.push(outcome_row(event, bookmaker, market, outcome));
            }
        }
    }
    rows
}

fn prefixed(prefix: Cell, rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .map(|mut row| {
            row.insert(0, prefix.clone());
            row
        })
        .collect()
}

/// Header for a prefixed row layout, e.g. `timestamp` + the slot columns.
pub fn with_prefix_column(
    column: &'static str,
    header: &'static [&'static str],
) -> Vec<&'static str> {
    let mut out = Vec::with_capacity(header.len() + 1);
    out.push(column);
    out.extend_from_slice(header);
    out
}

/// Slot rows with the historical snapshot timestamp as the first column.
pub fn snapshot_rows(timestamp: &str, events: &[Event]) -> Vec<Row> {
    prefixed(Cell::text(timestamp), flatten_events(events))
}

/// Per-outcome rows with the snapshot timestamp prepended.
pub fn snapshot_outcome_rows(timestamp: &str, event: &Event) -> Vec<Row> {
    prefixed(Cell::text(timestamp), flatten_event_outcomes(event))
}

/// Slot rows with a sport key column, for multi-sport aggregation.
pub fn tagged_rows(sport_key: &str, events: &[Event]) -> Vec<Row> {
    prefixed(Cell::text(sport_key), flatten_events(events))
}

/// One row per score event; per-side scores picked by exact team-name
/// match, empty when the game has no score entries yet.
pub fn score_rows(events: &[ScoreEvent]) -> Vec<Row> {
    let mut rows = Vec::new();
    for event in events {
        let scores = event.scores.as_deref().unwrap_or(&[]);
        let side = |team: &str| {
            scores
                .iter()
                .find(|s| s.name == team)
                .map(|s| s.score.as_str())
        };
        rows.push(vec![
            Cell::text(&event.id),
            Cell::text(&event.commence_time),
            Cell::Bool(event.completed),
            Cell::opt_text(event.last_update.as_deref()),
            Cell::text(&event.home_team),
            Cell::opt_text(side(&event.home_team)),
            Cell::text(&event.away_team),
            Cell::opt_text(side(&event.away_team)),
        ]);
    }
    rows
}
