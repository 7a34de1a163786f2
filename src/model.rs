use serde::Deserialize;

/// An entry from the `/v4/sports` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Sport {
    pub key: String,
    pub group: String,
    pub title: String,
    #[serde(default)]
    pub active: bool,
}

/// A single fixture from the odds endpoints. The historical events listing
/// returns the same shape without bookmakers.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub id: String,
    pub commence_time: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bookmaker {
    pub key: String,
    pub last_update: String,
    #[serde(default)]
    pub markets: Vec<Market>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Market {
    pub key: String,
    pub last_update: Option<String>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub price: f64,
    pub point: Option<f64>,
    pub description: Option<String>,
}

/// A fixture from the scores endpoint. `scores` is null until a game goes
/// live, and `last_update` stays null for upcoming games.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreEvent {
    pub id: String,
    pub commence_time: String,
    #[serde(default)]
    pub completed: bool,
    pub last_update: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub scores: Option<Vec<TeamScore>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamScore {
    pub name: String,
    pub score: String,
}

/// Envelope returned by the historical endpoints. `previous_timestamp` is
/// absent once the start of recorded history is reached.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot<T> {
    pub timestamp: String,
    pub previous_timestamp: Option<String>,
    pub next_timestamp: Option<String>,
    pub data: T,
}
