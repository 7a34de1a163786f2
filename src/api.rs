use anyhow::{Context, Result, anyhow};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::flatten::{Cell, Row};
use crate::http_client::http_client;
use crate::model::{Event, ScoreEvent, Snapshot, Sport};

const API_HOST: &str = "https://api.the-odds-api.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddsFormat {
    American,
    Decimal,
}

impl OddsFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "american" => Ok(OddsFormat::American),
            "decimal" => Ok(OddsFormat::Decimal),
            other => Err(anyhow!(
                "unsupported odds format {other:?}, expected american or decimal"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OddsFormat::American => "american",
            OddsFormat::Decimal => "decimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Iso,
    Unix,
}

impl DateFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(DateFormat::Iso),
            "unix" => Ok(DateFormat::Unix),
            other => Err(anyhow!(
                "unsupported date format {other:?}, expected iso or unix"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Iso => "iso",
            DateFormat::Unix => "unix",
        }
    }
}

/// Which bookmakers appear in a response. The API takes either a region
/// list or an explicit bookmaker list, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Regions(String),
    Bookmakers(String),
}

impl Selection {
    fn query_pair(&self) -> (&'static str, String) {
        match self {
            Selection::Regions(regions) => ("regions", regions.clone()),
            Selection::Bookmakers(bookmakers) => ("bookmakers", bookmakers.clone()),
        }
    }
}

/// Parameters shared by every odds-returning endpoint.
#[derive(Debug, Clone)]
pub struct OddsQuery {
    pub markets: String,
    pub selection: Selection,
    pub odds_format: OddsFormat,
    pub date_format: DateFormat,
    pub event_ids: Option<String>,
}

impl OddsQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            self.selection.query_pair(),
            ("markets", self.markets.clone()),
            ("oddsFormat", self.odds_format.as_str().to_string()),
            ("dateFormat", self.date_format.as_str().to_string()),
        ];
        if let Some(event_ids) = self.event_ids.as_ref() {
            pairs.push(("eventIds", event_ids.clone()));
        }
        pairs
    }
}

/// Quota counters surfaced on every response. Kept as the raw header
/// strings because they go straight into the workbook metadata rows.
#[derive(Debug, Clone, Default)]
pub struct UsageMeta {
    pub used: Option<String>,
    pub remaining: Option<String>,
}

impl UsageMeta {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        Self {
            used: header("x-requests-used"),
            remaining: header("x-requests-remaining"),
        }
    }

    pub fn meta_rows(&self) -> Vec<Row> {
        vec![
            vec![
                Cell::text("Requests Used"),
                Cell::opt_text(self.used.as_deref()),
            ],
            vec![
                Cell::text("Requests Remaining"),
                Cell::opt_text(self.remaining.as_deref()),
            ],
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub usage: UsageMeta,
    pub data: T,
}

pub struct OddsApiClient {
    api_key: String,
}

impl OddsApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<ApiResponse<T>> {
        let client = http_client()?;
        let url = format!("{API_HOST}{path}");

        let mut pairs: Vec<(&'static str, String)> = vec![("apiKey", self.api_key.clone())];
        pairs.extend_from_slice(query);

        let resp = client
            .get(&url)
            .query(&pairs)
            .send()
            .with_context(|| format!("request to {path} failed"))?;
        let status = resp.status();
        let usage = UsageMeta::from_headers(resp.headers());
        let body = resp.text().context("failed reading response body")?;
        if !status.is_success() {
            let snippet = body
                .trim()
                .replace('\n', " ")
                .replace('\r', " ")
                .chars()
                .take(220)
                .collect::<String>();
            return Err(anyhow!("odds api http {} on {}: {}", status, path, snippet));
        }

        let data = serde_json::from_str(&body)
            .with_context(|| format!("invalid json from {path}"))?;
        Ok(ApiResponse { usage, data })
    }

    /// In-season sports, or every known sport when `all` is set. This call
    /// does not count against the request quota.
    pub fn sports(&self, all: bool) -> Result<ApiResponse<Vec<Sport>>> {
        let query = if all {
            vec![("all", "true".to_string())]
        } else {
            Vec::new()
        };
        self.get_json("/v4/sports", &query)
    }

    pub fn requests_used(&self) -> Result<Option<String>> {
        Ok(self.sports(false)?.usage.used)
    }

    pub fn requests_remaining(&self) -> Result<Option<String>> {
        Ok(self.sports(false)?.usage.remaining)
    }

    /// Upcoming and live games with current odds.
    pub fn odds(&self, sport: &str, query: &OddsQuery) -> Result<ApiResponse<Vec<Event>>> {
        self.get_json(&format!("/v4/sports/{sport}/odds"), &query.query_pairs())
    }

    /// Odds for a single game; the only way to reach player-prop markets.
    pub fn event_odds(
        &self,
        sport: &str,
        event_id: &str,
        query: &OddsQuery,
    ) -> Result<ApiResponse<Event>> {
        self.get_json(
            &format!("/v4/sports/{sport}/events/{event_id}/odds"),
            &query.query_pairs(),
        )
    }

    /// Live and recently completed games. `days_from` of zero keeps the
    /// parameter off the request, returning live and upcoming games only.
    pub fn scores(
        &self,
        sport: &str,
        days_from: u8,
        date_format: DateFormat,
    ) -> Result<ApiResponse<Vec<ScoreEvent>>> {
        let mut query = vec![("dateFormat", date_format.as_str().to_string())];
        if days_from != 0 {
            query.push(("daysFrom", days_from.to_string()));
        }
        self.get_json(&format!("/v4/sports/{sport}/scores"), &query)
    }

    /// Odds as they stood at the snapshot closest at or before `date`.
    pub fn historical_odds(
        &self,
        sport: &str,
        query: &OddsQuery,
        date: &str,
    ) -> Result<ApiResponse<Snapshot<Vec<Event>>>> {
        let mut pairs = query.query_pairs();
        pairs.push(("date", date.to_string()));
        self.get_json(&format!("/v4/historical/sports/{sport}/odds"), &pairs)
    }

    /// Event listing for a historical snapshot, without bookmaker odds.
    pub fn historical_events(
        &self,
        sport: &str,
        date: &str,
    ) -> Result<ApiResponse<Snapshot<Vec<Event>>>> {
        let query = vec![("date", date.to_string())];
        self.get_json(&format!("/v4/historical/sports/{sport}/events"), &query)
    }

    /// Historical odds for a single event at the given snapshot.
    pub fn historical_event_odds(
        &self,
        sport: &str,
        event_id: &str,
        query: &OddsQuery,
        date: &str,
    ) -> Result<ApiResponse<Snapshot<Event>>> {
        let mut pairs = query.query_pairs();
        pairs.push(("date", date.to_string()));
        self.get_json(
            &format!("/v4/historical/sports/{sport}/events/{event_id}/odds"),
            &pairs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(selection: Selection) -> OddsQuery {
        OddsQuery {
            markets: "h2h,spreads".to_string(),
            selection,
            odds_format: OddsFormat::American,
            date_format: DateFormat::Iso,
            event_ids: None,
        }
    }

    #[test]
    fn regions_and_bookmakers_are_mutually_exclusive_pairs() {
        let by_region = query(Selection::Regions("us".to_string()));
        let pairs = by_region.query_pairs();
        assert!(pairs.contains(&("regions", "us".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "bookmakers"));

        let by_book = query(Selection::Bookmakers("draftkings,fanduel".to_string()));
        let pairs = by_book.query_pairs();
        assert!(pairs.contains(&("bookmakers", "draftkings,fanduel".to_string())));
        assert!(!pairs.iter().any(|(k, _)| *k == "regions"));
    }

    #[test]
    fn event_ids_only_sent_when_present() {
        let mut q = query(Selection::Regions("us".to_string()));
        assert!(!q.query_pairs().iter().any(|(k, _)| *k == "eventIds"));
        q.event_ids = Some("a1,b2".to_string());
        assert!(q.query_pairs().contains(&("eventIds", "a1,b2".to_string())));
    }

    #[test]
    fn format_tokens_round_trip() {
        assert_eq!(OddsFormat::parse("American").unwrap().as_str(), "american");
        assert_eq!(DateFormat::parse(" unix ").unwrap().as_str(), "unix");
        assert!(OddsFormat::parse("fractional").is_err());
        assert!(DateFormat::parse("rfc3339").is_err());
    }

    #[test]
    fn usage_meta_rows_carry_header_values_verbatim() {
        let usage = UsageMeta {
            used: Some("12".to_string()),
            remaining: None,
        };
        let rows = usage.meta_rows();
        assert_eq!(rows[0][1], Cell::text("12"));
        assert_eq!(rows[1][1], Cell::Empty);
    }
}
