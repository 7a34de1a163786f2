use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};

use crate::api::{DateFormat, OddsFormat, OddsQuery, Selection};
use crate::history::parse_snapshot;

/// Best-effort env file loading; real env vars always win.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

fn env_trimmed(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_trimmed(key).unwrap_or_else(|| default.to_string())
}

/// Settings shared by every exporter binary.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub spreadsheet_file: PathBuf,
    pub sheet_name: String,
    pub api_key: String,
    pub sport_keys: Vec<String>,
    pub markets: String,
    pub selection: Selection,
    pub odds_format: OddsFormat,
    pub date_format: DateFormat,
}

impl ExportConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env_trimmed("ODDS_API_KEY").context("ODDS_API_KEY is not set")?;
        let spreadsheet_file = PathBuf::from(env_or("ODDS_SPREADSHEET_FILE", "odds_data.xlsx"));
        let sheet_name = env_or("ODDS_SHEET_NAME", "Sheet1");

        let sport_keys: Vec<String> = env_or("ODDS_SPORT_KEY", "americanfootball_nfl")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if sport_keys.is_empty() {
            return Err(anyhow!("ODDS_SPORT_KEY resolved to no sport keys"));
        }

        let markets = env_or("ODDS_MARKETS", "h2h,spreads");
        // An explicit bookmaker list replaces region selection outright.
        let selection = match env_trimmed("ODDS_BOOKMAKERS") {
            Some(bookmakers) => Selection::Bookmakers(bookmakers),
            None => Selection::Regions(env_or("ODDS_REGIONS", "us")),
        };
        let odds_format = OddsFormat::parse(&env_or("ODDS_FORMAT", "american"))?;
        let date_format = DateFormat::parse(&env_or("ODDS_DATE_FORMAT", "iso"))?;

        Ok(Self {
            spreadsheet_file,
            sheet_name,
            api_key,
            sport_keys,
            markets,
            selection,
            odds_format,
            date_format,
        })
    }

    /// First configured sport, for the single-sport binaries.
    pub fn sport_key(&self) -> &str {
        &self.sport_keys[0]
    }

    pub fn odds_query(&self) -> OddsQuery {
        OddsQuery {
            markets: self.markets.clone(),
            selection: self.selection.clone(),
            odds_format: self.odds_format,
            date_format: self.date_format,
            event_ids: None,
        }
    }
}

/// Poll cadence for the loop binaries. One minute of updates per run.
pub fn updates_per_minute() -> u32 {
    env_trimmed("ODDS_UPDATES_PER_MINUTE")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(12)
        .clamp(1, 60)
}

pub fn poll_pause(updates_per_minute: u32) -> Duration {
    Duration::from_secs_f64(60.0 / updates_per_minute as f64)
}

/// How many past days of completed games the scores endpoint should cover.
/// Zero keeps the response to live and upcoming games.
pub fn days_from() -> u8 {
    env_trimmed("ODDS_DAYS_FROM")
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(1)
        .min(3)
}

/// The [from, to] range and stepping for the historical binaries.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub interval_mins: i64,
}

impl WindowConfig {
    pub fn from_env() -> Result<Self> {
        let from = parse_snapshot(
            &env_trimmed("ODDS_FROM_DATE").context("ODDS_FROM_DATE is not set")?,
        )
        .context("ODDS_FROM_DATE")?;
        let to =
            parse_snapshot(&env_trimmed("ODDS_TO_DATE").context("ODDS_TO_DATE is not set")?)
                .context("ODDS_TO_DATE")?;
        let interval_mins = env_trimmed("ODDS_INTERVAL_MINS")
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(60)
            .max(1);
        Ok(Self {
            from,
            to,
            interval_mins,
        })
    }
}
