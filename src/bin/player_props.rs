use anyhow::Result;

use oddsheet::api::OddsApiClient;
use oddsheet::config::{self, ExportConfig};
use oddsheet::flatten::{self, OUTCOME_HEADER};
use oddsheet::sheet::{self, Report};

fn main() -> Result<()> {
    config::load_dotenv();
    let cfg = ExportConfig::from_env()?;
    let client = OddsApiClient::new(cfg.api_key.clone());

    // Prop markets are only served by the single-event endpoint, so the
    // discovery pass lists events off the cheap h2h market first.
    let mut discovery = cfg.odds_query();
    discovery.markets = "h2h".to_string();
    let events = client.odds(cfg.sport_key(), &discovery)?;
    if events.data.is_empty() {
        println!("No events found");
        return Ok(());
    }

    let query = cfg.odds_query();
    let mut report = Report::new(OUTCOME_HEADER);
    for event in &events.data {
        println!(
            "Fetching {} for {} @ {}",
            cfg.markets, event.away_team, event.home_team
        );
        let resp = client.event_odds(cfg.sport_key(), &event.id, &query)?;
        report.rows.extend(flatten::flatten_event_outcomes(&resp.data));
        report.meta = resp.usage.meta_rows();
    }

    sheet::save_report(&cfg.spreadsheet_file, &cfg.sheet_name, &report)?;
    println!("Data saved to {}", cfg.spreadsheet_file.display());
    Ok(())
}
