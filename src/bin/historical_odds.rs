use anyhow::Result;

use oddsheet::api::OddsApiClient;
use oddsheet::config::{self, ExportConfig, WindowConfig};
use oddsheet::flatten::{self, SLOT_HEADER};
use oddsheet::history::BackwardWindow;
use oddsheet::sheet::{self, Report};

fn main() -> Result<()> {
    config::load_dotenv();
    let cfg = ExportConfig::from_env()?;
    let window = WindowConfig::from_env()?;
    let client = OddsApiClient::new(cfg.api_key.clone());
    let query = cfg.odds_query();

    let mut walk = BackwardWindow::new(window.from, window.to, window.interval_mins);
    let mut report = Report::new(flatten::with_prefix_column("timestamp", SLOT_HEADER));

    while let Some(date) = walk.next_snapshot() {
        println!("Fetching odds for {date}");
        let resp = client.historical_odds(cfg.sport_key(), &query, &date)?;
        report.meta = resp.usage.meta_rows();

        let snapshot = resp.data;
        report
            .rows
            .extend(flatten::snapshot_rows(&snapshot.timestamp, &snapshot.data));

        if snapshot.previous_timestamp.is_none() {
            println!("No earlier historical data available.");
        }
        walk.advance(snapshot.previous_timestamp.as_deref())?;
    }

    sheet::save_report(&cfg.spreadsheet_file, &cfg.sheet_name, &report)?;
    println!("Data saved to {}", cfg.spreadsheet_file.display());
    Ok(())
}
