use std::collections::BTreeMap;

use anyhow::Result;

use oddsheet::api::OddsApiClient;
use oddsheet::config::{self, ExportConfig, WindowConfig};
use oddsheet::flatten::{self, OUTCOME_HEADER};
use oddsheet::history::{self, ForwardWindow};
use oddsheet::sheet::{self, Report};

fn main() -> Result<()> {
    config::load_dotenv();
    let cfg = ExportConfig::from_env()?;
    let window = WindowConfig::from_env()?;
    let client = OddsApiClient::new(cfg.api_key.clone());
    let query = cfg.odds_query();

    let commence_times = discover_commence_times(&client, &cfg, &window)?;

    // Non-featured markets are only served per event, so closing lines
    // come from one single-event snapshot per game.
    let mut report = Report::new(flatten::with_prefix_column("timestamp", OUTCOME_HEADER));
    for (event_id, commence) in &commence_times {
        println!("Querying closing lines for event {event_id} at {commence}");
        let resp = client.historical_event_odds(cfg.sport_key(), event_id, &query, commence)?;
        report.meta = resp.usage.meta_rows();

        let snapshot = resp.data;
        report.rows.extend(flatten::snapshot_outcome_rows(
            &snapshot.timestamp,
            &snapshot.data,
        ));
    }

    sheet::save_report(&cfg.spreadsheet_file, &cfg.sheet_name, &report)?;
    println!("Data saved to {}", cfg.spreadsheet_file.display());
    Ok(())
}

fn discover_commence_times(
    client: &OddsApiClient,
    cfg: &ExportConfig,
    window: &WindowConfig,
) -> Result<BTreeMap<String, String>> {
    let from = history::format_snapshot(window.from);
    let to = history::format_snapshot(window.to);

    let mut commence_times = BTreeMap::new();
    for date in ForwardWindow::new(window.from, window.to, window.interval_mins) {
        println!("Gathering games {date}");
        let events = client.historical_events(cfg.sport_key(), &date)?;
        for event in &events.data.data {
            if event.commence_time >= from && event.commence_time <= to {
                commence_times.insert(event.id.clone(), event.commence_time.clone());
            }
        }
    }
    Ok(commence_times)
}
