use std::collections::BTreeMap;

use anyhow::Result;

use oddsheet::api::OddsApiClient;
use oddsheet::config::{self, ExportConfig, WindowConfig};
use oddsheet::flatten::{self, SLOT_HEADER};
use oddsheet::history::{self, ForwardWindow};
use oddsheet::sheet::{self, Report};

fn main() -> Result<()> {
    config::load_dotenv();
    let cfg = ExportConfig::from_env()?;
    let window = WindowConfig::from_env()?;
    let client = OddsApiClient::new(cfg.api_key.clone());

    let commence_times = discover_commence_times(&client, &cfg, &window)?;

    // One snapshot fetch per start slate covers every game in it.
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (id, commence) in &commence_times {
        grouped.entry(commence.clone()).or_default().push(id.clone());
    }

    let mut report = Report::new(flatten::with_prefix_column("timestamp", SLOT_HEADER));
    for (commence, event_ids) in &grouped {
        println!("Querying closing lines for commence time {commence}");
        let mut query = cfg.odds_query();
        query.event_ids = Some(event_ids.join(","));
        let resp = client.historical_odds(cfg.sport_key(), &query, commence)?;
        report.meta = resp.usage.meta_rows();
        report
            .rows
            .extend(flatten::snapshot_rows(&resp.data.timestamp, &resp.data.data));
    }

    sheet::save_report(&cfg.spreadsheet_file, &cfg.sheet_name, &report)?;
    println!("Data saved to {}", cfg.spreadsheet_file.display());
    Ok(())
}

/// Walk the window forward collecting event ids and their commence times;
/// the snapshot at a game's commence time holds its closing lines.
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
            // ISO timestamps compare correctly as strings.
            if event.commence_time >= from && event.commence_time <= to {
                commence_times.insert(event.id.clone(), event.commence_time.clone());
            }
        }
    }
    Ok(commence_times)
}
