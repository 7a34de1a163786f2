use std::thread;

use anyhow::Result;

use oddsheet::api::OddsApiClient;
use oddsheet::config::{self, ExportConfig};
use oddsheet::flatten::{self, SLOT_HEADER};
use oddsheet::sheet::{self, Report};

fn main() -> Result<()> {
    config::load_dotenv();
    let cfg = ExportConfig::from_env()?;
    let client = OddsApiClient::new(cfg.api_key.clone());
    let query = cfg.odds_query();
    let updates = config::updates_per_minute();
    let pause = config::poll_pause(updates);

    for iteration in 0..updates {
        let resp = client.odds(cfg.sport_key(), &query)?;

        // Fresh report per iteration: the saved file is a full rewrite.
        let mut report = Report::new(SLOT_HEADER);
        report.meta = resp.usage.meta_rows();
        report.rows = flatten::flatten_events(&resp.data);
        sheet::save_report(&cfg.spreadsheet_file, &cfg.sheet_name, &report)?;
        println!(
            "Updated data saved to {} ({} rows)",
            cfg.spreadsheet_file.display(),
            report.rows.len()
        );

        if iteration + 1 < updates {
            thread::sleep(pause);
        }
    }

    Ok(())
}
