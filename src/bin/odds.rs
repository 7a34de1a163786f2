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

    let multi_sport = cfg.sport_keys.len() > 1;
    let mut report = if multi_sport {
        Report::new(flatten::with_prefix_column("sport_key", SLOT_HEADER))
    } else {
        Report::new(SLOT_HEADER)
    };

    for sport in &cfg.sport_keys {
        println!("Fetching odds for {sport}");
        let resp = client.odds(sport, &query)?;
        if multi_sport {
            report.rows.extend(flatten::tagged_rows(sport, &resp.data));
        } else {
            report.rows.extend(flatten::flatten_events(&resp.data));
        }
        report.meta = resp.usage.meta_rows();
    }

    sheet::save_report(&cfg.spreadsheet_file, &cfg.sheet_name, &report)?;
    println!("Data saved to {}", cfg.spreadsheet_file.display());
    Ok(())
}
