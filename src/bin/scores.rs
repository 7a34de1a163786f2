use anyhow::Result;

use oddsheet::api::OddsApiClient;
use oddsheet::config::{self, ExportConfig};
use oddsheet::flatten::{self, SCORE_HEADER};
use oddsheet::sheet::{self, Report};

fn main() -> Result<()> {
    config::load_dotenv();
    let cfg = ExportConfig::from_env()?;
    let client = OddsApiClient::new(cfg.api_key.clone());

    let resp = client.scores(cfg.sport_key(), config::days_from(), cfg.date_format)?;

    let mut report = Report::new(SCORE_HEADER);
    report.meta = resp.usage.meta_rows();
    report.rows = flatten::score_rows(&resp.data);

    sheet::save_report(&cfg.spreadsheet_file, &cfg.sheet_name, &report)?;
    println!("Scores data saved to {}", cfg.spreadsheet_file.display());
    Ok(())
}
