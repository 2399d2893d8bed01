//! Run orchestration for the command line harness: load a scenario, run it
//! through the gate and the engine, render the report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::{Market, Scenario};
use crate::export;

pub struct RunOptions {
    /// Scenario file to price; the built-in demo scenario when `None`.
    pub scenario_path: Option<PathBuf>,
    pub market: Market,
    /// Also write the CSV report here.
    pub csv_path: Option<PathBuf>,
}

pub fn run(options: RunOptions) -> Result<()> {
    let scenario = match &options.scenario_path {
        Some(path) => load_scenario(path)?,
        None => {
            info!(market = options.market.label(), "no scenario file given; using the built-in demo");
            Scenario::demo(options.market)
        }
    };

    let model = scenario
        .validate()
        .context("scenario rejected by the validation gate")?;
    let results = model.calculate(scenario.products());
    info!(
        market = scenario.market().label(),
        products = scenario.products().len(),
        total_sale_price_usd = results.core.total_sale_price_usd,
        "calculation finished"
    );

    print!("{}", export::text_report(&results));

    if let Some(path) = &options.csv_path {
        export::write_csv(path, &results)
            .with_context(|| format!("failed to write CSV report to {}", path.display()))?;
        info!("CSV report written to {}", path.display());
    }

    Ok(())
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse scenario file {}", path.display()))
}
