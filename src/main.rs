mod app;
mod domain;
mod export;
mod util;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::app::RunOptions;
use crate::domain::Market;

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
struct Args {
    /// Scenario file (JSON). Runs a built-in demo scenario when omitted.
    scenario: Option<PathBuf>,

    /// Market for the built-in demo scenario.
    #[arg(long, value_enum, default_value = "dubai")]
    market: MarketArg,

    /// Also write the CSV report to this path.
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MarketArg {
    Dubai,
    Serbia,
}

impl From<MarketArg> for Market {
    fn from(value: MarketArg) -> Self {
        match value {
            MarketArg::Dubai => Market::Dubai,
            MarketArg::Serbia => Market::Serbia,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    app::run(RunOptions {
        scenario_path: args.scenario,
        market: args.market.into(),
        csv_path: args.csv,
    })
}
