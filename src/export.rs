//! Report rendering for a finished calculation.
//!
//! The field set, row ordering and two-decimal formatting are kept
//! compatible with previously exported artifacts, so changes here are
//! breaking for anyone diffing old reports.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::domain::entities::{CalculationResult, Currency};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn format_currency(value: f64, currency: Currency) -> String {
    format!("{:.2} {}", value, currency.code())
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Human-readable report: summary block, per-product breakdown, then the
/// final sale totals in both currencies.
pub fn text_report(results: &CalculationResult) -> String {
    let core = &results.core;
    let mut lines = vec![
        "Import Simulation Results".to_string(),
        String::new(),
        format!(
            "Total Factory Cost: {}",
            format_currency(core.total_factory_cost_usd, Currency::Usd)
        ),
        format!(
            "Total Shipping & Customs Cost: {}",
            format_currency(core.shipping_and_customs_cost_usd, Currency::Usd)
        ),
        format!(
            "Per-Unit Gross Profit: {}",
            format_currency(results.per_unit_gross_profit_usd, Currency::Usd)
        ),
        format!(
            "Total Gross Profit: {}",
            format_currency(core.gross_profit_usd, Currency::Usd)
        ),
        format!(
            "Total Gross Margin: {} ({})",
            format_currency(core.total_gross_margin_usd, Currency::Usd),
            format_percent(core.cost_increase_rate)
        ),
        String::new(),
        "Price Breakdown".to_string(),
        format!("{:<32} {:>16} {:>16}", "Product", "Factory Cost", "Sale Price"),
    ];

    for item in &results.product_breakdown {
        lines.push(format!(
            "{:<32} {:>16} {:>16}",
            item.name,
            format_currency(item.factory_price, Currency::Usd),
            format_currency(item.final_sale_price, Currency::Usd)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Total Sale Revenue: {}",
        format_currency(core.total_sale_price_usd, Currency::Usd)
    ));
    lines.push(format!(
        "Total Sale Revenue ({}): {}",
        core.secondary_currency.code(),
        format_currency(core.total_sale_price_secondary, core.secondary_currency)
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// CSV rendering: summary rows, a blank separator, then the breakdown
/// table. Product names are quoted with doubled inner quotes.
pub fn csv_report(results: &CalculationResult) -> String {
    let core = &results.core;
    let mut rows = vec![
        "Calculation Results".to_string(),
        String::new(),
        format!("Total Factory Cost,{:.2}", core.total_factory_cost_usd),
        format!(
            "Total Shipping & Customs Cost,{:.2}",
            core.shipping_and_customs_cost_usd
        ),
        format!(
            "Per-Unit Gross Profit,{:.2}",
            results.per_unit_gross_profit_usd
        ),
        format!("Total Gross Profit,{:.2}", core.gross_profit_usd),
        format!("Total Gross Margin,{:.2}", core.total_gross_margin_usd),
        format!("Total Gross Margin (%),{:.2}", core.cost_increase_rate),
        String::new(),
        "Product,Factory Cost,Sale Price".to_string(),
    ];

    for item in &results.product_breakdown {
        rows.push(format!(
            "{},{:.2},{:.2}",
            quote_csv(&item.name),
            item.factory_price,
            item.final_sale_price
        ));
    }

    rows.join("\n")
}

fn quote_csv(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Writes the CSV report with a UTF-8 BOM so spreadsheet apps detect the
/// encoding.
pub fn write_csv(path: &Path, results: &CalculationResult) -> Result<(), ExportError> {
    fs::write(path, format!("\u{feff}{}", csv_report(results)))?;
    Ok(())
}
