#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::num::{coerce_amount, coerce_quantity};

/// Markets the calculator knows how to price for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    #[default]
    Dubai,
    Serbia,
}

impl Market {
    pub fn label(&self) -> &'static str {
        match self {
            Market::Dubai => "Dubai",
            Market::Serbia => "Serbia",
        }
    }

    /// Local currency the sale price is converted into for this market.
    pub fn secondary_currency(&self) -> Currency {
        match self {
            Market::Dubai => Currency::Aed,
            Market::Serbia => Currency::Rsd,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Aed,
    Rsd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Aed => "AED",
            Currency::Rsd => "RSD",
        }
    }
}

/// One purchased line item, exactly as typed into the form.
///
/// Quantity and unit price stay raw text; the engine coerces them on read
/// and a cell with no usable number contributes zero. The id exists only so
/// a line keeps its identity across edits and breakdown rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
}

impl ProductLine {
    pub fn new(name: &str, quantity: &str, unit_price: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
        }
    }

    /// Coerced unit count for this line.
    pub fn units(&self) -> i64 {
        coerce_quantity(&self.quantity)
    }

    /// Coerced `quantity × unit_price` in USD.
    pub fn factory_price(&self) -> f64 {
        self.units() as f64 * coerce_amount(&self.unit_price)
    }
}

/// Commercial parameters for the Dubai market. Percentages are plain
/// numbers (25 means 25%); shipping is a fixed AED amount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DubaiParams {
    pub profit_margin: f64,
    pub customs_duty_rate: f64,
    pub fixed_shipping_cost_aed: f64,
    /// AED per USD.
    pub exchange_rate: f64,
    /// Logistics/risk premium applied last, on top of everything.
    pub risk_rate: f64,
}

/// Commercial parameters for the Serbia market. VAT replaces the risk
/// premium and shipping is a fixed RSD amount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerbiaParams {
    pub profit_margin: f64,
    pub customs_duty_rate: f64,
    pub fixed_shipping_cost_rsd: f64,
    /// RSD per USD.
    pub exchange_rate: f64,
    pub vat_rate: f64,
}

/// One product line's slice of the final sale price. Shares are allocated
/// in proportion to the line's slice of factory cost; there is no per-item
/// markup logic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductShare {
    pub name: String,
    pub factory_price: f64,
    pub final_sale_price: f64,
}

/// Aggregate money figures shared by both market models.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationCore {
    pub total_factory_cost_usd: f64,
    pub total_sale_price_usd: f64,
    pub total_sale_price_secondary: f64,
    pub secondary_currency: Currency,
    /// Profit-margin component only, excluding customs/shipping/tax.
    pub gross_profit_usd: f64,
    /// Percent increase from factory cost to sale price; 0 when factory
    /// cost is 0.
    pub cost_increase_rate: f64,
    /// Everything in the markup that is not profit: customs + shipping +
    /// risk/VAT.
    pub total_expenses: f64,
    pub shipping_and_customs_cost_usd: f64,
    pub total_gross_margin_usd: f64,
}

/// Full output of one engine invocation. Built fresh every time, never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    #[serde(flatten)]
    pub core: CalculationCore,
    /// `gross_profit_usd / total_quantity`; 0 when there are no units.
    pub per_unit_gross_profit_usd: f64,
    pub total_quantity: i64,
    /// One entry per input line, in input order.
    pub product_breakdown: Vec<ProductShare>,
}
