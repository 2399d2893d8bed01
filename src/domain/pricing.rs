//! The pricing engine: aggregation, the two market models, and the
//! proportional product breakdown.
//!
//! Both models take factory cost to a final sale price through a fixed
//! chain of adjustments, and the order of those steps is load-bearing. The
//! engine is a pure function of its arguments and never fails; invalid
//! input is stopped earlier by the form gate.

use serde::{Deserialize, Serialize};

use super::entities::{
    CalculationCore, CalculationResult, Currency, DubaiParams, Market, ProductLine, ProductShare,
    SerbiaParams,
};

/// Sum of coerced `quantity × unit_price` over all lines, in USD.
pub fn factory_cost(lines: &[ProductLine]) -> f64 {
    lines.iter().map(ProductLine::factory_price).sum()
}

/// Sum of coerced quantities over all lines.
pub fn total_quantity(lines: &[ProductLine]) -> i64 {
    lines.iter().map(ProductLine::units).sum()
}

/// Dubai model: profit and customs compound multiplicatively, shipping is
/// added afterwards, and the risk premium is applied last to the entire
/// running total including shipping.
pub fn calculate_dubai(lines: &[ProductLine], params: &DubaiParams) -> CalculationCore {
    let factory_cost = factory_cost(lines);
    let shipping_usd = params.fixed_shipping_cost_aed / params.exchange_rate;

    let profit_multiplier = 1.0 + params.profit_margin / 100.0;
    let customs_multiplier = 1.0 + params.customs_duty_rate / 100.0;
    let risk_multiplier = 1.0 + params.risk_rate / 100.0;

    // Customs duty is charged on the profit-inclusive value, not on raw
    // factory cost.
    let after_profit_and_customs = factory_cost * profit_multiplier * customs_multiplier;
    let with_shipping = after_profit_and_customs + shipping_usd;
    let total_sale_price_usd = with_shipping * risk_multiplier;

    let gross_profit_usd = factory_cost * (profit_multiplier - 1.0);
    let customs_cost_usd = factory_cost * profit_multiplier * (customs_multiplier - 1.0);

    finish_core(
        factory_cost,
        total_sale_price_usd,
        gross_profit_usd,
        shipping_usd + customs_cost_usd,
        params.exchange_rate,
        Currency::Aed,
    )
}

/// Serbia model: customs is an additive increment on the profit-inclusive
/// price, shipping joins before tax, and VAT is applied last to the
/// fully-loaded base.
///
/// The customs base genuinely differs from the Dubai model; the two
/// formulas are kept as separate code paths on purpose.
pub fn calculate_serbia(lines: &[ProductLine], params: &SerbiaParams) -> CalculationCore {
    let factory_cost = factory_cost(lines);
    let shipping_usd = params.fixed_shipping_cost_rsd / params.exchange_rate;

    let profit_multiplier = 1.0 + params.profit_margin / 100.0;
    let customs_multiplier = 1.0 + params.customs_duty_rate / 100.0;
    let vat_multiplier = 1.0 + params.vat_rate / 100.0;

    let price_with_profit = factory_cost * profit_multiplier;
    let customs_cost_usd = price_with_profit * (customs_multiplier - 1.0);

    let price_before_vat = price_with_profit + customs_cost_usd + shipping_usd;
    let total_sale_price_usd = price_before_vat * vat_multiplier;

    let gross_profit_usd = factory_cost * (profit_multiplier - 1.0);

    finish_core(
        factory_cost,
        total_sale_price_usd,
        gross_profit_usd,
        shipping_usd + customs_cost_usd,
        params.exchange_rate,
        Currency::Rsd,
    )
}

/// Derived figures both models share once the sale price is known.
fn finish_core(
    factory_cost: f64,
    total_sale_price_usd: f64,
    gross_profit_usd: f64,
    shipping_and_customs_cost_usd: f64,
    exchange_rate: f64,
    secondary_currency: Currency,
) -> CalculationCore {
    let cost_increase_rate = if factory_cost > 0.0 {
        (total_sale_price_usd - factory_cost) / factory_cost * 100.0
    } else {
        0.0
    };

    CalculationCore {
        total_factory_cost_usd: factory_cost,
        total_sale_price_usd,
        total_sale_price_secondary: total_sale_price_usd * exchange_rate,
        secondary_currency,
        gross_profit_usd,
        cost_increase_rate,
        total_expenses: total_sale_price_usd - factory_cost - gross_profit_usd,
        shipping_and_customs_cost_usd,
        total_gross_margin_usd: total_sale_price_usd - factory_cost,
    }
}

/// Allocates the aggregate sale price across lines in proportion to each
/// line's share of factory cost. Shares sum to the sale price whenever
/// factory cost is positive; otherwise every share is 0.
pub fn breakdown(
    lines: &[ProductLine],
    factory_cost: f64,
    total_sale_price_usd: f64,
) -> Vec<ProductShare> {
    lines
        .iter()
        .map(|line| {
            let factory_price = line.factory_price();
            let final_sale_price = if factory_cost > 0.0 {
                factory_price / factory_cost * total_sale_price_usd
            } else {
                0.0
            };
            ProductShare {
                name: line.name.clone(),
                factory_price,
                final_sale_price,
            }
        })
        .collect()
}

/// Closed set of market pricing models, each carrying its own parameter
/// shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "market", rename_all = "lowercase")]
pub enum MarketModel {
    Dubai(DubaiParams),
    Serbia(SerbiaParams),
}

impl MarketModel {
    pub fn market(&self) -> Market {
        match self {
            MarketModel::Dubai(_) => Market::Dubai,
            MarketModel::Serbia(_) => Market::Serbia,
        }
    }

    /// Core money figures for this market, excluding quantity-derived
    /// fields and the breakdown.
    pub fn calculate_core(&self, lines: &[ProductLine]) -> CalculationCore {
        match self {
            MarketModel::Dubai(params) => calculate_dubai(lines, params),
            MarketModel::Serbia(params) => calculate_serbia(lines, params),
        }
    }

    /// Full result: core figures plus total quantity, per-unit profit and
    /// the proportional product breakdown.
    pub fn calculate(&self, lines: &[ProductLine]) -> CalculationResult {
        let core = self.calculate_core(lines);
        let total_quantity = total_quantity(lines);
        let per_unit_gross_profit_usd = if total_quantity > 0 {
            core.gross_profit_usd / total_quantity as f64
        } else {
            0.0
        };
        let product_breakdown =
            breakdown(lines, core.total_factory_cost_usd, core.total_sale_price_usd);

        CalculationResult {
            core,
            per_unit_gross_profit_usd,
            total_quantity,
            product_breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn dubai_params() -> DubaiParams {
        DubaiParams {
            profit_margin: 25.0,
            customs_duty_rate: 5.0,
            fixed_shipping_cost_aed: 2323.5,
            exchange_rate: 3.673,
            risk_rate: 10.0,
        }
    }

    fn serbia_params() -> SerbiaParams {
        SerbiaParams {
            profit_margin: 30.0,
            customs_duty_rate: 10.0,
            fixed_shipping_cost_rsd: 55000.0,
            exchange_rate: 109.5,
            vat_rate: 20.0,
        }
    }

    #[test]
    fn factory_cost_sums_quantity_times_price() {
        let lines = vec![
            ProductLine::new("A", "2", "10.5"),
            ProductLine::new("B", "3", "4"),
        ];
        assert_close(factory_cost(&lines), 33.0);
        assert_eq!(total_quantity(&lines), 5);
    }

    #[test]
    fn factory_cost_of_empty_list_is_zero() {
        assert_close(factory_cost(&[]), 0.0);
        assert_eq!(total_quantity(&[]), 0);
    }

    #[test]
    fn malformed_cells_contribute_zero() {
        let lines = vec![
            ProductLine::new("ok", "2", "5"),
            ProductLine::new("bad quantity", "x", "5"),
            ProductLine::new("bad price", "2", "abc"),
        ];
        assert_close(factory_cost(&lines), 10.0);
        assert_eq!(total_quantity(&lines), 4);
    }

    #[test]
    fn dubai_model_worked_example() {
        let lines = vec![ProductLine::new("Three-Seat Sofa", "1", "1700")];
        let core = calculate_dubai(&lines, &dubai_params());

        let shipping_usd = 2323.5 / 3.673;
        let expected_total = (1700.0 * 1.25 * 1.05 + shipping_usd) * 1.10;
        let customs_usd = 1700.0 * 1.25 * 0.05;

        assert_close(core.total_factory_cost_usd, 1700.0);
        assert_close(core.gross_profit_usd, 425.0);
        assert_close(core.total_sale_price_usd, expected_total);
        assert!((core.total_sale_price_usd - 3150.22).abs() < 0.01);
        assert_close(core.total_sale_price_secondary, expected_total * 3.673);
        assert_eq!(core.secondary_currency, Currency::Aed);
        assert_close(core.shipping_and_customs_cost_usd, shipping_usd + customs_usd);
        assert_close(core.total_gross_margin_usd, expected_total - 1700.0);
        assert_close(core.total_expenses, expected_total - 1700.0 - 425.0);
        assert_close(
            core.cost_increase_rate,
            (expected_total - 1700.0) / 1700.0 * 100.0,
        );
    }

    #[test]
    fn serbia_model_worked_example() {
        let lines = vec![ProductLine::new("Office Chair", "10", "150")];
        let core = calculate_serbia(&lines, &serbia_params());

        let shipping_usd = 55000.0 / 109.5;
        let customs_usd = 1500.0 * 1.30 * 0.10;
        let expected_total = (1500.0 * 1.30 + customs_usd + shipping_usd) * 1.20;

        assert_close(core.total_factory_cost_usd, 1500.0);
        assert_close(core.gross_profit_usd, 450.0);
        assert_close(customs_usd, 195.0);
        assert_close(core.total_sale_price_usd, expected_total);
        assert!((core.total_sale_price_usd - 3176.74).abs() < 0.01);
        assert_close(core.shipping_and_customs_cost_usd, shipping_usd + customs_usd);
        assert_eq!(core.secondary_currency, Currency::Rsd);
        assert_close(core.total_sale_price_secondary, expected_total * 109.5);
    }

    #[test]
    fn zero_factory_cost_short_circuits_the_rate() {
        let lines = vec![ProductLine::new("empty", "0", "100")];
        let core = calculate_dubai(&lines, &dubai_params());

        assert_close(core.total_factory_cost_usd, 0.0);
        assert_close(core.cost_increase_rate, 0.0);
        // Shipping and the risk premium still apply to an empty order.
        assert_close(core.total_sale_price_usd, (2323.5 / 3.673) * 1.10);
    }

    #[test]
    fn per_unit_profit_is_zero_without_units() {
        let lines = vec![ProductLine::new("zero quantity", "0", "100")];
        let results = MarketModel::Dubai(dubai_params()).calculate(&lines);

        assert_eq!(results.total_quantity, 0);
        assert_close(results.per_unit_gross_profit_usd, 0.0);
    }

    #[test]
    fn per_unit_profit_divides_across_units() {
        let lines = vec![ProductLine::new("Office Chair", "10", "150")];
        let results = MarketModel::Serbia(serbia_params()).calculate(&lines);

        assert_eq!(results.total_quantity, 10);
        assert_close(results.per_unit_gross_profit_usd, 45.0);
    }

    #[test]
    fn breakdown_shares_sum_to_sale_price() {
        let lines = vec![
            ProductLine::new("A", "2", "100"),
            ProductLine::new("B", "1", "350"),
            ProductLine::new("C", "4", "12.75"),
        ];
        let results = MarketModel::Serbia(serbia_params()).calculate(&lines);

        let share_sum: f64 = results
            .product_breakdown
            .iter()
            .map(|share| share.final_sale_price)
            .sum();
        let total = results.core.total_sale_price_usd;
        assert!(((share_sum - total) / total).abs() < 1e-6);
        assert_close(results.product_breakdown[0].factory_price, 200.0);
        assert_close(results.product_breakdown[1].factory_price, 350.0);
    }

    #[test]
    fn breakdown_is_all_zero_when_factory_cost_is_zero() {
        let shares = breakdown(&[ProductLine::new("A", "1", "")], 0.0, 500.0);
        assert_close(shares[0].factory_price, 0.0);
        assert_close(shares[0].final_sale_price, 0.0);
    }

    #[test]
    fn product_order_does_not_change_totals() {
        let mut lines = vec![
            ProductLine::new("A", "2", "100"),
            ProductLine::new("B", "1", "350"),
            ProductLine::new("C", "4", "12.75"),
        ];
        let model = MarketModel::Dubai(dubai_params());
        let forward = model.calculate(&lines);
        lines.reverse();
        let reversed = model.calculate(&lines);

        assert_close(
            forward.core.total_factory_cost_usd,
            reversed.core.total_factory_cost_usd,
        );
        assert_close(
            forward.core.total_sale_price_usd,
            reversed.core.total_sale_price_usd,
        );
        assert_eq!(forward.total_quantity, reversed.total_quantity);
        // Breakdown entries stay attached to their line by position.
        assert_eq!(forward.product_breakdown[0].name, "A");
        assert_eq!(reversed.product_breakdown[0].name, "C");
    }
}
