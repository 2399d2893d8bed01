#![allow(dead_code)]

//! Ephemeral per-session state owned by the caller. The engine holds none
//! of this; every calculation is a pure function over the active form.

use uuid::Uuid;

use super::entities::{CalculationResult, Currency, Market, ProductLine};
use super::form::{DubaiForm, Scenario, SerbiaForm, ValidationError};

/// Which currency the sale totals are displayed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayCurrency {
    #[default]
    Usd,
    Secondary,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Currently selected market tab.
    pub active_market: Market,
    pub dubai: DubaiForm,
    pub serbia: SerbiaForm,
    /// Result of the last successful calculation, if any.
    pub results: Option<CalculationResult>,
    pub display_currency: DisplayCurrency,
}

impl AppState {
    pub fn set_market(&mut self, market: Market) {
        self.active_market = market;
    }

    fn active_products_mut(&mut self) -> &mut Vec<ProductLine> {
        match self.active_market {
            Market::Dubai => &mut self.dubai.products,
            Market::Serbia => &mut self.serbia.products,
        }
    }

    /// Appends an empty line to the active form, quantity pre-filled with 1.
    pub fn add_product(&mut self) {
        self.active_products_mut().push(ProductLine::new("", "1", ""));
    }

    pub fn remove_product(&mut self, id: Uuid) {
        self.active_products_mut().retain(|line| line.id != id);
    }

    /// Snapshot of the active market's form as a scenario.
    pub fn active_scenario(&self) -> Scenario {
        match self.active_market {
            Market::Dubai => Scenario::Dubai(self.dubai.clone()),
            Market::Serbia => Scenario::Serbia(self.serbia.clone()),
        }
    }

    /// Runs the gate and, when it passes, the engine. A fresh result always
    /// snaps the display toggle back to USD.
    pub fn calculate(&mut self) -> Result<CalculationResult, ValidationError> {
        let scenario = self.active_scenario();
        let model = scenario.validate()?;
        let results = model.calculate(scenario.products());
        self.display_currency = DisplayCurrency::Usd;
        self.results = Some(results.clone());
        Ok(results)
    }

    /// Restores the active form to its seed scenario and clears results.
    pub fn reset(&mut self) {
        match self.active_market {
            Market::Dubai => self.dubai = DubaiForm::default(),
            Market::Serbia => self.serbia = SerbiaForm::default(),
        }
        self.results = None;
    }

    pub fn toggle_display_currency(&mut self) {
        self.display_currency = match self.display_currency {
            DisplayCurrency::Usd => DisplayCurrency::Secondary,
            DisplayCurrency::Secondary => DisplayCurrency::Usd,
        };
    }

    /// Sale totals under the current display toggle, as
    /// `(per_unit_sale_price, total_sale_revenue, currency)`. Per-unit is 0
    /// when the order has no units.
    pub fn displayed_sale_totals(&self) -> Option<(f64, f64, Currency)> {
        let results = self.results.as_ref()?;
        let (total, currency) = match self.display_currency {
            DisplayCurrency::Usd => (results.core.total_sale_price_usd, Currency::Usd),
            DisplayCurrency::Secondary => (
                results.core.total_sale_price_secondary,
                results.core.secondary_currency,
            ),
        };
        let per_unit = if results.total_quantity > 0 {
            total / results.total_quantity as f64
        } else {
            0.0
        };
        Some((per_unit, total, currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_stores_results_and_resets_the_toggle() {
        let mut state = AppState::default();
        state.display_currency = DisplayCurrency::Secondary;

        let results = state.calculate().unwrap();
        assert!(state.results.is_some());
        assert_eq!(state.display_currency, DisplayCurrency::Usd);
        assert!(results.core.total_sale_price_usd > 0.0);
    }

    #[test]
    fn calculate_surfaces_gate_errors() {
        let mut state = AppState::default();
        state.dubai.products.clear();
        assert_eq!(state.calculate(), Err(ValidationError::ZeroFactoryCost));
        assert!(state.results.is_none());
    }

    #[test]
    fn add_and_remove_affect_the_active_market_only() {
        let mut state = AppState::default();
        state.set_market(Market::Serbia);
        state.add_product();
        assert_eq!(state.serbia.products.len(), 2);
        assert_eq!(state.dubai.products.len(), 1);

        let id = state.serbia.products[1].id;
        state.remove_product(id);
        assert_eq!(state.serbia.products.len(), 1);
    }

    #[test]
    fn reset_restores_the_seed_scenario() {
        let mut state = AppState::default();
        state.dubai.profit_margin = "99".to_string();
        state.calculate().unwrap();

        state.reset();
        assert_eq!(state.dubai.profit_margin, "25");
        assert!(state.results.is_none());
    }

    #[test]
    fn displayed_totals_follow_the_toggle() {
        let mut state = AppState::default();
        state.calculate().unwrap();

        let (_, usd_total, currency) = state.displayed_sale_totals().unwrap();
        assert_eq!(currency, Currency::Usd);

        state.toggle_display_currency();
        let (per_unit, aed_total, currency) = state.displayed_sale_totals().unwrap();
        assert_eq!(currency, Currency::Aed);
        assert!((aed_total - usd_total * 3.673).abs() < 1e-9);
        // One sofa in the seed scenario: per-unit equals the total.
        assert!((per_unit - aed_total).abs() < 1e-9);
    }
}
