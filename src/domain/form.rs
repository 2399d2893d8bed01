//! Raw form input and the pre-calculation validation gate.
//!
//! The engine itself never fails, so everything a user can get wrong is
//! rejected here: a zero factory cost, an empty configuration field, or a
//! configuration field that is not fully numeric. Product cells are exempt
//! on purpose; those coerce to zero inside the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::{DubaiParams, Market, ProductLine, SerbiaParams};
use super::pricing::{self, MarketModel};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("total factory cost is zero; add at least one product with a quantity and price")]
    ZeroFactoryCost,
    #[error("field `{0}` is empty")]
    EmptyField(&'static str),
    #[error("field `{field}` is not a valid number: `{value}`")]
    InvalidNumber { field: &'static str, value: String },
}

fn parse_field(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Dubai market inputs, exactly as typed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DubaiForm {
    pub products: Vec<ProductLine>,
    pub profit_margin: String,
    pub customs_duty_rate: String,
    pub fixed_shipping_cost_aed: String,
    pub exchange_rate: String,
    pub risk_rate: String,
}

impl Default for DubaiForm {
    fn default() -> Self {
        Self {
            products: vec![ProductLine::new("Three-Seat Sofa", "1", "1700")],
            profit_margin: "25".to_string(),
            customs_duty_rate: "5".to_string(),
            fixed_shipping_cost_aed: "2323.5".to_string(),
            exchange_rate: "3.673".to_string(),
            risk_rate: "10".to_string(),
        }
    }
}

impl DubaiForm {
    /// Runs the gate and produces a typed pricing model on success.
    pub fn validate(&self) -> Result<MarketModel, ValidationError> {
        if pricing::factory_cost(&self.products) == 0.0 {
            return Err(ValidationError::ZeroFactoryCost);
        }
        Ok(MarketModel::Dubai(DubaiParams {
            profit_margin: parse_field("profit_margin", &self.profit_margin)?,
            customs_duty_rate: parse_field("customs_duty_rate", &self.customs_duty_rate)?,
            fixed_shipping_cost_aed: parse_field(
                "fixed_shipping_cost_aed",
                &self.fixed_shipping_cost_aed,
            )?,
            exchange_rate: parse_field("exchange_rate", &self.exchange_rate)?,
            risk_rate: parse_field("risk_rate", &self.risk_rate)?,
        }))
    }
}

/// Serbia market inputs, exactly as typed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerbiaForm {
    pub products: Vec<ProductLine>,
    pub profit_margin: String,
    pub customs_duty_rate: String,
    pub fixed_shipping_cost_rsd: String,
    pub exchange_rate: String,
    pub vat_rate: String,
}

impl Default for SerbiaForm {
    fn default() -> Self {
        Self {
            products: vec![ProductLine::new("Office Chair", "10", "150")],
            profit_margin: "30".to_string(),
            customs_duty_rate: "10".to_string(),
            fixed_shipping_cost_rsd: "55000".to_string(),
            exchange_rate: "109.5".to_string(),
            vat_rate: "20".to_string(),
        }
    }
}

impl SerbiaForm {
    pub fn validate(&self) -> Result<MarketModel, ValidationError> {
        if pricing::factory_cost(&self.products) == 0.0 {
            return Err(ValidationError::ZeroFactoryCost);
        }
        Ok(MarketModel::Serbia(SerbiaParams {
            profit_margin: parse_field("profit_margin", &self.profit_margin)?,
            customs_duty_rate: parse_field("customs_duty_rate", &self.customs_duty_rate)?,
            fixed_shipping_cost_rsd: parse_field(
                "fixed_shipping_cost_rsd",
                &self.fixed_shipping_cost_rsd,
            )?,
            exchange_rate: parse_field("exchange_rate", &self.exchange_rate)?,
            vat_rate: parse_field("vat_rate", &self.vat_rate)?,
        }))
    }
}

/// One calculation request: a market tag plus that market's form. This is
/// the on-disk scenario format the CLI consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "market", rename_all = "lowercase")]
pub enum Scenario {
    Dubai(DubaiForm),
    Serbia(SerbiaForm),
}

impl Scenario {
    /// Seed scenario for a market, matching the form defaults.
    pub fn demo(market: Market) -> Self {
        match market {
            Market::Dubai => Scenario::Dubai(DubaiForm::default()),
            Market::Serbia => Scenario::Serbia(SerbiaForm::default()),
        }
    }

    pub fn market(&self) -> Market {
        match self {
            Scenario::Dubai(_) => Market::Dubai,
            Scenario::Serbia(_) => Market::Serbia,
        }
    }

    pub fn products(&self) -> &[ProductLine] {
        match self {
            Scenario::Dubai(form) => &form.products,
            Scenario::Serbia(form) => &form.products,
        }
    }

    pub fn validate(&self) -> Result<MarketModel, ValidationError> {
        match self {
            Scenario::Dubai(form) => form.validate(),
            Scenario::Serbia(form) => form.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_forms_pass_the_gate() {
        assert!(DubaiForm::default().validate().is_ok());
        assert!(SerbiaForm::default().validate().is_ok());
    }

    #[test]
    fn gate_rejects_zero_factory_cost() {
        let mut form = DubaiForm::default();
        form.products = vec![ProductLine::new("nothing", "0", "100")];
        assert_eq!(form.validate(), Err(ValidationError::ZeroFactoryCost));
    }

    #[test]
    fn gate_rejects_empty_configuration_field() {
        let mut form = SerbiaForm::default();
        form.vat_rate = String::new();
        assert_eq!(
            form.validate(),
            Err(ValidationError::EmptyField("vat_rate"))
        );
    }

    #[test]
    fn gate_requires_a_full_numeric_parse() {
        let mut form = DubaiForm::default();
        form.exchange_rate = "3.6x".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidNumber {
                field: "exchange_rate",
                ..
            })
        ));
    }

    #[test]
    fn gate_rejects_non_finite_fields() {
        let mut form = DubaiForm::default();
        form.risk_rate = "NaN".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn validated_form_yields_typed_parameters() {
        let model = DubaiForm::default().validate().unwrap();
        let MarketModel::Dubai(params) = model else {
            panic!("expected the Dubai model");
        };
        assert_eq!(params.profit_margin, 25.0);
        assert_eq!(params.exchange_rate, 3.673);
    }

    #[test]
    fn scenario_json_round_trips() {
        let json = r#"{
            "market": "serbia",
            "products": [{"name": "Desk", "quantity": "4", "unit_price": "220"}],
            "profit_margin": "30",
            "customs_duty_rate": "10",
            "fixed_shipping_cost_rsd": "55000",
            "exchange_rate": "109.5",
            "vat_rate": "20"
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.market(), Market::Serbia);
        assert_eq!(scenario.products().len(), 1);
        assert!(scenario.validate().is_ok());
    }
}
