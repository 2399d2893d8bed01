//! Domain logic for import pricing lives here.

pub mod app_state;
pub mod entities;
pub mod form;
pub mod pricing;

#[allow(unused_imports)]
pub use app_state::{AppState, DisplayCurrency};
#[allow(unused_imports)]
pub use entities::{
    CalculationCore, CalculationResult, Currency, DubaiParams, Market, ProductLine, ProductShare,
    SerbiaParams,
};
#[allow(unused_imports)]
pub use form::{DubaiForm, Scenario, SerbiaForm, ValidationError};
#[allow(unused_imports)]
pub use pricing::{
    breakdown, calculate_dubai, calculate_serbia, factory_cost, total_quantity, MarketModel,
};
