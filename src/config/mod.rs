//! Statutory rate configuration.
//!
//! Tax, social security and health insurance percentages are configuration,
//! not business logic: they are loaded from a YAML file (or defaulted to
//! jurisdiction-neutral placeholders) and passed into the calculation
//! engine as a single [`PayrollRates`] value.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::PayrollRates;
