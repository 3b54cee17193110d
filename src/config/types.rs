//! Configuration types for payroll calculation.

use rust_decimal::Decimal;
use serde::Deserialize;

/// The statutory rates applied when deriving a payroll breakdown.
///
/// Defaults are jurisdiction-neutral placeholders; real deployments load
/// rates from a YAML file via [`crate::config::ConfigLoader`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayrollRates {
    /// Income tax rate applied to gross pay, in `[0, 1]`.
    pub tax_rate: Decimal,
    /// Social security rate applied to gross pay, in `[0, 1]`.
    pub ss_rate: Decimal,
    /// Health insurance rate applied to gross pay, in `[0, 1]`.
    pub hi_rate: Decimal,
    /// ISO currency code used in payslips and exports.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(15, 2),
            ss_rate: Decimal::new(5, 2),
            hi_rate: Decimal::new(3, 2),
            currency: default_currency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_rates_are_placeholders() {
        let rates = PayrollRates::default();
        assert_eq!(rates.tax_rate, Decimal::from_str("0.15").unwrap());
        assert_eq!(rates.ss_rate, Decimal::from_str("0.05").unwrap());
        assert_eq!(rates.hi_rate, Decimal::from_str("0.03").unwrap());
        assert_eq!(rates.currency, "USD");
    }

    #[test]
    fn test_deserialize_with_default_currency() {
        let yaml = "tax_rate: \"0.20\"\nss_rate: \"0.04\"\nhi_rate: \"0.02\"\n";
        let rates: PayrollRates = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rates.tax_rate, Decimal::from_str("0.20").unwrap());
        assert_eq!(rates.currency, "USD");
    }
}
