//! Loads payroll rate configuration from YAML files.

use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::PayrollRates;

/// Loads and validates [`PayrollRates`] from a YAML file.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let rates = ConfigLoader::load("config/rates.yaml").unwrap();
/// assert!(rates.tax_rate >= rust_decimal::Decimal::ZERO);
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads a rates file, failing with `ConfigNotFound` when the path does
    /// not exist and `ConfigParseError` when the YAML is malformed or a
    /// rate falls outside `[0, 1]`.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<PayrollRates> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let rates: PayrollRates =
            serde_yaml::from_str(&contents).map_err(|e| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&rates).map_err(|message| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        })?;

        Ok(rates)
    }

    fn validate(rates: &PayrollRates) -> Result<(), String> {
        for (name, value) in [
            ("tax_rate", rates.tax_rate),
            ("ss_rate", rates.ss_rate),
            ("hi_rate", rates.hi_rate),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(format!("{name} must be between 0 and 1, got {value}"));
            }
        }
        if rates.currency.trim().is_empty() {
            return Err("currency must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("rates_{}.yaml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_rates_file() {
        let path = write_temp(
            "tax_rate: \"0.15\"\nss_rate: \"0.05\"\nhi_rate: \"0.03\"\ncurrency: MMK\n",
        );
        let rates = ConfigLoader::load(&path).unwrap();
        assert_eq!(rates.tax_rate, Decimal::from_str("0.15").unwrap());
        assert_eq!(rates.currency, "MMK");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_config_not_found() {
        let err = ConfigLoader::load("/definitely/missing/rates.yaml").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let path = write_temp("tax_rate: [not, a, rate");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let path =
            write_temp("tax_rate: \"1.5\"\nss_rate: \"0.05\"\nhi_rate: \"0.03\"\n");
        let err = ConfigLoader::load(&path).unwrap_err();
        match err {
            EngineError::ConfigParseError { message, .. } => {
                assert!(message.contains("tax_rate"));
            }
            other => panic!("expected ConfigParseError, got {other}"),
        }
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_negative_rate_rejected() {
        let path =
            write_temp("tax_rate: \"0.15\"\nss_rate: \"-0.01\"\nhi_rate: \"0.03\"\n");
        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
        std::fs::remove_file(path).unwrap();
    }
}
