use claimmeta_core::{CurrencyKind, CurrencySet};

use crate::codec::Encoding;

/// Validator configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub currencies: CurrencySet,
    pub encoding: Encoding,
}

impl Config {
    /// Load configuration from environment variables.
    /// CLAIMMETA_CURRENCIES defaults to "BTC:crypto,LBC:crypto,USD:fiat",
    /// CLAIMMETA_ENCODING defaults to "hex".
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let currencies = match lookup("CLAIMMETA_CURRENCIES") {
            Some(s) if !s.trim().is_empty() => Self::parse_currencies(&s)?,
            _ => CurrencySet::default(),
        };

        let encoding = lookup("CLAIMMETA_ENCODING")
            .unwrap_or_else(|| "hex".to_string())
            .parse::<Encoding>()
            .map_err(|_| ConfigError::Invalid("CLAIMMETA_ENCODING", "must be hex or json"))?;

        Ok(Config {
            currencies,
            encoding,
        })
    }

    fn parse_currencies(s: &str) -> Result<CurrencySet, ConfigError> {
        let mut currencies = CurrencySet::empty();
        for entry in s.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            // Expected format: "CODE:kind" e.g. "BTC:crypto"
            let (code, kind) = entry.split_once(':').ok_or(ConfigError::Invalid(
                "CLAIMMETA_CURRENCIES",
                "expected format: CODE:kind (e.g. BTC:crypto)",
            ))?;

            let code = code.trim();
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Invalid(
                    "CLAIMMETA_CURRENCIES",
                    "currency code must be non-empty and alphanumeric",
                ));
            }

            let kind = kind.trim().parse::<CurrencyKind>().map_err(|_| {
                ConfigError::Invalid("CLAIMMETA_CURRENCIES", "kind must be crypto or fiat")
            })?;

            currencies.insert(code, kind);
        }

        if currencies.is_empty() {
            return Err(ConfigError::Invalid(
                "CLAIMMETA_CURRENCIES",
                "must list at least one currency",
            ));
        }
        Ok(currencies)
    }

    /// Create a test configuration.
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Config {
            currencies: CurrencySet::default(),
            encoding: Encoding::Json,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.currencies, CurrencySet::default());
        assert_eq!(config.encoding, Encoding::Hex);
    }

    #[test]
    fn test_custom_currencies() {
        let config = Config::from_lookup(lookup(&[(
            "CLAIMMETA_CURRENCIES",
            " EUR:fiat , LBC:crypto,",
        )]))
        .unwrap();

        assert_eq!(config.currencies.len(), 2);
        assert_eq!(config.currencies.kind("EUR"), Some(CurrencyKind::Fiat));
        assert!(!config.currencies.contains("BTC"));
    }

    #[test]
    fn test_invalid_currencies() {
        for bad in ["BTC", "BTC:gold", ":crypto", "B-C:crypto", ",,"] {
            let result = Config::from_lookup(lookup(&[("CLAIMMETA_CURRENCIES", bad)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid("CLAIMMETA_CURRENCIES", _))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_encoding() {
        let config = Config::from_lookup(lookup(&[("CLAIMMETA_ENCODING", "json")])).unwrap();
        assert_eq!(config.encoding, Encoding::Json);

        let err = Config::from_lookup(lookup(&[("CLAIMMETA_ENCODING", "xml")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for CLAIMMETA_ENCODING: must be hex or json"
        );
    }

    #[test]
    fn test_for_testing() {
        let config = Config::for_testing();
        assert!(config.currencies.contains("LBC"));
    }
}
