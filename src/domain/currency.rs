//! Currency type
//!
//! Closed set of currencies supported by the ledger. Accounts carry exactly
//! one currency and transfers never convert between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies available for accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Php,
    Rub,
}

/// Error for unknown currency codes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency code: {0}")]
pub struct CurrencyError(pub String);

impl Currency {
    /// ISO-style code used in storage and API payloads
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Php => "PHP",
            Currency::Rub => "RUB",
        }
    }

    /// Human-readable currency name
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "US Dollar",
            Currency::Php => "Philippine Peso",
            Currency::Rub => "Russian Rouble",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Currency::Usd),
            "PHP" => Ok(Currency::Php),
            "RUB" => Ok(Currency::Rub),
            other => Err(CurrencyError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_roundtrip() {
        for code in ["USD", "PHP", "RUB"] {
            let currency: Currency = code.parse().unwrap();
            assert_eq!(currency.code(), code);
        }
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let result: Result<Currency, _> = "EUR".parse();
        assert!(matches!(result, Err(CurrencyError(code)) if code == "EUR"));
    }

    #[test]
    fn test_currency_serde_uppercase() {
        let json = serde_json::to_string(&Currency::Php).unwrap();
        assert_eq!(json, "\"PHP\"");

        let parsed: Currency = serde_json::from_str("\"RUB\"").unwrap();
        assert_eq!(parsed, Currency::Rub);
    }
}
