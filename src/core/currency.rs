//! Exchange rates supplied by the caller for currency-aware layouts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::FaturaError;

/// Mapping from ISO 4217 currency code to the multiplier that converts an
/// amount in that currency into the reporting currency.
///
/// Codes are trimmed and upper-cased on insert and on lookup.
///
/// ```
/// use efatura::core::CurrencyTable;
/// use rust_decimal_macros::dec;
///
/// let table = CurrencyTable::new().with_rate("TRY", dec!(1)).with_rate("usd", dec!(32.5));
/// assert_eq!(table.rate("USD").unwrap(), dec!(32.5));
/// assert!(table.rate("EUR").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Decimal>", into = "BTreeMap<String, Decimal>")]
pub struct CurrencyTable {
    rates: BTreeMap<String, Decimal>,
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl CurrencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rate, consuming and returning the table.
    pub fn with_rate(mut self, code: &str, rate: Decimal) -> Self {
        self.insert(code, rate);
        self
    }

    /// Add or replace a rate. Returns the previous rate for the code.
    pub fn insert(&mut self, code: &str, rate: Decimal) -> Option<Decimal> {
        self.rates.insert(normalize(code), rate)
    }

    /// Look up the multiplier for `code`.
    ///
    /// A code missing from the table is an error; there is no implicit 1.
    pub fn rate(&self, code: &str) -> Result<Decimal, FaturaError> {
        self.rates
            .get(&normalize(code))
            .copied()
            .ok_or_else(|| FaturaError::UnknownCurrency(code.to_string()))
    }

    /// Number of currencies with a rate.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether no rate has been added.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterate over `(code, rate)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<BTreeMap<String, Decimal>> for CurrencyTable {
    fn from(map: BTreeMap<String, Decimal>) -> Self {
        map.into_iter().collect()
    }
}

impl From<CurrencyTable> for BTreeMap<String, Decimal> {
    fn from(table: CurrencyTable) -> Self {
        table.rates
    }
}

impl<S: AsRef<str>> FromIterator<(S, Decimal)> for CurrencyTable {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut table = CurrencyTable::new();
        for (code, rate) in iter {
            table.insert(code.as_ref(), rate);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let table = CurrencyTable::new().with_rate(" eur ", dec!(35.1));
        assert_eq!(table.rate("EUR").unwrap(), dec!(35.1));
        assert_eq!(table.rate("eur").unwrap(), dec!(35.1));
    }

    #[test]
    fn missing_code_is_an_error() {
        let table = CurrencyTable::new().with_rate("TRY", dec!(1));
        match table.rate("USD") {
            Err(FaturaError::UnknownCurrency(code)) => assert_eq!(code, "USD"),
            other => panic!("expected UnknownCurrency, got {other:?}"),
        }
        assert!(table.rate("").is_err());
    }

    #[test]
    fn collects_from_pairs() {
        let table: CurrencyTable = [("TRY", dec!(1)), ("USD", dec!(32.5))].into_iter().collect();
        assert_eq!(table.len(), 2);
        let codes: Vec<_> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec!["TRY", "USD"]);
    }
}
