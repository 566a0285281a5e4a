//! Core record types, errors, configuration and aggregation.
//!
//! Everything here is independent of both the XML reader and the
//! spreadsheet backend.

mod aggregate;
mod config;
mod currency;
mod error;
pub mod numbers;
mod types;

pub use aggregate::aggregate;
pub use config::*;
pub use currency::CurrencyTable;
pub use error::*;
pub use types::*;
