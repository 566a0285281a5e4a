//! # efatura
//!
//! Converts Turkish UBL-TR e-invoices (e-fatura) into Excel workbooks for
//! KDV listings: purchase lists, per-invoice summaries and currency-converted
//! sales lists.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point,
//! until they are written to a spreadsheet cell.
//!
//! ## Quick Start
//!
//! ```rust
//! use efatura::core::{ConversionConfig, CurrencyTable, LayoutMode};
//! use rust_decimal_macros::dec;
//!
//! let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
//!     xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
//!     xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
//!   <cbc:ID>SAT2024000000042</cbc:ID>
//!   <cbc:IssueDate>2024-05-02</cbc:IssueDate>
//!   <cac:InvoiceLine>
//!     <cbc:InvoicedQuantity unitCode="C62">2</cbc:InvoicedQuantity>
//!     <cac:TaxTotal>
//!       <cac:TaxSubtotal>
//!         <cbc:TaxableAmount currencyID="USD">10.00</cbc:TaxableAmount>
//!         <cbc:TaxAmount currencyID="USD">2.00</cbc:TaxAmount>
//!         <cbc:Percent>20</cbc:Percent>
//!       </cac:TaxSubtotal>
//!     </cac:TaxTotal>
//!     <cac:Item><cbc:Name>Danışmanlık</cbc:Name></cac:Item>
//!   </cac:InvoiceLine>
//! </Invoice>"#;
//!
//! let rates = CurrencyTable::new().with_rate("TRY", dec!(1)).with_rate("USD", dec!(32.5));
//! let config = ConversionConfig::for_layout(LayoutMode::Sales);
//! let workbook = efatura::convert([xml.as_bytes()], &config, Some(&rates)).unwrap();
//! assert!(!workbook.get_ref().is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `xlsx` (default) | Workbook generation and [`convert`] |

pub mod core;
pub mod layout;
pub mod ubl;

#[cfg(feature = "xlsx")]
pub mod xlsx;

#[cfg(feature = "xlsx")]
mod convert;

#[cfg(feature = "xlsx")]
pub use convert::convert;

// Re-export core types at crate root for convenience
pub use crate::core::*;
