//! UBL-TR invoice reading.
//!
//! Documents are parsed into a namespace-resolved element tree and walked
//! with explicit [`Step`] paths. Elements are matched by namespace URI and
//! local name, so any prefix convention (`cac:`, `ns2:`, default namespace)
//! is accepted.
//!
//! # Example
//!
//! ```
//! use efatura::core::LayoutMode;
//! use efatura::ubl;
//!
//! let xml = r#"<Invoice xmlns="urn:oasis:names:specification:ubl:schema:xsd:Invoice-2"
//!     xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2"
//!     xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2">
//!   <cbc:ID>ABC2024000000001</cbc:ID>
//!   <cac:InvoiceLine><cbc:InvoicedQuantity unitCode="C62">7</cbc:InvoicedQuantity></cac:InvoiceLine>
//! </Invoice>"#;
//!
//! let lines = ubl::extract_invoice_lines(xml, LayoutMode::PurchaseList, None).unwrap();
//! assert_eq!(lines.len(), 1);
//! assert_eq!(lines[0].invoice_number, "ABC2024000000001");
//! assert_eq!(lines[0].invoice_date, "");
//! ```

mod extract;
mod path;
mod tree;

pub use extract::Extractor;
pub use path::{Step, lookup, text_at};
pub use tree::{Element, XmlDocument};

use crate::core::{CurrencyTable, FaturaError, InvoiceLineRecord, LayoutMode};

/// UBL 2.1 namespace URIs.
pub mod ubl_ns {
    /// Root namespace of an `Invoice` document.
    pub const INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
    /// Common aggregate components (`cac:`).
    pub const CAC: &str =
        "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
    /// Common basic components (`cbc:`).
    pub const CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";
}

/// Parse one XML document and extract its invoice lines.
pub fn extract_invoice_lines(
    xml: &str,
    mode: LayoutMode,
    currencies: Option<&CurrencyTable>,
) -> Result<Vec<InvoiceLineRecord>, FaturaError> {
    let extractor = Extractor::new(mode, currencies)?;
    let doc = XmlDocument::parse(xml)?;
    extractor.extract(&doc)
}
