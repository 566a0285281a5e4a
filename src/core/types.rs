use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::FaturaError;
use super::numbers::checked_product;

/// One extracted invoice line, the unit every worksheet row is built from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceLineRecord {
    /// `cbc:IssueDate` of the enclosing invoice, verbatim.
    pub invoice_date: String,
    /// `cbc:ID` of the enclosing invoice. Aggregation key.
    pub invoice_number: String,
    /// Supplier display name.
    pub seller_name: String,
    /// Supplier tax number (VKN) or citizen identity number (TCKN).
    pub seller_identity: String,
    /// Item description (`cac:Item/cbc:Name`).
    pub product_type: String,
    /// `cbc:InvoicedQuantity`.
    pub quantity: Decimal,
    /// Tax-exclusive base amount of the line.
    pub vat_free_amount: Decimal,
    /// Tax payable on the line.
    pub vat_amount: Decimal,
    /// KDV percent of the selected tax subtotal.
    pub tax_rate: Decimal,
    /// Transaction currency (`currencyID` of the tax amount).
    pub currency_code: String,
    /// Exchange rate applied to the amounts; 1 when not converted.
    pub currency_value: Decimal,
    /// Customs declaration number. Not extracted.
    pub ggb_approve_no: String,
    /// KDV period in which the deduction was used. Not extracted.
    pub tax_discount_date: String,
}

impl InvoiceLineRecord {
    /// Tax-exclusive amount in the reporting currency.
    pub fn converted_vat_free_amount(&self) -> Result<Decimal, FaturaError> {
        checked_product(self.vat_free_amount, self.currency_value)
    }

    /// Tax amount in the reporting currency.
    pub fn converted_vat_amount(&self) -> Result<Decimal, FaturaError> {
        checked_product(self.vat_amount, self.currency_value)
    }
}

/// Worksheet layout of a conversion.
///
/// Each mode fixes both the tax extraction policy and the columns written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Purchase listing: a single detail sheet, one row per invoice line.
    #[default]
    PurchaseList,
    /// Purchase listing plus a second sheet grouped by invoice number.
    PurchaseSummary,
    /// Sales listing with a two-row header, currency conversion and a totals row.
    Sales,
}

impl LayoutMode {
    /// Whether amounts are multiplied by a caller-supplied exchange rate.
    pub fn is_currency_aware(self) -> bool {
        matches!(self, LayoutMode::Sales)
    }

    /// Whether a grouped summary sheet follows the detail sheet.
    pub fn has_summary_sheet(self) -> bool {
        matches!(self, LayoutMode::PurchaseSummary)
    }

    /// Number of header rows above the first record.
    pub fn header_rows(self) -> u32 {
        match self {
            LayoutMode::PurchaseList | LayoutMode::PurchaseSummary => 1,
            LayoutMode::Sales => 2,
        }
    }
}
