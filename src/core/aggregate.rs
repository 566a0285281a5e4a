use indexmap::IndexMap;

use super::error::FaturaError;
use super::numbers::checked_sum;
use super::types::InvoiceLineRecord;

/// Fold invoice lines into one record per invoice number.
///
/// Groups keep the order in which their invoice number was first seen.
/// Header fields (date, seller, rate, currency) come from the first member;
/// descriptions are joined with `,` in encounter order; quantity and amounts
/// are exact decimal sums. A sum outside the `Decimal` range is an
/// [`FaturaError::Arithmetic`] error.
pub fn aggregate(records: &[InvoiceLineRecord]) -> Result<Vec<InvoiceLineRecord>, FaturaError> {
    let mut groups: IndexMap<&str, InvoiceLineRecord> = IndexMap::new();

    for record in records {
        match groups.get_mut(record.invoice_number.as_str()) {
            Some(group) => {
                group.product_type.push(',');
                group.product_type.push_str(&record.product_type);
                group.quantity = checked_sum(group.quantity, record.quantity)?;
                group.vat_free_amount = checked_sum(group.vat_free_amount, record.vat_free_amount)?;
                group.vat_amount = checked_sum(group.vat_amount, record.vat_amount)?;
            }
            None => {
                groups.insert(record.invoice_number.as_str(), record.clone());
            }
        }
    }

    Ok(groups.into_values().collect())
}
