use rust_decimal::Decimal;

use super::path::{Step, lookup, text_at};
use super::tree::{Element, XmlDocument};
use super::ubl_ns::{CAC, CBC, INVOICE};
use crate::core::numbers::{parse_decimal, parse_percent};
use crate::core::{CurrencyTable, FaturaError, InvoiceLineRecord, LayoutMode};

const ISSUE_DATE: &[Step] = &[Step::Child(CBC, "IssueDate")];
const INVOICE_ID: &[Step] = &[Step::Child(CBC, "ID")];
const DOCUMENT_CURRENCY: &[Step] = &[Step::Child(CBC, "DocumentCurrencyCode")];

const SUPPLIER_NAME: &[Step] = &[
    Step::Child(CAC, "AccountingSupplierParty"),
    Step::Descendant(CAC, "PartyName"),
    Step::Descendant(CBC, "Name"),
];
const SUPPLIER_PARTY: &[Step] = &[
    Step::Child(CAC, "AccountingSupplierParty"),
    Step::Descendant(CAC, "Party"),
];

const ITEM_NAME: &[Step] = &[Step::Child(CAC, "Item"), Step::Child(CBC, "Name")];
const TAX_TYPE_CODE: &[Step] = &[
    Step::Child(CAC, "TaxCategory"),
    Step::Child(CAC, "TaxScheme"),
    Step::Child(CBC, "TaxTypeCode"),
];

/// GİB tax type code of KDV.
const KDV_TAX_TYPE_CODE: &str = "0015";

/// Identification schemes that carry the tax/identity number of a party.
const TAX_ID_SCHEMES: &[&str] = &["VKN", "TCKN"];

/// Header fields shared by every line of one `<Invoice>`.
struct InvoiceHeader<'a> {
    date: &'a str,
    number: &'a str,
    seller_name: &'a str,
    seller_identity: &'a str,
    document_currency: &'a str,
}

impl<'a> InvoiceHeader<'a> {
    fn read(invoice: Element<'a>) -> Self {
        Self {
            date: text_at(invoice, ISSUE_DATE),
            number: text_at(invoice, INVOICE_ID),
            seller_name: text_at(invoice, SUPPLIER_NAME),
            seller_identity: seller_identity(invoice),
            document_currency: text_at(invoice, DOCUMENT_CURRENCY),
        }
    }
}

/// `PartyIdentification/ID` of the supplier, preferring a VKN/TCKN scheme
/// over other identifiers (MERSISNO, TICARETSICILNO, ...).
///
/// Without a tax scheme the first `PartyIdentification` decides, even when
/// it has no `cbc:ID`.
fn seller_identity<'a>(invoice: Element<'a>) -> &'a str {
    let Some(party) = lookup(invoice, SUPPLIER_PARTY) else {
        return "";
    };
    let ids: Vec<Option<Element<'a>>> = party
        .children(CAC, "PartyIdentification")
        .map(|identification| identification.child(CBC, "ID"))
        .collect();

    let tax_id = ids.iter().flatten().find(|id| {
        id.attribute("schemeID")
            .is_some_and(|scheme| TAX_ID_SCHEMES.contains(&scheme.trim()))
    });
    match tax_id {
        Some(id) => id.text(),
        None => ids.first().copied().flatten().map(Element::text).unwrap_or(""),
    }
}

/// Tax figures of one invoice line.
#[derive(Debug, PartialEq)]
struct LineTax {
    taxable_amount: Decimal,
    tax_amount: Decimal,
    percent: Decimal,
    currency_code: String,
}

impl LineTax {
    /// Read the line's KDV subtotal (or its first subtotal when none is tagged KDV).
    ///
    /// The exclusive base is `TaxableAmount` (falling back to the line's
    /// `LineExtensionAmount`), the payable tax is `TaxAmount`. The percent is
    /// only rendered by currency-aware layouts, so it is parsed only when
    /// `read_percent` is set and stays zero otherwise.
    fn read(line: Element<'_>, document_currency: &str, read_percent: bool) -> Result<Self, FaturaError> {
        let tax_totals: Vec<Element<'_>> = line.descendants(CAC, "TaxTotal").collect();
        let subtotals: Vec<Element<'_>> = tax_totals
            .iter()
            .flat_map(|total| total.descendants(CAC, "TaxSubtotal"))
            .collect();

        let subtotal = subtotals
            .iter()
            .copied()
            .find(|s| text_at(*s, TAX_TYPE_CODE).trim() == KDV_TAX_TYPE_CODE)
            .or_else(|| subtotals.first().copied());

        let taxable = subtotal
            .and_then(|s| s.child(CBC, "TaxableAmount"))
            .or_else(|| line.child(CBC, "LineExtensionAmount"));
        let tax = subtotal
            .and_then(|s| s.child(CBC, "TaxAmount"))
            .or_else(|| tax_totals.iter().find_map(|t| t.child(CBC, "TaxAmount")));
        let percent = subtotal
            .and_then(|s| s.child(CBC, "Percent"))
            .filter(|_| read_percent);

        let currency_code = tax
            .or(taxable)
            .and_then(|amount| amount.attribute("currencyID"))
            .unwrap_or(document_currency)
            .trim()
            .to_string();

        Ok(Self {
            taxable_amount: optional_amount(taxable, "cbc:TaxableAmount")?,
            tax_amount: optional_amount(tax, "cbc:TaxAmount")?,
            percent: match percent {
                Some(p) => parse_percent("cbc:Percent", p.text())?,
                None => Decimal::ZERO,
            },
            currency_code,
        })
    }
}

fn optional_amount(element: Option<Element<'_>>, field: &'static str) -> Result<Decimal, FaturaError> {
    match element {
        Some(e) => parse_decimal(field, e.text()),
        None => Ok(Decimal::ZERO),
    }
}

/// Turns parsed UBL documents into [`InvoiceLineRecord`]s.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'t> {
    mode: LayoutMode,
    currencies: Option<&'t CurrencyTable>,
}

impl<'t> Extractor<'t> {
    /// Create an extractor for `mode`.
    ///
    /// Currency-aware modes require a rate table.
    pub fn new(mode: LayoutMode, currencies: Option<&'t CurrencyTable>) -> Result<Self, FaturaError> {
        if mode.is_currency_aware() && currencies.is_none() {
            return Err(FaturaError::MissingCurrencyTable);
        }
        Ok(Self { mode, currencies })
    }

    /// One record per `<cac:InvoiceLine>` of every `<Invoice>` in `doc`.
    ///
    /// Lines are attributed to their nearest enclosing invoice. Missing
    /// header or line fields become empty text or zero; unparsable numbers
    /// and unknown currencies fail the document.
    pub fn extract(&self, doc: &XmlDocument) -> Result<Vec<InvoiceLineRecord>, FaturaError> {
        let mut records = Vec::new();

        for invoice in doc.descendants(INVOICE, "Invoice") {
            let header = InvoiceHeader::read(invoice);
            let before = records.len();

            for line in invoice.descendants(CAC, "InvoiceLine") {
                if line.ancestor(INVOICE, "Invoice") != Some(invoice) {
                    continue;
                }
                records.push(self.read_line(&header, line)?);
            }

            tracing::debug!(
                invoice = header.number,
                lines = records.len() - before,
                "extracted invoice"
            );
        }

        Ok(records)
    }

    fn read_line(&self, header: &InvoiceHeader<'_>, line: Element<'_>) -> Result<InvoiceLineRecord, FaturaError> {
        let quantity = optional_amount(line.child(CBC, "InvoicedQuantity"), "cbc:InvoicedQuantity")?;
        let tax = LineTax::read(line, header.document_currency, self.mode.is_currency_aware())?;

        let currency_value = match (self.mode.is_currency_aware(), self.currencies) {
            (true, Some(table)) => table.rate(&tax.currency_code)?,
            (true, None) => return Err(FaturaError::MissingCurrencyTable),
            (false, _) => Decimal::ONE,
        };

        Ok(InvoiceLineRecord {
            invoice_date: header.date.to_string(),
            invoice_number: header.number.to_string(),
            seller_name: header.seller_name.to_string(),
            seller_identity: header.seller_identity.to_string(),
            product_type: text_at(line, ITEM_NAME).to_string(),
            quantity,
            vat_free_amount: tax.taxable_amount,
            vat_amount: tax.tax_amount,
            tax_rate: tax.percent,
            currency_code: tax.currency_code,
            currency_value,
            ggb_approve_no: String::new(),
            tax_discount_date: String::new(),
        })
    }
}
