use rust_decimal::Decimal;

use super::{Cell, TOTAL_LABEL};
use crate::core::numbers::{checked_sum, format_quantity};
use crate::core::{FaturaError, InvoiceLineRecord};

/// Purchase list row (15 cells).
///
/// Column 9 carries the tax-exclusive amount and column 10 the tax, matching
/// the captions; 11–13 are unused and 14–15 hold the reserved GGB number and
/// deduction period.
pub fn list_row(sequence: u32, record: &InvoiceLineRecord, unit: &str) -> Vec<Cell> {
    vec![
        Cell::Index(sequence),
        Cell::text(&record.invoice_date),
        Cell::Blank,
        Cell::text(&record.invoice_number),
        Cell::text(&record.seller_name),
        Cell::text(&record.seller_identity),
        Cell::text(&record.product_type),
        Cell::Text(format_quantity(record.quantity, unit)),
        Cell::Amount(record.vat_free_amount),
        Cell::Amount(record.vat_amount),
        Cell::Blank,
        Cell::Blank,
        Cell::Blank,
        Cell::text(&record.ggb_approve_no),
        Cell::text(&record.tax_discount_date),
    ]
}

/// Sales row (18 cells): converted amounts in I/K, the original-currency
/// amounts under the N/O group.
pub fn sales_row(sequence: u32, record: &InvoiceLineRecord, unit: &str) -> Result<Vec<Cell>, FaturaError> {
    Ok(vec![
        Cell::Index(sequence),
        Cell::text(&record.invoice_date),
        Cell::Blank,
        Cell::text(&record.invoice_number),
        Cell::text(&record.seller_name),
        Cell::text(&record.seller_identity),
        Cell::text(&record.product_type),
        Cell::Text(format_quantity(record.quantity, unit)),
        Cell::Amount(record.converted_vat_free_amount()?),
        Cell::Amount(record.tax_rate),
        Cell::Amount(record.converted_vat_amount()?),
        Cell::text(&record.currency_code),
        Cell::ExchangeRate(record.currency_value),
        Cell::Amount(record.vat_free_amount),
        Cell::Amount(record.vat_amount),
        Cell::text(&record.ggb_approve_no),
        Cell::text(&record.tax_discount_date),
        Cell::Blank,
    ])
}

/// Running totals of the converted sales amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesTotals {
    pub vat_free_amount: Decimal,
    pub vat_amount: Decimal,
}

impl SalesTotals {
    /// Add the converted amounts of `record`. On overflow the totals are
    /// left unchanged.
    pub fn add(&mut self, record: &InvoiceLineRecord) -> Result<(), FaturaError> {
        let vat_free_amount = checked_sum(self.vat_free_amount, record.converted_vat_free_amount()?)?;
        let vat_amount = checked_sum(self.vat_amount, record.converted_vat_amount()?)?;
        self.vat_free_amount = vat_free_amount;
        self.vat_amount = vat_amount;
        Ok(())
    }

    /// Totals of `records`.
    pub fn of(records: &[InvoiceLineRecord]) -> Result<Self, FaturaError> {
        let mut totals = Self::default();
        for record in records {
            totals.add(record)?;
        }
        Ok(totals)
    }

    /// The closing row of the sales sheet: label in A, sums under I and K.
    pub fn row(&self) -> Vec<Cell> {
        let mut cells = vec![Cell::Blank; super::SALES_COLUMNS as usize];
        cells[0] = Cell::Text(TOTAL_LABEL.into());
        cells[8] = Cell::Amount(self.vat_free_amount);
        cells[10] = Cell::Amount(self.vat_amount);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LIST_COLUMNS, LIST_HEADERS, SALES_COLUMNS, SALES_HEADERS};
    use rust_decimal_macros::dec;

    fn record() -> InvoiceLineRecord {
        InvoiceLineRecord {
            invoice_date: "2024-01-15".into(),
            invoice_number: "ABC2024000000001".into(),
            seller_name: "Örnek Ticaret A.Ş.".into(),
            seller_identity: "1234567890".into(),
            product_type: "Vida".into(),
            quantity: dec!(7),
            vat_free_amount: dec!(123.45),
            vat_amount: dec!(24.69),
            tax_rate: dec!(20),
            currency_code: "USD".into(),
            currency_value: dec!(32.5),
            ..Default::default()
        }
    }

    fn describe(cells: &[Cell]) -> String {
        cells
            .iter()
            .map(|c| match c {
                Cell::Blank => "_".to_string(),
                Cell::Index(i) => i.to_string(),
                Cell::Text(s) => s.clone(),
                Cell::Amount(d) | Cell::ExchangeRate(d) => d.to_string(),
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    #[test]
    fn list_row_matches_headers() {
        let row = list_row(1, &record(), "ADET");
        assert_eq!(row.len(), LIST_COLUMNS as usize);
        assert_eq!(row.len(), LIST_HEADERS.len());
        insta::assert_snapshot!(
            describe(&row),
            @"1|2024-01-15|_|ABC2024000000001|Örnek Ticaret A.Ş.|1234567890|Vida|7.00 ADET|123.45|24.69|_|_|_|_|_"
        );
    }

    #[test]
    fn sales_row_converts_amounts() {
        let row = sales_row(3, &record(), "ADET").unwrap();
        assert_eq!(row.len(), SALES_COLUMNS as usize);
        assert_eq!(row.len(), SALES_HEADERS.len());
        assert_eq!(row[8], Cell::Amount(dec!(4012.125)));
        assert_eq!(row[9], Cell::Amount(dec!(20)));
        assert_eq!(row[10], Cell::Amount(dec!(802.425)));
        assert_eq!(row[11], Cell::Text("USD".into()));
        assert_eq!(row[12], Cell::ExchangeRate(dec!(32.5)));
        assert_eq!(row[13], Cell::Amount(dec!(123.45)));
        assert_eq!(row[14], Cell::Amount(dec!(24.69)));
    }

    #[test]
    fn totals_row_sums_converted_amounts() {
        let mut usd = record();
        usd.vat_free_amount = dec!(10.00);
        usd.vat_amount = dec!(2.00);
        let mut try_line = record();
        try_line.currency_value = dec!(1.0);
        try_line.vat_free_amount = dec!(100);
        try_line.vat_amount = dec!(20);

        let totals = SalesTotals::of(&[usd, try_line]).unwrap();
        assert_eq!(totals.vat_free_amount, dec!(425.00));
        assert_eq!(totals.vat_amount, dec!(85.00));

        let row = totals.row();
        assert_eq!(row[0], Cell::Text("Toplam".into()));
        assert_eq!(row[8], Cell::Amount(dec!(425)));
        assert_eq!(row[10], Cell::Amount(dec!(85)));
        assert!(row.iter().filter(|c| **c == Cell::Blank).count() == row.len() - 3);
    }

    #[test]
    fn empty_text_becomes_blank() {
        let row = list_row(1, &InvoiceLineRecord::default(), "ADET");
        assert_eq!(row[1], Cell::Blank);
        assert_eq!(row[7], Cell::Text("0.00 ADET".into()));
    }

    #[test]
    fn overflowing_conversion_is_an_error() {
        let mut huge = record();
        huge.vat_free_amount = rust_decimal::Decimal::MAX;
        assert!(matches!(sales_row(1, &huge, "ADET"), Err(FaturaError::Arithmetic(_))));

        let mut totals = SalesTotals::default();
        assert!(totals.add(&huge).is_err());
        assert_eq!(totals, SalesTotals::default());
    }
}
