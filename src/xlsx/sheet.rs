use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, ColNum, Format, FormatAlign, FormatBorder, RowNum, Worksheet};

use crate::core::FaturaError;
use crate::layout::{Cell, LIST_HEADERS, SALES_GROUP, SALES_HEADERS};

const AMOUNT_FORMAT: &str = "#,##0.00";
const EXCHANGE_RATE_FORMAT: &str = "#,##0.0000";
const HEADER_BACKGROUND: u32 = 0xD3D3D3;

/// Cell formats shared by every sheet. All of them draw a thin border, so
/// the populated rectangle is fully outlined once the last row is written.
#[derive(Clone)]
struct Formats {
    header: Format,
    text: Format,
    index: Format,
    amount: Format,
    exchange_rate: Format,
}

impl Formats {
    fn new() -> Self {
        let bordered = Format::new().set_border(FormatBorder::Thin);
        Self {
            header: bordered
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(HEADER_BACKGROUND))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            text: bordered.clone(),
            index: bordered.clone().set_num_format("0"),
            amount: bordered.clone().set_num_format(AMOUNT_FORMAT),
            exchange_rate: bordered.set_num_format(EXCHANGE_RATE_FORMAT),
        }
    }
}

/// Nearest double to `value`, so `123.45` is stored as `123.45`.
fn to_f64(value: Decimal) -> Result<f64, FaturaError> {
    value
        .normalize()
        .to_string()
        .parse::<f64>()
        .map_err(|e| FaturaError::Workbook(format!("amount {value} not representable: {e}")))
}

/// Writes header and body rows into one worksheet, top to bottom.
pub(crate) struct SheetWriter {
    worksheet: Worksheet,
    formats: Formats,
    next_row: RowNum,
}

impl SheetWriter {
    pub(crate) fn new(name: &str) -> Result<Self, FaturaError> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(name)?;
        Ok(Self {
            worksheet,
            formats: Formats::new(),
            next_row: 0,
        })
    }

    /// Single header row of the purchase layouts.
    pub(crate) fn write_list_header(&mut self) -> Result<(), FaturaError> {
        let row = self.next_row;
        for (col, caption) in LIST_HEADERS.iter().enumerate() {
            let col = col as ColNum;
            if caption.is_empty() {
                self.worksheet.write_blank(row, col, &self.formats.header)?;
            } else {
                self.worksheet
                    .write_string_with_format(row, col, *caption, &self.formats.header)?;
            }
        }
        self.worksheet.set_freeze_panes(row + 1, 0)?;
        self.next_row += 1;
        Ok(())
    }

    /// Two header rows of the sales layout: every caption is merged over
    /// both rows except the grouped columns, which share a parent caption.
    pub(crate) fn write_sales_header(&mut self) -> Result<(), FaturaError> {
        let top = self.next_row;
        let sub = top + 1;
        let header = &self.formats.header;

        for (col, caption) in SALES_HEADERS.iter().enumerate() {
            let col = col as ColNum;
            if SALES_GROUP.contains(col) {
                self.worksheet.write_string_with_format(sub, col, *caption, header)?;
            } else {
                self.worksheet.merge_range(top, col, sub, col, caption, header)?;
            }
        }
        self.worksheet.merge_range(
            top,
            SALES_GROUP.first_column,
            top,
            SALES_GROUP.last_column,
            SALES_GROUP.caption,
            header,
        )?;

        self.worksheet.set_freeze_panes(sub + 1, 0)?;
        self.next_row += 2;
        Ok(())
    }

    /// Append one body row.
    pub(crate) fn write_row(&mut self, cells: &[Cell]) -> Result<(), FaturaError> {
        let row = self.next_row;
        for (col, cell) in cells.iter().enumerate() {
            self.write_cell(row, col as ColNum, cell)?;
        }
        self.next_row += 1;
        Ok(())
    }

    fn write_cell(&mut self, row: RowNum, col: ColNum, cell: &Cell) -> Result<(), FaturaError> {
        let ws = &mut self.worksheet;
        let f = &self.formats;
        match cell {
            Cell::Blank => ws.write_blank(row, col, &f.text)?,
            Cell::Index(n) => ws.write_number_with_format(row, col, *n, &f.index)?,
            Cell::Text(s) => ws.write_string_with_format(row, col, s, &f.text)?,
            Cell::Amount(d) => ws.write_number_with_format(row, col, to_f64(*d)?, &f.amount)?,
            Cell::ExchangeRate(d) => {
                ws.write_number_with_format(row, col, to_f64(*d)?, &f.exchange_rate)?
            }
        };
        Ok(())
    }

    /// Rows written so far, headers included.
    pub(crate) fn rows(&self) -> RowNum {
        self.next_row
    }

    /// Autofit the columns and hand the worksheet over.
    pub(crate) fn finish(mut self) -> Worksheet {
        self.worksheet.autofit();
        self.worksheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn to_f64_is_the_nearest_double() {
        assert_eq!(to_f64(dec!(123.45)).unwrap(), 123.45);
        assert_eq!(to_f64(dec!(0.1)).unwrap(), 0.1);
        assert_eq!(to_f64(dec!(-7.000)).unwrap(), -7.0);
        assert_eq!(to_f64(dec!(4012.125)).unwrap(), 4012.125);
    }

    #[test]
    fn rejects_invalid_sheet_names() {
        assert!(matches!(SheetWriter::new("a/b"), Err(FaturaError::Workbook(_))));
        assert!(matches!(
            SheetWriter::new("this sheet name is far too long for excel"),
            Err(FaturaError::Workbook(_))
        ));
    }

    #[test]
    fn counts_header_rows() {
        let mut list = SheetWriter::new("list").unwrap();
        list.write_list_header().unwrap();
        assert_eq!(list.rows(), 1);

        let mut sales = SheetWriter::new("sales").unwrap();
        sales.write_sales_header().unwrap();
        sales.write_row(&[Cell::Index(1), Cell::Blank]).unwrap();
        assert_eq!(sales.rows(), 3);
    }
}
