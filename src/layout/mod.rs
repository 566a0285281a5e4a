//! Worksheet layouts: header captions and the cells of each row.
//!
//! Rows are produced as [`Cell`] vectors so their content does not depend on
//! the spreadsheet backend.
//!
//! | Layout | Columns | Header rows | Totals row |
//! |--------|---------|-------------|------------|
//! | purchase list / summary | 15 | 1 | no |
//! | sales | 18 | 2 (merged) | yes |

mod rows;

pub use rows::{SalesTotals, list_row, sales_row};

use rust_decimal::Decimal;

/// Content of one worksheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Empty but formatted (bordered) cell.
    Blank,
    /// Sequence number.
    Index(u32),
    /// Plain text.
    Text(String),
    /// Monetary amount or percentage, shown with two decimals.
    Amount(Decimal),
    /// Exchange rate, shown with four decimals.
    ExchangeRate(Decimal),
}

impl Cell {
    /// Text cell, or [`Cell::Blank`] for empty text.
    pub fn text(value: &str) -> Cell {
        if value.is_empty() {
            Cell::Blank
        } else {
            Cell::Text(value.to_string())
        }
    }
}

/// Column count of the purchase list and summary layouts.
pub const LIST_COLUMNS: u16 = 15;

/// Column count of the sales layout.
pub const SALES_COLUMNS: u16 = 18;

/// Captions of the purchase list ("İndirilecek KDV Listesi") header row.
pub const LIST_HEADERS: [&str; LIST_COLUMNS as usize] = [
    "Sıra No",
    "Alış Faturasının Tarihi",
    "Alış Faturasının Serisi",
    "Alış Faturasının Sıra No'su",
    "Satıcının Adı-Soyadı / Ünvanı",
    "Satıcının Vergi Kimlik Numarası / TC Kimlik Numarası",
    "Alınan Mal ve/veya Hizmetin Cinsi",
    "Alınan Mal ve/veya Hizmetin Miktarı",
    "Alınan Mal ve/veya Hizmetin KDV Hariç Tutarı",
    "KDV'si",
    "",
    "",
    "",
    "GGB Tescil No'su (Alış İthalat İse)",
    "Belgenin İndirim Hakkının Kullanıldığı KDV Dönemi",
];

/// First-row captions of the sales layout. Every column except the
/// [`SALES_GROUP`] columns spans both header rows.
pub const SALES_HEADERS: [&str; SALES_COLUMNS as usize] = [
    "Sıra No",
    "Satış Faturasının Tarihi",
    "Satış Faturasının Serisi",
    "Satış Faturasının Sıra No'su",
    "Satıcının Adı-Soyadı / Ünvanı",
    "Satıcının Vergi Kimlik Numarası / TC Kimlik Numarası",
    "Mal ve/veya Hizmetin Cinsi",
    "Mal ve/veya Hizmetin Miktarı",
    "KDV Hariç Tutar (TL)",
    "KDV Oranı (%)",
    "KDV'si (TL)",
    "Döviz Cinsi",
    "Döviz Kuru",
    "KDV Hariç Tutar",
    "KDV'si",
    "GGB Tescil No'su",
    "Belgenin İndirim Hakkının Kullanıldığı KDV Dönemi",
    "Açıklama",
];

/// A caption spanning several columns of the first header row, with the
/// columns' own captions (taken from [`SALES_HEADERS`]) in the second row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderGroup {
    /// Caption merged over the group in the first header row.
    pub caption: &'static str,
    /// Zero-based first column of the group.
    pub first_column: u16,
    /// Zero-based last column of the group, inclusive.
    pub last_column: u16,
}

impl HeaderGroup {
    /// Whether `column` lies inside the group.
    pub fn contains(&self, column: u16) -> bool {
        (self.first_column..=self.last_column).contains(&column)
    }
}

/// Columns N and O: amounts in the original currency.
pub const SALES_GROUP: HeaderGroup = HeaderGroup {
    caption: "Döviz Cinsinden Tutar",
    first_column: 13,
    last_column: 14,
};

/// Label of the sales totals row.
pub const TOTAL_LABEL: &str = "Toplam";
