use thiserror::Error;

/// Errors that can occur while extracting invoice lines or producing a workbook.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FaturaError {
    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// A numeric field is present but cannot be parsed as a decimal.
    #[error("invalid number in {field}: '{value}'")]
    InvalidNumber {
        /// UBL element the value was read from (e.g. "cbc:InvoicedQuantity").
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A line is tagged with a currency code missing from the rate table.
    #[error("no exchange rate for currency code '{0}'")]
    UnknownCurrency(String),

    /// The layout converts currencies but no rate table was supplied.
    #[error("layout requires a currency table but none was supplied")]
    MissingCurrencyTable,

    /// A converted amount or a sum left the range of `Decimal`.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Reading an input source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook generation or serialization failed.
    #[error("workbook error: {0}")]
    Workbook(String),
}

#[cfg(feature = "xlsx")]
impl From<rust_xlsxwriter::XlsxError> for FaturaError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        FaturaError::Workbook(e.to_string())
    }
}

/// Batch-level failure of an e-invoice to Excel conversion.
///
/// Every fatal condition of a batch is wrapped into this type; the
/// underlying cause is available through [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("Error converting e-invoice to Excel: {}", describe(.file, .source))]
pub struct ConversionError {
    /// Zero-based index of the source that failed, if the failure is tied to one.
    pub file: Option<usize>,
    /// The underlying cause.
    #[source]
    pub source: FaturaError,
}

fn describe(file: &Option<usize>, source: &FaturaError) -> String {
    match file {
        Some(index) => format!("file #{}: {source}", index + 1),
        None => source.to_string(),
    }
}

impl ConversionError {
    /// Wrap a failure that belongs to the source at `index`.
    pub fn in_file(index: usize, source: FaturaError) -> Self {
        Self {
            file: Some(index),
            source,
        }
    }
}

impl From<FaturaError> for ConversionError {
    fn from(source: FaturaError) -> Self {
        Self { file: None, source }
    }
}
