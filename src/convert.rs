use std::io::{Cursor, Read};

use crate::core::{ConversionConfig, ConversionError, CurrencyTable};
use crate::ubl::{Extractor, XmlDocument};
use crate::xlsx::WorkbookBuilder;

/// Convert a batch of UBL e-invoice documents into one Excel workbook.
///
/// Each source must hold one XML document. Sources are processed in order;
/// the first failure aborts the batch and no workbook is produced. The
/// returned cursor is positioned at the start of the `.xlsx` bytes.
///
/// `currencies` is required by currency-aware layouts and ignored otherwise.
pub fn convert<I, R>(
    sources: I,
    config: &ConversionConfig,
    currencies: Option<&CurrencyTable>,
) -> Result<Cursor<Vec<u8>>, ConversionError>
where
    I: IntoIterator<Item = R>,
    R: Read,
{
    let result = convert_batch(sources, config, currencies);
    if let Err(e) = &result {
        tracing::warn!(file = ?e.file, error = %e.source, "e-invoice conversion failed");
    }
    result
}

fn convert_batch<I, R>(
    sources: I,
    config: &ConversionConfig,
    currencies: Option<&CurrencyTable>,
) -> Result<Cursor<Vec<u8>>, ConversionError>
where
    I: IntoIterator<Item = R>,
    R: Read,
{
    let extractor = Extractor::new(config.layout, currencies)?;
    let mut builder = WorkbookBuilder::new(config)?;
    let mut files = 0usize;

    for (index, mut source) in sources.into_iter().enumerate() {
        let mut xml = String::new();
        source
            .read_to_string(&mut xml)
            .map_err(|e| ConversionError::in_file(index, e.into()))?;

        let doc = XmlDocument::parse(&xml).map_err(|e| ConversionError::in_file(index, e))?;
        let records = extractor
            .extract(&doc)
            .map_err(|e| ConversionError::in_file(index, e))?;
        tracing::debug!(file = index, lines = records.len(), "parsed e-invoice");

        builder
            .extend(records)
            .map_err(|e| ConversionError::in_file(index, e))?;
        files += 1;
    }

    let records = builder.records();
    let bytes = builder.finish()?;
    tracing::info!(
        files,
        records,
        bytes = bytes.len(),
        layout = ?config.layout,
        "e-invoice workbook generated"
    );
    Ok(Cursor::new(bytes))
}
