//! Excel workbook generation with `rust_xlsxwriter`.
//!
//! [`WorkbookBuilder`] writes detail rows as records arrive and produces the
//! summary sheet and totals row when finished.
//!
//! # Example
//!
//! ```
//! use efatura::core::{ConversionConfig, InvoiceLineRecord, LayoutMode};
//! use efatura::xlsx::WorkbookBuilder;
//!
//! let config = ConversionConfig::for_layout(LayoutMode::PurchaseSummary);
//! let mut builder = WorkbookBuilder::new(&config).unwrap();
//! builder.push(InvoiceLineRecord::default()).unwrap();
//! let bytes = builder.finish().unwrap();
//! assert!(bytes.starts_with(b"PK"));
//! ```

mod sheet;

use rust_xlsxwriter::Workbook;

use self::sheet::SheetWriter;
use crate::core::{ConversionConfig, FaturaError, InvoiceLineRecord, LayoutMode, aggregate};
use crate::layout::{SalesTotals, list_row, sales_row};

/// Incremental workbook writer for one conversion.
pub struct WorkbookBuilder<'c> {
    config: &'c ConversionConfig,
    detail: SheetWriter,
    sequence: u32,
    totals: SalesTotals,
    /// Records kept for the grouped summary sheet.
    retained: Vec<InvoiceLineRecord>,
}

impl<'c> WorkbookBuilder<'c> {
    /// Create the detail sheet and write its header.
    pub fn new(config: &'c ConversionConfig) -> Result<Self, FaturaError> {
        let mut detail = SheetWriter::new(config.detail_sheet())?;
        match config.layout {
            LayoutMode::Sales => detail.write_sales_header()?,
            LayoutMode::PurchaseList | LayoutMode::PurchaseSummary => detail.write_list_header()?,
        }
        Ok(Self {
            config,
            detail,
            sequence: 0,
            totals: SalesTotals::default(),
            retained: Vec::new(),
        })
    }

    /// Write one record as the next detail row.
    pub fn push(&mut self, record: InvoiceLineRecord) -> Result<(), FaturaError> {
        self.sequence += 1;
        let unit = &self.config.quantity_unit;
        let cells = match self.config.layout {
            LayoutMode::Sales => {
                let cells = sales_row(self.sequence, &record, unit)?;
                self.totals.add(&record)?;
                cells
            }
            LayoutMode::PurchaseList | LayoutMode::PurchaseSummary => {
                list_row(self.sequence, &record, unit)
            }
        };
        self.detail.write_row(&cells)?;
        if self.config.layout.has_summary_sheet() {
            self.retained.push(record);
        }
        Ok(())
    }

    /// Write every record of `records`, stopping at the first failure.
    pub fn extend<I>(&mut self, records: I) -> Result<(), FaturaError>
    where
        I: IntoIterator<Item = InvoiceLineRecord>,
    {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    /// Number of records written to the detail sheet.
    pub fn records(&self) -> u32 {
        self.sequence
    }

    /// Close the sheets and serialize the workbook.
    pub fn finish(mut self) -> Result<Vec<u8>, FaturaError> {
        let mut workbook = Workbook::new();

        if self.config.layout == LayoutMode::Sales {
            self.detail.write_row(&self.totals.row())?;
        }
        let detail_rows = self.detail.rows();
        workbook.push_worksheet(self.detail.finish());

        if self.config.layout.has_summary_sheet() {
            let groups = aggregate(&self.retained)?;
            let mut summary = SheetWriter::new(&self.config.summary_sheet_name)?;
            summary.write_list_header()?;
            for (i, group) in groups.iter().enumerate() {
                summary.write_row(&list_row(i as u32 + 1, group, &self.config.quantity_unit))?;
            }
            tracing::debug!(groups = groups.len(), "summary sheet written");
            workbook.push_worksheet(summary.finish());
        }

        let bytes = workbook.save_to_buffer()?;
        tracing::debug!(rows = detail_rows, bytes = bytes.len(), "workbook serialized");
        Ok(bytes)
    }
}
