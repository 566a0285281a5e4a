use serde::{Deserialize, Serialize};

use super::types::LayoutMode;

/// Default name of the detail sheet for purchase layouts.
pub const DEFAULT_DETAIL_SHEET: &str = "Invoice Data";
/// Default name of the detail sheet for the sales layout.
pub const DEFAULT_SALES_SHEET: &str = "Sales Invoices";
/// Default name of the grouped summary sheet.
pub const DEFAULT_SUMMARY_SHEET: &str = "Invoice Summary";
/// Unit suffix of the quantity column.
pub const DEFAULT_QUANTITY_UNIT: &str = "ADET";

/// Configuration for a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Worksheet layout and tax extraction policy.
    pub layout: LayoutMode,
    /// Name of the detail sheet. `None` picks the layout's default.
    pub detail_sheet_name: Option<String>,
    /// Name of the grouped summary sheet (`PurchaseSummary` only).
    pub summary_sheet_name: String,
    /// Suffix appended to the quantity text, e.g. "ADET".
    pub quantity_unit: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            layout: LayoutMode::default(),
            detail_sheet_name: None,
            summary_sheet_name: DEFAULT_SUMMARY_SHEET.into(),
            quantity_unit: DEFAULT_QUANTITY_UNIT.into(),
        }
    }
}

impl ConversionConfig {
    /// Default configuration for `layout`.
    pub fn for_layout(layout: LayoutMode) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    /// Effective name of the detail sheet.
    pub fn detail_sheet(&self) -> &str {
        match (&self.detail_sheet_name, self.layout) {
            (Some(name), _) => name.as_str(),
            (None, LayoutMode::Sales) => DEFAULT_SALES_SHEET,
            (None, _) => DEFAULT_DETAIL_SHEET,
        }
    }
}

/// Builder for [`ConversionConfig`].
///
/// # Example
///
/// ```
/// use efatura::core::{ConversionConfigBuilder, LayoutMode};
///
/// let config = ConversionConfigBuilder::new(LayoutMode::PurchaseSummary)
///     .detail_sheet_name("Alışlar")
///     .summary_sheet_name("Fatura Bazında")
///     .build();
/// assert_eq!(config.detail_sheet(), "Alışlar");
/// ```
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Create a builder for the given layout.
    pub fn new(layout: LayoutMode) -> Self {
        Self {
            config: ConversionConfig::for_layout(layout),
        }
    }

    /// Set the detail sheet name.
    pub fn detail_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.detail_sheet_name = Some(name.into());
        self
    }

    /// Set the summary sheet name.
    pub fn summary_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.summary_sheet_name = name.into();
        self
    }

    /// Set the quantity unit suffix.
    pub fn quantity_unit(mut self, unit: impl Into<String>) -> Self {
        self.config.quantity_unit = unit.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
