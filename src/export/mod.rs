//! Export/transform engine: deterministic, side-effect-free projections
//! from a tab document to external representations.

pub mod csv;
pub mod json;
pub mod midi;
pub mod share;
pub mod text;

#[cfg(test)]
mod export_tests;

use crate::error::TabError;
use crate::tablature::document::TabDocument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of shareable export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Txt,
    Json,
    Csv,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = TabError;

    fn from_str(value: &str) -> Result<Self, TabError> {
        match value {
            "txt" => Ok(ExportFormat::Txt),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(TabError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Render technique symbols into the text grid.
    pub include_techniques: bool,
    /// Emit the metadata header and footer in the text export.
    pub include_metadata: bool,
}

impl ExportOptions {
    pub const fn new(format: ExportFormat) -> Self {
        ExportOptions {
            format,
            include_techniques: true,
            include_metadata: true,
        }
    }
}

/// Renders the document in the requested format.
pub fn export_to_string(tab: &TabDocument, options: &ExportOptions) -> Result<String, TabError> {
    match options.format {
        ExportFormat::Txt => Ok(text::export_text(tab, options)),
        ExportFormat::Json => json::export_json(tab),
        ExportFormat::Csv => Ok(csv::export_csv(tab)),
    }
}
