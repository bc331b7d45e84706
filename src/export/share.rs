//! Export-and-share orchestration.
//!
//! The engine renders the artifact and writes it to disk; presenting a
//! share surface is the platform's job, reached through the
//! [`ShareSheet`] seam. The file write strictly precedes the share
//! call, and failures from either step surface to the caller.

use crate::error::TabError;
use crate::export::{export_to_string, ExportOptions};
use crate::tablature::document::TabDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Platform share surface, implemented by the presentation layer.
pub trait ShareSheet {
    /// Whether the platform can present a share surface at all.
    fn is_available(&self) -> bool;

    /// Hands the written artifact over to the platform.
    fn share(&self, file: &Path, dialog_title: &str, mime_type: &str) -> Result<(), TabError>;
}

/// Renders the document, writes the artifact into `dir` and hands it to
/// the share sheet. Returns the path of the written file.
pub fn export_and_share(
    tab: &TabDocument,
    options: &ExportOptions,
    dir: &Path,
    sheet: &dyn ShareSheet,
) -> Result<PathBuf, TabError> {
    let content = export_to_string(tab, options)?;
    let file_name = format!("{}.{}", sanitize_title(&tab.title), options.format.extension());
    let file_path = dir.join(file_name);
    fs::write(&file_path, content)?;
    log::info!("exported {} to {}", tab.title, file_path.display());

    if !sheet.is_available() {
        return Err(TabError::SharingUnavailable(
            "no share surface on this platform".to_string(),
        ));
    }
    sheet.share(
        &file_path,
        &format!("Share {}", tab.title),
        options.format.mime_type(),
    )?;
    Ok(file_path)
}

// Titles become file names; anything outside [A-Za-z0-9] turns into an
// underscore.
fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
