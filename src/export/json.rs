//! JSON projection: a complete structural serialization of the
//! document. The inverse lives on
//! [`TabDocument::from_json`](crate::tablature::document::TabDocument::from_json);
//! together they form a lossless round trip preserving ids and
//! timestamps verbatim.

use crate::error::TabError;
use crate::tablature::document::TabDocument;

pub fn export_json(tab: &TabDocument) -> Result<String, TabError> {
    serde_json::to_string_pretty(tab)
        .map_err(|err| TabError::IoError(format!("could not serialize document: {err}")))
}
