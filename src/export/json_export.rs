//! JSON export functionality
//!
//! Every JSON file is wrapped in an envelope carrying the export time and
//! format version.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::AnalysisError;

const EXPORT_VERSION: &str = "1.0.0";

/// Envelope around any exported document
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope<'a, T: Serialize> {
    pub export_date: String,
    pub export_version: &'static str,
    pub kind: &'a str,
    pub data: &'a T,
}

impl<'a, T: Serialize> ExportEnvelope<'a, T> {
    pub fn new(kind: &'a str, data: &'a T) -> Self {
        Self {
            export_date: chrono::Utc::now().to_rfc3339(),
            export_version: EXPORT_VERSION,
            kind,
            data,
        }
    }
}

/// Write any serializable document to a pretty-printed JSON file
pub fn write_json<T: Serialize>(kind: &str, data: &T, path: &Path) -> Result<(), AnalysisError> {
    let export = ExportEnvelope::new(kind, data);

    let json = serde_json::to_string_pretty(&export)?;

    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}
