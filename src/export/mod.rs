//! Export module for CSV and JSON export functionality
//!
//! Writes analysis results and figure datasets to timestamped files.

pub mod csv_export;
pub mod json_export;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Create the export directory if needed and return it
pub fn prepare_export_directory(dir: &Path) -> Result<PathBuf, AnalysisError> {
    std::fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// Generate a timestamped filename for exports
pub fn generate_export_filename(prefix: &str, extension: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", prefix, timestamp, extension)
}

// Re-export writers
pub use csv_export::*;
pub use json_export::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!(ExportFormat::from_str("csv", true).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_str("CSV", true).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_str("json", true).unwrap(), ExportFormat::Json);
        assert_eq!(ExportFormat::from_str("JSON", true).unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
    }

    #[test]
    fn test_export_format_serialization() {
        assert_eq!(serde_json::to_string(&ExportFormat::Csv).unwrap(), "\"csv\"");
        let json: ExportFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(json, ExportFormat::Json);
    }

    #[test]
    fn test_generate_export_filename_format() {
        let filename = generate_export_filename("lroma_sensitivity", "csv");

        // lroma_sensitivity_YYYYMMDD_HHMMSS.csv
        assert!(filename.starts_with("lroma_sensitivity_"));
        assert!(filename.ends_with(".csv"));
        assert_eq!(filename.len(), "lroma_sensitivity_".len() + 15 + ".csv".len());
    }

    #[test]
    fn test_prepare_export_directory_creates_nested() {
        let dir = std::env::temp_dir()
            .join("investor_state_export_test")
            .join("nested");
        std::fs::remove_dir_all(&dir).ok();

        let created = prepare_export_directory(&dir).unwrap();

        assert!(created.is_dir());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_prepare_export_directory_under_file_fails() {
        let file = std::env::temp_dir().join("investor_state_export_blocker");
        std::fs::write(&file, b"").unwrap();

        let err = prepare_export_directory(&file.join("out")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));

        std::fs::remove_file(&file).ok();
    }
}
