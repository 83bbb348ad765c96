//! Error types for loading, filtering, rendering and exporting trade data

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Data file does not exist
    #[error("data file not found: {}", .0.display())]
    DataNotFound(PathBuf),

    /// File extension not handled by the loader or exporter
    #[error("unsupported file format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// Field name not part of the trade schema
    #[error("unknown field '{0}' (expected one of: {fields})", fields = crate::data::Field::names().join(", "))]
    UnknownField(String),

    /// Malformed filter clause
    #[error("invalid filter '{clause}': {reason}")]
    InvalidFilter { clause: String, reason: String },

    /// Row-level failure while reading the table
    #[error("failed to load data: {0}")]
    Load(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Chart could not be built or saved
    #[error("chart error: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
