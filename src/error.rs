use std::path::PathBuf;

use thiserror::Error;

/// Conditions that abort an ETL run. Row-level data problems are never
/// reported through this type; they are filtered and counted instead.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Cannot open store at {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Reference file not found: {}", .path.display())]
    MissingReference { path: PathBuf },

    #[error("Reference file {} is unusable: {reason}", .path.display())]
    Reference { path: PathBuf, reason: String },

    #[error("Failed to prepare schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Extract from {table} failed: {reason}")]
    Extract { table: &'static str, reason: String },

    #[error("Load into {table} failed: {source}")]
    Load {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type EtlResult<T> = Result<T, EtlError>;
