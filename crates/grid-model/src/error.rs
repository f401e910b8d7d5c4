use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a remap run.
///
/// Everything non-fatal (missing mappings, row shape mismatches) is collected
/// in [`crate::Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum GridError {
    /// Mapping file could not be opened or read.
    #[error("unable to read mapping file {path}: {source}")]
    MapUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Grid input file could not be opened.
    #[error("unable to read input file {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file already exists; outputs are never overwritten.
    #[error("output file already exists: {path}")]
    OutputExists { path: PathBuf },

    /// Output file could not be created.
    #[error("unable to open output file {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
