use std::{io, path::PathBuf};

use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors raised while converting records to GeoJSON.
///
/// Only `CoercionError` is record-level and is recovered by dropping the record. Everything else
/// aborts the conversion of the dataset.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("could not read input file {}: {source}", path.display())]
    InputRead { path: PathBuf, source: io::Error },

    /// The input is not valid JSON or not an array of objects.
    #[error("could not parse {} as a JSON array of objects: {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not coerce {field} value {value} to a number")]
    CoercionError {
        field: &'static str,
        value: serde_json::Value,
    },

    #[error("could not serialize feature collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not write output file {}: {source}", path.display())]
    OutputWriteError { path: PathBuf, source: io::Error },

    #[error("could not read catalog directory {}: {source}", path.display())]
    CatalogRead { path: PathBuf, source: io::Error },
}
