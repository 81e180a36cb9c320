//! Error definitions for preprocessing
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocessingError>;

/// Uniform error type raised at the orchestrator boundary.
///
/// Every internal failure is one of the three categories below; callers that
/// need the category can match on the variant, everyone else gets a single
/// error type carrying the original cause.
#[derive(Error, Debug)]
pub enum PreprocessingError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Failures while reading an input table, before any transformation runs.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to open table at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse delimited table at {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("table at {path} contains no rows")]
    EmptyTable { path: PathBuf },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("target column '{0}' not found")]
    MissingTargetColumn(String),
    #[error("target column '{column}' holds non-numeric value '{value}' at row {row}")]
    NonNumericTarget {
        column: String,
        value: String,
        row: usize,
    },
}

/// Failures while fitting a plan or applying a fitted plan to a table.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("column '{0}' not found in input table")]
    MissingColumn(String),
    #[error("column '{column}' holds non-numeric value '{value}' at row {row}")]
    NonNumericValue {
        column: String,
        value: String,
        row: usize,
    },
    #[error("column '{0}' has no observed values to fit on")]
    AllValuesMissing(String),
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("transformation plan route names no columns")]
    EmptyRoute,
    #[error("input has {found} features, the fitted scaler expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Failures while persisting or reloading the fitted plan artifact.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to create artifact directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write artifact to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode fitted plan")]
    Encode(#[source] serde_json::Error),
    #[error("failed to read artifact from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode fitted plan")]
    Decode(#[source] serde_json::Error),
}
