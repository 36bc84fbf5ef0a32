use thiserror::Error;

use super::model::Field;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Why a variant file could not be turned into a table.
///
/// Messages are shown to the user verbatim.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported input type: {0}")]
    UnsupportedInputType(String),

    #[error("file is empty")]
    EmptyInput,

    #[error("no columns to parse from file: {0}")]
    UnparsableTable(String),

    #[error("missing required column: {0}")]
    MissingColumn(Field),

    #[error("no valid rows remained after cleaning")]
    NoValidRows,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
