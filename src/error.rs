use std::path::PathBuf;

use thiserror::Error;

/// Column-level validation failure for a metric CSV.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("null value in non-nullable column `{column}` (row {row})")]
    NullValue { column: &'static str, row: usize },

    #[error("value `{value}` in column `{column}` (row {row}) is not coercible to {expected}")]
    NotCoercible {
        column: &'static str,
        row: usize,
        value: String,
        expected: &'static str,
    },

    #[error("unknown sort column `{0}`")]
    UnknownSortKey(String),
}

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    #[error("dataframe error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("schema validation failed for {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("metric not found: {0}")]
    MetricNotFound(String),
}

impl MetricError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: polars::prelude::PolarsError) -> Self {
        MetricError::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, source: SchemaError) -> Self {
        MetricError::Schema {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/error.rs"]
mod tests;
