//! Loading a metric CSV into a validated, sorted score table.
//!
//! The CSV is read with every column as text and each column is then
//! checked and coerced explicitly, so the resulting frame always has the
//! same typed layout regardless of what the reader would have inferred.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::Serialize;

use crate::error::{MetricError, SchemaError};
use crate::scanner::MetricData;

pub const IDENTIFIER: &str = "identifier";
pub const SCORE: &str = "score";
pub const DESCRIPTION: &str = "description";
pub const OBJECT_CLASS: &str = "object_class";
pub const ANNOTATOR: &str = "annotator";
pub const FRAME: &str = "frame";
pub const URL: &str = "url";

pub const SCHEMA_COLUMNS: &[&str] = &[
    IDENTIFIER,
    SCORE,
    DESCRIPTION,
    OBJECT_CLASS,
    ANNOTATOR,
    FRAME,
    URL,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub identifier: String,
    pub score: f64,
    pub description: Option<String>,
    pub object_class: Option<String>,
    pub annotator: Option<String>,
    pub frame: i64,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub normalize: bool,
    pub sort_key: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normalize: false,
            sort_key: SCORE.to_string(),
        }
    }
}

/// Typed column vectors after validation, before they become a frame.
#[derive(Debug, Clone, Default)]
struct ValidatedColumns {
    identifier: Vec<String>,
    score: Vec<f64>,
    description: Vec<Option<String>>,
    object_class: Vec<Option<String>>,
    annotator: Vec<Option<String>>,
    frame: Vec<i64>,
    url: Vec<Option<String>>,
}

/// Scores of one metric, sorted by (sort key, identifier).
#[derive(Debug, Clone)]
pub struct MetricTable {
    path: PathBuf,
    df: DataFrame,
}

impl MetricTable {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn scores(&self) -> Result<Vec<f64>, MetricError> {
        let scores = self.df.column(SCORE)?.f64()?;
        Ok(scores.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    pub fn rows(&self) -> Result<Vec<MetricRow>, MetricError> {
        let identifier = self.df.column(IDENTIFIER)?.str()?;
        let score = self.df.column(SCORE)?.f64()?;
        let description = self.df.column(DESCRIPTION)?.str()?;
        let object_class = self.df.column(OBJECT_CLASS)?.str()?;
        let annotator = self.df.column(ANNOTATOR)?.str()?;
        let frame = self.df.column(FRAME)?.i64()?;
        let url = self.df.column(URL)?.str()?;

        let owned = |v: Option<&str>| v.map(|s| s.to_string());

        let mut out = Vec::with_capacity(self.len());
        for idx in 0..self.len() {
            out.push(MetricRow {
                identifier: identifier.get(idx).unwrap_or_default().to_string(),
                score: score.get(idx).unwrap_or(f64::NAN),
                description: owned(description.get(idx)),
                object_class: owned(object_class.get(idx)),
                annotator: owned(annotator.get(idx)),
                frame: frame.get(idx).unwrap_or_default(),
                url: owned(url.get(idx)),
            });
        }
        Ok(out)
    }
}

/// Field values read as missing, in addition to empty fields.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn read_csv_as_text(path: &Path) -> Result<DataFrame, MetricError> {
    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());
    let parse_options = CsvParseOptions::default().with_null_values(Some(null_values));

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| MetricError::csv(path, e))
}

fn text_values<'a>(
    df: &'a DataFrame,
    column: &'static str,
) -> Result<Vec<Option<&'a str>>, SchemaError> {
    let col = df
        .column(column)
        .map_err(|_| SchemaError::MissingColumn { column })?;
    let values = col.str().map_err(|_| SchemaError::NotCoercible {
        column,
        row: 0,
        value: col.dtype().to_string(),
        expected: "string",
    })?;
    Ok(values.into_iter().collect())
}

fn required_strings(df: &DataFrame, column: &'static str) -> Result<Vec<String>, SchemaError> {
    text_values(df, column)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            v.map(|s| s.to_string())
                .ok_or(SchemaError::NullValue { column, row })
        })
        .collect()
}

fn nullable_strings(
    df: &DataFrame,
    column: &'static str,
) -> Result<Vec<Option<String>>, SchemaError> {
    Ok(text_values(df, column)?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

fn required_parsed<T: std::str::FromStr>(
    df: &DataFrame,
    column: &'static str,
    expected: &'static str,
) -> Result<Vec<T>, SchemaError> {
    text_values(df, column)?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            let raw = v.ok_or(SchemaError::NullValue { column, row })?;
            raw.trim().parse::<T>().map_err(|_| SchemaError::NotCoercible {
                column,
                row,
                value: raw.to_string(),
                expected,
            })
        })
        .collect()
}

fn validate_columns(df: &DataFrame) -> Result<ValidatedColumns, SchemaError> {
    Ok(ValidatedColumns {
        identifier: required_strings(df, IDENTIFIER)?,
        score: required_parsed::<f64>(df, SCORE, "float")?,
        description: nullable_strings(df, DESCRIPTION)?,
        object_class: nullable_strings(df, OBJECT_CLASS)?,
        annotator: nullable_strings(df, ANNOTATOR)?,
        frame: required_parsed::<i64>(df, FRAME, "integer")?,
        url: nullable_strings(df, URL)?,
    })
}

pub fn validate_sort_key(sort_key: &str) -> Result<&'static str, SchemaError> {
    SCHEMA_COLUMNS
        .iter()
        .copied()
        .find(|c| *c == sort_key)
        .ok_or_else(|| SchemaError::UnknownSortKey(sort_key.to_string()))
}

/// Min-max rescale into [0, 1]. A zero range divides by one, so a constant
/// column maps to all zeros.
pub fn normalize_scores(scores: &[f64], min_value: f64, max_value: f64) -> Vec<f64> {
    let mut diff = max_value - min_value;
    if diff == 0.0 {
        diff = 1.0;
    }
    scores.iter().map(|s| (s - min_value) / diff).collect()
}

/// Bounds for normalization: metadata values when present, else the
/// observed range. `None` for an empty column without metadata bounds.
pub fn normalization_bounds(
    scores: &[f64],
    min_value: Option<f64>,
    max_value: Option<f64>,
) -> Option<(f64, f64)> {
    let observed_min = || scores.iter().copied().reduce(f64::min);
    let observed_max = || scores.iter().copied().reduce(f64::max);
    let min = min_value.or_else(observed_min)?;
    let max = max_value.or_else(observed_max)?;
    Some((min, max))
}

pub fn load_metric_table(
    metric: &MetricData,
    options: &LoadOptions,
) -> Result<MetricTable, MetricError> {
    let path = metric.path.as_path();
    let sort_key =
        validate_sort_key(&options.sort_key).map_err(|e| MetricError::schema(path, e))?;

    let raw = read_csv_as_text(path)?;
    let mut columns = validate_columns(&raw).map_err(|e| MetricError::schema(path, e))?;

    if options.normalize {
        if let Some((min, max)) =
            normalization_bounds(&columns.score, metric.meta.min_value, metric.meta.max_value)
        {
            columns.score = normalize_scores(&columns.score, min, max);
        }
    }

    let ValidatedColumns {
        identifier,
        score,
        description,
        object_class,
        annotator,
        frame,
        url,
    } = columns;

    let df = df!(
        IDENTIFIER => identifier,
        SCORE => score,
        DESCRIPTION => description,
        OBJECT_CLASS => object_class,
        ANNOTATOR => annotator,
        FRAME => frame,
        URL => url
    )?;

    let df = df
        .lazy()
        .sort(
            [sort_key, IDENTIFIER],
            SortMultipleOptions::default()
                .with_maintain_order(true)
                .with_nulls_last(true),
        )
        .collect()?;

    tracing::info!(
        metric = %metric.name,
        rows = df.height(),
        normalize = options.normalize,
        sort_key,
        "loaded metric table"
    );

    Ok(MetricTable {
        path: metric.path.clone(),
        df,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/table.rs"]
mod tests;
