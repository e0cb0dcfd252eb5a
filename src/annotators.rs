use polars::prelude::*;
use serde::Serialize;

use crate::error::MetricError;
use crate::natsort::natural_cmp;
use crate::table::{ANNOTATOR, MetricTable, SCORE};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatorInfo {
    pub name: String,
    pub total_annotations: usize,
    pub mean_score: f64,
}

/// Annotator statistics keyed by annotator, iterated in natural order of
/// the annotator names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnnotatorMap {
    entries: Vec<AnnotatorInfo>,
}

impl AnnotatorMap {
    pub fn get(&self, annotator: &str) -> Option<&AnnotatorInfo> {
        self.entries.iter().find(|e| e.name == annotator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnnotatorInfo)> {
        self.entries.iter().map(|e| (e.name.as_str(), e))
    }
}

impl<'a> IntoIterator for &'a AnnotatorMap {
    type Item = &'a AnnotatorInfo;
    type IntoIter = std::slice::Iter<'a, AnnotatorInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

const TOTAL: &str = "total_annotations";
const MEAN: &str = "mean_score";

/// Group rows by annotator and compute count and mean score for each.
/// Rows without an annotator are left out.
pub fn annotator_level_info(table: &MetricTable) -> Result<AnnotatorMap, MetricError> {
    let grouped = table
        .dataframe()
        .clone()
        .lazy()
        .filter(col(ANNOTATOR).is_not_null())
        .group_by([col(ANNOTATOR)])
        .agg([
            len().cast(DataType::Int64).alias(TOTAL),
            col(SCORE).mean().alias(MEAN),
        ])
        .collect()?;

    let names = grouped.column(ANNOTATOR)?.str()?;
    let totals = grouped.column(TOTAL)?.i64()?;
    let means = grouped.column(MEAN)?.f64()?;

    let mut entries: Vec<AnnotatorInfo> = names
        .into_iter()
        .zip(totals.into_iter())
        .zip(means.into_iter())
        .filter_map(|((name, total), mean)| {
            Some(AnnotatorInfo {
                name: name?.to_string(),
                total_annotations: total.unwrap_or_default() as usize,
                mean_score: mean.unwrap_or(f64::NAN),
            })
        })
        .collect();
    entries.sort_by(|a, b| natural_cmp(&a.name, &b.name));

    tracing::debug!(annotators = entries.len(), "grouped scores by annotator");

    Ok(AnnotatorMap { entries })
}

#[cfg(test)]
#[path = "../tests/src_inline/annotators.rs"]
mod tests;
