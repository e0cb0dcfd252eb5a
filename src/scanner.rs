use std::cmp::Ordering;
use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::classify::{is_image_level_metric, is_valid_annotation_type};
use crate::metadata::{MetricMetadata, MetricScope, load_metadata};
use crate::natsort::natural_cmp;

/// Number of leading identifier segments that name the data unit.
const RESERVED_IDENTIFIER_SEGMENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MetricLevel {
    #[serde(rename = "F")]
    Frame,
    #[serde(rename = "O")]
    Object,
}

impl MetricLevel {
    pub fn code(self) -> &'static str {
        match self {
            MetricLevel::Frame => "F",
            MetricLevel::Object => "O",
        }
    }
}

impl fmt::Display for MetricLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A discovered metric: display name, CSV location, metadata and level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricData {
    pub name: String,
    pub path: PathBuf,
    pub meta: MetricMetadata,
    pub level: MetricLevel,
}

/// Level of an identifier: object hashes trailing the reserved data-unit
/// segments mean an object-level score. `None` when the identifier is too
/// short to carry the reserved segments.
pub fn identifier_level(identifier: &str) -> Option<MetricLevel> {
    let segments = identifier.split('_').count();
    match segments.cmp(&RESERVED_IDENTIFIER_SEGMENTS) {
        Ordering::Less => None,
        Ordering::Equal => Some(MetricLevel::Frame),
        Ordering::Greater => Some(MetricLevel::Object),
    }
}

/// Peek at the first data row of a metric CSV and derive its level from
/// the leading identifier field.
pub fn metric_operation_level(path: &Path) -> Option<MetricLevel> {
    if !path.is_file() || !has_extension(path, "csv") {
        return None;
    }

    let file = std::fs::File::open(path).ok()?;
    let mut reader = std::io::BufReader::new(file);
    let mut buf = String::new();

    // header
    if reader.read_line(&mut buf).ok()? == 0 {
        return None;
    }
    buf.clear();
    if reader.read_line(&mut buf).ok()? == 0 {
        return None;
    }

    let row = buf.trim_end_matches(['\r', '\n']);
    let (key, _) = row.split_once(',')?;
    identifier_level(key.trim_matches('"'))
}

/// `001_person_count.csv` -> `Person Count`.
pub fn metric_display_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let without_prefix = match file_name.split_once('_') {
        Some((_, rest)) => rest,
        None => file_name.as_str(),
    };
    let stem = match without_prefix.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => without_prefix,
    };
    title_case(&stem.replace('_', " "))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

/// `<dir>/001_blur.csv` -> `<dir>/001_blur.meta.json`.
pub fn metadata_path(csv_path: &Path) -> PathBuf {
    csv_path.with_extension("meta.json")
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

fn discover_candidate(path: PathBuf, scope: Option<MetricScope>) -> Option<MetricData> {
    let name = metric_display_name(&path);

    if is_image_level_metric(&name) {
        tracing::debug!(metric = %name, "reserved aggregate metric skipped");
        return None;
    }

    let Some(level) = metric_operation_level(&path) else {
        tracing::debug!(path = %path.display(), "metric level undetermined (empty or malformed)");
        return None;
    };

    let meta = load_metadata(&metadata_path(&path))?;

    if !is_valid_annotation_type(meta.annotation_types(), scope) {
        tracing::debug!(metric = %name, ?scope, "annotation type outside requested scope");
        return None;
    }

    Some(MetricData {
        name,
        path,
        meta,
        level,
    })
}

/// List the metrics available in `metric_dir`, ordered by level then
/// display name in natural order. A missing directory yields no metrics.
pub fn load_available_metrics(metric_dir: &Path, scope: Option<MetricScope>) -> Vec<MetricData> {
    let entries = match std::fs::read_dir(metric_dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %metric_dir.display(), error = %err, "metric directory unavailable");
            return Vec::new();
        }
    };

    let candidates = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_extension(p, "csv"));

    let mut out: Vec<MetricData> = candidates
        .filter_map(|p| discover_candidate(p, scope))
        .collect();

    out.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| natural_cmp(&a.name, &b.name))
            .then_with(|| a.path.cmp(&b.path))
    });

    tracing::info!(
        dir = %metric_dir.display(),
        count = out.len(),
        "discovered metrics"
    );
    out
}

/// Find a discovered metric by display name, case-insensitively.
pub fn find_metric<'a>(metrics: &'a [MetricData], name: &str) -> Option<&'a MetricData> {
    metrics
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
#[path = "../tests/src_inline/scanner.rs"]
mod tests;
