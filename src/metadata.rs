use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;

/// Which part of the quality tooling a metric listing is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricScope {
    DataQuality,
    LabelQuality,
    ModelQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingType {
    #[serde(alias = "IMAGE")]
    Image,
    #[serde(alias = "CLASSIFICATION")]
    Classification,
    #[serde(alias = "OBJECT")]
    Object,
    #[serde(alias = "HU_MOMENTS")]
    HuMoments,
}

impl fmt::Display for EmbeddingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EmbeddingType::Image => "IMAGE",
            EmbeddingType::Classification => "CLASSIFICATION",
            EmbeddingType::Object => "OBJECT",
            EmbeddingType::HuMoments => "HU_MOMENTS",
        };
        f.write_str(s)
    }
}

/// Annotation kinds a metric can be computed over: object shapes and
/// classification property types. Parsed case-insensitively; values this
/// crate does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnnotationType {
    BoundingBox,
    RotatableBoundingBox,
    Polygon,
    Polyline,
    Point,
    Skeleton,
    Bitmask,
    Radio,
    Checklist,
    Text,
    Other(String),
}

impl AnnotationType {
    pub fn as_str(&self) -> &str {
        match self {
            AnnotationType::BoundingBox => "bounding_box",
            AnnotationType::RotatableBoundingBox => "rotatable_bounding_box",
            AnnotationType::Polygon => "polygon",
            AnnotationType::Polyline => "polyline",
            AnnotationType::Point => "point",
            AnnotationType::Skeleton => "skeleton",
            AnnotationType::Bitmask => "bitmask",
            AnnotationType::Radio => "radio",
            AnnotationType::Checklist => "checklist",
            AnnotationType::Text => "text",
            AnnotationType::Other(s) => s.as_str(),
        }
    }

    pub fn is_classification(&self) -> bool {
        matches!(
            self,
            AnnotationType::Radio | AnnotationType::Checklist | AnnotationType::Text
        )
    }
}

impl From<String> for AnnotationType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bounding_box" => AnnotationType::BoundingBox,
            "rotatable_bounding_box" => AnnotationType::RotatableBoundingBox,
            "polygon" => AnnotationType::Polygon,
            "polyline" => AnnotationType::Polyline,
            "point" => AnnotationType::Point,
            "skeleton" => AnnotationType::Skeleton,
            "bitmask" => AnnotationType::Bitmask,
            "radio" => AnnotationType::Radio,
            "checklist" => AnnotationType::Checklist,
            "text" => AnnotationType::Text,
            _ => AnnotationType::Other(value),
        }
    }
}

impl From<AnnotationType> for String {
    fn from(value: AnnotationType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contents of a `<metric>.meta.json` file.
///
/// Every field is optional. `annotation_type: None` means the metric is a
/// pure data metric; `Some(vec![])` is a label metric with no declared
/// annotation kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricMetadata {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub metric_type: Option<String>,
    pub data_type: Option<String>,
    pub annotation_type: Option<Vec<AnnotationType>>,
    pub embedding_type: Option<EmbeddingType>,
    pub doc_url: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl MetricMetadata {
    pub fn annotation_types(&self) -> Option<&[AnnotationType]> {
        self.annotation_type.as_deref()
    }
}

pub fn read_metadata(path: &Path) -> Result<MetricMetadata, MetricError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| MetricError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load metadata, treating a missing file, a JSON `null` or any parse
/// failure as absent.
pub fn load_metadata(path: &Path) -> Option<MetricMetadata> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "metadata file missing");
        return None;
    }
    match read_metadata(path) {
        Ok(meta) => Some(meta),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "metadata unreadable");
            None
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/metadata.rs"]
mod tests;
