use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Radio,
    Checklist,
    Text,
    Other(String),
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "radio" => PropertyType::Radio,
            "checklist" => PropertyType::Checklist,
            "text" => PropertyType::Text,
            _ => PropertyType::Other(value),
        }
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        match value {
            PropertyType::Radio => "radio".to_string(),
            PropertyType::Checklist => "checklist".to_string(),
            PropertyType::Text => "text".to_string(),
            PropertyType::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyObject {
    pub id: Option<String>,
    pub name: Option<String>,
    pub shape: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyAttribute {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyClassification {
    pub id: Option<String>,
    pub attributes: Vec<OntologyAttribute>,
}

impl OntologyClassification {
    /// A classification counts as radio when its first attribute is one.
    pub fn is_radio(&self) -> bool {
        self.attributes
            .first()
            .is_some_and(|a| a.property_type == PropertyType::Radio)
    }
}

/// The parts of a label schema that matter for per-class breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyStructure {
    pub objects: Vec<OntologyObject>,
    pub classifications: Vec<OntologyClassification>,
}

impl OntologyStructure {
    pub fn radio_classification_count(&self) -> usize {
        self.classifications.iter().filter(|c| c.is_radio()).count()
    }
}

pub fn load_ontology(path: &Path) -> Result<OntologyStructure, MetricError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| MetricError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/ontology.rs"]
mod tests;
