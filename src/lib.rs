//! Quality metric score loading for dataset inspection.
//!
//! - `scanner`: discover `<prefix>_<name>.csv` metrics and their metadata
//! - `table`: load and validate one metric's scores
//! - `annotators`: per-annotator counts and mean scores
//! - `classify`: annotation-type and ontology classification

pub mod annotators;
pub mod classify;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod natsort;
pub mod ontology;
pub mod scanner;
pub mod table;

pub use annotators::{AnnotatorInfo, AnnotatorMap, annotator_level_info};
pub use classify::{get_embedding_type, is_multiclass_ontology, is_valid_annotation_type};
pub use error::{MetricError, SchemaError};
pub use metadata::{AnnotationType, EmbeddingType, MetricMetadata, MetricScope};
pub use ontology::{OntologyStructure, load_ontology};
pub use scanner::{MetricData, MetricLevel, load_available_metrics};
pub use table::{LoadOptions, MetricRow, MetricTable, load_metric_table};

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
pub(crate) mod test_support;
