use crate::metadata::{AnnotationType, EmbeddingType, MetricScope};
use crate::ontology::OntologyStructure;

/// Aggregate metrics that always embed whole images, whatever their
/// annotation type says. Compared case-insensitively.
pub const IMAGE_LEVEL_METRICS: &[&str] = &["Frame Object Density", "Object Count"];

pub fn is_image_level_metric(title: &str) -> bool {
    IMAGE_LEVEL_METRICS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(title.trim()))
}

/// Data-quality metrics carry no annotation type, label-quality metrics
/// must declare one. Any other scope accepts both.
pub fn is_valid_annotation_type(
    annotation_type: Option<&[AnnotationType]>,
    scope: Option<MetricScope>,
) -> bool {
    match scope {
        Some(MetricScope::DataQuality) => annotation_type.is_none(),
        Some(MetricScope::LabelQuality) => annotation_type.is_some(),
        Some(MetricScope::ModelQuality) | None => true,
    }
}

pub fn get_embedding_type(
    metric_title: &str,
    annotation_type: Option<&[AnnotationType]>,
) -> EmbeddingType {
    match annotation_type {
        None | Some([]) => EmbeddingType::Image,
        Some(_) if is_image_level_metric(metric_title) => EmbeddingType::Image,
        Some([AnnotationType::Radio]) => EmbeddingType::Classification,
        Some(_) => EmbeddingType::Object,
    }
}

/// Per-class breakdowns only make sense when there is more than one class
/// dimension to split on.
pub fn is_multiclass_ontology(ontology: &OntologyStructure) -> bool {
    let has_objects = !ontology.objects.is_empty();
    let radio = ontology.radio_classification_count();
    (has_objects && radio > 0) || radio > 1
}

#[cfg(test)]
#[path = "../tests/src_inline/classify.rs"]
mod tests;
