use super::*;
use crate::ontology::{OntologyAttribute, OntologyClassification, OntologyObject, PropertyType};

fn classification(property_type: PropertyType) -> OntologyClassification {
    OntologyClassification {
        id: None,
        attributes: vec![OntologyAttribute {
            property_type,
            name: None,
        }],
    }
}

fn ontology(objects: usize, classifications: Vec<OntologyClassification>) -> OntologyStructure {
    OntologyStructure {
        objects: vec![OntologyObject::default(); objects],
        classifications,
    }
}

#[test]
fn test_valid_annotation_type_by_scope() {
    let boxes = [AnnotationType::BoundingBox];

    assert!(is_valid_annotation_type(None, Some(MetricScope::DataQuality)));
    assert!(!is_valid_annotation_type(Some(&boxes), Some(MetricScope::DataQuality)));

    assert!(is_valid_annotation_type(Some(&boxes), Some(MetricScope::LabelQuality)));
    assert!(is_valid_annotation_type(Some(&[]), Some(MetricScope::LabelQuality)));
    assert!(!is_valid_annotation_type(None, Some(MetricScope::LabelQuality)));

    assert!(is_valid_annotation_type(None, Some(MetricScope::ModelQuality)));
    assert!(is_valid_annotation_type(Some(&boxes), None));
    assert!(is_valid_annotation_type(None, None));
}

#[test]
fn test_embedding_type_image_for_missing_annotation_type() {
    assert_eq!(get_embedding_type("Brightness", None), EmbeddingType::Image);
    assert_eq!(get_embedding_type("Brightness", Some(&[])), EmbeddingType::Image);
    assert_eq!(
        get_embedding_type("Frame object density", None),
        EmbeddingType::Image
    );
}

#[test]
fn test_embedding_type_image_for_reserved_metrics_any_case() {
    let radio = [AnnotationType::Radio];
    let boxes = [AnnotationType::BoundingBox];
    assert_eq!(
        get_embedding_type("Frame object density", Some(&boxes)),
        EmbeddingType::Image
    );
    assert_eq!(
        get_embedding_type("Frame Object Density", Some(&radio)),
        EmbeddingType::Image
    );
    assert_eq!(get_embedding_type("Object Count", Some(&boxes)), EmbeddingType::Image);
}

#[test]
fn test_embedding_type_classification_for_single_radio() {
    let parsed: Vec<AnnotationType> = serde_json::from_str(r#"["RADIO"]"#).unwrap();
    assert_eq!(
        get_embedding_type("Label Confidence", Some(&parsed)),
        EmbeddingType::Classification
    );
}

#[test]
fn test_embedding_type_object_otherwise() {
    let mixed = [AnnotationType::Radio, AnnotationType::Polygon];
    let checklist = [AnnotationType::Checklist];
    let boxes = [AnnotationType::BoundingBox];
    assert_eq!(get_embedding_type("Area", Some(&boxes)), EmbeddingType::Object);
    assert_eq!(get_embedding_type("Mixed", Some(&mixed)), EmbeddingType::Object);
    assert_eq!(get_embedding_type("Checks", Some(&checklist)), EmbeddingType::Object);
}

#[test]
fn test_multiclass_ontology() {
    let radio = || classification(PropertyType::Radio);
    let text = || classification(PropertyType::Text);

    assert!(!is_multiclass_ontology(&ontology(0, vec![])));
    assert!(!is_multiclass_ontology(&ontology(3, vec![])));
    assert!(!is_multiclass_ontology(&ontology(0, vec![radio()])));
    assert!(is_multiclass_ontology(&ontology(1, vec![radio()])));
    assert!(is_multiclass_ontology(&ontology(0, vec![radio(), radio()])));
    assert!(!is_multiclass_ontology(&ontology(2, vec![text(), text()])));
    assert!(!is_multiclass_ontology(&ontology(0, vec![radio(), text()])));
}

#[test]
fn test_classification_without_attributes_is_not_radio() {
    let empty = OntologyClassification::default();
    assert!(!is_multiclass_ontology(&ontology(1, vec![empty])));
}
