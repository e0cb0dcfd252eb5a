use super::*;
use crate::test_support::{make_temp_dir, write_file};

const ONTOLOGY_JSON: &str = r##"{
    "objects": [
        {"id": "1", "name": "car", "color": "#D33115", "shape": "bounding_box", "featureNodeHash": "aa"}
    ],
    "classifications": [
        {"id": "2", "featureNodeHash": "bb", "attributes": [
            {"id": "2.1", "name": "Weather", "type": "radio", "required": false, "options": []}
        ]},
        {"id": "3", "featureNodeHash": "cc", "attributes": [
            {"id": "3.1", "name": "Notes", "type": "text", "required": false}
        ]}
    ]
}"##;

#[test]
fn test_load_ontology_from_json() {
    let dir = make_temp_dir();
    let path = dir.join("ontology.json");
    write_file(&path, ONTOLOGY_JSON);

    let ontology = load_ontology(&path).unwrap();
    assert_eq!(ontology.objects.len(), 1);
    assert_eq!(ontology.objects[0].shape.as_deref(), Some("bounding_box"));
    assert_eq!(ontology.classifications.len(), 2);
    assert!(ontology.classifications[0].is_radio());
    assert!(!ontology.classifications[1].is_radio());
    assert_eq!(ontology.radio_classification_count(), 1);
}

#[test]
fn test_missing_sections_default_to_empty() {
    let ontology: OntologyStructure = serde_json::from_str("{}").unwrap();
    assert!(ontology.objects.is_empty());
    assert!(ontology.classifications.is_empty());
}

#[test]
fn test_property_type_parsing() {
    assert_eq!(PropertyType::from("RADIO".to_string()), PropertyType::Radio);
    assert_eq!(PropertyType::from("checklist".to_string()), PropertyType::Checklist);
    assert_eq!(
        PropertyType::from("slider".to_string()),
        PropertyType::Other("slider".to_string())
    );
}

#[test]
fn test_load_ontology_reports_bad_json() {
    let dir = make_temp_dir();
    let path = dir.join("broken.json");
    write_file(&path, "[1, 2");
    assert!(matches!(load_ontology(&path), Err(MetricError::Json { .. })));
}
