use super::*;
use crate::test_support::{make_temp_dir, write_file};

#[test]
fn test_full_metadata_parses() {
    let json = r#"{
        "title": "Brightness",
        "short_description": "Ranks images by brightness.",
        "long_description": "",
        "metric_type": "heuristic",
        "data_type": "image",
        "annotation_type": null,
        "embedding_type": "image",
        "doc_url": "https://example.com/brightness",
        "min_value": 0.0,
        "max_value": 1.0,
        "stats": {"mean": 0.4}
    }"#;
    let meta: MetricMetadata = serde_json::from_str(json).unwrap();
    assert_eq!(meta.title.as_deref(), Some("Brightness"));
    assert_eq!(meta.annotation_type, None);
    assert_eq!(meta.embedding_type, Some(EmbeddingType::Image));
    assert_eq!(meta.min_value, Some(0.0));
    assert_eq!(meta.max_value, Some(1.0));
}

#[test]
fn test_annotation_type_absent_vs_empty() {
    let absent: MetricMetadata = serde_json::from_str("{}").unwrap();
    let empty: MetricMetadata = serde_json::from_str(r#"{"annotation_type": []}"#).unwrap();
    assert_eq!(absent.annotation_types(), None);
    assert_eq!(empty.annotation_types(), Some(&[][..]));
}

#[test]
fn test_annotation_type_case_insensitive_and_open() {
    let meta: MetricMetadata = serde_json::from_str(
        r#"{"annotation_type": ["RADIO", "bounding_box", "Polygon", "ellipse"]}"#,
    )
    .unwrap();
    assert_eq!(
        meta.annotation_type.unwrap(),
        vec![
            AnnotationType::Radio,
            AnnotationType::BoundingBox,
            AnnotationType::Polygon,
            AnnotationType::Other("ellipse".to_string()),
        ]
    );
}

#[test]
fn test_annotation_type_serializes_lowercase() {
    let out = serde_json::to_string(&vec![AnnotationType::Radio, AnnotationType::Bitmask]).unwrap();
    assert_eq!(out, r#"["radio","bitmask"]"#);
    assert!(AnnotationType::Checklist.is_classification());
    assert!(!AnnotationType::Point.is_classification());
}

#[test]
fn test_embedding_type_display() {
    assert_eq!(EmbeddingType::Image.to_string(), "IMAGE");
    assert_eq!(EmbeddingType::Classification.to_string(), "CLASSIFICATION");
    assert_eq!(EmbeddingType::Object.to_string(), "OBJECT");
}

#[test]
fn test_load_metadata_absent_cases() {
    let dir = make_temp_dir();
    assert_eq!(load_metadata(&dir.join("missing.meta.json")), None);

    let null_path = dir.join("null.meta.json");
    write_file(&null_path, "null");
    assert_eq!(load_metadata(&null_path), None);

    let broken_path = dir.join("broken.meta.json");
    write_file(&broken_path, "{\"min_value\": ");
    assert_eq!(load_metadata(&broken_path), None);

    let ok_path = dir.join("ok.meta.json");
    write_file(&ok_path, r#"{"min_value": 1}"#);
    assert_eq!(load_metadata(&ok_path).unwrap().min_value, Some(1.0));
}

#[test]
fn test_read_metadata_surfaces_errors() {
    let dir = make_temp_dir();
    assert!(matches!(
        read_metadata(&dir.join("missing.meta.json")),
        Err(MetricError::Io(_))
    ));
}
