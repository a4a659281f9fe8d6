//! Unit tests for the type registry, property values and the save codec.
mod common;
use seisei::model::{FlowType, codec};
use seisei::prelude::*;

#[test]
fn test_registry_round_trips() {
    for v in ConnectorType::known_variants() {
        assert_eq!(ConnectorType::parse(v.as_str()), *v);
    }
    for v in PropertyType::known_variants() {
        assert_eq!(PropertyType::parse(v.as_str()), *v);
    }
    for v in ControlType::known_variants() {
        assert_eq!(ControlType::parse(v.as_str()), *v);
    }
    for v in LibraryType::known_variants() {
        assert_eq!(LibraryType::parse(v.as_str()), *v);
    }
}

#[test]
fn test_unknown_string_safety() {
    assert_eq!(ConnectorType::parse("bogus"), ConnectorType::Unknown);
    assert_eq!(PropertyType::parse(""), PropertyType::Unknown);
    assert_eq!(ControlType::parse("ADD_FIELD"), ControlType::Unknown); // case-sensitive
    assert_eq!(LibraryType::parse("Structural"), LibraryType::Unknown);
}

#[test]
fn test_property_value_tags() {
    assert_eq!(
        PropertyValue::Integer(3).property_type(),
        PropertyType::Integer
    );
    assert_eq!(
        PropertyValue::Select {
            options: vec!["a".to_string()],
            chosen: "a".to_string()
        }
        .property_type(),
        PropertyType::Select
    );
    assert_eq!(PropertyValue::Void.property_type(), PropertyType::Void);
}

#[test]
fn test_property_value_defaults() {
    assert_eq!(
        PropertyValue::default_for(PropertyType::String),
        Some(PropertyValue::String(String::new()))
    );
    assert_eq!(
        PropertyValue::default_for(PropertyType::Integer),
        Some(PropertyValue::Integer(0))
    );
    assert_eq!(
        PropertyValue::default_for(PropertyType::Real),
        Some(PropertyValue::Real(0.0))
    );
    assert_eq!(
        PropertyValue::default_for(PropertyType::Boolean),
        Some(PropertyValue::Boolean(false))
    );
    assert_eq!(
        PropertyValue::default_for(PropertyType::List),
        Some(PropertyValue::List(Vec::new()))
    );
    assert_eq!(
        PropertyValue::default_for(PropertyType::Color),
        Some(PropertyValue::Color("#050505".to_string()))
    );
}

#[test]
fn test_component_ref_from_json_string() {
    let value = PropertyValue::String(
        r#"{"data_id": "alarm", "option_data_id": "f2"}"#.to_string(),
    );
    let reference = value.component_ref().expect("should parse");
    assert_eq!(reference.data_id, "alarm");
    assert_eq!(reference.option_data_id, "f2");

    assert!(PropertyValue::String("not json".to_string())
        .component_ref()
        .is_none());
    assert!(PropertyValue::Integer(1).component_ref().is_none());
}

#[test]
fn test_component_ref_from_select() {
    let value = PropertyValue::ComponentSelect {
        node_id: "alarm".to_string(),
        event_id: "f2".to_string(),
    };
    let reference = value.component_ref().expect("should resolve");
    assert_eq!(reference.data_id, "alarm");
    assert_eq!(reference.option_data_id, "f2");
}

#[test]
fn test_display_name_falls_back_to_id() {
    let node = common::behaviour("n1", "Generic::Action");
    assert_eq!(node.display_name(), "n1");

    let named = common::structural("n2", "Generic::Component", "Light");
    assert_eq!(named.display_name(), "Light");
}

#[test]
fn test_save_codec_round_trip() {
    let save = common::light_alarm_save();
    let bytes = codec::encode_save(&save).expect("encode");
    let decoded = codec::decode_save(&bytes).expect("decode");
    assert_eq!(save, decoded);
}

#[test]
fn test_save_codec_rejects_bad_magic() {
    let err = codec::decode_save(b"nope").unwrap_err();
    assert!(matches!(err, SaveFormatError::BadMagic));
}

#[test]
fn test_save_codec_rejects_unsupported_version() {
    let mut bytes = codec::encode_save(&common::light_alarm_save()).expect("encode");
    bytes[4] = 0xFF;
    bytes[5] = 0xFF;
    let err = codec::decode_save(&bytes).unwrap_err();
    assert!(matches!(err, SaveFormatError::UnsupportedVersion { .. }));
}

#[test]
fn test_validate_reports_dangling_references() {
    let mut save = common::light_alarm_save();
    save.structural_nodes[0].flows[0].nodes[0].transitions[0].dst_id = "missing".to_string();
    let problems = save.validate();
    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains("missing"));

    assert!(common::light_alarm_save().validate().is_empty());
}

#[test]
fn test_flow_direction_lookup() {
    let mut node = common::structural("m", "Mission::Async task", "Scan");
    node.flows
        .push(common::flow("f1", "Start", FlowType::In, vec![]));
    node.flows
        .push(common::flow("f2", "Done", FlowType::Out, vec![]));
    assert_eq!(node.flows_of_type(FlowType::In).count(), 1);
    assert_eq!(node.flows_of_type(FlowType::Out).count(), 1);
}

#[test]
fn test_error_display() {
    assert_eq!(
        ConfigError::MissingType.to_string(),
        "Object must contain a type"
    );
    assert_eq!(
        ConfigError::MissingIdOrType.to_string(),
        "Missing id/type attribute in property"
    );
}
