//! Tests for flow definitions: the built-in trackers and flows loaded from JSON.
use kiroku::flow::FieldTag;
use kiroku::prelude::*;
use kiroku::trackers::{arthritis, congestion, gi, migraine, mood, orthostatic, respiratory, skin};
use serde_json::{Map, Value};

fn assert_valid<T: FormRecord>(flow: &FlowConfig<T>) {
    let problems = flow.validate();
    assert!(problems.is_empty(), "flow '{}' has problems: {:?}", flow.id, problems);
    assert!(flow.validate_strict(false).is_ok());
}

#[cfg(test)]
mod flow_config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_flows_are_valid() {
        assert_valid(&migraine::flow_config());
        assert_valid(&mood::flow_config());
        assert_valid(&arthritis::flow_config());
        assert_valid(&orthostatic::flow_config());
        assert_valid(&skin::flow_config());
        assert_valid(&respiratory::flow_config());
        assert_valid(&congestion::flow_config());
        assert_valid(&gi::flow_config());
    }

    #[test]
    fn test_builtin_flows_cover_every_field_type() {
        let mut used: Vec<String> = Tracker::ALL
            .iter()
            .flat_map(|t| {
                let json = t.flow_json();
                let steps = json["steps"].as_array().cloned().unwrap_or_default();
                steps
                    .into_iter()
                    .flat_map(|s| s["fields"].as_array().cloned().unwrap_or_default())
                    .filter_map(|f| f["type"].as_str().map(str::to_string))
                    .collect::<Vec<_>>()
            })
            .collect();
        used.sort();
        used.dedup();

        let mut all: Vec<String> = FieldTag::ALL.iter().map(|t| t.name().to_string()).collect();
        all.sort();
        assert_eq!(used, all);
    }

    #[test]
    fn test_every_form_slot_is_written_by_a_step() {
        // Slots filled in by `normalize` rather than by a widget.
        let derived = ["stoolType"];

        for tracker in Tracker::ALL {
            let json = tracker.flow_json();
            let written: Vec<String> = json["steps"]
                .as_array()
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .flat_map(|s| s["fields"].as_array().cloned().unwrap_or_default())
                .flat_map(|f| {
                    ["fieldKey", "secondaryKey", "dominantKey"]
                        .into_iter()
                        .filter_map(|k| f[k].as_str().map(str::to_string))
                        .collect::<Vec<_>>()
                })
                .collect();

            let slots = json["initialData"].as_object().cloned().unwrap_or_default();
            let unwritten: Vec<&String> = slots
                .keys()
                .filter(|key| !written.contains(key) && !derived.contains(&key.as_str()))
                .collect();
            assert!(unwritten.is_empty(), "{} never writes {:?}", tracker, unwritten);
        }
    }

    #[test]
    fn test_flow_json_loads_back_into_its_record_type() {
        let json = serde_json::to_string(&Tracker::Gi.flow_json()).unwrap();
        let loaded = FlowConfig::<gi::GiForm>::from_json(&json).unwrap();
        assert_eq!(loaded, gi::flow_config());
    }

    #[test]
    fn test_json_flow_without_initial_data_uses_default() {
        let json = r#"{
            "id": "quick",
            "steps": [{"id": "only", "fields": [
                {"type": "toggle", "fieldKey": "inhalerUsed", "label": "Inhaler"}
            ]}]
        }"#;
        let flow = FlowConfig::<respiratory::RespiratoryForm>::from_json(json).unwrap();
        assert_eq!(flow.initial_data, respiratory::RespiratoryForm::default());
        assert_eq!(flow.theme, Theme::default());
        assert!(flow.validate().is_empty());
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let json = r#"{
            "id": "broken",
            "initialData": {"level": 0},
            "steps": [
                {"id": "a", "fields": [
                    {"type": "hero_scale", "fieldKey": "level", "min": 10, "max": 0},
                    {"type": "toggle", "fieldKey": "missing", "label": "?"}
                ]},
                {"id": "a", "fields": [{"type": "voice_note", "fieldKey": "level"}]}
            ]
        }"#;
        let flow = FlowConfig::<Map<String, Value>>::from_json(json).unwrap();
        let problems = flow.validate();

        assert_eq!(
            problems,
            vec![
                ConfigError::InvalidRange {
                    step_id: "a".to_string(),
                    field_key: "level".to_string(),
                    min: 10.0,
                    max: 0.0
                },
                ConfigError::UnknownFieldKey {
                    step_id: "a".to_string(),
                    field_type: "toggle".to_string(),
                    key: "missing".to_string()
                },
                ConfigError::DuplicateStep("a".to_string()),
                ConfigError::UnknownFieldType {
                    step_id: "a".to_string(),
                    type_name: "voice_note".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_strict_validation_and_unsupported_fields() {
        let json = r#"{
            "id": "custom",
            "initialData": {"depth": 0},
            "steps": [{"id": "one", "fields": [{"type": "slider_3d", "fieldKey": "depth"}]}]
        }"#;
        let flow = FlowConfig::<Map<String, Value>>::from_json(json).unwrap();

        assert!(flow.validate_strict(true).is_ok());
        assert!(matches!(
            flow.validate_strict(false),
            Err(ConfigError::Invalid(problems)) if problems.len() == 1
        ));
    }

    #[test]
    fn test_malformed_known_field_fails_to_load() {
        let json = r#"{
            "id": "bad",
            "steps": [{"id": "one", "fields": [{"type": "radial_duration", "fieldKey": "x"}]}]
        }"#;
        assert!(matches!(
            FlowConfig::<Map<String, Value>>::from_json(json),
            Err(ConfigError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_empty_flow_is_reported() {
        let flow: FlowConfig<Map<String, Value>> = FlowConfig::new("empty", Map::new(), Theme::default());
        assert_eq!(flow.validate(), vec![ConfigError::EmptyFlow("empty".to_string())]);
    }
}
