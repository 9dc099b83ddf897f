//! Common test utilities for building flows, patches and check-in screens.
use kiroku::flow::{
    CategorizedChipsField, ChipCategory, HeroScaleField, MultiSelectCardField, ToggleField, options,
};
use kiroku::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A small record with one slot of each common shape.
#[allow(dead_code)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Journal {
    pub level: f64,
    pub tags: Vec<String>,
    pub flagged: bool,
    pub level_label: String,
}

impl FormRecord for Journal {
    fn normalize(&mut self) {
        self.level_label = SeverityLabel::from_score(self.level.round().clamp(0.0, 10.0) as u8).to_string();
    }
}

/// Three steps: a 0–10 scale, a capped multi-select, and a toggle.
///
/// The multi-select allows at most 2 tags and asks for at least 1.
#[allow(dead_code)]
pub fn journal_flow() -> FlowConfig<Journal> {
    FlowConfig::new("journal", Journal::default(), Theme::default())
        .step(
            Step::new("level")
                .title("Level")
                .field(HeroScaleField::new("level", 0.0, 10.0)),
        )
        .step(
            Step::new("tags").title("Tags").field(MultiSelectCardField {
                field_key: "tags".to_string(),
                options: options(&[("a", "Alpha"), ("b", "Beta"), ("c", "Gamma")]),
                min_selections: Some(1),
                max_selections: Some(2),
            }),
        )
        .step(
            Step::new("flag")
                .title("Flag")
                .field(ToggleField {
                    field_key: "flagged".to_string(),
                    label: "Flag this entry".to_string(),
                    description: None,
                })
                .field(CategorizedChipsField {
                    field_key: "tags".to_string(),
                    categories: vec![ChipCategory::new("all", "All", &[("a", "Alpha"), ("b", "Beta")])],
                    min_selections: Some(2),
                }),
        )
}

/// One patch per migraine step, with severity `severity` and nothing else chosen.
#[allow(dead_code)]
pub fn migraine_patches(severity: u8) -> Vec<FormPatch> {
    vec![
        FormPatch::new().set("severity", severity),
        FormPatch::new().set("painLocations", json!(["forehead", "left_temple"])),
        FormPatch::new().set("symptoms", json!(["nausea"])).set("hadAura", false),
        FormPatch::new().set("triggers", json!(["stress"])),
        FormPatch::new().set("medications", json!([])),
    ]
}

/// Section 1 is shown only while `has_pain` is answered "yes".
#[allow(dead_code)]
pub const CONDITIONAL_SCREEN_JSON: &str = r#"{
    "id": "daily",
    "title": "Daily check-in",
    "allow_skip": false,
    "sections": [
        {
            "title": "Pain",
            "components": [
                {"id": "has_pain", "type": "single_choice", "label": "Any pain today?", "required": true,
                 "options": [{"value": "yes", "label": "Yes"}, {"value": "no", "label": "No"}]}
            ]
        },
        {
            "title": "Details",
            "show_if": {"component_id": "has_pain", "condition": "equals", "value": "yes"},
            "components": [
                {"id": "pain_level", "type": "scale", "min": 0, "max": 10, "required": true},
                {"id": "body_map", "type": "body_map"}
            ]
        },
        {
            "title": "Sleep",
            "show_if": {"component_id": "pain_level", "condition": "gt", "value": 6},
            "components": [
                {"id": "slept_well", "type": "yes_no"}
            ]
        }
    ]
}"#;
