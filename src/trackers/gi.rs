//! Gastrointestinal tracker. Stool form follows the Bristol scale.

use super::{SEVERITY_SCALE_LABELS, SeverityLabel, non_empty, parse_payload, score};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    CategorizedChipsField, ChipCategory, DayPartDurationField, FieldOption, FlowConfig,
    HeroScaleField, SelectionField, Step, Theme, options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};

const BRISTOL_TYPES: &[(&str, &str)] = &[
    ("Separate hard lumps", "Severe constipation"),
    ("Lumpy and sausage-like", "Mild constipation"),
    ("Sausage with cracks", "Normal"),
    ("Smooth, soft sausage", "Normal"),
    ("Soft blobs with clear edges", "Lacking fibre"),
    ("Mushy, ragged edges", "Mild diarrhoea"),
    ("Entirely liquid", "Severe diarrhoea"),
];

/// Parses a Bristol option id (`type_1` … `type_7`) into its number.
pub fn bristol_type(option_id: &str) -> Option<u8> {
    option_id
        .strip_prefix("type_")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=7).contains(n))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GiForm {
    pub pain_level: f64,
    pub stool_form: String,
    /// Derived from `stool_form`.
    pub stool_type: Option<u8>,
    pub symptoms: Vec<String>,
    pub meal_timing: String,
    pub time_since_meal: String,
}

impl FormRecord for GiForm {
    fn normalize(&mut self) {
        self.stool_type = bristol_type(&self.stool_form);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GiDraft {
    pub pain_level: f64,
    pub stool_form: Option<String>,
    pub symptoms: Vec<String>,
    pub meal_timing: Option<String>,
    pub time_since_meal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiEntry {
    pub pain_level: f64,
    pub pain_label: SeverityLabel,
    pub stool_type: Option<u8>,
    pub symptoms: Vec<String>,
    pub meal_timing: Option<String>,
    pub time_since_meal: Option<String>,
}

impl LogEntry for GiEntry {
    const STORAGE_KEY: &'static str = "gi-logs";
    type Draft = GiDraft;

    fn from_draft(draft: GiDraft) -> Self {
        Self {
            pain_label: SeverityLabel::from_score(score(draft.pain_level)),
            stool_type: draft.stool_form.as_deref().and_then(bristol_type),
            pain_level: draft.pain_level,
            symptoms: draft.symptoms,
            meal_timing: draft.meal_timing,
            time_since_meal: draft.time_since_meal,
        }
    }
}

impl From<GiForm> for GiDraft {
    fn from(form: GiForm) -> Self {
        Self {
            pain_level: form.pain_level,
            stool_form: non_empty(form.stool_form),
            symptoms: form.symptoms,
            meal_timing: non_empty(form.meal_timing),
            time_since_meal: non_empty(form.time_since_meal),
        }
    }
}

fn bristol_options() -> Vec<FieldOption> {
    BRISTOL_TYPES
        .iter()
        .enumerate()
        .map(|(i, (label, description))| FieldOption {
            id: format!("type_{}", i + 1),
            label: format!("Type {}: {}", i + 1, label),
            icon: None,
            description: Some(description.to_string()),
        })
        .collect()
}

pub fn flow_config() -> FlowConfig<GiForm> {
    FlowConfig::new("gi", GiForm::default(), Theme::with_accent("#E1B12C"))
        .step(
            Step::new("pain")
                .title("Tummy pain")
                .badge("Digestion")
                .field(HeroScaleField::new("painLevel", 0.0, 10.0).labels(SEVERITY_SCALE_LABELS)),
        )
        .step(
            Step::new("stool")
                .title("Stool form")
                .field(SelectionField {
                    field_key: "stoolForm".to_string(),
                    options: bristol_options(),
                }),
        )
        .step(
            Step::new("symptoms")
                .title("Symptoms")
                .field(CategorizedChipsField {
                    field_key: "symptoms".to_string(),
                    categories: vec![
                        ChipCategory::new(
                            "upper",
                            "Upper",
                            &[("reflux", "Reflux"), ("nausea", "Nausea"), ("early_fullness", "Early fullness")],
                        ),
                        ChipCategory::new(
                            "lower",
                            "Lower",
                            &[("bloating", "Bloating"), ("cramps", "Cramps"), ("gas", "Gas"), ("urgency", "Urgency")],
                        ),
                    ],
                    min_selections: None,
                }),
        )
        .step(
            Step::new("meal")
                .title("Last meal")
                .field(DayPartDurationField {
                    field_key: "mealTiming".to_string(),
                    secondary_key: "timeSinceMeal".to_string(),
                    day_parts: options(&[("breakfast", "Breakfast"), ("lunch", "Lunch"), ("dinner", "Dinner"), ("snack", "Snack")]),
                    durations: options(&[("under_1h", "Under an hour"), ("1_3h", "1–3 hours"), ("over_3h", "Over 3 hours")]),
                }),
        )
}

/// `gi.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: GiForm = parse_payload(ActionKey::GiSave, payload)?;
    let log = ctx.stores.gi.add_log(form.into());
    tracing::debug!(id = %log.id, stool_type = ?log.stool_type, "gi log saved");
    (ctx.on_complete)();
    Ok(())
}
