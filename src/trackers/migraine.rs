//! Migraine tracker.

use super::{SEVERITY_SCALE_LABELS, SeverityLabel, non_empty, parse_payload, score};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    BubbleChoiceField, CategorizedChipsField, ChipCategory, ContentBlock, FlowConfig,
    HeroScaleField, MapRegion, MultiSelectCardField, RadialDurationField, RegionMapField,
    SelectionField, Step, Theme, ToggleField, icon_options, options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MigraineForm {
    pub severity: f64,
    pub pain_locations: Vec<String>,
    pub pain_type: String,
    pub symptoms: Vec<String>,
    pub had_aura: bool,
    pub triggers: Vec<String>,
    pub medications: Vec<String>,
    pub duration_hours: f64,
}

impl FormRecord for MigraineForm {}

/// Migraine scores never read as "none": anything below 4 is mild.
pub fn migraine_severity_label(severity: u8) -> SeverityLabel {
    match SeverityLabel::from_score(severity) {
        SeverityLabel::None => SeverityLabel::Mild,
        label => label,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MigraineDraft {
    pub severity: f64,
    pub locations: Vec<String>,
    pub pain_type: Option<String>,
    pub symptoms: Vec<String>,
    pub had_aura: bool,
    pub triggers: Vec<String>,
    pub medications: Vec<String>,
    pub duration_hours: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigraineEntry {
    pub severity: f64,
    pub severity_label: SeverityLabel,
    pub locations: Vec<String>,
    pub pain_type: Option<String>,
    pub symptoms: Vec<String>,
    pub had_aura: bool,
    pub triggers: Vec<String>,
    pub medications: Vec<String>,
    pub medication_taken: bool,
    pub duration_hours: Option<f64>,
}

impl LogEntry for MigraineEntry {
    const STORAGE_KEY: &'static str = "migraine-logs";
    type Draft = MigraineDraft;

    fn from_draft(draft: MigraineDraft) -> Self {
        Self {
            severity_label: migraine_severity_label(score(draft.severity)),
            medication_taken: !draft.medications.is_empty(),
            severity: draft.severity,
            locations: draft.locations,
            pain_type: draft.pain_type,
            symptoms: draft.symptoms,
            had_aura: draft.had_aura,
            triggers: draft.triggers,
            medications: draft.medications,
            duration_hours: draft.duration_hours,
        }
    }
}

impl From<MigraineForm> for MigraineDraft {
    fn from(form: MigraineForm) -> Self {
        Self {
            severity: form.severity,
            locations: form.pain_locations,
            pain_type: non_empty(form.pain_type),
            symptoms: form.symptoms,
            had_aura: form.had_aura,
            triggers: form.triggers,
            medications: form.medications,
            duration_hours: (form.duration_hours > 0.0).then_some(form.duration_hours),
        }
    }
}

pub fn flow_config() -> FlowConfig<MigraineForm> {
    FlowConfig::new("migraine", MigraineForm::default(), Theme::with_accent("#8E7CFF"))
        .step(
            Step::new("severity")
                .title("How bad is it?")
                .subtitle("Rate the pain right now")
                .badge("Migraine")
                .field(HeroScaleField::new("severity", 0.0, 10.0).labels(SEVERITY_SCALE_LABELS)),
        )
        .step(
            Step::new("location")
                .title("Where does it hurt?")
                .field(RegionMapField {
                    field_key: "painLocations".to_string(),
                    regions: vec![
                        MapRegion::new("forehead", "Forehead", "front"),
                        MapRegion::new("left_temple", "Left temple", "side"),
                        MapRegion::new("right_temple", "Right temple", "side"),
                        MapRegion::new("behind_eyes", "Behind the eyes", "front"),
                        MapRegion::new("top", "Top of head", "top"),
                        MapRegion::new("back", "Back of head", "back"),
                        MapRegion::new("neck", "Neck", "back"),
                    ],
                    view: Some("head".to_string()),
                })
                .field(SelectionField {
                    field_key: "painType".to_string(),
                    options: options(&[
                        ("throbbing", "Throbbing"),
                        ("pressing", "Pressing"),
                        ("stabbing", "Stabbing"),
                        ("dull", "Dull"),
                    ]),
                })
                .content(ContentBlock::selection_summary(
                    "painLocations",
                    "area selected",
                    "areas selected",
                )),
        )
        .step(
            Step::new("symptoms")
                .title("Other symptoms")
                .field(BubbleChoiceField {
                    field_key: "symptoms".to_string(),
                    options: options(&[
                        ("nausea", "Nausea"),
                        ("light_sensitivity", "Light sensitivity"),
                        ("sound_sensitivity", "Sound sensitivity"),
                        ("dizziness", "Dizziness"),
                        ("vomiting", "Vomiting"),
                    ]),
                    multiple: true,
                })
                .field(ToggleField {
                    field_key: "hadAura".to_string(),
                    label: "I had an aura".to_string(),
                    description: Some("Visual or sensory changes before the pain".to_string()),
                }),
        )
        .step(
            Step::new("triggers")
                .title("Possible triggers")
                .field(CategorizedChipsField {
                    field_key: "triggers".to_string(),
                    categories: vec![
                        ChipCategory::new(
                            "lifestyle",
                            "Lifestyle",
                            &[("stress", "Stress"), ("poor_sleep", "Poor sleep"), ("skipped_meal", "Skipped meal")],
                        ),
                        ChipCategory::new(
                            "environment",
                            "Environment",
                            &[("bright_light", "Bright light"), ("weather", "Weather change"), ("screen_time", "Screen time")],
                        ),
                        ChipCategory::new(
                            "diet",
                            "Diet",
                            &[("alcohol", "Alcohol"), ("caffeine", "Caffeine"), ("chocolate", "Chocolate")],
                        ),
                    ],
                    min_selections: None,
                }),
        )
        .step(
            Step::new("treatment")
                .title("Treatment")
                .field(MultiSelectCardField {
                    field_key: "medications".to_string(),
                    options: icon_options(&[
                        ("ibuprofen", "Ibuprofen", "pill"),
                        ("paracetamol", "Paracetamol", "pill"),
                        ("triptan", "Triptan", "capsule"),
                        ("aspirin", "Aspirin", "pill"),
                    ]),
                    min_selections: None,
                    max_selections: None,
                })
                .field(RadialDurationField {
                    field_key: "durationHours".to_string(),
                    min: 0.0,
                    max: 72.0,
                    step: 0.5,
                    unit: "hours".to_string(),
                }),
        )
}

/// `migraine.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: MigraineForm = parse_payload(ActionKey::MigraineSave, payload)?;
    let log = ctx.stores.migraine.add_log(form.into());
    tracing::debug!(id = %log.id, label = %log.severity_label, "migraine log saved");
    (ctx.on_complete)();
    Ok(())
}
