use super::{SEVERITY_SCALE_LABELS, SeverityLabel, non_empty, parse_payload, score};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    BubbleChoiceField, DayPartDurationField, FlowConfig, HeroScaleField, SegmentedSelectionField,
    SelectionField, Step, Theme, ToggleField, options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrthostaticForm {
    pub symptoms: Vec<String>,
    pub position_change: String,
    pub time_of_day: String,
    pub episode_duration: String,
    pub dizziness: f64,
    pub fainted: bool,
    pub fluid_intake: String,
}

impl FormRecord for OrthostaticForm {}

#[derive(Debug, Clone, PartialEq)]
pub struct OrthostaticDraft {
    pub symptoms: Vec<String>,
    pub position_change: Option<String>,
    pub time_of_day: Option<String>,
    pub episode_duration: Option<String>,
    pub dizziness: f64,
    pub fainted: bool,
    pub fluid_intake: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrthostaticEntry {
    pub symptoms: Vec<String>,
    pub position_change: Option<String>,
    pub time_of_day: Option<String>,
    pub episode_duration: Option<String>,
    pub dizziness: f64,
    pub dizziness_label: SeverityLabel,
    pub fainted: bool,
    pub fluid_intake: Option<String>,
}

impl LogEntry for OrthostaticEntry {
    const STORAGE_KEY: &'static str = "orthostatic-logs";
    type Draft = OrthostaticDraft;

    fn from_draft(draft: OrthostaticDraft) -> Self {
        Self {
            dizziness_label: SeverityLabel::from_score(score(draft.dizziness)),
            symptoms: draft.symptoms,
            position_change: draft.position_change,
            time_of_day: draft.time_of_day,
            episode_duration: draft.episode_duration,
            dizziness: draft.dizziness,
            fainted: draft.fainted,
            fluid_intake: draft.fluid_intake,
        }
    }
}

impl From<OrthostaticForm> for OrthostaticDraft {
    fn from(form: OrthostaticForm) -> Self {
        Self {
            symptoms: form.symptoms,
            position_change: non_empty(form.position_change),
            time_of_day: non_empty(form.time_of_day),
            episode_duration: non_empty(form.episode_duration),
            dizziness: form.dizziness,
            fainted: form.fainted,
            fluid_intake: non_empty(form.fluid_intake),
        }
    }
}

pub fn flow_config() -> FlowConfig<OrthostaticForm> {
    FlowConfig::new("orthostatic", OrthostaticForm::default(), Theme::with_accent("#FF6B81"))
        .step(
            Step::new("symptoms")
                .title("What did you notice?")
                .badge("Orthostatic")
                .field(BubbleChoiceField {
                    field_key: "symptoms".to_string(),
                    options: options(&[
                        ("lightheaded", "Lightheaded"),
                        ("racing_heart", "Racing heart"),
                        ("blurred_vision", "Blurred vision"),
                        ("fatigue", "Fatigue"),
                        ("brain_fog", "Brain fog"),
                        ("shaky", "Shaky"),
                    ]),
                    multiple: true,
                }),
        )
        .step(
            Step::new("trigger")
                .title("When did it happen?")
                .field(SegmentedSelectionField {
                    field_key: "positionChange".to_string(),
                    segments: options(&[("lying_to_standing", "Lying → standing"), ("sitting_to_standing", "Sitting → standing"), ("standing_long", "Standing a while")]),
                })
                .field(DayPartDurationField {
                    field_key: "timeOfDay".to_string(),
                    secondary_key: "episodeDuration".to_string(),
                    day_parts: options(&[("morning", "Morning"), ("afternoon", "Afternoon"), ("evening", "Evening"), ("night", "Night")]),
                    durations: options(&[("seconds", "Seconds"), ("minutes", "A few minutes"), ("longer", "Longer")]),
                }),
        )
        .step(
            Step::new("severity")
                .title("How dizzy?")
                .field(HeroScaleField::new("dizziness", 0.0, 10.0).labels(SEVERITY_SCALE_LABELS))
                .field(ToggleField {
                    field_key: "fainted".to_string(),
                    label: "I fainted or nearly fainted".to_string(),
                    description: None,
                }),
        )
        .step(
            Step::new("hydration")
                .title("Fluids today")
                .field(SelectionField {
                    field_key: "fluidIntake".to_string(),
                    options: options(&[("low", "Under 1 litre"), ("moderate", "1–2 litres"), ("high", "Over 2 litres")]),
                }),
        )
}

/// `orthostatic.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: OrthostaticForm = parse_payload(ActionKey::OrthostaticSave, payload)?;
    let log = ctx.stores.orthostatic.add_log(form.into());
    tracing::debug!(id = %log.id, fainted = log.fainted, "orthostatic log saved");
    (ctx.on_complete)();
    Ok(())
}
