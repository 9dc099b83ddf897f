use super::{SEVERITY_SCALE_LABELS, SeverityLabel, non_empty, parse_payload, score};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    ChoiceField, ContentBlock, FlowConfig, HeroScaleField, Hotspot, HotspotMapField,
    MultiSelectCardField, RadialDurationField, Step, Theme, ToggleField, options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArthritisForm {
    pub pain_level: f64,
    pub joints: Vec<String>,
    pub stiffness_minutes: f64,
    pub swelling: bool,
    pub activity_impact: String,
    pub medications: Vec<String>,
}

impl FormRecord for ArthritisForm {}

#[derive(Debug, Clone, PartialEq)]
pub struct ArthritisDraft {
    pub pain_level: f64,
    pub joints: Vec<String>,
    pub stiffness_minutes: f64,
    pub swelling: bool,
    pub activity_impact: Option<String>,
    pub medications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArthritisEntry {
    pub pain_level: f64,
    pub pain_label: SeverityLabel,
    pub joints: Vec<String>,
    pub joint_count: usize,
    pub stiffness_minutes: f64,
    pub swelling: bool,
    pub activity_impact: Option<String>,
    pub medications: Vec<String>,
    pub medication_taken: bool,
}

impl LogEntry for ArthritisEntry {
    const STORAGE_KEY: &'static str = "arthritis-logs";
    type Draft = ArthritisDraft;

    fn from_draft(draft: ArthritisDraft) -> Self {
        Self {
            pain_label: SeverityLabel::from_score(score(draft.pain_level)),
            joint_count: draft.joints.len(),
            medication_taken: !draft.medications.is_empty(),
            pain_level: draft.pain_level,
            joints: draft.joints,
            stiffness_minutes: draft.stiffness_minutes,
            swelling: draft.swelling,
            activity_impact: draft.activity_impact,
            medications: draft.medications,
        }
    }
}

impl From<ArthritisForm> for ArthritisDraft {
    fn from(form: ArthritisForm) -> Self {
        Self {
            pain_level: form.pain_level,
            joints: form.joints,
            stiffness_minutes: form.stiffness_minutes,
            swelling: form.swelling,
            activity_impact: non_empty(form.activity_impact),
            medications: form.medications,
        }
    }
}

pub fn flow_config() -> FlowConfig<ArthritisForm> {
    FlowConfig::new("arthritis", ArthritisForm::default(), Theme::with_accent("#4FC1E9"))
        .step(
            Step::new("pain")
                .title("Joint pain")
                .badge("Arthritis")
                .field(HeroScaleField::new("painLevel", 0.0, 10.0).labels(SEVERITY_SCALE_LABELS)),
        )
        .step(
            Step::new("joints")
                .title("Which joints?")
                .field(HotspotMapField {
                    field_key: "joints".to_string(),
                    hotspots: vec![
                        Hotspot::new("left_shoulder", "Left shoulder", 0.30, 0.22),
                        Hotspot::new("right_shoulder", "Right shoulder", 0.70, 0.22),
                        Hotspot::new("left_elbow", "Left elbow", 0.22, 0.38),
                        Hotspot::new("right_elbow", "Right elbow", 0.78, 0.38),
                        Hotspot::new("left_wrist", "Left wrist", 0.16, 0.52),
                        Hotspot::new("right_wrist", "Right wrist", 0.84, 0.52),
                        Hotspot::new("left_hip", "Left hip", 0.40, 0.55),
                        Hotspot::new("right_hip", "Right hip", 0.60, 0.55),
                        Hotspot::new("left_knee", "Left knee", 0.40, 0.75),
                        Hotspot::new("right_knee", "Right knee", 0.60, 0.75),
                    ],
                    image: Some("body_front".to_string()),
                })
                .content(ContentBlock::selection_summary("joints", "joint affected", "joints affected")),
        )
        .step(
            Step::new("stiffness")
                .title("Morning stiffness")
                .field(RadialDurationField {
                    field_key: "stiffnessMinutes".to_string(),
                    min: 0.0,
                    max: 240.0,
                    step: 5.0,
                    unit: "minutes".to_string(),
                })
                .field(ToggleField {
                    field_key: "swelling".to_string(),
                    label: "Visible swelling".to_string(),
                    description: None,
                }),
        )
        .step(
            Step::new("impact")
                .title("Impact and treatment")
                .field(ChoiceField {
                    field_key: "activityImpact".to_string(),
                    options: options(&[
                        ("none", "No impact"),
                        ("some", "Some tasks were harder"),
                        ("major", "Couldn't do usual tasks"),
                    ]),
                })
                .field(MultiSelectCardField {
                    field_key: "medications".to_string(),
                    options: options(&[
                        ("nsaid", "NSAID"),
                        ("paracetamol", "Paracetamol"),
                        ("steroid", "Steroid"),
                        ("topical", "Topical gel"),
                    ]),
                    min_selections: None,
                    max_selections: None,
                }),
        )
}

/// `arthritis.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: ArthritisForm = parse_payload(ActionKey::ArthritisSave, payload)?;
    let log = ctx.stores.arthritis.add_log(form.into());
    tracing::debug!(id = %log.id, joints = log.joint_count, "arthritis log saved");
    (ctx.on_complete)();
    Ok(())
}
