use super::{SEVERITY_SCALE_LABELS, SeverityLabel, non_empty, parse_payload, score};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    FlowConfig, HeroScaleField, MultiSelectCardField, SelectionField, Step, Theme, ToggleField,
    icon_options, options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RespiratoryForm {
    pub breathlessness: f64,
    pub symptoms: Vec<String>,
    pub cough_type: String,
    pub inhaler_used: bool,
}

impl FormRecord for RespiratoryForm {}

#[derive(Debug, Clone, PartialEq)]
pub struct RespiratoryDraft {
    pub breathlessness: f64,
    pub symptoms: Vec<String>,
    pub cough_type: Option<String>,
    pub inhaler_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespiratoryEntry {
    pub breathlessness: f64,
    pub breathlessness_label: SeverityLabel,
    pub symptoms: Vec<String>,
    pub cough_type: Option<String>,
    pub inhaler_used: bool,
}

impl LogEntry for RespiratoryEntry {
    const STORAGE_KEY: &'static str = "respiratory-logs";
    type Draft = RespiratoryDraft;

    fn from_draft(draft: RespiratoryDraft) -> Self {
        Self {
            breathlessness_label: SeverityLabel::from_score(score(draft.breathlessness)),
            breathlessness: draft.breathlessness,
            symptoms: draft.symptoms,
            cough_type: draft.cough_type,
            inhaler_used: draft.inhaler_used,
        }
    }
}

impl From<RespiratoryForm> for RespiratoryDraft {
    fn from(form: RespiratoryForm) -> Self {
        Self {
            breathlessness: form.breathlessness,
            symptoms: form.symptoms,
            // "none" is a real answer in the picker but means no cough in the log.
            cough_type: non_empty(form.cough_type).filter(|c| c != "none"),
            inhaler_used: form.inhaler_used,
        }
    }
}

pub fn flow_config() -> FlowConfig<RespiratoryForm> {
    FlowConfig::new("respiratory", RespiratoryForm::default(), Theme::with_accent("#7ED6DF"))
        .step(
            Step::new("breathing")
                .title("How is your breathing?")
                .badge("Respiratory")
                .field(HeroScaleField::new("breathlessness", 0.0, 10.0).labels(SEVERITY_SCALE_LABELS)),
        )
        .step(
            Step::new("symptoms")
                .title("Symptoms")
                .field(MultiSelectCardField {
                    field_key: "symptoms".to_string(),
                    options: icon_options(&[
                        ("wheezing", "Wheezing", "wind"),
                        ("chest_tightness", "Chest tightness", "heart"),
                        ("shortness_of_breath", "Shortness of breath", "lungs"),
                        ("night_waking", "Woke at night", "moon"),
                    ]),
                    min_selections: Some(1),
                    max_selections: None,
                }),
        )
        .step(
            Step::new("cough")
                .title("Cough and relief")
                .field(SelectionField {
                    field_key: "coughType".to_string(),
                    options: options(&[("none", "No cough"), ("dry", "Dry"), ("productive", "Productive"), ("barking", "Barking")]),
                })
                .field(ToggleField {
                    field_key: "inhalerUsed".to_string(),
                    label: "Used my reliever inhaler".to_string(),
                    description: None,
                }),
        )
}

/// `respiratory.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: RespiratoryForm = parse_payload(ActionKey::RespiratorySave, payload)?;
    let log = ctx.stores.respiratory.add_log(form.into());
    tracing::debug!(id = %log.id, label = %log.breathlessness_label, "respiratory log saved");
    (ctx.on_complete)();
    Ok(())
}
