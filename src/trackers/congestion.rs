use super::{SEVERITY_SCALE_LABELS, SeverityLabel, non_empty, parse_payload, score};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    CategorizedChipsField, ChipCategory, ChoiceField, FlowConfig, HeroScaleField, IconGridField,
    Step, Theme, icon_options, options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CongestionForm {
    pub congestion_level: f64,
    pub side: String,
    pub mucus_color: String,
    pub symptoms: Vec<String>,
}

impl FormRecord for CongestionForm {}

#[derive(Debug, Clone, PartialEq)]
pub struct CongestionDraft {
    pub congestion_level: f64,
    pub side: Option<String>,
    pub mucus_color: Option<String>,
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CongestionEntry {
    pub congestion_level: f64,
    pub congestion_label: SeverityLabel,
    pub side: Option<String>,
    pub mucus_color: Option<String>,
    pub symptoms: Vec<String>,
}

impl LogEntry for CongestionEntry {
    const STORAGE_KEY: &'static str = "congestion-logs";
    type Draft = CongestionDraft;

    fn from_draft(draft: CongestionDraft) -> Self {
        Self {
            congestion_label: SeverityLabel::from_score(score(draft.congestion_level)),
            congestion_level: draft.congestion_level,
            side: draft.side,
            mucus_color: draft.mucus_color,
            symptoms: draft.symptoms,
        }
    }
}

impl From<CongestionForm> for CongestionDraft {
    fn from(form: CongestionForm) -> Self {
        Self {
            congestion_level: form.congestion_level,
            side: non_empty(form.side),
            mucus_color: non_empty(form.mucus_color),
            symptoms: form.symptoms,
        }
    }
}

pub fn flow_config() -> FlowConfig<CongestionForm> {
    FlowConfig::new("congestion", CongestionForm::default(), Theme::with_accent("#A3CB38"))
        .step(
            Step::new("level")
                .title("How blocked are you?")
                .badge("Congestion")
                .field(HeroScaleField::new("congestionLevel", 0.0, 10.0).labels(SEVERITY_SCALE_LABELS)),
        )
        .step(
            Step::new("side")
                .title("Which side?")
                .field(ChoiceField {
                    field_key: "side".to_string(),
                    options: options(&[("left", "Left"), ("right", "Right"), ("both", "Both")]),
                }),
        )
        .step(
            Step::new("mucus")
                .title("Mucus colour")
                .field(IconGridField {
                    field_key: "mucusColor".to_string(),
                    options: icon_options(&[
                        ("clear", "Clear", "drop"),
                        ("white", "White", "drop"),
                        ("yellow", "Yellow", "drop"),
                        ("green", "Green", "drop"),
                        ("bloody", "Blood-tinged", "drop"),
                        ("none", "None", "slash"),
                    ]),
                    columns: 3,
                    multiple: false,
                }),
        )
        .step(
            Step::new("symptoms")
                .title("Anything else?")
                .field(CategorizedChipsField {
                    field_key: "symptoms".to_string(),
                    categories: vec![
                        ChipCategory::new(
                            "nose",
                            "Nose",
                            &[("runny", "Runny nose"), ("sneezing", "Sneezing"), ("post_nasal_drip", "Post-nasal drip")],
                        ),
                        ChipCategory::new(
                            "head",
                            "Head",
                            &[("sinus_pressure", "Sinus pressure"), ("headache", "Headache"), ("reduced_smell", "Reduced smell")],
                        ),
                    ],
                    min_selections: None,
                }),
        )
}

/// `congestion.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: CongestionForm = parse_payload(ActionKey::CongestionSave, payload)?;
    let log = ctx.stores.congestion.add_log(form.into());
    tracing::debug!(id = %log.id, label = %log.congestion_label, "congestion log saved");
    (ctx.on_complete)();
    Ok(())
}
