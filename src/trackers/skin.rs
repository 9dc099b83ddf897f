use super::{SEVERITY_SCALE_LABELS, SeverityLabel, non_empty, parse_payload, score};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    CameraCaptureField, ContentBlock, FlowConfig, HeroScaleField, IconGridField, MapRegion,
    RegionMapField, Step, Theme, icon_options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkinForm {
    pub affected_areas: Vec<String>,
    pub symptoms: Vec<String>,
    pub itch_level: f64,
    pub photo_uri: Option<String>,
}

impl FormRecord for SkinForm {}

#[derive(Debug, Clone, PartialEq)]
pub struct SkinDraft {
    pub affected_areas: Vec<String>,
    pub symptoms: Vec<String>,
    pub itch_level: f64,
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinEntry {
    pub affected_areas: Vec<String>,
    pub symptoms: Vec<String>,
    pub itch_level: f64,
    pub itch_label: SeverityLabel,
    pub photo_uri: Option<String>,
    pub has_photo: bool,
}

impl LogEntry for SkinEntry {
    const STORAGE_KEY: &'static str = "skin-logs";
    type Draft = SkinDraft;

    fn from_draft(draft: SkinDraft) -> Self {
        Self {
            itch_label: SeverityLabel::from_score(score(draft.itch_level)),
            has_photo: draft.photo_uri.is_some(),
            affected_areas: draft.affected_areas,
            symptoms: draft.symptoms,
            itch_level: draft.itch_level,
            photo_uri: draft.photo_uri,
        }
    }
}

impl From<SkinForm> for SkinDraft {
    fn from(form: SkinForm) -> Self {
        Self {
            affected_areas: form.affected_areas,
            symptoms: form.symptoms,
            itch_level: form.itch_level,
            photo_uri: form.photo_uri.and_then(non_empty),
        }
    }
}

pub fn flow_config() -> FlowConfig<SkinForm> {
    FlowConfig::new("skin", SkinForm::default(), Theme::with_accent("#F7A072"))
        .step(
            Step::new("areas")
                .title("Where is it?")
                .badge("Skin")
                .field(RegionMapField {
                    field_key: "affectedAreas".to_string(),
                    regions: vec![
                        MapRegion::new("face", "Face", "head"),
                        MapRegion::new("scalp", "Scalp", "head"),
                        MapRegion::new("neck", "Neck", "head"),
                        MapRegion::new("chest", "Chest", "torso"),
                        MapRegion::new("back", "Back", "torso"),
                        MapRegion::new("arms", "Arms", "limbs"),
                        MapRegion::new("hands", "Hands", "limbs"),
                        MapRegion::new("legs", "Legs", "limbs"),
                        MapRegion::new("feet", "Feet", "limbs"),
                    ],
                    view: Some("body".to_string()),
                })
                .content(ContentBlock::selection_summary("affectedAreas", "area", "areas")),
        )
        .step(
            Step::new("symptoms")
                .title("What does it look like?")
                .field(IconGridField {
                    field_key: "symptoms".to_string(),
                    options: icon_options(&[
                        ("redness", "Redness", "circle"),
                        ("dryness", "Dryness", "leaf"),
                        ("bumps", "Bumps", "dots"),
                        ("blisters", "Blisters", "drop"),
                        ("flaking", "Flaking", "layers"),
                        ("swelling", "Swelling", "expand"),
                    ]),
                    columns: 3,
                    multiple: true,
                }),
        )
        .step(
            Step::new("itch")
                .title("How itchy?")
                .field(HeroScaleField::new("itchLevel", 0.0, 10.0).labels(SEVERITY_SCALE_LABELS)),
        )
        .step(
            Step::new("photo")
                .title("Add a photo")
                .subtitle("Optional")
                .field(CameraCaptureField {
                    field_key: "photoUri".to_string(),
                    prompt: Some("Take a close-up in good light".to_string()),
                }),
        )
}

/// `skin.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: SkinForm = parse_payload(ActionKey::SkinSave, payload)?;
    let log = ctx.stores.skin.add_log(form.into());
    tracing::debug!(id = %log.id, has_photo = log.has_photo, "skin log saved");
    (ctx.on_complete)();
    Ok(())
}
