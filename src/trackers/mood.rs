//! Mood tracker. The dominant mood is a quadrant of the energy/positivity grid.

use super::{non_empty, parse_payload};
use crate::actions::{ActionContext, ActionKey};
use crate::error::ActionError;
use crate::flow::{
    AxisConfig, AxisGridField, CategorizedChipsField, ChipCategory, FlowConfig,
    SegmentedSelectionField, Step, Theme, options,
};
use crate::form::FormRecord;
use crate::store::LogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Readings within this distance of the origin on both axes count as neutral.
const NEUTRAL_RADIUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantMood {
    #[default]
    Neutral,
    Energized,
    Calm,
    Stressed,
    Low,
}

impl DominantMood {
    pub fn from_axes(energy: f64, positivity: f64) -> Self {
        if energy.abs() <= NEUTRAL_RADIUS && positivity.abs() <= NEUTRAL_RADIUS {
            return DominantMood::Neutral;
        }
        match (energy >= 0.0, positivity >= 0.0) {
            (true, true) => DominantMood::Energized,
            (false, true) => DominantMood::Calm,
            (true, false) => DominantMood::Stressed,
            (false, false) => DominantMood::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DominantMood::Neutral => "neutral",
            DominantMood::Energized => "energized",
            DominantMood::Calm => "calm",
            DominantMood::Stressed => "stressed",
            DominantMood::Low => "low",
        }
    }
}

impl fmt::Display for DominantMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoodForm {
    pub energy: f64,
    pub positivity: f64,
    /// Derived from `energy` and `positivity` on every update.
    pub dominant_mood: DominantMood,
    pub feelings: Vec<String>,
    pub sleep_quality: String,
}

impl FormRecord for MoodForm {
    fn normalize(&mut self) {
        self.dominant_mood = DominantMood::from_axes(self.energy, self.positivity);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodDraft {
    pub energy: f64,
    pub positivity: f64,
    pub feelings: Vec<String>,
    pub sleep_quality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub energy: f64,
    pub positivity: f64,
    pub mood: DominantMood,
    pub feelings: Vec<String>,
    pub sleep_quality: Option<String>,
}

impl LogEntry for MoodEntry {
    const STORAGE_KEY: &'static str = "mood-logs";
    type Draft = MoodDraft;

    fn from_draft(draft: MoodDraft) -> Self {
        Self {
            mood: DominantMood::from_axes(draft.energy, draft.positivity),
            energy: draft.energy,
            positivity: draft.positivity,
            feelings: draft.feelings,
            sleep_quality: draft.sleep_quality,
        }
    }
}

impl From<MoodForm> for MoodDraft {
    fn from(form: MoodForm) -> Self {
        Self {
            energy: form.energy,
            positivity: form.positivity,
            feelings: form.feelings,
            sleep_quality: non_empty(form.sleep_quality),
        }
    }
}

fn axis(label: &str, low: &str, high: &str) -> AxisConfig {
    AxisConfig {
        label: label.to_string(),
        min: -5.0,
        max: 5.0,
        low_label: low.to_string(),
        high_label: high.to_string(),
    }
}

pub fn flow_config() -> FlowConfig<MoodForm> {
    FlowConfig::new("mood", MoodForm::default(), Theme::with_accent("#FFB86B"))
        .step(
            Step::new("grid")
                .title("How are you feeling?")
                .subtitle("Drag to where you are right now")
                .badge("Mood")
                .field(AxisGridField {
                    field_key: "energy".to_string(),
                    secondary_key: "positivity".to_string(),
                    dominant_key: Some("dominantMood".to_string()),
                    x_axis: axis("Energy", "Drained", "Wired"),
                    y_axis: axis("Positivity", "Unpleasant", "Pleasant"),
                }),
        )
        .step(
            Step::new("feelings")
                .title("Name the feeling")
                .field(CategorizedChipsField {
                    field_key: "feelings".to_string(),
                    categories: vec![
                        ChipCategory::new(
                            "pleasant",
                            "Pleasant",
                            &[("happy", "Happy"), ("grateful", "Grateful"), ("relaxed", "Relaxed"), ("excited", "Excited")],
                        ),
                        ChipCategory::new(
                            "unpleasant",
                            "Unpleasant",
                            &[("anxious", "Anxious"), ("irritable", "Irritable"), ("sad", "Sad"), ("lonely", "Lonely")],
                        ),
                    ],
                    min_selections: None,
                }),
        )
        .step(
            Step::new("sleep")
                .title("How did you sleep?")
                .field(SegmentedSelectionField {
                    field_key: "sleepQuality".to_string(),
                    segments: options(&[("poor", "Poor"), ("fair", "Fair"), ("good", "Good"), ("great", "Great")]),
                }),
        )
}

/// `mood.save`
pub fn save(payload: &serde_json::Value, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
    let form: MoodForm = parse_payload(ActionKey::MoodSave, payload)?;
    let log = ctx.stores.mood.add_log(form.into());
    tracing::debug!(id = %log.id, mood = %log.mood, "mood log saved");
    (ctx.on_complete)();
    Ok(())
}
