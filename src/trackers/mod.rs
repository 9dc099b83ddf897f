//! Built-in trackers: their flows, form records, log entries and save handlers.

use crate::actions::{ActionContext, ActionKey, get_action};
use crate::error::{ActionError, FlowError};
use crate::flow::FlowConfig;
use crate::form::{FormPatch, FormRecord};
use crate::provider::TrackerFlowProvider;
use crate::store::TrackerStores;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod arthritis;
pub mod congestion;
pub mod gi;
pub mod migraine;
pub mod mood;
pub mod orthostatic;
pub mod respiratory;
pub mod skin;

/// Label derived from a 0–10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLabel {
    None,
    Mild,
    Moderate,
    Severe,
    Extreme,
}

impl SeverityLabel {
    /// 0 none, 1–3 mild, 4–6 moderate, 7–8 severe, 9 and above extreme.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => SeverityLabel::None,
            1..=3 => SeverityLabel::Mild,
            4..=6 => SeverityLabel::Moderate,
            7..=8 => SeverityLabel::Severe,
            _ => SeverityLabel::Extreme,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLabel::None => "none",
            SeverityLabel::Mild => "mild",
            SeverityLabel::Moderate => "moderate",
            SeverityLabel::Severe => "severe",
            SeverityLabel::Extreme => "extreme",
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale labels shared by every 0–10 severity field.
pub(crate) const SEVERITY_SCALE_LABELS: &[(f64, &str)] = &[
    (0.0, "None"),
    (1.0, "Mild"),
    (4.0, "Moderate"),
    (7.0, "Severe"),
    (9.0, "Extreme"),
];

/// Rounds a form scale value to a 0–10 score for banding.
pub(crate) fn score(value: f64) -> u8 {
    value.round().clamp(0.0, 10.0) as u8
}

/// Empty strings from the form become `None` in the log.
pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn parse_payload<T: DeserializeOwned>(
    key: ActionKey,
    payload: &serde_json::Value,
) -> Result<T, ActionError> {
    serde_json::from_value(payload.clone()).map_err(|e| ActionError::InvalidPayload {
        action: key.as_str().to_string(),
        message: e.to_string(),
    })
}

/// The built-in trackers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tracker {
    Migraine,
    Mood,
    Arthritis,
    Orthostatic,
    Skin,
    Respiratory,
    Congestion,
    Gi,
}

impl Tracker {
    pub const ALL: &'static [Tracker] = &[
        Tracker::Migraine,
        Tracker::Mood,
        Tracker::Arthritis,
        Tracker::Orthostatic,
        Tracker::Skin,
        Tracker::Respiratory,
        Tracker::Congestion,
        Tracker::Gi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tracker::Migraine => "migraine",
            Tracker::Mood => "mood",
            Tracker::Arthritis => "arthritis",
            Tracker::Orthostatic => "orthostatic",
            Tracker::Skin => "skin",
            Tracker::Respiratory => "respiratory",
            Tracker::Congestion => "congestion",
            Tracker::Gi => "gi",
        }
    }

    pub fn save_action(self) -> ActionKey {
        match self {
            Tracker::Migraine => ActionKey::MigraineSave,
            Tracker::Mood => ActionKey::MoodSave,
            Tracker::Arthritis => ActionKey::ArthritisSave,
            Tracker::Orthostatic => ActionKey::OrthostaticSave,
            Tracker::Skin => ActionKey::SkinSave,
            Tracker::Respiratory => ActionKey::RespiratorySave,
            Tracker::Congestion => ActionKey::CongestionSave,
            Tracker::Gi => ActionKey::GiSave,
        }
    }

    /// The tracker's flow config as JSON.
    pub fn flow_json(self) -> serde_json::Value {
        let value = match self {
            Tracker::Migraine => serde_json::to_value(migraine::flow_config()),
            Tracker::Mood => serde_json::to_value(mood::flow_config()),
            Tracker::Arthritis => serde_json::to_value(arthritis::flow_config()),
            Tracker::Orthostatic => serde_json::to_value(orthostatic::flow_config()),
            Tracker::Skin => serde_json::to_value(skin::flow_config()),
            Tracker::Respiratory => serde_json::to_value(respiratory::flow_config()),
            Tracker::Congestion => serde_json::to_value(congestion::flow_config()),
            Tracker::Gi => serde_json::to_value(gi::flow_config()),
        };
        value.unwrap_or_default()
    }

    /// Drives the tracker's flow with one patch per step, then saves through the
    /// action registry. Returns the number of steps walked.
    pub fn run_scripted(
        self,
        step_patches: &[FormPatch],
        stores: &TrackerStores,
        on_complete: &mut dyn FnMut(),
    ) -> Result<usize, FlowError> {
        let key = self.save_action();
        match self {
            Tracker::Migraine => run_flow(&migraine::flow_config(), key, step_patches, stores, on_complete),
            Tracker::Mood => run_flow(&mood::flow_config(), key, step_patches, stores, on_complete),
            Tracker::Arthritis => run_flow(&arthritis::flow_config(), key, step_patches, stores, on_complete),
            Tracker::Orthostatic => run_flow(&orthostatic::flow_config(), key, step_patches, stores, on_complete),
            Tracker::Skin => run_flow(&skin::flow_config(), key, step_patches, stores, on_complete),
            Tracker::Respiratory => run_flow(&respiratory::flow_config(), key, step_patches, stores, on_complete),
            Tracker::Congestion => run_flow(&congestion::flow_config(), key, step_patches, stores, on_complete),
            Tracker::Gi => run_flow(&gi::flow_config(), key, step_patches, stores, on_complete),
        }
    }
}

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tracker {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Tracker::ALL
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| format!("unknown tracker '{name}'"))
    }
}

/// Walks a flow from the first step to the last, applying `step_patches[i]` on step
/// `i + 1`, and saves through the registered action.
pub fn run_flow<T: FormRecord>(
    config: &FlowConfig<T>,
    key: ActionKey,
    step_patches: &[FormPatch],
    stores: &TrackerStores,
    on_complete: &mut dyn FnMut(),
) -> Result<usize, FlowError> {
    let action = get_action(key);
    let mut provider = TrackerFlowProvider::new(config, |data: &T| {
        let payload = serde_json::to_value(data).map_err(|e| ActionError::InvalidPayload {
            action: key.as_str().to_string(),
            message: e.to_string(),
        })?;
        let mut ctx = ActionContext {
            stores,
            on_complete: &mut *on_complete,
        };
        action(&payload, &mut ctx)
    });

    let total = config.total_steps();
    for position in 1..=total {
        if let Some(patch) = step_patches.get(position - 1) {
            provider.update_form_data(patch.clone())?;
        }
        if position < total {
            provider.go_to_next_step();
        }
    }

    let walked = provider.current_step();
    provider.save()?;
    Ok(walked)
}
