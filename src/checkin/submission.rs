use super::AnswerValue;
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of the check-in submit request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinSubmission {
    pub screen_id: String,
    pub answers: AHashMap<String, AnswerValue>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Response returned for a submitted check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinInsights {
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_screen: Option<super::CheckinScreen>,
}
