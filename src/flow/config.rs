use super::{ContentBlock, Field};
use crate::error::ConfigError;
use crate::form::FormRecord;
use serde::{Deserialize, Serialize};

/// Colours a flow is drawn with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
}

impl Theme {
    pub fn with_accent(accent: &str) -> Self {
        Self {
            accent: accent.to_string(),
            ..Self::default()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: "#6C5CE7".to_string(),
            background: "#0F0E17".to_string(),
            surface: "#1C1B29".to_string(),
            text: "#FFFFFE".to_string(),
        }
    }
}

/// One screen of a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_badge: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentBlock>,
}

impl Step {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: None,
            subtitle: None,
            header_badge: None,
            fields: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = Some(subtitle.to_string());
        self
    }

    pub fn badge(mut self, badge: &str) -> Self {
        self.header_badge = Some(badge.to_string());
        self
    }

    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn content(mut self, block: ContentBlock) -> Self {
        self.content.push(block);
        self
    }
}

/// A declarative multi-step form over the record type `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConfig<T> {
    pub id: String,
    #[serde(default)]
    pub initial_data: T,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub theme: Theme,
}

impl<T: FormRecord> FlowConfig<T> {
    pub fn new(id: &str, initial_data: T, theme: Theme) -> Self {
        Self {
            id: id.to_string(),
            initial_data,
            steps: Vec::new(),
            theme,
        }
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Returns the step at a 1-based position.
    pub fn step_at(&self, position: usize) -> Option<&Step> {
        position.checked_sub(1).and_then(|i| self.steps.get(i))
    }

    /// Parses a flow from JSON. A missing `initialData` falls back to `T::default()`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))
    }
}
