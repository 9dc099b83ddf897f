use serde::{Deserialize, Serialize};

/// Static or data-driven text rendered below a step's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Note {
        text: String,
    },
    /// Counts the entries of a list slot, e.g. "3 areas selected".
    #[serde(rename_all = "camelCase")]
    SelectionSummary {
        field_key: String,
        singular: String,
        plural: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        empty: Option<String>,
    },
}

impl ContentBlock {
    pub fn note(text: &str) -> Self {
        ContentBlock::Note {
            text: text.to_string(),
        }
    }

    pub fn selection_summary(field_key: &str, singular: &str, plural: &str) -> Self {
        ContentBlock::SelectionSummary {
            field_key: field_key.to_string(),
            singular: singular.to_string(),
            plural: plural.to_string(),
            empty: None,
        }
    }

    pub fn field_key(&self) -> Option<&str> {
        match self {
            ContentBlock::Note { .. } => None,
            ContentBlock::SelectionSummary { field_key, .. } => Some(field_key),
        }
    }
}
