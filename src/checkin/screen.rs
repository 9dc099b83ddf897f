use super::{AnswerValue, ShowIf};
use crate::error::ConfigError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// The component types a check-in screen can contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Scale,
    SingleChoice,
    MultiChoice,
    Text,
    YesNo,
    Number,
    /// Sent by the server but unknown to this build; rendered as a placeholder.
    Unsupported(String),
}

impl ComponentKind {
    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Scale => "scale",
            ComponentKind::SingleChoice => "single_choice",
            ComponentKind::MultiChoice => "multi_choice",
            ComponentKind::Text => "text",
            ComponentKind::YesNo => "yes_no",
            ComponentKind::Number => "number",
            ComponentKind::Unsupported(name) => name,
        }
    }

    /// Whether `value` has the shape this component records. `Null` always fits.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        match (self, value) {
            (_, AnswerValue::Null) => true,
            (ComponentKind::Scale | ComponentKind::Number, AnswerValue::Number(_)) => true,
            (ComponentKind::SingleChoice | ComponentKind::Text, AnswerValue::Text(_)) => true,
            (ComponentKind::MultiChoice, AnswerValue::List(items)) => {
                items.iter().all(|i| matches!(i, AnswerValue::Text(_)))
            }
            (ComponentKind::YesNo, AnswerValue::Bool(_)) => true,
            (ComponentKind::Unsupported(_), _) => true,
            _ => false,
        }
    }

    pub fn expected(&self) -> &'static str {
        match self {
            ComponentKind::Scale | ComponentKind::Number => "a number",
            ComponentKind::SingleChoice | ComponentKind::Text => "text",
            ComponentKind::MultiChoice => "a list of text",
            ComponentKind::YesNo => "yes or no",
            ComponentKind::Unsupported(_) => "any value",
        }
    }
}

impl From<String> for ComponentKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "scale" => ComponentKind::Scale,
            "single_choice" => ComponentKind::SingleChoice,
            "multi_choice" => ComponentKind::MultiChoice,
            "text" => ComponentKind::Text,
            "yes_no" => ComponentKind::YesNo,
            "number" => ComponentKind::Number,
            _ => ComponentKind::Unsupported(name),
        }
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        kind.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinComponent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub components: Vec<CheckinComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ShowIf>,
}

/// A server-driven check-in form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinScreen {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub sections: Vec<CheckinSection>,
    #[serde(default)]
    pub allow_skip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

impl CheckinScreen {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))
    }

    pub fn components(&self) -> impl Iterator<Item = &CheckinComponent> {
        self.sections.iter().flat_map(|s| s.components.iter())
    }

    pub fn component(&self, id: &str) -> Option<&CheckinComponent> {
        self.components().find(|c| c.id == id)
    }

    /// Collects configuration problems: duplicate ids, conditions on components that
    /// are not declared in an earlier section, and component types without a renderer.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();
        let mut declared: AHashSet<&str> = AHashSet::new();

        for (section_index, section) in self.sections.iter().enumerate() {
            if let Some(show_if) = &section.show_if {
                if !declared.contains(show_if.component_id.as_str()) {
                    problems.push(ConfigError::ForwardCondition {
                        section_index,
                        component_id: show_if.component_id.clone(),
                    });
                }
            }

            for component in &section.components {
                if !declared.insert(component.id.as_str()) {
                    problems.push(ConfigError::DuplicateComponent(component.id.clone()));
                }
                if let ComponentKind::Unsupported(type_name) = &component.kind {
                    problems.push(ConfigError::UnknownComponentType {
                        component_id: component.id.clone(),
                        type_name: type_name.clone(),
                    });
                }
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_from_name() {
        assert_eq!(ComponentKind::from("yes_no".to_string()), ComponentKind::YesNo);
        assert_eq!(
            ComponentKind::from("body_map".to_string()),
            ComponentKind::Unsupported("body_map".to_string())
        );
        assert_eq!(String::from(ComponentKind::MultiChoice), "multi_choice");
    }

    #[test]
    fn test_kind_accepts_matching_shapes() {
        assert!(ComponentKind::Scale.accepts(&AnswerValue::Number(4.0)));
        assert!(!ComponentKind::Scale.accepts(&AnswerValue::from("4")));
        assert!(ComponentKind::MultiChoice.accepts(&AnswerValue::from(vec!["a"])));
        assert!(!ComponentKind::MultiChoice.accepts(&AnswerValue::List(vec![AnswerValue::Number(1.0)])));
        assert!(ComponentKind::YesNo.accepts(&AnswerValue::Null));
    }
}
