use super::AnswerValue;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals,
    NotEquals,
    Contains,
    Gt,
    Lt,
}

impl Condition {
    /// Compares an answer (or `Null` when unanswered) with the expected value.
    ///
    /// `Gt` and `Lt` are false unless both sides are numbers.
    pub fn evaluate(self, answer: &AnswerValue, expected: &AnswerValue) -> bool {
        match self {
            Condition::Equals => answer == expected,
            Condition::NotEquals => answer != expected,
            Condition::Contains => match (answer, expected) {
                (AnswerValue::List(items), _) => items.contains(expected),
                (AnswerValue::Text(haystack), AnswerValue::Text(needle)) => {
                    haystack.contains(needle.as_str())
                }
                _ => false,
            },
            Condition::Gt => match (answer.as_number(), expected.as_number()) {
                (Some(a), Some(b)) => a > b,
                _ => false,
            },
            Condition::Lt => match (answer.as_number(), expected.as_number()) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            },
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Condition::Equals => "==",
            Condition::NotEquals => "!=",
            Condition::Contains => "contains",
            Condition::Gt => ">",
            Condition::Lt => "<",
        }
    }
}

static UNANSWERED: AnswerValue = AnswerValue::Null;

/// A section's visibility predicate over an earlier component's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowIf {
    pub component_id: String,
    pub condition: Condition,
    pub value: AnswerValue,
}

impl ShowIf {
    pub fn is_met(&self, answers: &AHashMap<String, AnswerValue>) -> bool {
        let answer = answers.get(&self.component_id).unwrap_or(&UNANSWERED);
        self.condition.evaluate(answer, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_conditions_need_numbers() {
        let three = AnswerValue::Number(3.0);
        assert!(Condition::Gt.evaluate(&three, &AnswerValue::Number(2.0)));
        assert!(!Condition::Gt.evaluate(&AnswerValue::from("3"), &AnswerValue::Number(2.0)));
        assert!(!Condition::Lt.evaluate(&three, &AnswerValue::from("9")));
        assert!(!Condition::Lt.evaluate(&AnswerValue::Null, &three));
    }

    #[test]
    fn test_contains_list_and_text() {
        let list = AnswerValue::from(vec!["nausea", "aura"]);
        assert!(Condition::Contains.evaluate(&list, &AnswerValue::from("aura")));
        assert!(!Condition::Contains.evaluate(&list, &AnswerValue::from("fever")));
        assert!(Condition::Contains.evaluate(&AnswerValue::from("bad night"), &AnswerValue::from("night")));
        assert!(!Condition::Contains.evaluate(&AnswerValue::Number(1.0), &AnswerValue::Number(1.0)));
    }

    #[test]
    fn test_unanswered_component_is_null() {
        let show_if = ShowIf {
            component_id: "a".to_string(),
            condition: Condition::NotEquals,
            value: AnswerValue::from("x"),
        };
        assert!(show_if.is_met(&AHashMap::new()));
    }
}
