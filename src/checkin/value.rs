use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An answer given to a check-in component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AnswerValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<AnswerValue>),
}

// Manual implementation to handle f64
impl Eq for AnswerValue {}

// Hashes the f64 bits, with -0.0 folded into 0.0 since the two compare equal
impl Hash for AnswerValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            AnswerValue::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                n.to_bits().hash(state)
            }
            AnswerValue::Bool(b) => b.hash(state),
            AnswerValue::Text(s) => s.hash(state),
            AnswerValue::List(items) => items.hash(state),
            AnswerValue::Null => {}
        }
    }
}

impl AnswerValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AnswerValue::Null)
    }

    /// A short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnswerValue::Null => "null",
            AnswerValue::Bool(_) => "bool",
            AnswerValue::Number(_) => "number",
            AnswerValue::Text(_) => "text",
            AnswerValue::List(_) => "list",
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Text(s) => write!(f, "{}", s),
            AnswerValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            AnswerValue::Null => write!(f, "null"),
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::List(items.into_iter().map(AnswerValue::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_value_display() {
        assert_eq!(AnswerValue::Number(42.0).to_string(), "42");
        assert_eq!(AnswerValue::Number(2.5).to_string(), "2.5");
        assert_eq!(AnswerValue::from(vec!["a", "b"]).to_string(), "[a, b]");
        assert_eq!(AnswerValue::Null.to_string(), "null");
    }

    #[test]
    fn test_signed_zeros_hash_alike() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |value: &AnswerValue| {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        };
        let positive = AnswerValue::Number(0.0);
        let negative = AnswerValue::Number(-0.0);
        assert_eq!(positive, negative);
        assert_eq!(hash(&positive), hash(&negative));
        assert_ne!(hash(&positive), hash(&AnswerValue::Number(1.0)));
    }

    #[test]
    fn test_answer_value_untagged_json() {
        let value: AnswerValue = serde_json::from_str(r#"["x", 3, true]"#).unwrap();
        assert_eq!(
            value,
            AnswerValue::List(vec!["x".into(), 3.0.into(), true.into()])
        );
        let value: AnswerValue = serde_json::from_str("null").unwrap();
        assert!(value.is_null());
    }
}
