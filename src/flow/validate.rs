use super::{Field, FlowConfig};
use crate::error::ConfigError;
use crate::form::{FormRecord, to_object};
use ahash::AHashSet;

impl<T: FormRecord> FlowConfig<T> {
    /// Collects every configuration problem in the flow.
    ///
    /// Field keys are checked against the serialized `initial_data`, so every slot of
    /// the record must be serialized even when empty.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut problems = Vec::new();

        if self.steps.is_empty() {
            problems.push(ConfigError::EmptyFlow(self.id.clone()));
        }

        let record_keys: AHashSet<String> = match to_object(&self.initial_data) {
            Ok(map) => map.keys().cloned().collect(),
            Err(e) => {
                problems.push(ConfigError::JsonParseError(e.to_string()));
                AHashSet::new()
            }
        };

        let mut seen_steps = AHashSet::new();
        for step in &self.steps {
            if !seen_steps.insert(step.id.as_str()) {
                problems.push(ConfigError::DuplicateStep(step.id.clone()));
            }

            for field in &step.fields {
                if let Field::Unsupported(u) = field {
                    problems.push(ConfigError::UnknownFieldType {
                        step_id: step.id.clone(),
                        type_name: u.type_name.clone(),
                    });
                    continue;
                }

                for key in field.keys() {
                    if !record_keys.contains(key) {
                        problems.push(ConfigError::UnknownFieldKey {
                            step_id: step.id.clone(),
                            field_type: field.type_name().to_string(),
                            key: key.to_string(),
                        });
                    }
                }

                if let Some((min, max)) = field.slots().and_then(|s| s.range()) {
                    if min > max {
                        problems.push(ConfigError::InvalidRange {
                            step_id: step.id.clone(),
                            field_key: field.field_key().unwrap_or_default().to_string(),
                            min,
                            max,
                        });
                    }
                }
            }

            for key in step.content.iter().filter_map(|c| c.field_key()) {
                if !record_keys.contains(key) {
                    problems.push(ConfigError::UnknownFieldKey {
                        step_id: step.id.clone(),
                        field_type: "selection_summary".to_string(),
                        key: key.to_string(),
                    });
                }
            }
        }

        problems
    }

    /// Like [`FlowConfig::validate`], but fails with every remaining problem when any are left.
    ///
    /// With `allow_unsupported`, unknown field types are logged and tolerated so the
    /// renderer can show its placeholder instead.
    pub fn validate_strict(&self, allow_unsupported: bool) -> Result<(), ConfigError> {
        let problems: Vec<ConfigError> = self
            .validate()
            .into_iter()
            .filter(|problem| match problem {
                ConfigError::UnknownFieldType { step_id, type_name } if allow_unsupported => {
                    tracing::warn!(flow = %self.id, step = %step_id, field_type = %type_name, "field type has no renderer");
                    false
                }
                _ => true,
            })
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::flow::{FlowConfig, HeroScaleField, Step, Theme, ToggleField};
    use crate::form::FormRecord;
    use crate::error::ConfigError;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Record {
        severity: f64,
        flagged: bool,
    }

    impl FormRecord for Record {}

    #[test]
    fn test_valid_flow_has_no_problems() {
        let flow = FlowConfig::new("ok", Record::default(), Theme::default())
            .step(Step::new("one").field(HeroScaleField::new("severity", 0.0, 10.0)));
        assert!(flow.validate().is_empty());
        assert!(flow.validate_strict(false).is_ok());
    }

    #[test]
    fn test_reports_every_problem() {
        let flow = FlowConfig::new("bad", Record::default(), Theme::default())
            .step(Step::new("one").field(HeroScaleField::new("severity", 10.0, 0.0)))
            .step(Step::new("one").field(ToggleField {
                field_key: "missing".to_string(),
                label: "Missing".to_string(),
                description: None,
            }));

        let problems = flow.validate();
        assert_eq!(problems.len(), 3);
        assert!(problems.contains(&ConfigError::DuplicateStep("one".to_string())));
        assert!(problems.iter().any(|p| matches!(p, ConfigError::InvalidRange { .. })));
        assert!(
            problems
                .iter()
                .any(|p| matches!(p, ConfigError::UnknownFieldKey { key, .. } if key == "missing"))
        );
    }

    #[test]
    fn test_strict_returns_all_remaining_problems() {
        let flow = FlowConfig::new("bad", Record::default(), Theme::default())
            .step(Step::new("one").field(HeroScaleField::new("severity", 10.0, 0.0)))
            .step(Step::new("one").field(HeroScaleField::new("severity", 0.0, 10.0)));

        match flow.validate_strict(true) {
            Err(ConfigError::Invalid(problems)) => assert_eq!(problems, flow.validate()),
            other => panic!("expected every problem, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_flow_is_rejected() {
        let flow = FlowConfig::new("empty", Record::default(), Theme::default());
        assert_eq!(flow.validate(), vec![ConfigError::EmptyFlow("empty".to_string())]);
    }
}
