use super::{AnswerValue, CheckinScreen, CheckinSection, CheckinSubmission, ComponentKind};
use crate::error::CheckinError;
use ahash::AHashMap;
use chrono::Utc;

/// A rendered component of a visible section.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentView<'s> {
    pub id: &'s str,
    pub kind: &'s ComponentKind,
    pub label: Option<&'s str>,
    pub value: AnswerValue,
    /// Set when the component type has no renderer.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView<'s> {
    pub index: usize,
    pub title: Option<&'s str>,
    pub components: Vec<ComponentView<'s>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenView<'s> {
    pub title: Option<&'s str>,
    pub sections: Vec<SectionView<'s>>,
    pub can_skip: bool,
    pub submit_label: &'s str,
}

/// The answers collected on one rendered check-in screen.
///
/// Visibility is recomputed from the current answers on every query; nothing is
/// cached, so chains of dependent sections always reflect the latest answers.
#[derive(Debug, Clone)]
pub struct CheckinSession<'s> {
    screen: &'s CheckinScreen,
    answers: AHashMap<String, AnswerValue>,
}

impl<'s> CheckinSession<'s> {
    pub fn new(screen: &'s CheckinScreen) -> Self {
        Self {
            screen,
            answers: AHashMap::new(),
        }
    }

    /// Starts a session seeded with earlier answers, each checked like `update_answer`.
    pub fn with_initial_values<I>(screen: &'s CheckinScreen, initial: I) -> Result<Self, CheckinError>
    where
        I: IntoIterator<Item = (String, AnswerValue)>,
    {
        let mut session = Self::new(screen);
        for (id, value) in initial {
            session.update_answer(&id, value)?;
        }
        Ok(session)
    }

    /// Replaces the whole answer of one component.
    pub fn update_answer(&mut self, component_id: &str, value: AnswerValue) -> Result<(), CheckinError> {
        let component = self
            .screen
            .component(component_id)
            .ok_or_else(|| CheckinError::UnknownComponent(component_id.to_string()))?;

        if !component.kind.accepts(&value) {
            return Err(CheckinError::KindMismatch {
                component_id: component_id.to_string(),
                expected: component.kind.expected(),
                found: value.to_string(),
            });
        }

        tracing::trace!(screen = %self.screen.id, component = component_id, value = %value, "answer updated");
        self.answers.insert(component_id.to_string(), value);
        Ok(())
    }

    pub fn answer(&self, component_id: &str) -> AnswerValue {
        self.answers.get(component_id).cloned().unwrap_or_default()
    }

    pub fn answers(&self) -> &AHashMap<String, AnswerValue> {
        &self.answers
    }

    pub fn is_section_visible(&self, section: &CheckinSection) -> bool {
        section
            .show_if
            .as_ref()
            .is_none_or(|show_if| show_if.is_met(&self.answers))
    }

    pub fn visible_sections(&self) -> Vec<(usize, &'s CheckinSection)> {
        self.screen
            .sections
            .iter()
            .enumerate()
            .filter(|(_, section)| self.is_section_visible(section))
            .collect()
    }

    pub fn render(&self) -> ScreenView<'s> {
        let sections = self
            .visible_sections()
            .into_iter()
            .map(|(index, section)| SectionView {
                index,
                title: section.title.as_deref(),
                components: section
                    .components
                    .iter()
                    .map(|c| ComponentView {
                        id: &c.id,
                        kind: &c.kind,
                        label: c.label.as_deref(),
                        value: self.answer(&c.id),
                        placeholder: match &c.kind {
                            ComponentKind::Unsupported(name) => {
                                tracing::warn!(component = %c.id, component_type = %name, "rendering placeholder for unsupported component");
                                Some(format!("Component type '{}' is not implemented", name))
                            }
                            _ => None,
                        },
                    })
                    .collect(),
            })
            .collect();

        ScreenView {
            title: self.screen.title.as_deref(),
            sections,
            can_skip: self.screen.allow_skip,
            submit_label: self.screen.submit_label.as_deref().unwrap_or("Submit"),
        }
    }

    /// Required components in visible sections that have no answer yet.
    ///
    /// Neither `submit` nor `skip` checks this; it is for callers that validate.
    pub fn missing_required(&self) -> Vec<&'s str> {
        self.visible_sections()
            .into_iter()
            .flat_map(|(_, section)| section.components.iter())
            .filter(|c| c.required && self.answer(&c.id).is_null())
            .map(|c| c.id.as_str())
            .collect()
    }

    pub fn submission(&self) -> CheckinSubmission {
        CheckinSubmission {
            screen_id: self.screen.id.clone(),
            answers: self.answers.clone(),
            submitted_at: Utc::now(),
        }
    }

    /// Hands the current answers to `on_submit`.
    pub fn submit<R>(&self, on_submit: impl FnOnce(&AHashMap<String, AnswerValue>) -> R) -> R {
        tracing::debug!(screen = %self.screen.id, answers = self.answers.len(), "submitting check-in");
        on_submit(&self.answers)
    }

    pub fn skip(&self, on_skip: impl FnOnce()) -> Result<(), CheckinError> {
        if !self.screen.allow_skip {
            return Err(CheckinError::SkipNotAllowed);
        }
        tracing::debug!(screen = %self.screen.id, "check-in skipped");
        on_skip();
        Ok(())
    }
}
