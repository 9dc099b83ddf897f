//! The in-progress state of one flow instance.

use crate::error::{ActionError, FlowError, PatchError};
use crate::flow::{FlowConfig, Step};
use crate::form::{FormPatch, FormRecord, reduce};

/// The answer record and the 1-based position of the active step.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState<T> {
    pub form_data: T,
    pub current_step: usize,
}

type SaveCallback<'a, T> = Box<dyn FnMut(&T) -> Result<(), ActionError> + 'a>;

/// Holds a flow's answers and step position, and hands the answers to `on_save`.
///
/// The provider never persists anything itself. A flow with no steps still
/// reports step 1, but it can never be saved.
pub struct TrackerFlowProvider<'a, T: FormRecord> {
    config: &'a FlowConfig<T>,
    state: FlowState<T>,
    on_save: SaveCallback<'a, T>,
}

impl<'a, T: FormRecord> TrackerFlowProvider<'a, T> {
    pub fn new<F>(config: &'a FlowConfig<T>, on_save: F) -> Self
    where
        F: FnMut(&T) -> Result<(), ActionError> + 'a,
    {
        if config.steps.is_empty() {
            tracing::warn!(flow = %config.id, "flow has no steps");
        }
        let mut form_data = config.initial_data.clone();
        form_data.normalize();
        Self {
            config,
            state: FlowState {
                form_data,
                current_step: 1,
            },
            on_save: Box::new(on_save),
        }
    }

    /// Merges `patch` into the form data. The state is untouched when the patch is rejected.
    pub fn update_form_data(&mut self, patch: FormPatch) -> Result<(), PatchError> {
        self.state.form_data = reduce(&self.state.form_data, &patch)?;
        tracing::trace!(flow = %self.config.id, keys = ?patch.keys().collect::<Vec<_>>(), "form data updated");
        Ok(())
    }

    pub fn go_to_next_step(&mut self) {
        if self.state.current_step < self.total_steps() {
            self.state.current_step += 1;
            tracing::debug!(flow = %self.config.id, step = self.state.current_step, "advanced to step");
        }
    }

    pub fn go_to_previous_step(&mut self) {
        if self.state.current_step > 1 {
            self.state.current_step -= 1;
            tracing::debug!(flow = %self.config.id, step = self.state.current_step, "returned to step");
        }
    }

    /// Hands the form data to `on_save`. Only allowed on the last step.
    pub fn save(&mut self) -> Result<(), FlowError> {
        if self.total_steps() == 0 {
            return Err(FlowError::NoSteps(self.config.id.clone()));
        }
        if !self.is_last_step() {
            return Err(FlowError::NotOnLastStep {
                current: self.state.current_step,
                total: self.total_steps(),
            });
        }
        tracing::debug!(flow = %self.config.id, "saving flow");
        (self.on_save)(&self.state.form_data)?;
        Ok(())
    }

    pub fn config(&self) -> &'a FlowConfig<T> {
        self.config
    }

    pub fn state(&self) -> &FlowState<T> {
        &self.state
    }

    pub fn form_data(&self) -> &T {
        &self.state.form_data
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.config.total_steps()
    }

    pub fn current_step_config(&self) -> Option<&'a Step> {
        self.config.step_at(self.state.current_step)
    }

    pub fn can_go_back(&self) -> bool {
        self.state.current_step > 1
    }

    pub fn is_first_step(&self) -> bool {
        self.state.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.state.current_step == self.total_steps()
    }
}
