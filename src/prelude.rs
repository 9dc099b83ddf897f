//! Prelude module for convenient imports
//!
//! Re-exports the types most programs need to drive a tracker flow or a check-in
//! screen, so a single `use kiroku::prelude::*;` is enough.

// Flow definitions and state
pub use crate::flow::{ContentBlock, Field, FieldTag, FlowConfig, Step, Theme};
pub use crate::form::{FormPatch, FormRecord};
pub use crate::provider::{FlowState, TrackerFlowProvider};

// Rendering
pub use crate::renderer::{FieldChange, FieldView, StepView, TrackerFlowRenderer, Widget};

// Saving
pub use crate::actions::{Action, ActionContext, ActionKey, get_action};
pub use crate::store::{FileStorage, Log, LogEntry, LogStore, MemoryStorage, Storage, TrackerStores};
pub use crate::trackers::{SeverityLabel, Tracker};

// Check-in screens
pub use crate::checkin::{AnswerValue, CheckinScreen, CheckinSession, Condition, ShowIf};

// Settings
pub use crate::config::EngineConfig;

// Error types
pub use crate::error::{
    ActionError, CheckinError, ConfigError, FlowError, PatchError, RenderError, StorageError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
