use thiserror::Error;

/// Errors found while loading or validating a flow or check-in definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to parse definition JSON: {0}")]
    JsonParseError(String),

    #[error("Flow '{0}' has no steps")]
    EmptyFlow(String),

    #[error("Step id '{0}' is used more than once")]
    DuplicateStep(String),

    #[error("Field '{field_type}' in step '{step_id}' references key '{key}', which is not part of the form data")]
    UnknownFieldKey {
        step_id: String,
        field_type: String,
        key: String,
    },

    #[error("Field '{field_key}' in step '{step_id}' has min {min} greater than max {max}")]
    InvalidRange {
        step_id: String,
        field_key: String,
        min: f64,
        max: f64,
    },

    #[error("Step '{step_id}' uses an unregistered field type: '{type_name}'")]
    UnknownFieldType { step_id: String, type_name: String },

    #[error("Component id '{0}' is declared more than once")]
    DuplicateComponent(String),

    #[error("Section {section_index} is shown based on '{component_id}', which is not answered earlier in the screen")]
    ForwardCondition {
        section_index: usize,
        component_id: String,
    },

    #[error("Component '{component_id}' uses an unregistered component type: '{type_name}'")]
    UnknownComponentType {
        component_id: String,
        type_name: String,
    },

    #[error("Definition is invalid:\n{}", .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Invalid(Vec<ConfigError>),
}

/// Errors raised while merging a patch into form data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatchError {
    #[error("Key '{0}' is not part of the form data")]
    UnknownKey(String),

    #[error("Form data does not serialize to an object")]
    NotAnObject,

    #[error("Patched form data is invalid: {0}")]
    Type(String),
}

/// Errors raised by the flow provider.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("Save is only available on the last step (currently on step {current} of {total})")]
    NotOnLastStep { current: usize, total: usize },

    #[error("Flow '{0}' has no steps to save from")]
    NoSteps(String),

    #[error("Saving the flow failed: {0}")]
    Save(#[from] ActionError),
}

/// Errors raised while turning a widget change into a form patch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Field '{field_type}' expects {expected}")]
    ChangeShape {
        field_type: String,
        expected: &'static str,
    },

    #[error("Field type '{0}' is not implemented and cannot be changed")]
    Unsupported(String),

    #[error("Field index {index} is out of range for step '{step_id}'")]
    FieldNotFound { step_id: String, index: usize },

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Errors raised by save actions.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("No action is registered under '{0}'")]
    UnknownAction(String),

    #[error("Payload for '{action}' does not match the tracker form: {message}")]
    InvalidPayload { action: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by a tracker log store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Log '{0}' not found")]
    LogNotFound(uuid::Uuid),
}

/// Errors raised by the key-value storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored value for '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

/// Errors raised by a check-in session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckinError {
    #[error("Component '{0}' does not exist on this screen")]
    UnknownComponent(String),

    #[error("Component '{component_id}' expects {expected}, but received '{found}'")]
    KindMismatch {
        component_id: String,
        expected: &'static str,
        found: String,
    },

    #[error("This check-in cannot be skipped")]
    SkipNotAllowed,
}

/// Errors raised while loading the engine settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings JSON: {0}")]
    Parse(String),
}
