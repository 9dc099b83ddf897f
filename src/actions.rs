//! The action registry: string keys mapped to tracker save handlers.
//!
//! A flow's `on_save` looks up its handler with [`get_action`] and calls it with the
//! serialized form data. Handlers receive the tracker stores and the completion
//! callback through an [`ActionContext`] instead of reaching for globals.

use crate::error::ActionError;
use crate::store::TrackerStores;
use crate::trackers::{arthritis, congestion, gi, migraine, mood, orthostatic, respiratory, skin};
use std::fmt;
use std::str::FromStr;

/// What a save handler may touch.
pub struct ActionContext<'a> {
    pub stores: &'a TrackerStores,
    /// Called once after the log has been written, e.g. to close the flow.
    pub on_complete: &'a mut dyn FnMut(),
}

/// A save handler. Writes exactly one log, then calls `on_complete` exactly once.
pub type Action = fn(&serde_json::Value, &mut ActionContext<'_>) -> Result<(), ActionError>;

/// Defines the closed set of action keys and binds each to its handler.
macro_rules! define_actions {
    ( $( ($variant:ident, $key:literal, $handler:path) ),* $(,)? ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ActionKey {
            $( $variant, )*
        }

        impl ActionKey {
            pub const ALL: &'static [ActionKey] = &[ $( ActionKey::$variant, )* ];

            pub fn as_str(self) -> &'static str {
                match self {
                    $( ActionKey::$variant => $key, )*
                }
            }
        }

        impl FromStr for ActionKey {
            type Err = ActionError;

            fn from_str(key: &str) -> Result<Self, Self::Err> {
                match key {
                    $( $key => Ok(ActionKey::$variant), )*
                    _ => Err(ActionError::UnknownAction(key.to_string())),
                }
            }
        }

        /// Returns the handler registered for `key`.
        pub fn get_action(key: ActionKey) -> Action {
            match key {
                $( ActionKey::$variant => $handler as Action, )*
            }
        }
    };
}

define_actions! {
    (MigraineSave, "migraine.save", migraine::save),
    (MoodSave, "mood.save", mood::save),
    (ArthritisSave, "arthritis.save", arthritis::save),
    (OrthostaticSave, "orthostatic.save", orthostatic::save),
    (SkinSave, "skin.save", skin::save),
    (RespiratorySave, "respiratory.save", respiratory::save),
    (CongestionSave, "congestion.save", congestion::save),
    (GiSave, "gi.save", gi::save),
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up a handler by its string key.
pub fn get_action_by_name(key: &str) -> Result<Action, ActionError> {
    key.parse().map(get_action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_parse_back() {
        for key in ActionKey::ALL {
            assert_eq!(key.as_str().parse::<ActionKey>().ok(), Some(*key));
        }
        assert_eq!(ActionKey::ALL.len(), 8);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        assert!(matches!(
            get_action_by_name("sleep.save"),
            Err(ActionError::UnknownAction(key)) if key == "sleep.save"
        ));
    }
}
