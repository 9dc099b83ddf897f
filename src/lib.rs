//! # Kiroku - Declarative Symptom Tracker Flows
//!
//! **Kiroku** drives multi-step symptom-tracking forms from data. A tracker is
//! described once as a [`flow::FlowConfig`]: an ordered list of steps, each holding
//! typed fields that read and write slots of a form record. The engine keeps the
//! answers and step position, turns the active step into a view model, and hands the
//! finished record to a save action that writes a timestamped log entry.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the flow**: build a `FlowConfig` in Rust or load one from JSON with
//!     `FlowConfig::from_json`. Unknown field types are kept as placeholders.
//! 2.  **Hold the state**: create a [`provider::TrackerFlowProvider`] with the config and
//!     an `on_save` callback, usually one that looks up a handler in [`actions`].
//! 3.  **Render and edit**: [`renderer::TrackerFlowRenderer`] produces a `StepView` for the
//!     active step and applies widget changes back to the provider as shallow patches.
//! 4.  **Save**: on the last step, `save()` passes the record to `on_save`, which writes
//!     one log into the tracker's [`store::LogStore`] and signals completion.
//!
//! Server-driven check-in screens with conditional sections live in [`checkin`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kiroku::prelude::*;
//! use kiroku::trackers::migraine;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let stores = TrackerStores::in_memory();
//!     let config = migraine::flow_config();
//!     let mut closed = false;
//!
//!     let action = get_action(ActionKey::MigraineSave);
//!     let mut provider = TrackerFlowProvider::new(&config, |form| {
//!         let payload = serde_json::to_value(form).unwrap_or_default();
//!         let mut ctx = ActionContext {
//!             stores: &stores,
//!             on_complete: &mut || closed = true,
//!         };
//!         action(&payload, &mut ctx)
//!     });
//!
//!     // Step 1 is the severity scale.
//!     TrackerFlowRenderer::change(&mut provider, 0, FieldChange::Set(json!(7)))?;
//!     while !provider.is_last_step() {
//!         provider.go_to_next_step();
//!     }
//!     if let Some(view) = TrackerFlowRenderer::render(&provider) {
//!         println!("Step {} of {}: {}", view.position, view.total, view.id);
//!     }
//!     provider.save()?;
//!     drop(provider);
//!
//!     let latest = stores.migraine.latest().expect("one log was written");
//!     println!("Saved {} migraine ({})", latest.severity_label, latest.id);
//!     assert!(closed);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod checkin;
pub mod config;
pub mod error;
pub mod flow;
pub mod form;
pub mod prelude;
pub mod provider;
pub mod renderer;
pub mod store;
pub mod trackers;
