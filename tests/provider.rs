//! Tests for the flow provider: navigation, shallow merging and save gating.
mod common;
use common::*;
use kiroku::prelude::*;
use proptest::prelude::*;
use serde_json::json;
use std::cell::RefCell;

#[cfg(test)]
mod provider_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_on_first_step_with_initial_data() {
        let flow = journal_flow();
        let provider = TrackerFlowProvider::new(&flow, |_| Ok(()));

        assert_eq!(provider.current_step(), 1);
        assert_eq!(provider.total_steps(), 3);
        assert!(provider.is_first_step());
        assert!(!provider.can_go_back());
        assert!(!provider.is_last_step());
        // normalize runs on the initial record too
        assert_eq!(provider.form_data().level_label, "none");
        assert_eq!(provider.current_step_config().map(|s| s.id.as_str()), Some("level"));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));

        provider.go_to_previous_step();
        assert_eq!(provider.current_step(), 1);

        for _ in 0..5 {
            provider.go_to_next_step();
        }
        assert_eq!(provider.current_step(), 3);
        assert!(provider.is_last_step());
        assert!(provider.can_go_back());
    }

    #[test]
    fn test_update_merges_shallowly_and_keeps_other_keys() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));

        provider
            .update_form_data(FormPatch::new().set("tags", json!(["a", "b"])).set("level", 8))
            .unwrap();
        provider.update_form_data(FormPatch::new().set("tags", json!(["c"]))).unwrap();

        let data = provider.form_data();
        assert_eq!(data.tags, vec!["c".to_string()]);
        assert_eq!(data.level, 8.0);
        assert_eq!(data.level_label, "severe");
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));

        let err = provider
            .update_form_data(FormPatch::new().set("mood", "fine"))
            .unwrap_err();
        assert_eq!(err, PatchError::UnknownKey("mood".to_string()));
    }

    #[test]
    fn test_save_hands_current_data_to_callback() {
        let flow = journal_flow();
        let saved = RefCell::new(Vec::new());
        let mut provider = TrackerFlowProvider::new(&flow, |data: &Journal| {
            saved.borrow_mut().push(data.clone());
            Ok(())
        });

        provider.update_form_data(FormPatch::new().set("flagged", true)).unwrap();
        assert!(matches!(provider.save(), Err(FlowError::NotOnLastStep { .. })));

        provider.go_to_next_step();
        provider.go_to_next_step();
        provider.save().unwrap();
        drop(provider);

        let saved = saved.into_inner();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].flagged);
    }

    #[test]
    fn test_save_error_is_surfaced() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| {
            Err(ActionError::UnknownAction("journal.save".to_string()))
        });
        provider.go_to_next_step();
        provider.go_to_next_step();

        assert!(matches!(
            provider.save(),
            Err(FlowError::Save(ActionError::UnknownAction(_)))
        ));
    }

    #[test]
    fn test_min_selections_does_not_block_save() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        provider.go_to_next_step();
        provider.go_to_next_step();
        assert!(provider.form_data().tags.is_empty());
        assert!(provider.save().is_ok());
    }
}

#[derive(Debug, Clone)]
enum Nav {
    Next,
    Previous,
}

fn nav_strategy() -> impl Strategy<Value = Nav> {
    prop_oneof![Just(Nav::Next), Just(Nav::Previous)]
}

proptest! {
    #[test]
    fn prop_current_step_stays_in_bounds(moves in proptest::collection::vec(nav_strategy(), 0..40)) {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        for step in moves {
            match step {
                Nav::Next => provider.go_to_next_step(),
                Nav::Previous => provider.go_to_previous_step(),
            }
            prop_assert!(provider.current_step() >= 1);
            prop_assert!(provider.current_step() <= provider.total_steps());
        }
    }

    #[test]
    fn prop_merge_only_touches_patched_keys(level in 0.0f64..10.0, flagged: bool, tags in proptest::collection::vec("[a-z]{1,4}", 0..5)) {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        provider.update_form_data(FormPatch::new().set("level", level).set("flagged", flagged)).unwrap();

        let before = provider.form_data().clone();
        provider.update_form_data(FormPatch::new().set("tags", json!(tags.clone()))).unwrap();
        let after = provider.form_data();

        prop_assert_eq!(&after.tags, &tags);
        prop_assert_eq!(after.level, before.level);
        prop_assert_eq!(after.flagged, before.flagged);
    }
}
