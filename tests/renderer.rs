//! Tests for step rendering and widget changes flowing back into the provider.
mod common;
use common::*;
use kiroku::prelude::*;
use kiroku::renderer::toggle_selection;
use kiroku::trackers::{gi, mood};
use serde_json::json;

#[cfg(test)]
mod renderer_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_reports_position_and_theme() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        provider.go_to_next_step();

        let view = TrackerFlowRenderer::render(&provider).expect("flow has steps");
        assert_eq!(view.id, "tags");
        assert_eq!(view.position, 2);
        assert_eq!(view.total, 3);
        assert!(view.can_go_back);
        assert!(!view.is_last_step);
        assert_eq!(view.theme, &Theme::default());
        assert_eq!(view.fields.len(), 1);
    }

    #[test]
    fn test_scale_display_is_clamped_but_value_is_not() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        TrackerFlowRenderer::change(&mut provider, 0, FieldChange::Set(json!(14))).unwrap();

        assert_eq!(provider.form_data().level, 14.0);
        let view = TrackerFlowRenderer::render(&provider).unwrap();
        match &view.fields[0].widget {
            Widget::Scale { value, display_value, .. } => {
                assert_eq!(*value, Some(14.0));
                assert_eq!(*display_value, 10.0);
            }
            other => panic!("expected a scale widget, got {:?}", other),
        }
    }

    #[test]
    fn test_toggle_respects_max_selections() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        provider.go_to_next_step();

        TrackerFlowRenderer::toggle(&mut provider, 0, "a").unwrap();
        TrackerFlowRenderer::toggle(&mut provider, 0, "b").unwrap();
        TrackerFlowRenderer::toggle(&mut provider, 0, "c").unwrap();
        assert_eq!(provider.form_data().tags, vec!["a".to_string(), "b".to_string()]);

        TrackerFlowRenderer::toggle(&mut provider, 0, "a").unwrap();
        assert_eq!(provider.form_data().tags, vec!["b".to_string()]);
    }

    #[test]
    fn test_min_selection_warning_is_advisory() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        provider.go_to_next_step();

        let view = TrackerFlowRenderer::render(&provider).unwrap();
        match &view.fields[0].widget {
            Widget::Options { warning, selected_labels, multiple, .. } => {
                assert_eq!(warning.as_deref(), Some("Select at least 1 option"));
                assert_eq!(selected_labels, "");
                assert!(*multiple);
            }
            other => panic!("expected an options widget, got {:?}", other),
        }

        TrackerFlowRenderer::toggle(&mut provider, 0, "b").unwrap();
        provider.go_to_next_step();
        let view = TrackerFlowRenderer::render(&provider).unwrap();
        match &view.fields[1].widget {
            Widget::Chips { warning, selected_count, .. } => {
                assert_eq!(*selected_count, 1);
                assert_eq!(warning.as_deref(), Some("Select at least 2 options"));
            }
            other => panic!("expected a chips widget, got {:?}", other),
        }
    }

    #[test]
    fn test_change_on_missing_field_index() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        let err = TrackerFlowRenderer::change(&mut provider, 3, FieldChange::Set(json!(1))).unwrap_err();
        assert_eq!(
            err,
            RenderError::FieldNotFound {
                step_id: "level".to_string(),
                index: 3
            }
        );
    }

    #[test]
    fn test_wrong_value_type_leaves_state_untouched() {
        let flow = journal_flow();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        let result = TrackerFlowRenderer::change(&mut provider, 0, FieldChange::Set(json!("loud")));
        assert!(matches!(result, Err(RenderError::Patch(PatchError::Type(_)))));
        let mut untouched = Journal::default();
        untouched.normalize();
        assert_eq!(provider.form_data(), &untouched);
    }

    #[test]
    fn test_axis_grid_writes_both_slots_and_derives_mood() {
        let flow = mood::flow_config();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));

        TrackerFlowRenderer::change(&mut provider, 0, FieldChange::SetPair(json!(-4), json!(3))).unwrap();
        assert_eq!(provider.form_data().dominant_mood, mood::DominantMood::Calm);

        let view = TrackerFlowRenderer::render(&provider).unwrap();
        match &view.fields[0].widget {
            Widget::AxisGrid { x, y, dominant, .. } => {
                assert_eq!((*x, *y), (-4.0, 3.0));
                assert_eq!(dominant.as_deref(), Some("calm"));
            }
            other => panic!("expected an axis grid, got {:?}", other),
        }

        let single = TrackerFlowRenderer::change(&mut provider, 0, FieldChange::Set(json!(1)));
        assert!(matches!(single, Err(RenderError::ChangeShape { .. })));
    }

    #[test]
    fn test_day_part_duration_reads_secondary_slot() {
        let flow = gi::flow_config();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        for _ in 1..flow.total_steps() {
            provider.go_to_next_step();
        }

        TrackerFlowRenderer::change(&mut provider, 0, FieldChange::SetPair(json!("lunch"), json!("1_3h"))).unwrap();
        let view = TrackerFlowRenderer::render(&provider).unwrap();
        match &view.fields[0].widget {
            Widget::DayPartDuration { day_parts, durations } => {
                let part: Vec<_> = day_parts.iter().filter(|o| o.selected).map(|o| o.id.as_str()).collect();
                let duration: Vec<_> = durations.iter().filter(|o| o.selected).map(|o| o.id.as_str()).collect();
                assert_eq!(part, vec!["lunch"]);
                assert_eq!(duration, vec!["1_3h"]);
            }
            other => panic!("expected a day part widget, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_type_renders_placeholder() {
        let json = r#"{
            "id": "custom",
            "initialData": {"depth": 0},
            "steps": [
                {"id": "one", "fields": [{"type": "slider_3d", "fieldKey": "depth"}]}
            ]
        }"#;
        let flow = FlowConfig::<serde_json::Map<String, serde_json::Value>>::from_json(json).unwrap();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));

        let view = TrackerFlowRenderer::render(&provider).unwrap();
        assert_eq!(
            view.fields[0].widget,
            Widget::Unsupported {
                notice: "Field type 'slider_3d' is not implemented".to_string()
            }
        );
        assert!(matches!(
            TrackerFlowRenderer::change(&mut provider, 0, FieldChange::Set(json!(1))),
            Err(RenderError::Unsupported(name)) if name == "slider_3d"
        ));
    }

    #[test]
    fn test_selection_summary_content() {
        let flow = kiroku::trackers::migraine::flow_config();
        let mut provider = TrackerFlowProvider::new(&flow, |_| Ok(()));
        provider.go_to_next_step();

        let view = TrackerFlowRenderer::render(&provider).unwrap();
        assert_eq!(view.content[0].text, "0 areas selected");

        TrackerFlowRenderer::toggle(&mut provider, 0, "forehead").unwrap();
        let view = TrackerFlowRenderer::render(&provider).unwrap();
        assert_eq!(view.content[0].text, "1 area selected");
    }

    #[test]
    fn test_toggle_selection_returns_new_list() {
        let current = json!(["a"]);
        assert_eq!(toggle_selection(&current, "b", None), json!(["a", "b"]));
        assert_eq!(toggle_selection(&current, "a", None), json!([]));
        assert_eq!(toggle_selection(&json!(null), "a", Some(0)), json!([]));
        assert_eq!(current, json!(["a"]));
    }
}
