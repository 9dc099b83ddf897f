//! Tests for check-in screens: conditional sections, answers and submission.
mod common;
use common::*;
use kiroku::checkin::{CheckinInsights, ComponentKind};
use kiroku::prelude::*;

#[cfg(test)]
mod checkin_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn screen() -> CheckinScreen {
        CheckinScreen::from_json(CONDITIONAL_SCREEN_JSON).expect("valid screen")
    }

    fn visible_titles(session: &CheckinSession<'_>) -> Vec<String> {
        session
            .visible_sections()
            .into_iter()
            .filter_map(|(_, s)| s.title.clone())
            .collect()
    }

    #[test]
    fn test_conditional_section_follows_answer() {
        let screen = screen();
        let mut session = CheckinSession::new(&screen);
        assert_eq!(visible_titles(&session), vec!["Pain"]);

        session.update_answer("has_pain", AnswerValue::from("yes")).unwrap();
        assert_eq!(visible_titles(&session), vec!["Pain", "Details"]);

        session.update_answer("has_pain", AnswerValue::from("no")).unwrap();
        assert_eq!(visible_titles(&session), vec!["Pain"]);
    }

    #[test]
    fn test_chained_conditions_recompute() {
        let screen = screen();
        let mut session = CheckinSession::new(&screen);
        session.update_answer("has_pain", AnswerValue::from("yes")).unwrap();
        session.update_answer("pain_level", AnswerValue::Number(8.0)).unwrap();
        assert_eq!(visible_titles(&session), vec!["Pain", "Details", "Sleep"]);

        // pain_level keeps its answer, so Sleep stays visible while Details is hidden.
        session.update_answer("has_pain", AnswerValue::from("no")).unwrap();
        assert_eq!(visible_titles(&session), vec!["Pain", "Sleep"]);
    }

    #[test]
    fn test_answers_are_schema_checked() {
        let screen = screen();
        let mut session = CheckinSession::new(&screen);

        assert_eq!(
            session.update_answer("mood", AnswerValue::from("ok")),
            Err(CheckinError::UnknownComponent("mood".to_string()))
        );
        assert!(matches!(
            session.update_answer("pain_level", AnswerValue::from("high")),
            Err(CheckinError::KindMismatch { expected: "a number", .. })
        ));
        assert!(session.update_answer("pain_level", AnswerValue::Null).is_ok());
        // unknown component types accept anything
        assert!(session.update_answer("body_map", AnswerValue::from(vec!["head"])).is_ok());
    }

    #[test]
    fn test_render_shows_placeholder_for_unknown_type() {
        let screen = screen();
        let session = CheckinSession::with_initial_values(
            &screen,
            vec![("has_pain".to_string(), AnswerValue::from("yes"))],
        )
        .unwrap();

        let view = session.render();
        assert_eq!(view.title, Some("Daily check-in"));
        assert_eq!(view.submit_label, "Submit");
        assert!(!view.can_skip);

        let details = &view.sections[1];
        assert_eq!(details.index, 1);
        let body_map = &details.components[1];
        assert_eq!(body_map.kind, &ComponentKind::Unsupported("body_map".to_string()));
        assert_eq!(
            body_map.placeholder.as_deref(),
            Some("Component type 'body_map' is not implemented")
        );
        assert_eq!(details.components[0].placeholder, None);
    }

    #[test]
    fn test_skip_requires_permission() {
        let screen = screen();
        let session = CheckinSession::new(&screen);
        let mut skipped = false;
        assert_eq!(session.skip(|| skipped = true), Err(CheckinError::SkipNotAllowed));
        assert!(!skipped);

        let mut skippable = screen.clone();
        skippable.allow_skip = true;
        let session = CheckinSession::new(&skippable);
        session.skip(|| skipped = true).unwrap();
        assert!(skipped);
    }

    #[test]
    fn test_submit_does_not_enforce_required() {
        let screen = screen();
        let mut session = CheckinSession::new(&screen);
        session.update_answer("has_pain", AnswerValue::from("yes")).unwrap();

        assert_eq!(session.missing_required(), vec!["pain_level"]);
        let count = session.submit(|answers| answers.len());
        assert_eq!(count, 1);

        let submission = session.submission();
        assert_eq!(submission.screen_id, "daily");
        let body = serde_json::to_value(&submission).unwrap();
        assert_eq!(body["answers"]["has_pain"], "yes");
    }

    #[test]
    fn test_validate_reports_problems() {
        let screen = screen();
        let problems = screen.validate();
        assert_eq!(
            problems,
            vec![ConfigError::UnknownComponentType {
                component_id: "body_map".to_string(),
                type_name: "body_map".to_string(),
            }]
        );

        let forward = CheckinScreen::from_json(
            r#"{"id": "f", "sections": [
                {"show_if": {"component_id": "later", "condition": "equals", "value": true},
                 "components": [{"id": "first", "type": "text"}]},
                {"components": [{"id": "later", "type": "yes_no"}, {"id": "first", "type": "text"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            forward.validate(),
            vec![
                ConfigError::ForwardCondition {
                    section_index: 0,
                    component_id: "later".to_string()
                },
                ConfigError::DuplicateComponent("first".to_string()),
            ]
        );
    }

    #[test]
    fn test_insights_response_parses() {
        let insights: CheckinInsights = serde_json::from_str(
            r#"{"insights": [{"title": "Pain trend", "body": "Lower than last week"}]}"#,
        )
        .unwrap();
        assert_eq!(insights.insights.len(), 1);
        assert_eq!(insights.insights[0].severity, None);
        assert!(insights.next_screen.is_none());
    }
}
