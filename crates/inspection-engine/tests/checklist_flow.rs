//! End-to-end checklist branching over a server payload

use inspection_engine::{
    available_trigger_options, validate_checklist, CollectingNotifier, EngineConfig, EngineError,
    InspectionEngine,
};
use inspection_types::{IssueCode, Question, ResponseMap};
use pretty_assertions::assert_eq;
use serde_json::json;

fn category_payload() -> Vec<Question> {
    let payload = json!([
        {
            "id": 10,
            "question": "Is the establishment operating?",
            "type": "radio",
            "options": [
                {"text": "Yes", "type": "positive"},
                {"text": "No", "type": "negative"}
            ],
            "is_conditional": false,
            "conditional_logic": null
        },
        {
            "id": 11,
            "question": "Which areas were inspected?",
            "type": "checkbox",
            "options": [
                {"text": "Kitchen", "type": "neutral"},
                {"text": "Storage", "type": "neutral"},
                {"text": "Restrooms", "type": "neutral"}
            ],
            "is_conditional": 1,
            "conditional_logic": {"question_id": 10, "depends_on_option_value": "Yes"}
        },
        {
            "id": 12,
            "question": "Kitchen temperature log reviewed?",
            "type": "select",
            "options": [
                {"text": "Reviewed", "type": "positive"},
                {"text": "Missing", "type": "negative"}
            ],
            "is_conditional": true,
            "conditional_logic": {"depends_on": 11, "trigger_values": ["Kitchen", "Storage"]}
        },
        {
            "id": 13,
            "question": "Reason for closure",
            "type": "textarea",
            "options": [],
            "is_conditional": true,
            "conditional_logic": {"question_id": 10, "depends_on_option_value": "No"}
        }
    ]);
    serde_json::from_value(payload).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_operating_branch() {
    init_tracing();
    let questions = category_payload();
    let engine = InspectionEngine::default();
    let evaluator = engine.evaluator(&questions);
    let notifier = CollectingNotifier::new();

    let responses = ResponseMap::new()
        .with_scalar(10, "Yes")
        .with_multi(11, ["Restrooms", "Kitchen"]);
    let visibility = evaluator.evaluate_all(&responses, &notifier);

    assert_eq!(visibility.active_ids(), vec![10, 11, 12]);
    assert_eq!(visibility.unanswered(&responses), vec![12]);
    assert!(notifier.is_empty());
}

#[test]
fn test_closed_branch_hides_stale_answers() {
    let questions = category_payload();
    let engine = InspectionEngine::default();
    let evaluator = engine.evaluator(&questions);

    // Inspector switched from Yes to No after ticking areas
    let responses = ResponseMap::new()
        .with_scalar(10, "No")
        .with_multi(11, ["Kitchen"]);
    let visibility = evaluator.evaluate_all(&responses, &CollectingNotifier::new());

    assert_eq!(visibility.active_ids(), vec![10, 13]);
}

#[test]
fn test_all_match_mode_from_config() {
    let questions = category_payload();
    let config = EngineConfig::from_str(r#"checkbox_match = "all""#).unwrap();
    let engine = InspectionEngine::new(config);
    let evaluator = engine.evaluator(&questions);

    let kitchen_only = ResponseMap::new()
        .with_scalar(10, "Yes")
        .with_multi(11, ["Kitchen"]);
    assert!(!evaluator.is_active(&questions[2], &kitchen_only).active);

    let both = ResponseMap::new()
        .with_scalar(10, "Yes")
        .with_multi(11, ["Kitchen", "Storage"]);
    assert!(evaluator.is_active(&questions[2], &both).active);
}

#[test]
fn test_broken_reference_fails_closed_with_diagnostic() {
    let mut questions = category_payload();
    questions.remove(0);
    let engine = InspectionEngine::default();
    let evaluator = engine.evaluator(&questions);
    let notifier = CollectingNotifier::new();

    let responses = ResponseMap::new().with_scalar(10, "Yes");
    let visibility = evaluator.evaluate_all(&responses, &notifier);

    assert!(visibility.active_ids().is_empty());
    assert_eq!(
        visibility.diagnostics[0],
        EngineError::UnresolvedReference {
            question_id: 11,
            references: 10,
        }
    );
    assert_eq!(notifier.messages().len(), 2);
}

// ============================================================================
// Rule builder support
// ============================================================================

#[test]
fn test_rule_builder_options() {
    let questions = category_payload();
    assert_eq!(
        available_trigger_options(&questions[1]),
        vec!["Kitchen", "Storage", "Restrooms"]
    );
    assert!(available_trigger_options(&questions[3]).is_empty());
}

#[test]
fn test_payload_validates_clean_and_catches_typos() {
    let mut questions = category_payload();
    assert!(validate_checklist(&questions).is_empty());

    questions[2]
        .conditional_logic
        .as_mut()
        .unwrap()
        .trigger_values
        .push("Kitchn".into());
    let issues = validate_checklist(&questions);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::UnknownTriggerValue);
    assert_eq!(issues[0].question_id, 12);
}
