#![allow(clippy::unwrap_used, clippy::expect_used)]

use wiki_core::config::WikiConfig;
use wiki_core::errors::{ExErrorKind, WikiError};
use wiki_core::lineup::Wiki;
use wiki_core::logging_facility::test_capture::init_test_capture;
use wiki_core::model::{Page, Panel};
use wiki_core::{log_op_end, log_op_error, log_op_start};
use wiki_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");

    let end_event = end_events[0];
    assert_eq!(end_event.fields.get("duration_ms"), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_kind() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = WikiError::PanelNotFound {
        panel_id: "p1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");

    let error_event = error_events[0];
    assert_eq!(
        error_event.fields.get("err.code"),
        Some(&"ERR_NOT_FOUND".to_string())
    );
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name, panel_id = "p1");
    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();

    let starts = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .count();

    let ends = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .count();

    assert_eq!(starts, 1, "Should have exactly one start event");
    assert_eq!(ends, 1, "Should have exactly one end event");
}

#[test]
fn test_error_event_includes_error_code() {
    let capture = init_test_capture();
    let op_name = "test_error_event_unique_5";

    let err = WikiError::CycleDetected {
        node: "panel".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 5);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get("err.code"),
        Some(&"ERR_CYCLE_DETECTED".to_string())
    );
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_6";

    log_op_start!(op_name, panel_id = "p123", title = "Test");

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(
        start_event.fields.get("panel_id"),
        Some(&"p123".to_string())
    );
    assert_eq!(start_event.fields.get("title"), Some(&"Test".to_string()));
}

#[test]
fn test_test_capture_assert_event_exists() {
    let capture = init_test_capture();
    let op_name = "test_capture_assert_unique_7";

    log_op_start!(op_name);

    // This should not panic
    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    // This should panic because no such event exists
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_test_capture_count_events() {
    let capture = init_test_capture();
    let op1_name = "test_count_events_op1_unique_8";
    let op2_name = "test_count_events_op2_unique_8";

    log_op_start!(op1_name);
    log_op_start!(op2_name);
    log_op_end!(op1_name, duration_ms = 10);

    let start_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_START)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });
    let end_count = capture.count_events(|e| {
        e.event.as_deref() == Some(EVENT_END)
            && (e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name))
    });

    assert_eq!(start_count, 2);
    assert_eq!(end_count, 1);
}

#[test]
fn test_error_conversion_preserves_context() {
    let capture = init_test_capture();
    let op_name = "test_error_conversion_unique_9";

    let err = WikiError::ReplaceNotImplemented {
        replace_id: "p1".to_string(),
    };

    log_op_error!(op_name, err.clone(), duration_ms = 5);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event for this test");

    // Verify the error was converted to ExError with correct kind
    use wiki_core::errors::ExError;
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::NotImplemented);

    // Verify the error code is in the logged event
    assert_eq!(
        error_event.fields.get("err.code"),
        Some(&"ERR_NOT_IMPLEMENTED".to_string())
    );
}

#[test]
fn test_multiple_operations_logged_independently() {
    let capture = init_test_capture();
    let op1_name = "test_multi_ops_add_panel_unique_10";
    let op2_name = "test_multi_ops_compute_unique_10";

    // Op 1
    log_op_start!(op1_name);
    log_op_end!(op1_name, duration_ms = 10);

    // Op 2
    log_op_start!(op2_name);
    log_op_end!(op2_name, duration_ms = 5);

    let events = capture.events();

    let op1_events = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op1_name))
        .count();
    let op2_events = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op2_name))
        .count();

    assert_eq!(op1_events, 2); // start + end
    assert_eq!(op2_events, 2); // start + end
}

#[tokio::test]
async fn test_add_panel_and_compute_are_instrumented() {
    let capture = init_test_capture();
    let mut wiki = Wiki::new(WikiConfig::default());
    let panel = Panel::new("logged-panel-11", "./icon-120.png", Page::new("Logged", vec![]));

    wiki.add_panel(panel, None).unwrap();
    wiki.render().await;

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("add_panel")
            && e.event.as_deref() == Some(EVENT_START)
            && e.fields.get("panel_id").map(String::as_str) == Some("logged-panel-11")
    });
    assert_eq!(starts, 1);
    capture.assert_event_exists("build_panel_graph", EVENT_END);
    capture.assert_event_exists("compute", EVENT_END);
}

#[test]
fn test_failed_add_panel_logs_error_code() {
    let capture = init_test_capture();
    let mut wiki = Wiki::new(WikiConfig::default());
    let panel = Panel::new("logged-panel-12", "./icon-120.png", Page::new("Logged", vec![]));

    assert!(wiki.add_panel(panel, Some("replace-me-12")).is_err());

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("add_panel")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.fields.get("err.code").map(String::as_str) == Some("ERR_NOT_IMPLEMENTED")
    });
    assert!(errors >= 1);
}
