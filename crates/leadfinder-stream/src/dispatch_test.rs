use super::*;
use serde_json::json;

#[test]
fn progress_line_yields_progress_event() {
    let event = dispatch_line(r#"{"type":"progress","message":"searching 90210"}"#);
    assert_eq!(
        event,
        StreamEvent::Progress {
            message: "searching 90210".to_owned()
        }
    );
}

#[test]
fn warning_line_yields_warning_event() {
    let event = dispatch_line(r#"{"type":"warning","message":"quota is nearly exhausted"}"#);
    assert_eq!(
        event,
        StreamEvent::Warning {
            message: "quota is nearly exhausted".to_owned()
        }
    );
}

#[test]
fn result_line_yields_result_event() {
    let line = json!({
        "type": "result",
        "message": "Search complete",
        "num_zip_codes": 2,
        "num_results": 1,
        "elapsed_seconds": 3.5,
        "results": [{"name": "Sparkle Wash", "goog_rating": 4.5}]
    })
    .to_string();

    let StreamEvent::Result { payload } = dispatch_line(&line) else {
        panic!("expected Result event");
    };
    assert_eq!(payload.num_zip_codes_searched, 2);
    assert_eq!(payload.num_results_found, 1);
    assert!((payload.elapsed_seconds - 3.5).abs() < f64::EPSILON);
    assert_eq!(payload.records.len(), 1);
    assert_eq!(
        payload.records[0].get("name"),
        Some(&json!("Sparkle Wash"))
    );
}

#[test]
fn result_accepts_exc_time_alias() {
    let line = r#"{"type":"result","num_results":0,"exc_time":1.25,"results":[]}"#;
    let StreamEvent::Result { payload } = dispatch_line(line) else {
        panic!("expected Result event");
    };
    assert!((payload.elapsed_seconds - 1.25).abs() < f64::EPSILON);
    assert_eq!(payload.num_zip_codes_searched, 0);
}

#[test]
fn result_missing_counters_defaults_them() {
    let line = r#"{"type":"result","num_results":3,"results":[]}"#;
    let StreamEvent::Result { payload } = dispatch_line(line) else {
        panic!("expected Result event");
    };
    assert_eq!(payload.num_results_found, 3);
    assert!((payload.elapsed_seconds - 0.0).abs() < f64::EPSILON);
}

#[test]
fn non_json_line_is_malformed() {
    let event = dispatch_line("not json");
    assert_eq!(
        event,
        StreamEvent::Malformed {
            raw_line: "not json".to_owned()
        }
    );
}

#[test]
fn missing_type_is_malformed() {
    let event = dispatch_line(r#"{"message":"no discriminator"}"#);
    assert!(matches!(event, StreamEvent::Malformed { .. }));
}

#[test]
fn unknown_type_is_malformed() {
    let event = dispatch_line(r#"{"type":"heartbeat","message":"tick"}"#);
    assert!(matches!(event, StreamEvent::Malformed { .. }));
}

#[test]
fn progress_without_message_is_malformed() {
    let event = dispatch_line(r#"{"type":"progress"}"#);
    assert!(matches!(event, StreamEvent::Malformed { .. }));
}

#[test]
fn progress_with_non_string_message_is_malformed() {
    let event = dispatch_line(r#"{"type":"progress","message":42}"#);
    assert!(matches!(event, StreamEvent::Malformed { .. }));
}

#[test]
fn result_missing_results_is_malformed() {
    let event = dispatch_line(r#"{"type":"result","num_results":3}"#);
    assert!(matches!(event, StreamEvent::Malformed { .. }));
}

#[test]
fn record_fields_stay_opaque() {
    // Whatever the backend puts in a record is preserved untouched.
    let line = json!({
        "type": "result",
        "num_results": 1,
        "results": [{
            "name": "Café Détail",
            "zip_codes_nearby": ["90210", "90211"],
            "goog_rating": null
        }]
    })
    .to_string();

    let StreamEvent::Result { payload } = dispatch_line(&line) else {
        panic!("expected Result event");
    };
    let record = &payload.records[0];
    assert_eq!(record.get("zip_codes_nearby"), Some(&json!(["90210", "90211"])));
    assert_eq!(record.get("goog_rating"), Some(&json!(null)));
}
