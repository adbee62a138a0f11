//! End-to-end rule-set runs through the in-memory adapters.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use regex::Regex;
use rulecheck_application::ports::{InvocationContext, ResponsePrinter};
use rulecheck_application::{ErrorCode, HandlerError, HookResult, Toolkit};
use rulecheck_domain::{
    ApiResponse, CaseFailure, CaseStatus, Envelope, MapField, Mismatch, SessionData,
};
use rulecheck_infrastructure::{CapturePrinter, TestRunner};
use serde_json::{Value, json};

fn event() -> Value {
    json!({ "service": "s", "entity": "e", "event": "ev" })
}

fn quiet() -> Arc<dyn ResponsePrinter> {
    Arc::new(CapturePrinter::new())
}

/// Sends the session claim back as the response body.
fn echo_claim(envelope: Envelope, ctx: &InvocationContext) -> Result<Value, HandlerError> {
    let claim = match envelope.session_claim() {
        Some(Ok(claim)) => claim,
        Some(Err(error)) => return Err(HandlerError::new(error.to_string())),
        None => Value::Null,
    };
    ctx.send(ApiResponse::new(200).with_body(claim));
    Ok(Value::Null)
}

/// Sends the current client back as the response body.
fn echo_client(_: Envelope, ctx: &InvocationContext) -> Result<Value, HandlerError> {
    let client = ctx
        .current_client()
        .map_or_else(|| json!("none"), |client| client.to_value());
    ctx.send(ApiResponse::new(200).with_body(client));
    Ok(Value::Null)
}

#[tokio::test]
async fn test_missing_handler_is_rejected() {
    let error = TestRunner::new()
        .with_rules(json!([{ "description": "ok", "event": event() }]))
        .with_printer(quiet())
        .run()
        .await
        .expect_err("Should be rejected");

    assert_eq!(error.code(), ErrorCode::InvalidHandler);
}

#[tokio::test]
async fn test_non_list_rules_are_rejected() {
    for rules in [Value::Null, json!({}), json!([]), json!("rules")] {
        let error = TestRunner::new()
            .with_fn_handler(|_, _| Ok(Value::Null))
            .with_rules(rules.clone())
            .with_printer(quiet())
            .run()
            .await
            .expect_err("Should be rejected");

        assert_eq!(error.code(), ErrorCode::InvalidRules, "rules: {rules}");
    }
}

#[tokio::test]
async fn test_every_malformed_rule_is_diagnosed() {
    let error = TestRunner::new()
        .with_fn_handler(|_, _| Ok(Value::Null))
        .with_rules(json!([
            { "description": 1, "event": event() },
            { "description": "fine", "event": event() },
            { "description": "bad code", "event": event(), "responseCode": "200" }
        ]))
        .with_printer(quiet())
        .run()
        .await
        .expect_err("Should be rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRules);
    let diagnostics: Vec<_> = error.diagnostics().iter().map(|d| d.to_value()).collect();
    assert_eq!(
        diagnostics,
        vec![
            json!({ "description": 1, "event": event(), "error": "Description must be a string" }),
            json!({
                "description": "bad code",
                "event": event(),
                "responseCode": "200",
                "error": "Response code must be a number"
            }),
        ]
    );
}

#[tokio::test]
async fn test_default_session_claim() {
    let defaults = SessionData::default().to_value();

    TestRunner::new()
        .with_fn_handler(echo_claim)
        .with_rules(json!([{
            "description": "defaults",
            "event": event(),
            "session": true,
            "response": { "code": 200, "body": defaults }
        }]))
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run")
        .assert_passed();
}

#[tokio::test]
async fn test_custom_session_claim_is_not_merged() {
    TestRunner::new()
        .with_fn_handler(echo_claim)
        .with_rules(json!([{
            "description": "custom",
            "request": { "body": {} },
            "session": { "a": 1 },
            "response": { "body": { "a": 1 } }
        }]))
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run")
        .assert_passed();
}

#[tokio::test]
async fn test_default_client_and_override() {
    TestRunner::new()
        .with_fn_handler(echo_client)
        .with_rules(json!([
            {
                "description": "default client",
                "event": event(),
                "session": true,
                "response": { "body": { "id": 1, "code": "defaultClient" } }
            },
            {
                "description": "override",
                "event": event(),
                "session": true,
                "client": { "id": 5, "code": "x" },
                "response": { "body": { "id": 5, "code": "x" } }
            },
            {
                "description": "no session",
                "event": event(),
                "client": { "id": 5, "code": "x" },
                "response": { "body": "none" }
            }
        ]))
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run")
        .assert_passed();
}

#[tokio::test]
async fn test_partial_and_strict_headers() {
    let report = TestRunner::new()
        .with_fn_handler(|_, ctx| {
            ctx.send(
                ApiResponse::new(200)
                    .with_header("x-foo", "bar")
                    .with_header("x-bar", "baz"),
            );
            Ok(Value::Null)
        })
        .with_rules(json!([
            {
                "description": "partial",
                "request": {},
                "response": { "headers": { "x-foo": "bar" } }
            },
            {
                "description": "strict",
                "request": {},
                "response": { "strictHeaders": { "x-foo": "bar" } }
            }
        ]))
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run");

    assert_eq!(report.passed, 1);
    assert_eq!(
        report.case("strict").and_then(|c| c.failure.clone()),
        Some(CaseFailure::Response {
            mismatches: vec![Mismatch::UnexpectedEntry {
                field: MapField::Headers,
                name: "x-bar".to_string(),
                actual: "baz".to_string(),
            }],
        })
    );
}

#[tokio::test]
async fn test_sending_twice_fails() {
    let report = TestRunner::new()
        .with_fn_handler(|_, ctx| {
            ctx.send(ApiResponse::new(200));
            ctx.send(ApiResponse::new(200));
            Ok(Value::Null)
        })
        .with_rules(json!([{ "description": "twice", "event": event(), "responseCode": 200 }]))
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run");

    assert!(!report.all_passed());
    assert_eq!(
        report.case("twice").and_then(|c| c.failure.clone()),
        Some(CaseFailure::SendCount { calls: 2 })
    );
}

#[tokio::test]
async fn test_response_code_scenario() {
    let rules = json!([{ "description": "ok", "event": event(), "responseCode": 400 }]);

    let passing = TestRunner::new()
        .with_fn_handler(|_, ctx| {
            ctx.send(ApiResponse::new(400));
            Ok(Value::Null)
        })
        .with_rules(rules.clone())
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run");
    assert!(passing.all_passed());

    let failing = TestRunner::new()
        .with_fn_handler(|_, ctx| {
            ctx.send(ApiResponse::new(200));
            Ok(Value::Null)
        })
        .with_rules(rules)
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run");
    assert_eq!(
        failing.case("ok").map(|c| c.status),
        Some(CaseStatus::Failed)
    );
}

#[tokio::test]
async fn test_rule_set_hooks_bracket_rule_hooks() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let recorder = |entry: &'static str| {
        let log = Arc::clone(&log);
        move |_: &Toolkit| -> HookResult {
            log.lock().expect("Lock poisoned").push(entry);
            Ok(())
        }
    };

    let report = TestRunner::new()
        .with_fn_handler(|_, ctx| {
            ctx.send(ApiResponse::new(200));
            Ok(Value::Null)
        })
        .with_fn_hook("setup", recorder("setup"))
        .with_fn_hook("teardown", recorder("teardown"))
        .with_fn_hook("before", recorder("before"))
        .with_fn_hook("after", recorder("after"))
        .with_before("setup")
        .with_after("teardown")
        .with_rules(json!([
            { "description": "first", "event": event(), "before": "before", "after": "after" },
            { "description": "second", "event": event(), "before": "before", "after": "after" }
        ]))
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run");

    report.assert_passed();
    assert_eq!(
        *log.lock().expect("Lock poisoned"),
        vec!["setup", "before", "after", "before", "after", "teardown"]
    );
}

#[tokio::test]
async fn test_printed_lines() {
    let printer = Arc::new(CapturePrinter::new());

    TestRunner::new()
        .with_fn_handler(|_, ctx| {
            ctx.send(ApiResponse::new(200));
            Ok(json!({ "ok": true }))
        })
        .with_rules(json!([
            { "description": "loud", "event": event(), "printResponse": true },
            { "description": "quiet", "event": event() }
        ]))
        .with_printer(Arc::clone(&printer) as Arc<dyn ResponsePrinter>)
        .run()
        .await
        .expect("Should run")
        .assert_passed();

    let lines = printer.lines();
    let response = Regex::new(r"^Response: ").expect("Valid regex");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Test case: loud");
    assert!(response.is_match(&lines[1]), "line: {}", lines[1]);
    assert!(lines[1].contains("\"ok\":true"));
}

#[tokio::test]
async fn test_non_http_status_codes_are_compared_as_numbers() {
    TestRunner::new()
        .with_fn_handler(|_, ctx| {
            ctx.send(ApiResponse::new(42));
            Ok(Value::Null)
        })
        .with_rules(json!([
            { "description": "integer", "event": event(), "responseCode": 42 },
            { "description": "whole float", "request": {}, "response": { "code": 42.0 } }
        ]))
        .with_printer(quiet())
        .run()
        .await
        .expect("Should run")
        .assert_passed();
}
