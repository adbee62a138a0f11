//! Field-level rule parsing.

use rulecheck_domain::{
    ClientRecord, DEFAULT_STATUS_CODE, EventDescriptor, EventId, FieldMatch, RequestDescriptor,
    ResponseExpectation, Rule, RuleInput, RuleResult, RuleViolation, SessionSpec,
};
use serde_json::{Map, Value};

use crate::hooks::HookRegistry;

/// Parses one rule, stopping at the first invalid field.
///
/// A rule with a non-null `event` is an event-shape rule; any other rule is
/// a request-shape rule. Explicit `null` is treated as an absent field.
///
/// # Errors
///
/// Returns the first [`RuleViolation`] found.
pub fn parse_rule(value: &Value, hooks: &HookRegistry) -> RuleResult<Rule> {
    let Value::Object(rule) = value else {
        return Err(RuleViolation::NotAnObject);
    };

    let description = field(rule, "description")
        .and_then(Value::as_str)
        .ok_or(RuleViolation::Description)?;

    let input = if field(rule, "event").is_some() {
        RuleInput::Event(parse_event(rule)?)
    } else {
        RuleInput::Request(parse_request(rule)?)
    };

    let session = match field(rule, "session") {
        None | Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some(SessionSpec::Defaults),
        Some(Value::Object(fields)) => Some(SessionSpec::Custom(fields.clone())),
        Some(_) => return Err(RuleViolation::Session),
    };

    let client = object_field(rule, "client", RuleViolation::Client)?
        .map(|fields| ClientRecord::new(fields.clone()));

    let expectation = parse_expectation(rule, matches!(input, RuleInput::Request(_)))?;

    let print_response = bool_field(rule, "printResponse", RuleViolation::PrintResponse)?;
    let only = bool_field(rule, "only", RuleViolation::Only)?.unwrap_or(false);

    let before = hook_field(rule, "before", hooks, RuleViolation::BeforeHook)?;
    let after = hook_field(rule, "after", hooks, RuleViolation::AfterHook)?;

    Ok(Rule {
        description: description.to_string(),
        input,
        session,
        client,
        expectation,
        before,
        after,
        print_response,
        only,
    })
}

fn parse_event(rule: &Map<String, Value>) -> RuleResult<EventDescriptor> {
    let event = object_field(rule, "event", RuleViolation::Event)?.ok_or(RuleViolation::Event)?;

    let service = string_field(event, "service", RuleViolation::EventService)?
        .ok_or(RuleViolation::EventService)?;
    let entity = string_field(event, "entity", RuleViolation::EventEntity)?
        .ok_or(RuleViolation::EventEntity)?;
    let name =
        string_field(event, "event", RuleViolation::EventName)?.ok_or(RuleViolation::EventName)?;
    let client = string_field(event, "client", RuleViolation::EventClient)?;

    let id = match field(event, "id") {
        None => None,
        Some(Value::String(id)) => Some(EventId::Text(id.clone())),
        Some(Value::Number(id)) => Some(EventId::Number(id.clone())),
        Some(_) => return Err(RuleViolation::EventId),
    };

    Ok(EventDescriptor {
        service,
        entity,
        event: name,
        client,
        id,
        fields: event.clone(),
    })
}

fn parse_request(rule: &Map<String, Value>) -> RuleResult<RequestDescriptor> {
    let Some(request) = object_field(rule, "request", RuleViolation::Request)? else {
        return Ok(RequestDescriptor::default());
    };

    let headers = object_field(request, "headers", RuleViolation::RequestHeaders)?
        .cloned()
        .unwrap_or_default();
    let method = string_field(request, "method", RuleViolation::RequestMethod)?;

    Ok(RequestDescriptor {
        headers,
        body: field(request, "body").cloned(),
        method,
    })
}

fn parse_expectation(
    rule: &Map<String, Value>,
    response_required: bool,
) -> RuleResult<ResponseExpectation> {
    let response_code = match field(rule, "responseCode") {
        None => None,
        Some(code) => Some(status_code(code, RuleViolation::ResponseCode)?),
    };

    let response = object_field(rule, "response", RuleViolation::Response)?;
    let Some(response) = response else {
        if response_required {
            return Err(RuleViolation::Response);
        }
        return Ok(ResponseExpectation::status(
            response_code.unwrap_or(DEFAULT_STATUS_CODE),
        ));
    };

    let code = match field(response, "code") {
        None => response_code.unwrap_or(DEFAULT_STATUS_CODE),
        Some(code) => status_code(code, RuleViolation::ResponseCode)?,
    };

    let headers = object_field(response, "headers", RuleViolation::ResponseHeaders)?;
    let strict_headers =
        object_field(response, "strictHeaders", RuleViolation::ResponseStrictHeaders)?;
    let cookies = object_field(response, "cookies", RuleViolation::ResponseCookies)?;
    let strict_cookies =
        object_field(response, "strictCookies", RuleViolation::ResponseStrictCookies)?;

    Ok(ResponseExpectation {
        status_code: code,
        body: field(response, "body").cloned(),
        headers: FieldMatch::from_parts(headers.cloned(), strict_headers.cloned()),
        cookies: FieldMatch::from_parts(cookies.cloned(), strict_cookies.cloned()),
    })
}

/// Any whole number that fits a `u16` is accepted, including `200.0`.
fn status_code(value: &Value, not_a_number: RuleViolation) -> RuleResult<u16> {
    let Value::Number(number) = value else {
        return Err(not_a_number);
    };

    number
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
        .or_else(|| number.as_f64().and_then(whole_u16))
        .ok_or(RuleViolation::ResponseStatus)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_u16(code: f64) -> Option<u16> {
    (code.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&code)).then(|| code as u16)
}

fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn object_field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    violation: RuleViolation,
) -> RuleResult<Option<&'a Map<String, Value>>> {
    match field(map, key) {
        None => Ok(None),
        Some(Value::Object(fields)) => Ok(Some(fields)),
        Some(_) => Err(violation),
    }
}

fn string_field(
    map: &Map<String, Value>,
    key: &str,
    violation: RuleViolation,
) -> RuleResult<Option<String>> {
    match field(map, key) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(violation),
    }
}

fn bool_field(
    map: &Map<String, Value>,
    key: &str,
    violation: RuleViolation,
) -> RuleResult<Option<bool>> {
    match field(map, key) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(violation),
    }
}

fn hook_field(
    map: &Map<String, Value>,
    key: &str,
    hooks: &HookRegistry,
    violation: RuleViolation,
) -> RuleResult<Option<String>> {
    match field(map, key) {
        None => Ok(None),
        Some(Value::String(name)) if hooks.contains(name) => Ok(Some(name.clone())),
        Some(_) => Err(violation),
    }
}
