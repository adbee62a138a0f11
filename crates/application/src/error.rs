//! Application error types

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Category of a rule-set setup error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No handler was supplied.
    InvalidHandler = 1,
    /// The rules are absent, not a list, empty, or contain malformed rules.
    InvalidRules = 2,
    /// The rule-set `before` hook is not invocable.
    InvalidBeforeHook = 3,
    /// The rule-set `after` hook is not invocable.
    InvalidAfterHook = 4,
}

impl ErrorCode {
    /// Symbolic name of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidHandler => "INVALID_HANDLER",
            Self::InvalidRules => "INVALID_RULES",
            Self::InvalidBeforeHook => "INVALID_BEFORE_HOOK",
            Self::InvalidAfterHook => "INVALID_AFTER_HOOK",
        }
    }

    /// Numeric value of the code.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A malformed rule echoed back with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleDiagnostic {
    /// Position of the rule in the rule set.
    #[serde(skip)]
    pub index: usize,
    /// The rule's own fields, or `{"rule": <value>}` when it is not an object.
    #[serde(flatten)]
    pub rule: Map<String, Value>,
    /// Why the rule was rejected.
    pub error: String,
}

impl RuleDiagnostic {
    /// Builds a diagnostic from the offending rule value.
    #[must_use]
    pub fn new(index: usize, rule: &Value, error: impl Into<String>) -> Self {
        let rule = match rule {
            Value::Object(fields) => fields.clone(),
            other => {
                let mut wrapped = Map::new();
                wrapped.insert("rule".to_string(), other.clone());
                wrapped
            }
        };

        Self {
            index,
            rule,
            error: error.into(),
        }
    }

    /// Renders the diagnostic as a single JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut fields = self.rule.clone();
        fields.insert("error".to_string(), Value::String(self.error.clone()));
        Value::Object(fields)
    }
}

/// A setup error raised before any case runs.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RuleSetError {
    code: ErrorCode,
    message: String,
    invalid_rules: Vec<RuleDiagnostic>,
}

impl RuleSetError {
    /// Creates an error with no rule diagnostics.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            invalid_rules: Vec::new(),
        }
    }

    /// Creates the aggregate error for one or more malformed rules.
    #[must_use]
    pub fn invalid_rules(diagnostics: Vec<RuleDiagnostic>) -> Self {
        let listed: Vec<Value> = diagnostics.iter().map(RuleDiagnostic::to_value).collect();
        let rendered = serde_json::to_string_pretty(&listed)
            .unwrap_or_else(|_| Value::Array(listed).to_string());

        Self {
            code: ErrorCode::InvalidRules,
            message: format!("Found {} invalid rules: {rendered}", diagnostics.len()),
            invalid_rules: diagnostics,
        }
    }

    /// Category of the error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every malformed rule, in rule order.
    #[must_use]
    pub fn diagnostics(&self) -> &[RuleDiagnostic] {
        &self.invalid_rules
    }
}

/// An error returned or raised by the handler under test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An error returned by a hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// A check made by the hook did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The hook could not do its work.
    #[error("{0}")]
    Failed(String),
}

/// Result type alias for hooks.
pub type HookResult = Result<(), HookError>;
