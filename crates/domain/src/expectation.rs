//! Response expectations and matching.
//!
//! Status code and body compare by exact equality. Headers and cookies
//! compare as a subset unless the strict form was given, in which case the
//! whole mapping must be equal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::response::{ApiResponse, DEFAULT_STATUS_CODE};

/// Which mapping of the response a field check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapField {
    /// Response headers.
    Headers,
    /// Response cookies.
    Cookies,
}

impl MapField {
    /// Singular name used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Headers => "header",
            Self::Cookies => "cookie",
        }
    }
}

/// How an expected mapping is compared with the actual one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "entries", rename_all = "snake_case")]
pub enum FieldMatch {
    /// Every expected entry must be present; extra entries are fine.
    Partial(Map<String, Value>),
    /// Expected and actual entries must be exactly equal.
    Strict(Map<String, Value>),
}

impl FieldMatch {
    /// Picks the strict form when given, otherwise the partial one.
    #[must_use]
    pub fn from_parts(
        partial: Option<Map<String, Value>>,
        strict: Option<Map<String, Value>>,
    ) -> Option<Self> {
        strict.map(Self::Strict).or_else(|| partial.map(Self::Partial))
    }

    /// Whether extra actual entries fail the match.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self, Self::Strict(_))
    }

    const fn entries(&self) -> &Map<String, Value> {
        match self {
            Self::Partial(entries) | Self::Strict(entries) => entries,
        }
    }

    fn check(&self, field: MapField, actual: &BTreeMap<String, String>) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();

        for (name, expected) in self.entries() {
            match actual.get(name) {
                None => mismatches.push(Mismatch::MissingEntry {
                    field,
                    name: name.clone(),
                    expected: expected.clone(),
                }),
                Some(value) if expected.as_str() != Some(value.as_str()) => {
                    mismatches.push(Mismatch::EntryMismatch {
                        field,
                        name: name.clone(),
                        expected: expected.clone(),
                        actual: value.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if self.is_strict() {
            let entries = self.entries();
            for (name, value) in actual {
                if !entries.contains_key(name) {
                    mismatches.push(Mismatch::UnexpectedEntry {
                        field,
                        name: name.clone(),
                        actual: value.clone(),
                    });
                }
            }
        }

        mismatches
    }
}

/// The normalized outcome a rule expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseExpectation {
    /// Expected status code.
    pub status_code: u16,
    /// Expected body, compared only when set.
    pub body: Option<Value>,
    /// Expected headers, compared only when set.
    pub headers: Option<FieldMatch>,
    /// Expected cookies, compared only when set.
    pub cookies: Option<FieldMatch>,
}

impl Default for ResponseExpectation {
    fn default() -> Self {
        Self::status(DEFAULT_STATUS_CODE)
    }
}

impl ResponseExpectation {
    /// Expects only a status code.
    #[must_use]
    pub const fn status(status_code: u16) -> Self {
        Self {
            status_code,
            body: None,
            headers: None,
            cookies: None,
        }
    }

    /// Expects a body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Expects headers (builder pattern).
    #[must_use]
    pub fn with_headers(mut self, headers: FieldMatch) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Expects cookies (builder pattern).
    #[must_use]
    pub fn with_cookies(mut self, cookies: FieldMatch) -> Self {
        self.cookies = Some(cookies);
        self
    }

    /// Compares a sent response against this expectation.
    ///
    /// Returns every mismatch found; an empty list means the response matches.
    #[must_use]
    pub fn check(&self, actual: &ApiResponse) -> Vec<Mismatch> {
        let mut mismatches = Vec::new();

        if actual.status_code != self.status_code {
            mismatches.push(Mismatch::StatusCode {
                expected: self.status_code,
                actual: actual.status_code,
            });
        }

        if let Some(expected) = &self.body {
            if actual.body.as_ref() != Some(expected) {
                mismatches.push(Mismatch::Body {
                    expected: expected.clone(),
                    actual: actual.body.clone(),
                });
            }
        }

        if let Some(headers) = &self.headers {
            mismatches.extend(headers.check(MapField::Headers, &actual.headers));
        }

        if let Some(cookies) = &self.cookies {
            mismatches.extend(cookies.check(MapField::Cookies, &actual.cookies));
        }

        mismatches
    }

    /// Whether a sent response satisfies this expectation.
    #[must_use]
    pub fn matches(&self, actual: &ApiResponse) -> bool {
        self.check(actual).is_empty()
    }
}

/// One difference between the expected and the sent response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mismatch {
    /// Status codes differ.
    StatusCode {
        /// Expected status code.
        expected: u16,
        /// Sent status code.
        actual: u16,
    },
    /// Bodies differ.
    Body {
        /// Expected body.
        expected: Value,
        /// Sent body.
        actual: Option<Value>,
    },
    /// An expected header or cookie is absent.
    MissingEntry {
        /// Mapping the entry belongs to.
        field: MapField,
        /// Entry name.
        name: String,
        /// Expected value.
        expected: Value,
    },
    /// A header or cookie has a different value.
    EntryMismatch {
        /// Mapping the entry belongs to.
        field: MapField,
        /// Entry name.
        name: String,
        /// Expected value.
        expected: Value,
        /// Sent value.
        actual: String,
    },
    /// A strict mapping received an entry it did not expect.
    UnexpectedEntry {
        /// Mapping the entry belongs to.
        field: MapField,
        /// Entry name.
        name: String,
        /// Sent value.
        actual: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusCode { expected, actual } => {
                write!(f, "Expected status {expected}, got {actual}")
            }
            Self::Body { expected, actual } => match actual {
                Some(actual) => write!(f, "Expected body {expected}, got {actual}"),
                None => write!(f, "Expected body {expected}, got no body"),
            },
            Self::MissingEntry {
                field,
                name,
                expected,
            } => write!(f, "Expected {} '{name}' = {expected}, but it was not sent", field.label()),
            Self::EntryMismatch {
                field,
                name,
                expected,
                actual,
            } => write!(
                f,
                "{} '{name}' value mismatch: expected {expected}, got '{actual}'",
                capitalize(field.label())
            ),
            Self::UnexpectedEntry { field, name, actual } => {
                write!(f, "Unexpected {} '{name}' = '{actual}'", field.label())
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entries(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn sent() -> ApiResponse {
        ApiResponse::new(200)
            .with_body(json!({ "foo": 1 }))
            .with_header("x-foo", "bar")
            .with_header("x-bar", "baz")
            .with_cookie("my-cookie", "and-value")
    }

    #[test]
    fn test_status_only() {
        assert!(ResponseExpectation::default().matches(&sent()));

        let mismatches = ResponseExpectation::status(400).check(&sent());
        assert_eq!(
            mismatches,
            vec![Mismatch::StatusCode {
                expected: 400,
                actual: 200
            }]
        );
    }

    #[test]
    fn test_body_exact() {
        let expectation = ResponseExpectation::default().with_body(json!({ "foo": 1 }));
        assert!(expectation.matches(&sent()));

        let expectation = ResponseExpectation::default().with_body(json!({}));
        assert!(!expectation.matches(&sent()));

        let expectation = ResponseExpectation::default().with_body(json!({ "foo": 1 }));
        assert!(!expectation.matches(&ApiResponse::new(200)));
    }

    #[test]
    fn test_partial_headers_accept_superset() {
        let expectation = ResponseExpectation::default()
            .with_headers(FieldMatch::Partial(entries(json!({ "x-foo": "bar" }))));
        assert!(expectation.matches(&sent()));
    }

    #[test]
    fn test_strict_headers_reject_extra_key() {
        let expectation = ResponseExpectation::default()
            .with_headers(FieldMatch::Strict(entries(json!({ "x-foo": "bar" }))));
        let mismatches = expectation.check(&sent());

        assert_eq!(
            mismatches,
            vec![Mismatch::UnexpectedEntry {
                field: MapField::Headers,
                name: "x-bar".to_string(),
                actual: "baz".to_string(),
            }]
        );
    }

    #[test]
    fn test_strict_headers_exact() {
        let expectation = ResponseExpectation::default().with_headers(FieldMatch::Strict(entries(
            json!({ "x-foo": "bar", "x-bar": "baz" }),
        )));
        assert!(expectation.matches(&sent()));
    }

    #[test]
    fn test_cookie_value_mismatch() {
        let expectation = ResponseExpectation::default()
            .with_cookies(FieldMatch::Partial(entries(json!({ "my-cookie": "other" }))));
        let mismatches = expectation.check(&sent());

        assert_eq!(mismatches.len(), 1);
        assert_eq!(
            mismatches[0].to_string(),
            "Cookie 'my-cookie' value mismatch: expected \"other\", got 'and-value'"
        );
    }

    #[test]
    fn test_missing_header() {
        let expectation = ResponseExpectation::default()
            .with_headers(FieldMatch::Partial(entries(json!({ "x-missing": "1" }))));
        let mismatches = expectation.check(&sent());
        assert!(matches!(
            mismatches.as_slice(),
            [Mismatch::MissingEntry { field: MapField::Headers, .. }]
        ));
    }

    #[test]
    fn test_non_string_expected_value_never_matches() {
        let actual = ApiResponse::new(200).with_header("x-count", "1");
        let expectation = ResponseExpectation::default()
            .with_headers(FieldMatch::Partial(entries(json!({ "x-count": 1 }))));
        assert!(!expectation.matches(&actual));
    }

    #[test]
    fn test_strict_wins_over_partial() {
        let field = FieldMatch::from_parts(
            Some(entries(json!({ "a": "1" }))),
            Some(entries(json!({ "b": "2" }))),
        );
        assert_eq!(field, Some(FieldMatch::Strict(entries(json!({ "b": "2" })))));
        assert_eq!(FieldMatch::from_parts(None, None), None);
    }
}
