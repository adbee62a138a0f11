//! The response a handler sends.
//!
//! Handlers build an [`ApiResponse`] and hand it to the response sender
//! exactly once per invocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default status code of a sent response and of an expectation.
pub const DEFAULT_STATUS_CODE: u16 = 200;

/// A structured response as passed to the response sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Response headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Cookies set by the response.
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,
}

impl Default for ApiResponse {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_CODE)
    }
}

impl ApiResponse {
    /// Creates an empty response with the given status code.
    #[must_use]
    pub const fn new(status_code: u16) -> Self {
        Self {
            status_code,
            body: None,
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
        }
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a cookie (builder pattern).
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Returns a header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Returns a cookie value by name.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}
