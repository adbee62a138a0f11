//! The invocation envelope passed to a handler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rule::DEFAULT_METHOD;

/// Authorizer key holding the serialized session claim.
pub const AUTH_CLAIM_KEY: &str = "janisAuth";

/// A synthesized serverless invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Request headers.
    #[serde(default)]
    pub headers: Map<String, Value>,
    /// Request body.
    #[serde(default)]
    pub body: Value,
    /// Request method.
    pub method: String,
    /// Authorizer context; carries the session claim when one was requested.
    #[serde(default)]
    pub authorizer: BTreeMap<String, String>,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            headers: Map::new(),
            body: Value::Null,
            method: DEFAULT_METHOD.to_string(),
            authorizer: BTreeMap::new(),
        }
    }
}

impl Envelope {
    /// Whether a session claim is attached.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.authorizer.contains_key(AUTH_CLAIM_KEY)
    }

    /// Parses the attached session claim.
    ///
    /// Returns `None` when no session was requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim is not valid JSON.
    pub fn session_claim(&self) -> Option<Result<Value, serde_json::Error>> {
        self.authorizer
            .get(AUTH_CLAIM_KEY)
            .map(|claim| serde_json::from_str(claim))
    }

    /// Returns a header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(name)
    }
}
