//! Simulated session claims and client records.
//!
//! A rule may ask for a session: `true` attaches [`SessionData::default`],
//! an object attaches exactly that object. The client record is what the
//! handler sees when it asks for its current client during a case.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Id of the built-in client.
pub const DEFAULT_CLIENT_ID: u64 = 1;

/// Code of the built-in client.
pub const DEFAULT_CLIENT_CODE: &str = "defaultClient";

/// The session claim attached when a rule sets `session: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Id of the simulated client.
    pub client_id: u64,
    /// Code of the simulated client.
    pub client_code: String,
    /// Id of the simulated user.
    pub user_id: u64,
    /// Id of the simulated user's profile.
    pub profile_id: u64,
    /// Permissions granted to the simulated user.
    pub permissions: Vec<String>,
    /// Whether the simulated user is a developer.
    pub user_is_dev: bool,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID,
            client_code: DEFAULT_CLIENT_CODE.to_string(),
            user_id: 2,
            profile_id: 3,
            permissions: vec![
                "some-service:some-entity:some-action".to_string(),
                "some-service:some-entity:some-other-action".to_string(),
            ],
            user_is_dev: false,
        }
    }
}

impl SessionData {
    /// Renders the claim as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // Plain fields with string keys always serialize.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// What a rule asked for in its `session` field.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSpec {
    /// `session: true`.
    Defaults,
    /// `session: {...}`, used verbatim with no defaults merged in.
    Custom(Map<String, Value>),
}

impl SessionSpec {
    /// Builds a fresh claim for one case.
    ///
    /// Each call returns a new value, so no two cases share a claim.
    #[must_use]
    pub fn claim(&self) -> Value {
        match self {
            Self::Defaults => SessionData::default().to_value(),
            Self::Custom(fields) => Value::Object(fields.clone()),
        }
    }
}

/// A simulated tenant record with arbitrary fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientRecord(Map<String, Value>);

impl ClientRecord {
    /// Wraps an arbitrary set of client fields.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The client returned when a rule does not override it.
    #[must_use]
    pub fn default_client() -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::from(DEFAULT_CLIENT_ID));
        fields.insert("code".to_string(), Value::from(DEFAULT_CLIENT_CODE));
        Self(fields)
    }

    /// Builds a client with just an id and a code.
    #[must_use]
    pub fn with_id_and_code(id: u64, code: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::from(id));
        fields.insert("code".to_string(), Value::String(code.into()));
        Self(fields)
    }

    /// Returns a field of the record.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the client code, if the record has a string `code`.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.0.get("code").and_then(Value::as_str)
    }

    /// Renders the record as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}
