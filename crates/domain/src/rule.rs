//! Typed rules.
//!
//! A rule is one declarative test case: the input to synthesize, the
//! session and client to simulate, the expected response and the hooks to
//! run around it. Rules come in two shapes, told apart by the presence of
//! an `event` key.

use serde_json::{Map, Value};

use crate::expectation::ResponseExpectation;
use crate::session::{ClientRecord, SessionSpec};

/// Default method of a synthesized envelope.
pub const DEFAULT_METHOD: &str = "POST";

/// The identifier carried by an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventId {
    /// A textual id.
    Text(String),
    /// A numeric id.
    Number(serde_json::Number),
}

/// Input of an event-shape rule.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDescriptor {
    /// Service that emitted the event.
    pub service: String,
    /// Entity the event is about.
    pub entity: String,
    /// Event name.
    pub event: String,
    /// Client code the event belongs to.
    pub client: Option<String>,
    /// Id of the affected entity.
    pub id: Option<EventId>,
    /// Every field of the event as written, including the ones above.
    pub fields: Map<String, Value>,
}

/// Input of a request-shape rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestDescriptor {
    /// Request headers.
    pub headers: Map<String, Value>,
    /// Request body.
    pub body: Option<Value>,
    /// Request method.
    pub method: Option<String>,
}

/// The synthetic input of a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleInput {
    /// `event: {service, entity, event, client?, id?}`.
    Event(EventDescriptor),
    /// `request: {headers?, body?, method?}`.
    Request(RequestDescriptor),
}

impl RuleInput {
    /// Short name of the schema shape.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Event(_) => "event",
            Self::Request(_) => "request",
        }
    }
}

/// A validated rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Case description.
    pub description: String,
    /// Input to synthesize.
    pub input: RuleInput,
    /// Session to attach, if any.
    pub session: Option<SessionSpec>,
    /// Client returned by the client accessor, if overridden.
    pub client: Option<ClientRecord>,
    /// Expected response.
    pub expectation: ResponseExpectation,
    /// Name of the hook to run before the case.
    pub before: Option<String>,
    /// Name of the hook to run after the case.
    pub after: Option<String>,
    /// Per-rule print override.
    pub print_response: Option<bool>,
    /// Whether the rule runs exclusively.
    pub only: bool,
}

impl Rule {
    /// Creates a rule expecting a plain `200` with nothing else set.
    #[must_use]
    pub fn new(description: impl Into<String>, input: RuleInput) -> Self {
        Self {
            description: description.into(),
            input,
            session: None,
            client: None,
            expectation: ResponseExpectation::default(),
            before: None,
            after: None,
            print_response: None,
            only: false,
        }
    }

    /// Whether the response should be printed, given the rule-set default.
    #[must_use]
    pub fn prints_response(&self, default: bool) -> bool {
        self.print_response.unwrap_or(default)
    }
}
