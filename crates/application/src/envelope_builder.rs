//! Envelope synthesis.
//!
//! Turns a rule's minimal input into the envelope a serverless runtime would
//! hand to the handler, including a serialized session claim when the rule
//! asks for one.

use std::collections::BTreeMap;

use rulecheck_domain::{
    AUTH_CLAIM_KEY, ClientRecord, DEFAULT_METHOD, Envelope, RuleInput, SessionSpec,
};
use serde_json::{Map, Value};

use crate::ports::ClientInterceptor;

/// Builds envelopes and installs the simulated client for a case.
#[derive(Clone, Copy)]
pub struct EventBuilder<'a> {
    clients: &'a dyn ClientInterceptor,
}

impl<'a> EventBuilder<'a> {
    /// Creates a builder that installs clients on `clients`.
    #[must_use]
    pub const fn new(clients: &'a dyn ClientInterceptor) -> Self {
        Self { clients }
    }

    /// Builds the envelope for one case.
    ///
    /// When a session is requested the current-client accessor is
    /// intercepted to return `client`, or the default client when no
    /// override is given. Without a session the accessor is left alone.
    #[must_use]
    pub fn build(
        &self,
        input: &RuleInput,
        session: Option<&SessionSpec>,
        client: Option<&ClientRecord>,
    ) -> Envelope {
        let mut authorizer = BTreeMap::new();

        if let Some(session) = session {
            authorizer.insert(AUTH_CLAIM_KEY.to_string(), session.claim().to_string());

            let client = client.cloned().unwrap_or_else(ClientRecord::default_client);
            tracing::trace!(client = ?client.code(), "intercepting current client");
            self.clients.set_current_client(client);
        }

        let (headers, body, method) = match input {
            RuleInput::Event(event) => (
                Map::new(),
                Value::Object(event.fields.clone()),
                DEFAULT_METHOD.to_string(),
            ),
            RuleInput::Request(request) => (
                request.headers.clone(),
                request.body.clone().unwrap_or(Value::Null),
                request
                    .method
                    .clone()
                    .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            ),
        };

        Envelope {
            headers,
            body,
            method,
            authorizer,
        }
    }
}

impl std::fmt::Debug for EventBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBuilder").finish_non_exhaustive()
    }
}
