//! Handler port
//!
//! The handler under test receives the synthesized envelope and an
//! [`InvocationContext`] that stands in for the libraries it would normally
//! reach for: the response sender and the current-client accessor.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rulecheck_domain::{ApiResponse, ClientRecord, Envelope};
use serde_json::Value;

use super::{ClientInterceptor, ResponseRecorder};
use crate::error::HandlerError;

/// Collaborators injected into one handler invocation.
#[derive(Clone)]
pub struct InvocationContext {
    sender: Arc<dyn ResponseRecorder>,
    clients: Arc<dyn ClientInterceptor>,
}

impl InvocationContext {
    /// Creates a context over the given collaborators.
    #[must_use]
    pub fn new(sender: Arc<dyn ResponseRecorder>, clients: Arc<dyn ClientInterceptor>) -> Self {
        Self { sender, clients }
    }

    /// Sends the response of this invocation.
    pub fn send(&self, response: ApiResponse) {
        self.sender.send(response);
    }

    /// Returns the client of the current session, if any.
    #[must_use]
    pub fn current_client(&self) -> Option<ClientRecord> {
        self.clients.current_client()
    }
}

impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("sent", &self.sender.call_count())
            .field("client_intercepted", &self.clients.is_intercepted())
            .finish()
    }
}

/// A serverless request handler under test.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handles one invocation.
    ///
    /// The returned value (or error) is only used for printing; the response
    /// that counts is the one passed to [`InvocationContext::send`].
    ///
    /// # Errors
    ///
    /// Returns whatever error the handler raises.
    async fn handle(&self, envelope: Envelope, ctx: &InvocationContext)
    -> Result<Value, HandlerError>;
}

/// Adapts a synchronous closure into a [`Handler`].
pub struct FnHandler<F> {
    handle: F,
}

impl<F> FnHandler<F>
where
    F: Fn(Envelope, &InvocationContext) -> Result<Value, HandlerError> + Send + Sync,
{
    /// Wraps a closure.
    pub const fn new(handle: F) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(Envelope, &InvocationContext) -> Result<Value, HandlerError> + Send + Sync,
{
    async fn handle(
        &self,
        envelope: Envelope,
        ctx: &InvocationContext,
    ) -> Result<Value, HandlerError> {
        (self.handle)(envelope, ctx)
    }
}
