//! Per-case interception state.
//!
//! The recorder and the client interceptor are shared by every case of a
//! run. A [`SandboxScope`] is held for the duration of one case and resets
//! both when dropped, on every exit path.

use std::fmt;
use std::sync::Arc;

use crate::hooks::Toolkit;
use crate::ports::{ClientInterceptor, InvocationContext, ResponsePrinter, ResponseRecorder};

/// The interception registry of a run.
#[derive(Clone)]
pub struct Sandbox {
    recorder: Arc<dyn ResponseRecorder>,
    clients: Arc<dyn ClientInterceptor>,
}

impl Sandbox {
    /// Creates a sandbox over the given collaborators.
    #[must_use]
    pub fn new(recorder: Arc<dyn ResponseRecorder>, clients: Arc<dyn ClientInterceptor>) -> Self {
        Self { recorder, clients }
    }

    /// Opens a scope that resets the sandbox when dropped.
    #[must_use]
    pub fn scope(&self) -> SandboxScope<'_> {
        SandboxScope { sandbox: self }
    }

    /// Clears recorded responses and removes any client override.
    pub fn reset(&self) {
        self.recorder.reset();
        self.clients.reset();
    }

    /// The response recorder.
    #[must_use]
    pub fn recorder(&self) -> &dyn ResponseRecorder {
        self.recorder.as_ref()
    }

    /// The client interceptor.
    #[must_use]
    pub fn clients(&self) -> &dyn ClientInterceptor {
        self.clients.as_ref()
    }

    /// Builds the context injected into the handler.
    #[must_use]
    pub fn invocation_context(&self) -> InvocationContext {
        InvocationContext::new(Arc::clone(&self.recorder), Arc::clone(&self.clients))
    }

    /// Builds the toolkit handed to hooks.
    #[must_use]
    pub fn toolkit(&self, printer: Arc<dyn ResponsePrinter>) -> Toolkit {
        Toolkit::new(Arc::clone(&self.recorder), Arc::clone(&self.clients), printer)
    }
}

impl fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox")
            .field("recorded", &self.recorder.call_count())
            .field("client_intercepted", &self.clients.is_intercepted())
            .finish()
    }
}

/// Guard over one case; resets the sandbox on drop.
#[derive(Debug)]
pub struct SandboxScope<'a> {
    sandbox: &'a Sandbox,
}

impl SandboxScope<'_> {
    /// The sandbox this scope guards.
    #[must_use]
    pub const fn sandbox(&self) -> &Sandbox {
        self.sandbox
    }
}

impl Drop for SandboxScope<'_> {
    fn drop(&mut self) {
        self.sandbox.reset();
        tracing::trace!("sandbox reset");
    }
}
