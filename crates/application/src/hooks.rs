//! Setup and teardown hooks.
//!
//! Rules refer to hooks by name; the names resolve against a
//! [`HookRegistry`] filled in code. A hook receives a [`Toolkit`] giving it
//! explicit access to the case sandbox instead of a shared global.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rulecheck_domain::{ApiResponse, ClientRecord};

use crate::error::{HookError, HookResult};
use crate::ports::{ClientInterceptor, ResponsePrinter, ResponseRecorder};

/// The capabilities handed to a hook.
#[derive(Clone)]
pub struct Toolkit {
    recorder: Arc<dyn ResponseRecorder>,
    clients: Arc<dyn ClientInterceptor>,
    printer: Arc<dyn ResponsePrinter>,
    case: Option<String>,
}

impl Toolkit {
    /// Creates a toolkit over a sandbox's collaborators.
    #[must_use]
    pub fn new(
        recorder: Arc<dyn ResponseRecorder>,
        clients: Arc<dyn ClientInterceptor>,
        printer: Arc<dyn ResponsePrinter>,
    ) -> Self {
        Self {
            recorder,
            clients,
            printer,
            case: None,
        }
    }

    /// Binds the toolkit to a case.
    #[must_use]
    pub fn for_case(mut self, description: impl Into<String>) -> Self {
        self.case = Some(description.into());
        self
    }

    /// Description of the running case; `None` for rule-set hooks.
    #[must_use]
    pub fn case_description(&self) -> Option<&str> {
        self.case.as_deref()
    }

    /// Responses the handler has sent so far in this case.
    #[must_use]
    pub fn sent(&self) -> Vec<ApiResponse> {
        self.recorder.calls()
    }

    /// Number of responses sent so far in this case.
    #[must_use]
    pub fn send_count(&self) -> usize {
        self.recorder.call_count()
    }

    /// The client the handler will see.
    #[must_use]
    pub fn current_client(&self) -> Option<ClientRecord> {
        self.clients.current_client()
    }

    /// Overrides the client the handler will see.
    ///
    /// The override is removed when the case ends.
    pub fn set_current_client(&self, client: ClientRecord) {
        self.clients.set_current_client(client);
    }

    /// Prints a line through the run's printer.
    pub fn print_line(&self, line: &str) {
        self.printer.print_line(line);
    }

    /// Fails the hook with `message` unless `condition` holds.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Assertion`] when `condition` is false.
    pub fn ensure(&self, condition: bool, message: impl Into<String>) -> HookResult {
        if condition {
            Ok(())
        } else {
            Err(HookError::Assertion(message.into()))
        }
    }
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit").field("case", &self.case).finish_non_exhaustive()
    }
}

/// A hook run around a rule set or a single rule.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Runs the hook.
    ///
    /// # Errors
    ///
    /// Returns an error to fail the surrounding case.
    async fn call(&self, toolkit: &Toolkit) -> HookResult;
}

/// Adapts a synchronous closure into a [`Hook`].
pub struct FnHook<F> {
    call: F,
}

impl<F> FnHook<F>
where
    F: Fn(&Toolkit) -> HookResult + Send + Sync,
{
    /// Wraps a closure.
    pub const fn new(call: F) -> Self {
        Self { call }
    }
}

#[async_trait]
impl<F> Hook for FnHook<F>
where
    F: Fn(&Toolkit) -> HookResult + Send + Sync,
{
    async fn call(&self, toolkit: &Toolkit) -> HookResult {
        (self.call)(toolkit)
    }
}

/// Named hooks that rules and run options can refer to.
#[derive(Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<String, Arc<dyn Hook>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a hook under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, hook: Arc<dyn Hook>) {
        self.hooks.insert(name.into(), hook);
    }

    /// Registers a hook (builder pattern).
    #[must_use]
    pub fn with_hook(mut self, name: impl Into<String>, hook: Arc<dyn Hook>) -> Self {
        self.register(name, hook);
        self
    }

    /// Registers a synchronous closure as a hook (builder pattern).
    #[must_use]
    pub fn with_fn<F>(self, name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&Toolkit) -> HookResult + Send + Sync + 'static,
    {
        self.with_hook(name, Arc::new(FnHook::new(call)))
    }

    /// Looks up a hook.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Hook>> {
        self.hooks.get(name).cloned()
    }

    /// Whether a hook is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.hooks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry").field("hooks", &self.names()).finish()
    }
}
