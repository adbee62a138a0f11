//! Test runner implementation.
//!
//! Collects a handler, rules, options and hooks, then validates and runs them
//! with in-memory interception.

use std::fmt;
use std::sync::Arc;

use rulecheck_application::ports::{FnHandler, Handler, InvocationContext, ResponsePrinter};
use rulecheck_application::{
    HandlerError, Hook, HookRegistry, HookResult, RuleSetError, RuleSetInput, RuleSetValidator,
    RunOptions, RunRuleSet, Sandbox, Toolkit,
};
use rulecheck_domain::{Envelope, Rule, RunReport};
use serde_json::Value;

use crate::adapters::{StdoutPrinter, in_memory_sandbox};
use crate::serialization::RuleSetDocument;

/// Builder and entry point for running a rule set against a handler.
///
/// ```ignore
/// let report = TestRunner::new()
///     .with_handler(Arc::new(MyHandler))
///     .with_rules(json!([{ "description": "ok", "event": event, "responseCode": 200 }]))
///     .run()
///     .await?;
/// report.assert_passed();
/// ```
pub struct TestRunner {
    handler: Option<Arc<dyn Handler>>,
    rules: Value,
    options: RunOptions,
    hooks: HookRegistry,
    printer: Arc<dyn ResponsePrinter>,
    sandbox: Sandbox,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    /// Creates a runner with no handler and no rules, printing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handler: None,
            rules: Value::Null,
            options: RunOptions::default(),
            hooks: HookRegistry::new(),
            printer: Arc::new(StdoutPrinter::new()),
            sandbox: in_memory_sandbox(),
        }
    }

    /// Sets the handler under test.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Sets a synchronous closure as the handler under test.
    #[must_use]
    pub fn with_fn_handler<F>(self, handle: F) -> Self
    where
        F: Fn(Envelope, &InvocationContext) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.with_handler(Arc::new(FnHandler::new(handle)))
    }

    /// Sets the untyped rules.
    #[must_use]
    pub fn with_rules(mut self, rules: Value) -> Self {
        self.rules = rules;
        self
    }

    /// Replaces the rule-set options.
    #[must_use]
    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Takes rules and options from a loaded document.
    #[must_use]
    pub fn with_document(self, document: RuleSetDocument) -> Self {
        self.with_rules(document.rules).with_options(document.options)
    }

    /// Names the hook run once before the first case.
    #[must_use]
    pub fn with_before(mut self, hook: impl Into<String>) -> Self {
        self.options.before = Some(hook.into());
        self
    }

    /// Names the hook run once after the last case.
    #[must_use]
    pub fn with_after(mut self, hook: impl Into<String>) -> Self {
        self.options.after = Some(hook.into());
        self
    }

    /// Makes every case print its actual response.
    #[must_use]
    pub const fn with_print_response(mut self, print: bool) -> Self {
        self.options.print_response = print;
        self
    }

    /// Registers a hook that rules and options can refer to by `name`.
    #[must_use]
    pub fn with_hook(mut self, name: impl Into<String>, hook: Arc<dyn Hook>) -> Self {
        self.hooks.register(name, hook);
        self
    }

    /// Registers a synchronous closure as a hook.
    #[must_use]
    pub fn with_fn_hook<F>(mut self, name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&Toolkit) -> HookResult + Send + Sync + 'static,
    {
        self.hooks = self.hooks.with_fn(name, call);
        self
    }

    /// Sends the diagnostic lines somewhere other than stdout.
    #[must_use]
    pub fn with_printer(mut self, printer: Arc<dyn ResponsePrinter>) -> Self {
        self.printer = printer;
        self
    }

    /// Uses another interception sandbox.
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: Sandbox) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Validates without running anything.
    ///
    /// # Errors
    ///
    /// Returns the first rule-set level failure; malformed rules are
    /// reported together.
    pub fn validate(&self) -> Result<Vec<Rule>, RuleSetError> {
        RuleSetValidator::new(&self.hooks).validate(
            self.handler.as_deref(),
            &self.rules,
            &self.options,
        )
    }

    /// Validates and runs the rule set.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleSetError`] when validation fails; no case runs then.
    pub async fn run(self) -> Result<RunReport, RuleSetError> {
        let use_case = RunRuleSet::new(self.sandbox, self.printer);
        let input = RuleSetInput {
            handler: self.handler,
            rules: self.rules,
            options: self.options,
            hooks: self.hooks,
        };

        use_case.execute(input).await
    }
}

impl fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRunner")
            .field("has_handler", &self.handler.is_some())
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
