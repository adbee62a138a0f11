//! Run rule set use case.
//!
//! Validates a rule set and runs every rule as an isolated case: hooks,
//! envelope synthesis, handler invocation, optional printing, and the
//! check that exactly one response was sent and that it matches.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rulecheck_domain::{CaseFailure, CaseResult, Envelope, HookStage, Rule, RunReport};
use serde_json::Value;

use crate::envelope_builder::EventBuilder;
use crate::error::{HandlerError, RuleSetError};
use crate::hooks::{HookRegistry, Toolkit};
use crate::options::RunOptions;
use crate::ports::{Handler, ResponsePrinter};
use crate::sandbox::Sandbox;
use crate::validation::RuleSetValidator;

/// Input for running a rule set.
#[derive(Clone)]
pub struct RuleSetInput {
    /// Handler under test.
    pub handler: Option<Arc<dyn Handler>>,
    /// Untyped rules, validated before anything runs.
    pub rules: Value,
    /// Rule-set options.
    pub options: RunOptions,
    /// Hooks the rules and options refer to.
    pub hooks: HookRegistry,
}

impl RuleSetInput {
    /// Creates an input for `handler` and `rules` with default options.
    #[must_use]
    pub fn new(handler: Arc<dyn Handler>, rules: Value) -> Self {
        Self {
            handler: Some(handler),
            rules,
            options: RunOptions::default(),
            hooks: HookRegistry::default(),
        }
    }
}

/// A validated rule set ready to run.
struct Prepared {
    handler: Arc<dyn Handler>,
    rules: Vec<Rule>,
    options: RunOptions,
    hooks: HookRegistry,
}

/// Use case for running a rule set against a handler.
pub struct RunRuleSet {
    sandbox: Sandbox,
    printer: Arc<dyn ResponsePrinter>,
}

impl RunRuleSet {
    /// Creates a new `RunRuleSet` use case.
    #[must_use]
    pub fn new(sandbox: Sandbox, printer: Arc<dyn ResponsePrinter>) -> Self {
        Self { sandbox, printer }
    }

    /// Validates and runs a rule set.
    ///
    /// Rule-set hooks run once each and bracket every case. A case failure
    /// never stops the remaining cases.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleSetError`] when validation fails; no case runs then.
    pub async fn execute(&self, input: RuleSetInput) -> Result<RunReport, RuleSetError> {
        let prepared = Self::prepare(input)?;
        Ok(self.run(&prepared).await)
    }

    fn prepare(input: RuleSetInput) -> Result<Prepared, RuleSetError> {
        let validator = RuleSetValidator::new(&input.hooks);
        let handler = RuleSetValidator::validate_handler(input.handler)?;
        let rules = validator.validate_rules(&input.rules)?;
        validator.validate_options(&input.options)?;

        Ok(Prepared {
            handler,
            rules,
            options: input.options,
            hooks: input.hooks,
        })
    }

    async fn run(&self, prepared: &Prepared) -> RunReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let exclusive = prepared.rules.iter().any(|rule| rule.only);
        let toolkit = self.sandbox.toolkit(Arc::clone(&self.printer));

        tracing::info!(rules = prepared.rules.len(), exclusive, "running rule set");

        let setup_failure = run_hook(
            &prepared.hooks,
            prepared.options.before.as_deref(),
            &toolkit,
            HookStage::BeforeAll,
        )
        .await
        .err();

        let mut cases = Vec::with_capacity(prepared.rules.len());
        for rule in &prepared.rules {
            if exclusive && !rule.only {
                tracing::debug!(case = %rule.description, "skipped");
                cases.push(CaseResult::skipped(&rule.description));
                continue;
            }

            if let Some(failure) = &setup_failure {
                cases.push(CaseResult::failed(&rule.description, failure.clone(), 0));
                continue;
            }

            let result = self.run_case(prepared, rule, &toolkit).await;
            match &result.failure {
                Some(failure) => tracing::warn!(case = %rule.description, %failure, "case failed"),
                None => tracing::debug!(case = %rule.description, "case passed"),
            }
            cases.push(result);
        }

        let teardown_failure = run_hook(
            &prepared.hooks,
            prepared.options.after.as_deref(),
            &toolkit,
            HookStage::AfterAll,
        )
        .await
        .err();

        let report = RunReport::new(started_at, cases, teardown_failure, elapsed_ms(start));
        tracing::info!(
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            duration_ms = report.duration_ms,
            "rule set finished"
        );
        report
    }

    async fn run_case(&self, prepared: &Prepared, rule: &Rule, toolkit: &Toolkit) -> CaseResult {
        let start = Instant::now();
        let _scope = self.sandbox.scope();
        let toolkit = toolkit.clone().for_case(&rule.description);
        let fail = |failure| CaseResult::failed(&rule.description, failure, elapsed_ms(start));

        if let Err(failure) =
            run_hook(&prepared.hooks, rule.before.as_deref(), &toolkit, HookStage::Before).await
        {
            return fail(failure);
        }

        // Sends made by the before hook do not count.
        self.sandbox.recorder().reset();

        let envelope = EventBuilder::new(self.sandbox.clients()).build(
            &rule.input,
            rule.session.as_ref(),
            rule.client.as_ref(),
        );
        let actual = self.invoke(&prepared.handler, envelope).await;

        if rule.prints_response(prepared.options.print_response) {
            self.printer.print_line(&format!("Test case: {}", rule.description));
            self.printer.print_line(&format!("Response: {}", render(&actual)));
        }

        let calls = self.sandbox.recorder().calls();
        let [sent] = calls.as_slice() else {
            return fail(CaseFailure::SendCount { calls: calls.len() });
        };

        let mismatches = rule.expectation.check(sent);
        if !mismatches.is_empty() {
            return fail(CaseFailure::Response { mismatches });
        }

        if let Err(failure) =
            run_hook(&prepared.hooks, rule.after.as_deref(), &toolkit, HookStage::After).await
        {
            return fail(failure);
        }

        CaseResult::passed(&rule.description, elapsed_ms(start))
    }

    async fn invoke(
        &self,
        handler: &Arc<dyn Handler>,
        envelope: Envelope,
    ) -> Result<Value, HandlerError> {
        let handler = Arc::clone(handler);
        let ctx = self.sandbox.invocation_context();

        match tokio::spawn(async move { handler.handle(envelope, &ctx).await }).await {
            Ok(result) => result,
            Err(error) => Err(HandlerError::new(format!("handler panicked: {error}"))),
        }
    }
}

async fn run_hook(
    hooks: &HookRegistry,
    name: Option<&str>,
    toolkit: &Toolkit,
    stage: HookStage,
) -> Result<(), CaseFailure> {
    let Some(name) = name else {
        return Ok(());
    };

    let Some(hook) = hooks.get(name) else {
        return Err(CaseFailure::Hook {
            stage,
            message: format!("hook '{name}' is not registered"),
        });
    };

    hook.call(toolkit).await.map_err(|error| {
        tracing::warn!(hook = name, %stage, %error, "hook failed");
        CaseFailure::Hook {
            stage,
            message: error.to_string(),
        }
    })
}

fn render(actual: &Result<Value, HandlerError>) -> String {
    match actual {
        Ok(value) => value.to_string(),
        Err(error) => format!("{error:?}"),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
