//! Rule-set validation.

use rulecheck_domain::Rule;
use serde_json::Value;

use super::parse_rule;
use crate::error::{ErrorCode, RuleDiagnostic, RuleSetError};
use crate::hooks::HookRegistry;
use crate::options::RunOptions;
use crate::ports::Handler;

/// Checks a handler, its rules and the rule-set hooks before any case runs.
///
/// Validation is all-or-nothing: every malformed rule is reported in a
/// single [`RuleSetError`].
#[derive(Debug, Clone, Copy)]
pub struct RuleSetValidator<'a> {
    hooks: &'a HookRegistry,
}

impl<'a> RuleSetValidator<'a> {
    /// Creates a validator resolving hook names against `hooks`.
    #[must_use]
    pub const fn new(hooks: &'a HookRegistry) -> Self {
        Self { hooks }
    }

    /// Validates everything and returns the typed rules.
    ///
    /// # Errors
    ///
    /// - `INVALID_HANDLER` if no handler is given
    /// - `INVALID_RULES` if the rules are not a non-empty list, or any rule is malformed
    /// - `INVALID_BEFORE_HOOK` / `INVALID_AFTER_HOOK` if a rule-set hook is not registered
    pub fn validate(
        &self,
        handler: Option<&dyn Handler>,
        rules: &Value,
        options: &RunOptions,
    ) -> Result<Vec<Rule>, RuleSetError> {
        Self::validate_handler(handler)?;
        let rules = self.validate_rules(rules)?;
        self.validate_options(options)?;
        Ok(rules)
    }

    /// Checks that a handler was supplied and hands it back.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_HANDLER` when `handler` is `None`.
    pub fn validate_handler<H>(handler: Option<H>) -> Result<H, RuleSetError> {
        handler.ok_or_else(|| {
            RuleSetError::new(
                ErrorCode::InvalidHandler,
                "Handler must be a function. Received none",
            )
        })
    }

    /// Parses every rule, collecting the first error of each malformed one.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_RULES` when `rules` is not a non-empty array or when
    /// at least one rule is malformed.
    pub fn validate_rules(&self, rules: &Value) -> Result<Vec<Rule>, RuleSetError> {
        let entries = match rules {
            Value::Array(entries) if !entries.is_empty() => entries,
            other => {
                return Err(RuleSetError::new(
                    ErrorCode::InvalidRules,
                    format!("Rules must be a not empty array. Received {other}"),
                ));
            }
        };

        let mut parsed = Vec::with_capacity(entries.len());
        let mut diagnostics = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match parse_rule(entry, self.hooks) {
                Ok(rule) => parsed.push(rule),
                Err(violation) => {
                    tracing::debug!(index, %violation, "invalid rule");
                    diagnostics.push(RuleDiagnostic::new(index, entry, violation.to_string()));
                }
            }
        }

        if !diagnostics.is_empty() {
            tracing::warn!(
                invalid = diagnostics.len(),
                total = entries.len(),
                "rule set rejected"
            );
            return Err(RuleSetError::invalid_rules(diagnostics));
        }

        Ok(parsed)
    }

    /// Checks that the rule-set hooks name registered hooks.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_BEFORE_HOOK` or `INVALID_AFTER_HOOK`.
    pub fn validate_options(&self, options: &RunOptions) -> Result<(), RuleSetError> {
        if let Some(name) = &options.before {
            if !self.hooks.contains(name) {
                return Err(RuleSetError::new(
                    ErrorCode::InvalidBeforeHook,
                    format!("Before hook must reference a registered hook. Received '{name}'"),
                ));
            }
        }

        if let Some(name) = &options.after {
            if !self.hooks.contains(name) {
                return Err(RuleSetError::new(
                    ErrorCode::InvalidAfterHook,
                    format!("After hook must reference a registered hook. Received '{name}'"),
                ));
            }
        }

        Ok(())
    }
}
