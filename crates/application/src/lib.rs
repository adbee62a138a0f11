//! Rulecheck Application - Validation, synthesis and the rule runner
//!
//! This crate holds the logic of a rule-driven handler test: the ports the
//! runner talks through, the rule-set validator, the envelope builder, the
//! per-case sandbox and the use case that runs a rule set.

pub mod envelope_builder;
pub mod error;
pub mod hooks;
pub mod options;
pub mod ports;
pub mod sandbox;
pub mod use_cases;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use envelope_builder::EventBuilder;
pub use error::{ErrorCode, HandlerError, HookError, HookResult, RuleDiagnostic, RuleSetError};
pub use hooks::{FnHook, Hook, HookRegistry, Toolkit};
pub use options::RunOptions;
pub use sandbox::{Sandbox, SandboxScope};
pub use use_cases::{RuleSetInput, RunRuleSet};
pub use validation::{RuleSetValidator, parse_rule};
