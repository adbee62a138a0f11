//! Use cases
//!
//! Each use case represents a single operation that can be performed
//! by the application.

mod run_rule_set;

pub use run_rule_set::{RuleSetInput, RunRuleSet};
