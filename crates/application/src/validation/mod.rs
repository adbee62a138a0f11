//! Rule validation.
//!
//! Rules arrive as untyped JSON. Validation checks the handler, every rule
//! and the rule-set hooks before anything runs, turning each rule into a
//! typed [`Rule`](rulecheck_domain::Rule) along the way.

mod rule_parser;
mod validator;

pub use rule_parser::parse_rule;
pub use validator::RuleSetValidator;
