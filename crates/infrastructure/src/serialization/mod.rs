//! Rule-set documents.
//!
//! A document carries the untyped rules and the rule-set options:
//!
//! ```yaml
//! options:
//!   printResponse: true
//! rules:
//!   - description: Should respond 200
//!     event: { service: sac, entity: claim, event: created }
//!     responseCode: 200
//! ```
//!
//! JSON and YAML are accepted; the format follows the file extension.

mod document;

pub use document::{DocumentFormat, LoadError, RuleSetDocument, load_rule_set};
