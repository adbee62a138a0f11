//! Rulecheck Domain - Core types
//!
//! This crate defines the domain model for rule-driven handler tests:
//! typed rules, the synthesized envelope, simulated sessions and clients,
//! sent responses, expectations and run reports.
//! All types here are pure Rust with no I/O dependencies.

pub mod envelope;
pub mod error;
pub mod expectation;
pub mod response;
pub mod rule;
pub mod session;
pub mod testing;

pub use envelope::{AUTH_CLAIM_KEY, Envelope};
pub use error::{RuleResult, RuleViolation};
pub use expectation::{FieldMatch, MapField, Mismatch, ResponseExpectation};
pub use response::{ApiResponse, DEFAULT_STATUS_CODE};
pub use rule::{DEFAULT_METHOD, EventDescriptor, EventId, RequestDescriptor, Rule, RuleInput};
pub use session::{ClientRecord, SessionData, SessionSpec};
pub use testing::{CaseFailure, CaseResult, CaseStatus, HookStage, RunReport};
