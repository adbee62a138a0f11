//! Rulecheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, the rule-set document loader,
//! and the [`TestRunner`] entry point.

pub mod adapters;
pub mod serialization;
pub mod testing;

pub use adapters::{
    CapturePrinter, RecordingSender, StdoutPrinter, StubClientProvider, in_memory_sandbox,
};
pub use serialization::{DocumentFormat, LoadError, RuleSetDocument, load_rule_set};
pub use testing::TestRunner;
