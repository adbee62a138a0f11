//! Rule-set test runner.
//!
//! This module provides the builder that wires the default adapters into the
//! run use case.

mod runner;

pub use runner::TestRunner;
