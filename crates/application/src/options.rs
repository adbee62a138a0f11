//! Rule-set run options

use serde::{Deserialize, Serialize};

/// Options that apply to a whole rule set.
///
/// Hooks are referenced by the name they were registered under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Hook run once before the first case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Hook run once after the last case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Whether every case prints its actual response.
    #[serde(default)]
    pub print_response: bool,
}

impl RunOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule-set `before` hook (builder pattern).
    #[must_use]
    pub fn with_before(mut self, hook: impl Into<String>) -> Self {
        self.before = Some(hook.into());
        self
    }

    /// Sets the rule-set `after` hook (builder pattern).
    #[must_use]
    pub fn with_after(mut self, hook: impl Into<String>) -> Self {
        self.after = Some(hook.into());
        self
    }

    /// Sets the default for printing responses (builder pattern).
    #[must_use]
    pub const fn with_print_response(mut self, print: bool) -> Self {
        self.print_response = print;
        self
    }
}
