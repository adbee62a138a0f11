//! Case outcomes and run reports.
//!
//! Each rule becomes one case; a run collects the outcome of every case
//! plus any failure of the rule-set-level hooks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expectation::Mismatch;

/// When a hook ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStage {
    /// Rule-set `before`, once per run.
    BeforeAll,
    /// Rule `before`.
    Before,
    /// Rule `after`.
    After,
    /// Rule-set `after`, once per run.
    AfterAll,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BeforeAll => "before all",
            Self::Before => "before",
            Self::After => "after",
            Self::AfterAll => "after all",
        };
        f.write_str(name)
    }
}

/// Why a case failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaseFailure {
    /// The handler did not send exactly one response.
    SendCount {
        /// Number of responses sent.
        calls: usize,
    },
    /// The sent response did not match the expectation.
    Response {
        /// Every difference found.
        mismatches: Vec<Mismatch>,
    },
    /// A hook returned an error.
    Hook {
        /// Hook stage.
        stage: HookStage,
        /// Error message.
        message: String,
    },
}

impl fmt::Display for CaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendCount { calls } => write!(
                f,
                "Expected the response to be sent exactly once, but it was sent {calls} times"
            ),
            Self::Response { mismatches } => {
                let lines: Vec<_> = mismatches.iter().map(ToString::to_string).collect();
                write!(f, "Response mismatch: {}", lines.join("; "))
            }
            Self::Hook { stage, message } => write!(f, "The {stage} hook failed: {message}"),
        }
    }
}

/// Status of a finished case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// The case passed.
    Passed,
    /// The case failed.
    Failed,
    /// The case did not run because other rules are marked `only`.
    Skipped,
}

/// Result of running a single rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    /// Rule description.
    pub description: String,
    /// Outcome.
    pub status: CaseStatus,
    /// Failure reason when the case failed.
    pub failure: Option<CaseFailure>,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl CaseResult {
    /// Creates a passed result.
    #[must_use]
    pub fn passed(description: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            description: description.into(),
            status: CaseStatus::Passed,
            failure: None,
            duration_ms,
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failed(description: impl Into<String>, failure: CaseFailure, duration_ms: u64) -> Self {
        Self {
            description: description.into(),
            status: CaseStatus::Failed,
            failure: Some(failure),
            duration_ms,
        }
    }

    /// Creates a skipped result.
    #[must_use]
    pub fn skipped(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: CaseStatus::Skipped,
            failure: None,
            duration_ms: 0,
        }
    }

    /// Whether the case passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }
}

/// Results from running a rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier of the run.
    pub id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Individual case results, in rule order.
    pub cases: Vec<CaseResult>,
    /// Failure of the rule-set `after` hook.
    pub teardown_failure: Option<CaseFailure>,
    /// Number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Number of skipped cases.
    pub skipped: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl RunReport {
    /// Creates a report from finished cases.
    #[must_use]
    pub fn new(
        started_at: DateTime<Utc>,
        cases: Vec<CaseResult>,
        teardown_failure: Option<CaseFailure>,
        duration_ms: u64,
    ) -> Self {
        let total = cases.len();
        let passed = cases.iter().filter(|c| c.status == CaseStatus::Passed).count();
        let skipped = cases.iter().filter(|c| c.status == CaseStatus::Skipped).count();
        let failed = total - passed - skipped;

        Self {
            id: Uuid::now_v7(),
            started_at,
            cases,
            teardown_failure,
            total,
            passed,
            failed,
            skipped,
            duration_ms,
        }
    }

    /// Whether no case failed and the rule-set hooks succeeded.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.teardown_failure.is_none()
    }

    /// Pass rate over the cases that ran, as a percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        let ran = self.total - self.skipped;
        if ran == 0 {
            100.0
        } else {
            (self.passed as f64 / ran as f64) * 100.0
        }
    }

    /// Returns the result of a case by description.
    #[must_use]
    pub fn case(&self, description: &str) -> Option<&CaseResult> {
        self.cases.iter().find(|c| c.description == description)
    }

    /// Failed cases, in rule order.
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|c| c.status == CaseStatus::Failed)
    }

    /// Human-readable summary, one line per failure.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} passed, {} failed, {} skipped ({} total)",
            self.passed, self.failed, self.skipped, self.total
        );
        for case in self.failures() {
            if let Some(failure) = &case.failure {
                out.push_str(&format!("\n  - {}: {failure}", case.description));
            }
        }
        if let Some(failure) = &self.teardown_failure {
            out.push_str(&format!("\n  - {failure}"));
        }
        out
    }

    /// Panics with the summary unless every case passed.
    ///
    /// Meant to be the last line of a `#[test]` function.
    ///
    /// # Panics
    ///
    /// Panics if any case failed or a rule-set hook failed.
    #[allow(clippy::panic)]
    pub fn assert_passed(&self) {
        if !self.all_passed() {
            panic!("rule set failed: {}", self.summary());
        }
    }
}
