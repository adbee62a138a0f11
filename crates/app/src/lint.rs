//! Linting rule-set documents.

use std::fmt;
use std::path::{Path, PathBuf};

use rulecheck_application::{HookRegistry, RuleSetError, RuleSetValidator};
use rulecheck_infrastructure::{LoadError, load_rule_set};

/// Builds a registry where every name resolves to a hook that does nothing.
///
/// Linting never runs hooks; it only needs the names to be known.
#[must_use]
pub fn placeholder_hooks(names: &[String]) -> HookRegistry {
    names
        .iter()
        .fold(HookRegistry::new(), |hooks, name| hooks.with_fn(name.clone(), |_| Ok(())))
}

/// What linting one document found.
#[derive(Debug)]
pub enum LintOutcome {
    /// Every rule and option is well formed.
    Valid {
        /// Number of rules in the document.
        rules: usize,
    },
    /// The document loaded but did not validate.
    Invalid(RuleSetError),
    /// The document could not be loaded.
    Unreadable(LoadError),
}

/// Lint result for one document.
#[derive(Debug)]
pub struct LintReport {
    /// Linted document.
    pub path: PathBuf,
    /// Outcome.
    pub outcome: LintOutcome,
}

impl LintReport {
    /// Whether the document passed.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.outcome, LintOutcome::Valid { .. })
    }
}

impl fmt::Display for LintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            LintOutcome::Valid { rules: 1 } => write!(f, "ok {path} (1 rule)"),
            LintOutcome::Valid { rules } => write!(f, "ok {path} ({rules} rules)"),
            LintOutcome::Invalid(error) => write!(f, "FAIL {path}: [{}] {error}", error.code()),
            LintOutcome::Unreadable(error) => write!(f, "FAIL {path}: {error}"),
        }
    }
}

/// Loads and validates one document.
pub async fn lint_file(path: &Path, hooks: &HookRegistry) -> LintReport {
    let outcome = match load_rule_set(path).await {
        Err(error) => LintOutcome::Unreadable(error),
        Ok(document) => {
            let validator = RuleSetValidator::new(hooks);
            match validator
                .validate_rules(&document.rules)
                .and_then(|rules| validator.validate_options(&document.options).map(|()| rules))
            {
                Ok(rules) => LintOutcome::Valid { rules: rules.len() },
                Err(error) => LintOutcome::Invalid(error),
            }
        }
    };

    tracing::debug!(path = %path.display(), ok = matches!(outcome, LintOutcome::Valid { .. }), "linted");
    LintReport {
        path: path.to_path_buf(),
        outcome,
    }
}
