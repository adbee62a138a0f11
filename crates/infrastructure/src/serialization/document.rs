//! Loading rule-set documents from disk.

use std::path::{Path, PathBuf};

use rulecheck_application::RunOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

/// Error type for document loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The extension names no known format.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(PathBuf),

    /// JSON parsing failed.
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Detects the format from a path's extension, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Rules plus the options they run with.
///
/// Rules stay untyped here; the validator decides whether they are well formed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSetDocument {
    /// Rule-set options.
    #[serde(default)]
    pub options: RunOptions,
    /// Untyped rules. Missing rules deserialize to `null`.
    #[serde(default)]
    pub rules: Value,
}

impl RuleSetDocument {
    /// Parses a document in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid document.
    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self, LoadError> {
        Ok(match format {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

/// Reads and parses a rule-set document.
///
/// # Errors
///
/// Returns an error if the extension is unknown, the file cannot be read,
/// or its contents do not parse.
pub async fn load_rule_set(path: impl AsRef<Path>) -> Result<RuleSetDocument, LoadError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    let text = fs::read_to_string(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let document = RuleSetDocument::parse(&text, format)?;
    tracing::debug!(path = %path.display(), ?format, "rule set loaded");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Should create temp file");
        file.write_all(contents.as_bytes())
            .expect("Should write temp file");
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("rules.json")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("rules.YML")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("rules.toml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("rules")), None);
    }

    #[tokio::test]
    async fn test_load_json_document() {
        let file = write_temp(
            ".json",
            r#"{
                "options": { "printResponse": true, "before": "seed" },
                "rules": [{ "description": "d", "event": { "service": "s", "entity": "e", "event": "n" } }]
            }"#,
        );

        let document = load_rule_set(file.path()).await.expect("Should load");

        assert!(document.options.print_response);
        assert_eq!(document.options.before.as_deref(), Some("seed"));
        assert_eq!(document.rules[0]["description"], json!("d"));
    }

    #[tokio::test]
    async fn test_load_yaml_document() {
        let file = write_temp(
            ".yaml",
            "rules:\n  - description: create\n    request:\n      method: PUT\n    response:\n      code: 201\n",
        );

        let document = load_rule_set(file.path()).await.expect("Should load");

        assert_eq!(document.options, RunOptions::default());
        assert_eq!(
            document.rules,
            json!([{
                "description": "create",
                "request": { "method": "PUT" },
                "response": { "code": 201 }
            }])
        );
    }

    #[tokio::test]
    async fn test_missing_rules_are_null() {
        let file = write_temp(".json", "{}");
        let document = load_rule_set(file.path()).await.expect("Should load");
        assert_eq!(document.rules, Value::Null);
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let file = write_temp(".txt", "{}");
        let error = load_rule_set(file.path()).await.expect_err("Should fail");
        assert!(matches!(error, LoadError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let error = load_rule_set("/definitely/not/here.json")
            .await
            .expect_err("Should fail");
        assert!(matches!(error, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let error = RuleSetDocument::parse("{ \"rules\": ", DocumentFormat::Json)
            .expect_err("Should fail");
        assert!(matches!(error, LoadError::Json(_)));
    }
}
