//! Analyzer configuration

use serde::{Deserialize, Serialize};

/// Default label for debit transactions
pub const DEFAULT_DEBIT_KIND: &str = "debit";

/// Default label for credit transactions
pub const DEFAULT_CREDIT_KIND: &str = "credit";

/// Labels the analyzer treats as debit and credit.
///
/// Matching against a record's kind is exact and case-sensitive, so
/// `"Debit"` is not a debit under the default config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub debit_kind: String,
    pub credit_kind: String,
}

impl AnalyzerConfig {
    /// Create a config with custom labels
    pub fn new(debit_kind: impl Into<String>, credit_kind: impl Into<String>) -> Self {
        Self {
            debit_kind: debit_kind.into(),
            credit_kind: credit_kind.into(),
        }
    }

    pub fn is_debit(&self, kind: &str) -> bool {
        kind == self.debit_kind
    }

    pub fn is_credit(&self, kind: &str) -> bool {
        kind == self.credit_kind
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEBIT_KIND, DEFAULT_CREDIT_KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_are_case_sensitive() {
        let config = AnalyzerConfig::default();

        assert!(config.is_debit("debit"));
        assert!(!config.is_debit("Debit"));
        assert!(config.is_credit("credit"));
        assert!(!config.is_credit("debit"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: AnalyzerConfig = serde_json::from_str(r#"{"credit_kind": "CR"}"#).unwrap();

        assert_eq!(config.debit_kind, "debit");
        assert_eq!(config.credit_kind, "CR");
    }
}
