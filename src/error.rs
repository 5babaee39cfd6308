//! Error types for the harvester.
//!
//! One crate-wide error enum with context-carrying variants, plus a
//! `Result` alias. Structural oddities in the document are deliberately
//! not errors: segmentation degrades silently and only transport and
//! filesystem failures abort a run.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download the rules document.
    #[error("Failed to download rules document from {url}: {source}")]
    DocumentDownload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest serialization error.
    #[error("Manifest serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid rule id format.
    #[error("Invalid rule number: '{0}'. Expected three digits (e.g., 100, 205, 701)")]
    InvalidRuleId(String),

    /// Rule file not found in the output layout.
    #[error("Rule {0} not found. Run a harvest first or check the rule number")]
    RuleNotFound(String),

    /// Glossary term not found in the output layout.
    #[error("Glossary term '{term}' not found{}", format_suggestions(.suggestions))]
    TermNotFound {
        term: String,
        suggestions: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(". Did you mean: {}?", suggestions.join(", "))
    }
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rule_id_display() {
        let err = HarvestError::InvalidRuleId("10a".to_string());
        assert!(err.to_string().contains("10a"));
        assert!(err.to_string().contains("three digits"));
    }

    #[test]
    fn test_term_not_found_with_suggestions() {
        let err = HarvestError::TermNotFound {
            term: "mana".to_string(),
            suggestions: vec!["mana value".to_string(), "mana pool".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Glossary term 'mana' not found. Did you mean: mana value, mana pool?"
        );
    }

    #[test]
    fn test_term_not_found_without_suggestions() {
        let err = HarvestError::TermNotFound {
            term: "xyz".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "Glossary term 'xyz' not found");
    }
}
