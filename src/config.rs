//! Configuration constants and validation functions for the harvester.
//!
//! The marker strings and the rule-prefix pattern together form the
//! structural contract of the Comprehensive Rules document: front matter,
//! then a `Contents` listing, then numbered rules starting at
//! `1. Game Concepts`, then a `Glossary`, then `Credits`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HarvestError, Result};

/// Default URL of the Comprehensive Rules plain-text document.
pub const DEFAULT_RULES_URL: &str =
    "https://media.wizards.com/2025/downloads/MagicCompRules%2020250919.txt";

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Marker line that opens the table of contents.
pub const CONTENTS_MARKER: &str = "Contents";

/// Marker line that opens the actual rule text (first section heading).
pub const RULES_START_MARKER: &str = "1. Game Concepts";

/// Marker line that ends the contents listing and, later, the rules body.
pub const GLOSSARY_MARKER: &str = "Glossary";

/// Marker line that ends the glossary and all structured content.
pub const CREDITS_MARKER: &str = "Credits";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// File name for the raw downloaded document.
pub const RAW_FILENAME: &str = "full_rules.txt";

/// File name for the index output unit.
pub const INDEX_FILENAME: &str = "index.txt";

/// Directory name for per-rule output units.
pub const RULES_DIR: &str = "rules";

/// Directory name for per-term output units.
pub const GLOSSARY_DIR: &str = "glossary";

/// File name for the run manifest.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Destination name of the index output unit.
pub const INDEX_UNIT_NAME: &str = "index";

/// Top-level rule prefix: exactly three digits followed by a period,
/// anchored at line start (e.g. "100.", "100.1", "100.2a").
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RULE_PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})\.").expect("valid regex"));

/// Rule id pattern: exactly three digits.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RULE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}$").expect("valid regex"));

/// Characters replaced by underscores in glossary destination names.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NON_LOWERCASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z]").expect("valid regex"));

/// Extract the 3-digit rule id from a line, if the line opens with one.
///
/// # Examples
/// ```
/// use comprules_harvester::config::rule_prefix;
///
/// assert_eq!(rule_prefix("100. General"), Some("100"));
/// assert_eq!(rule_prefix("100.2a Some sub-rule"), Some("100"));
/// assert_eq!(rule_prefix("1. Game Concepts"), None);
/// assert_eq!(rule_prefix("See rule 100."), None);
/// ```
#[must_use]
pub fn rule_prefix(line: &str) -> Option<&str> {
    RULE_PREFIX_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Validate a rule id (three digits, e.g. "100").
///
/// # Examples
/// ```
/// use comprules_harvester::config::validate_rule_id;
///
/// assert!(validate_rule_id("100").is_ok());
/// assert!(validate_rule_id("100.2a").is_err());
/// ```
pub fn validate_rule_id(id: &str) -> Result<()> {
    if RULE_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(HarvestError::InvalidRuleId(id.to_string()))
    }
}

/// Sanitize a glossary term into a destination name.
///
/// Lower-cases the term and replaces every character outside `a-z`
/// (spaces, digits, punctuation) with an underscore.
///
/// # Examples
/// ```
/// use comprules_harvester::config::sanitize_term;
///
/// assert_eq!(sanitize_term("Mana Value"), "mana_value");
/// assert_eq!(sanitize_term("Two-Headed Giant"), "two_headed_giant");
/// ```
#[must_use]
pub fn sanitize_term(term: &str) -> String {
    NON_LOWERCASE_PATTERN
        .replace_all(&term.to_lowercase(), "_")
        .into_owned()
}
