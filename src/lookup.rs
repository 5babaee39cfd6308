//! Read-back operations over a produced output layout.
//!
//! Mirrors the consumers of the segmented files: fetch the whole index,
//! one rule section by number, or one glossary definition by term name.

use std::fs;
use std::io::ErrorKind;

use crate::config::{sanitize_term, validate_rule_id};
use crate::error::{HarvestError, Result};
use crate::output::Layout;

/// Maximum number of suggestions offered for a missing term.
const MAX_SUGGESTIONS: usize = 5;

/// Read the complete rules index.
pub fn read_index(layout: &Layout) -> Result<String> {
    Ok(fs::read_to_string(layout.index_file())?)
}

/// Read one rule section by its 3-digit number.
///
/// # Arguments
/// * `layout` - Output layout to read from
/// * `id` - Rule number, e.g. "100" (longer numbers like "105.2f" must be
///   truncated to their first three digits by the caller)
pub fn read_rule(layout: &Layout, id: &str) -> Result<String> {
    validate_rule_id(id)?;
    match fs::read_to_string(layout.rule_file(id)) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(HarvestError::RuleNotFound(id.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Read one glossary definition by term name.
///
/// The term is sanitized with the same rule the writer uses, so any term
/// that was segmented can be read back under its original name. On a miss,
/// the error carries up to [`MAX_SUGGESTIONS`] similar term names.
pub fn read_term(layout: &Layout, term: &str) -> Result<String> {
    let name = sanitize_term(term);
    match fs::read_to_string(layout.term_file(&name)) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(HarvestError::TermNotFound {
            term: term.to_string(),
            suggestions: suggest_terms(layout, term),
        }),
        Err(e) => Err(e.into()),
    }
}

/// List all available term names, underscores restored to spaces, sorted.
pub fn available_terms(layout: &Layout) -> Result<Vec<String>> {
    let mut terms = Vec::new();
    for entry in fs::read_dir(layout.glossary_dir())? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(stem) = name.strip_suffix(".txt") {
            terms.push(stem.replace('_', " "));
        }
    }
    terms.sort();
    Ok(terms)
}

/// Terms whose name contains the query (or vice versa), capped.
///
/// Failing to list the glossary directory yields no suggestions rather
/// than masking the original miss.
fn suggest_terms(layout: &Layout, query: &str) -> Vec<String> {
    let terms = match available_terms(layout) {
        Ok(terms) => terms,
        Err(e) => {
            tracing::warn!(error = %e, "Could not list glossary terms for suggestions");
            return Vec::new();
        }
    };

    let query = query.to_lowercase();
    terms
        .into_iter()
        .filter(|t| t.contains(&query) || query.contains(t.as_str()))
        .take(MAX_SUGGESTIONS)
        .collect()
}
