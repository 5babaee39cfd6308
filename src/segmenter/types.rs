//! Types for the segmentation state machine.

use crate::config::{sanitize_term, INDEX_UNIT_NAME};

/// Parameters local to index mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexState {
    /// Whether the `Contents` marker has been seen yet.
    pub found_contents: bool,
}

/// Parameters local to rules mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesState {
    /// Whether the first section heading has been seen yet.
    pub found_start: bool,

    /// 3-digit id of the rule section currently being accumulated.
    pub current_rule: Option<String>,
}

/// Parameters local to glossary mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryState {
    /// Term whose definition is currently being accumulated.
    pub current_term: Option<String>,
}

/// Processing phase of the segmenter.
///
/// Each active mode carries its own parameter struct, constructed fresh at
/// the transition into that mode. The set is closed: there is no invalid
/// mode to detect at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Skipping front matter, then collecting the table of contents.
    Index(IndexState),

    /// Splitting the numbered rules body into per-rule units.
    Rules(RulesState),

    /// Splitting the glossary into per-term units.
    Glossary(GlossaryState),

    /// All structured content consumed; further input is ignored.
    Finished,
}

impl Mode {
    /// Mode name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index(_) => "index",
            Self::Rules(_) => "rules",
            Self::Glossary(_) => "glossary",
            Self::Finished => "finished",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Index(IndexState::default())
    }
}

/// Kind of output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// The table-of-contents span.
    Index,

    /// One top-level rule section.
    Rule,

    /// One glossary definition.
    GlossaryTerm,
}

/// A completed (destination name, text content) pair.
///
/// `text` is the buffered lines joined by newline, in original order, with
/// no trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    pub kind: UnitKind,
    pub name: String,
    pub text: String,
}

impl OutputUnit {
    /// The index unit, with its fixed destination name.
    #[must_use]
    pub fn index(text: String) -> Self {
        Self {
            kind: UnitKind::Index,
            name: INDEX_UNIT_NAME.to_string(),
            text,
        }
    }

    /// A rule unit, named by its 3-digit id.
    #[must_use]
    pub fn rule(id: &str, text: String) -> Self {
        Self {
            kind: UnitKind::Rule,
            name: id.to_string(),
            text,
        }
    }

    /// A glossary unit, named by the sanitized term.
    #[must_use]
    pub fn term(term: &str, text: String) -> Self {
        Self {
            kind: UnitKind::GlossaryTerm,
            name: sanitize_term(term),
            text,
        }
    }
}
