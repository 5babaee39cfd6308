//! Comprehensive Rules Harvester - download and segment the MTG rules.
//!
//! This crate downloads the Magic: The Gathering Comprehensive Rules (one
//! large plain-text document) and segments it into an index file, one file
//! per numbered rule section, and one file per glossary term.
//!
//! # Example
//!
//! ```
//! use comprules_harvester::segmenter::{Segmenter, VecSink};
//!
//! let mut segmenter = Segmenter::new();
//! let mut sink = VecSink::new();
//! for line in ["Contents", "100. General", "Glossary"] {
//!     segmenter.consume(line, &mut sink).expect("in-memory sink");
//! }
//! assert_eq!(sink.units[0].name, "index");
//! assert_eq!(sink.units[0].text, "100. General");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Structural markers, patterns, and layout constants
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for the document download
//! - [`document`]: Document fetch and verbatim persistence
//! - [`segmenter`]: The line-driven segmentation state machine
//! - [`output`]: Filesystem layout and the file-writing sink
//! - [`lookup`]: Read-back of segmented files
//! - [`cli`]: Command-line interface
//! - [`harvester`]: Main harvest pipeline

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod harvester;
pub mod http;
pub mod lookup;
pub mod output;
pub mod segmenter;

// Re-export main functions
pub use harvester::{harvest, HarvestSummary};

// Re-export commonly used items
pub use error::{HarvestError, Result};
pub use output::Layout;
pub use segmenter::{OutputUnit, SegmentSink, Segmenter, UnitKind, VecSink};
