//! Main harvester service that ties all components together.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::document::{download_document, persist_raw};
use crate::error::Result;
use crate::http::create_client;
use crate::output::{write_manifest, FileSink, Layout};
use crate::segmenter::Segmenter;

/// Summary of one completed harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Whether an index unit was written.
    pub index_written: bool,

    /// Number of rule files written.
    pub rule_count: usize,

    /// Number of glossary files written.
    pub glossary_count: usize,

    /// Size of the raw downloaded document in bytes.
    pub raw_bytes: usize,

    /// Root of the produced layout.
    pub output_root: PathBuf,
}

/// Download the rules document and segment it into the output layout.
///
/// Runs the full pipeline: create directories (idempotent), download,
/// persist the raw bytes verbatim, then stream the persisted file back
/// line-by-line through the segmenter. Every invocation re-downloads and
/// re-segments from scratch, overwriting files with the same names.
///
/// # Arguments
/// * `url` - URL of the plain-text rules document
/// * `root` - Output root directory
///
/// # Returns
/// A summary of everything written
pub fn harvest(url: &str, root: &Path) -> Result<HarvestSummary> {
    let layout = Layout::new(root);
    layout.create_dirs()?;

    let client = create_client()?;
    tracing::info!(url, "Downloading rules document");
    let bytes = download_document(&client, url)?;
    let raw_bytes = bytes.len();
    persist_raw(&layout.raw_document(), &bytes)?;

    let summary = segment_file(&layout.raw_document(), &layout, url)?;
    Ok(HarvestSummary {
        raw_bytes,
        ..summary
    })
}

/// Segment an already-downloaded document file into the layout.
///
/// Split out from [`harvest`] so tests and offline re-runs can segment
/// without a network fetch.
pub fn segment_file(document: &Path, layout: &Layout, source_url: &str) -> Result<HarvestSummary> {
    let reader = BufReader::new(File::open(document)?);

    let mut segmenter = Segmenter::new();
    let mut sink = FileSink::new(layout);
    for line in reader.lines() {
        let line = line?;
        segmenter.consume(line.trim(), &mut sink)?;
    }

    if !segmenter.is_finished() {
        tracing::warn!(
            mode = segmenter.mode_name(),
            "Document ended before the credits marker"
        );
    }

    let manifest = sink.into_manifest(source_url);
    write_manifest(layout, &manifest)?;
    tracing::info!(
        rules = manifest.rules.len(),
        glossary = manifest.glossary.len(),
        "Segmentation complete"
    );

    Ok(HarvestSummary {
        index_written: manifest.index,
        rule_count: manifest.rules.len(),
        glossary_count: manifest.glossary.len(),
        raw_bytes: 0,
        output_root: layout.root().to_path_buf(),
    })
}
