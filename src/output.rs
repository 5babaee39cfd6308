//! Output layout on disk and the file-writing segment sink.
//!
//! Layout produced under the output root:
//!
//! ```text
//! <root>/full_rules.txt      raw downloaded document
//! <root>/index.txt           index unit
//! <root>/rules/<id>.txt      one file per top-level rule
//! <root>/glossary/<name>.txt one file per sanitized term
//! <root>/manifest.json       run summary
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{
    GLOSSARY_DIR, INDEX_FILENAME, MANIFEST_FILENAME, RAW_FILENAME, RULES_DIR,
};
use crate::error::Result;
use crate::segmenter::{OutputUnit, SegmentSink, UnitKind};

/// Paths of the produced filesystem layout, rooted at one directory.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `root`. No directories are touched.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the raw downloaded document.
    #[must_use]
    pub fn raw_document(&self) -> PathBuf {
        self.root.join(RAW_FILENAME)
    }

    /// Path of the index unit file.
    #[must_use]
    pub fn index_file(&self) -> PathBuf {
        self.root.join(INDEX_FILENAME)
    }

    /// Directory holding per-rule files.
    #[must_use]
    pub fn rules_dir(&self) -> PathBuf {
        self.root.join(RULES_DIR)
    }

    /// Path of one rule unit file.
    #[must_use]
    pub fn rule_file(&self, id: &str) -> PathBuf {
        self.rules_dir().join(format!("{id}.txt"))
    }

    /// Directory holding per-term files.
    #[must_use]
    pub fn glossary_dir(&self) -> PathBuf {
        self.root.join(GLOSSARY_DIR)
    }

    /// Path of one glossary unit file. `name` must already be sanitized.
    #[must_use]
    pub fn term_file(&self, name: &str) -> PathBuf {
        self.glossary_dir().join(format!("{name}.txt"))
    }

    /// Path of the run manifest.
    #[must_use]
    pub fn manifest_file(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    /// Create the root, rules and glossary directories.
    ///
    /// Idempotent: pre-existing directories are not an error.
    pub fn create_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.rules_dir())?;
        fs::create_dir_all(self.glossary_dir())?;
        Ok(())
    }
}

/// Machine-readable summary of one harvest run.
#[derive(Debug, Serialize)]
pub struct Manifest {
    /// URL the document was fetched from.
    pub source_url: String,

    /// Whether an index unit was written.
    pub index: bool,

    /// Rule ids, in write order.
    pub rules: Vec<String>,

    /// Sanitized glossary destination names, in write order.
    pub glossary: Vec<String>,
}

/// Sink that writes each unit into the [`Layout`] and records what it wrote.
#[derive(Debug)]
pub struct FileSink<'a> {
    layout: &'a Layout,
    index_written: bool,
    rules: Vec<String>,
    glossary: Vec<String>,
}

impl<'a> FileSink<'a> {
    /// Create a sink writing into `layout`.
    ///
    /// The layout's directories must already exist (see
    /// [`Layout::create_dirs`]).
    #[must_use]
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            index_written: false,
            rules: Vec::new(),
            glossary: Vec::new(),
        }
    }

    /// Consume the sink into a manifest of everything it wrote.
    #[must_use]
    pub fn into_manifest(self, source_url: &str) -> Manifest {
        Manifest {
            source_url: source_url.to_string(),
            index: self.index_written,
            rules: self.rules,
            glossary: self.glossary,
        }
    }
}

impl SegmentSink for FileSink<'_> {
    fn write_unit(&mut self, unit: OutputUnit) -> Result<()> {
        let path = match unit.kind {
            UnitKind::Index => self.layout.index_file(),
            UnitKind::Rule => self.layout.rule_file(&unit.name),
            UnitKind::GlossaryTerm => self.layout.term_file(&unit.name),
        };

        // Unit text carries no trailing newline; written as-is
        fs::write(&path, &unit.text)?;
        tracing::debug!(
            path = %path.display(),
            len = unit.text.len(),
            "Unit written"
        );

        match unit.kind {
            UnitKind::Index => self.index_written = true,
            UnitKind::Rule => self.rules.push(unit.name),
            UnitKind::GlossaryTerm => self.glossary.push(unit.name),
        }
        Ok(())
    }
}

/// Serialize the manifest as pretty-printed JSON into the layout.
pub fn write_manifest(layout: &Layout, manifest: &Manifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(layout.manifest_file(), json)?;
    Ok(())
}
