//! The write capability the segmenter emits units through.

use super::types::OutputUnit;
use crate::error::Result;

/// Receiver for completed output units.
///
/// Implementations decide where a unit's text ends up; the segmenter only
/// guarantees each destination name is written at most once per run, in
/// document order.
pub trait SegmentSink {
    /// Write one completed unit.
    fn write_unit(&mut self, unit: OutputUnit) -> Result<()>;
}

/// Sink that collects units in memory.
///
/// Used by tests and by library consumers that want the segments without
/// touching the filesystem.
#[derive(Debug, Default)]
pub struct VecSink {
    pub units: Vec<OutputUnit>,
}

impl VecSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a collected unit by destination name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|u| u.name == name)
    }
}

impl SegmentSink for VecSink {
    fn write_unit(&mut self, unit: OutputUnit) -> Result<()> {
        self.units.push(unit);
        Ok(())
    }
}
