//! Line-driven segmentation of the rules document.
//!
//! The [`Segmenter`] consumes one stripped line at a time and moves through
//! four modes (index, rules, glossary, finished), emitting an
//! [`OutputUnit`] to a [`SegmentSink`] every time a logical unit closes.
//! The sink is the only external capability the segmenter touches; file
//! placement lives in [`crate::output`].

pub mod engine;
pub mod sink;
pub mod types;

pub use engine::Segmenter;
pub use sink::{SegmentSink, VecSink};
pub use types::{GlossaryState, IndexState, Mode, OutputUnit, RulesState, UnitKind};
