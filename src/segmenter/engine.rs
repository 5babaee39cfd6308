//! The segmentation state machine.

use super::sink::SegmentSink;
use super::types::{GlossaryState, IndexState, Mode, OutputUnit, RulesState};
use crate::config::{
    rule_prefix, CONTENTS_MARKER, CREDITS_MARKER, GLOSSARY_MARKER, RULES_START_MARKER,
};
use crate::error::Result;

/// Stateful line consumer that segments the rules document.
///
/// Created once per run in index mode; fed stripped lines in document
/// order; becomes a no-op once finished. Structural surprises (markers
/// missing or out of order) never fail a run: the segmenter trusts the
/// document and degrades to empty or missing units.
#[derive(Debug, Default)]
pub struct Segmenter {
    mode: Mode,
    buffer: Vec<String>,
}

/// Take the accumulated lines as one text block, leaving the buffer empty.
fn drain_buffer(buffer: &mut Vec<String>) -> String {
    let text = buffer.join("\n");
    buffer.clear();
    text
}

impl Segmenter {
    /// Create a segmenter at the start of a run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode name, for logging.
    #[must_use]
    pub fn mode_name(&self) -> &'static str {
        self.mode.name()
    }

    /// Whether all structured content has been consumed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.mode, Mode::Finished)
    }

    /// Consume one line, already stripped of surrounding whitespace.
    ///
    /// Routes to the handler for the current mode; in finished mode the
    /// line is ignored. Errors only surface from the sink.
    pub fn consume(&mut self, line: &str, sink: &mut dyn SegmentSink) -> Result<()> {
        let next = match &mut self.mode {
            Mode::Index(state) => Self::consume_index(state, &mut self.buffer, line, sink)?,
            Mode::Rules(state) => Self::consume_rules(state, &mut self.buffer, line, sink)?,
            Mode::Glossary(state) => Self::consume_glossary(state, &mut self.buffer, line, sink)?,
            Mode::Finished => None,
        };

        if let Some(mode) = next {
            tracing::debug!(from = self.mode.name(), to = mode.name(), "Mode transition");
            self.mode = mode;
        }
        Ok(())
    }

    /// Feed a whole line source through the segmenter.
    ///
    /// Strips each line before consuming it, honoring the input contract
    /// that the segmenter never sees raw line terminators.
    pub fn segment<I, S>(&mut self, lines: I, sink: &mut dyn SegmentSink) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.consume(line.as_ref().trim(), sink)?;
        }
        Ok(())
    }

    /// Index mode: skip front matter until `Contents`, collect until the
    /// `Glossary` entry inside the listing, then flush the index unit.
    fn consume_index(
        state: &mut IndexState,
        buffer: &mut Vec<String>,
        line: &str,
        sink: &mut dyn SegmentSink,
    ) -> Result<Option<Mode>> {
        if line.is_empty() {
            return Ok(None);
        }

        if !state.found_contents {
            if line == CONTENTS_MARKER {
                state.found_contents = true;
            }
            return Ok(None);
        }

        // First "Glossary" after "Contents" ends the listing. Fragile by
        // construction, but the document has never repeated it earlier.
        if line == GLOSSARY_MARKER {
            sink.write_unit(OutputUnit::index(drain_buffer(buffer)))?;
            return Ok(Some(Mode::Rules(RulesState::default())));
        }

        buffer.push(line.to_string());
        Ok(None)
    }

    /// Rules mode: skip until the first section heading, then split on
    /// changes of the 3-digit rule prefix.
    fn consume_rules(
        state: &mut RulesState,
        buffer: &mut Vec<String>,
        line: &str,
        sink: &mut dyn SegmentSink,
    ) -> Result<Option<Mode>> {
        if line.is_empty() {
            return Ok(None);
        }

        if !state.found_start {
            if line == RULES_START_MARKER {
                state.found_start = true;
            }
            return Ok(None);
        }

        if let Some(id) = rule_prefix(line) {
            match state.current_rule.take() {
                None => {
                    state.current_rule = Some(id.to_string());
                    buffer.push(line.to_string());
                }
                Some(current) if current == id => {
                    state.current_rule = Some(current);
                    buffer.push(line.to_string());
                }
                Some(current) => {
                    // New top-level rule: flush the open one. The boundary
                    // line itself is not buffered, matching the historical
                    // segmenter output.
                    sink.write_unit(OutputUnit::rule(&current, drain_buffer(buffer)))?;
                    state.current_rule = Some(id.to_string());
                }
            }
            return Ok(None);
        }

        if line == GLOSSARY_MARKER {
            match state.current_rule.take() {
                Some(current) => {
                    sink.write_unit(OutputUnit::rule(&current, drain_buffer(buffer)))?;
                }
                None => {
                    tracing::warn!("Glossary marker reached before any rule opened");
                    buffer.clear();
                }
            }
            return Ok(Some(Mode::Glossary(GlossaryState::default())));
        }

        // Wrapped continuation text, examples, intervening section headings
        buffer.push(line.to_string());
        Ok(None)
    }

    /// Glossary mode: alternating term lines and blank-terminated
    /// definition paragraphs, until `Credits`.
    fn consume_glossary(
        state: &mut GlossaryState,
        buffer: &mut Vec<String>,
        line: &str,
        sink: &mut dyn SegmentSink,
    ) -> Result<Option<Mode>> {
        if line == CREDITS_MARKER {
            // A term still open here is dropped along with its buffer
            return Ok(Some(Mode::Finished));
        }

        if line.is_empty() {
            if let Some(term) = state.current_term.take() {
                sink.write_unit(OutputUnit::term(&term, drain_buffer(buffer)))?;
            }
            return Ok(None);
        }

        if state.current_term.is_none() {
            // Term line; not part of the definition content
            state.current_term = Some(line.to_string());
            return Ok(None);
        }

        buffer.push(line.to_string());
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::sink::VecSink;
    use crate::segmenter::types::UnitKind;
    use pretty_assertions::assert_eq;

    /// Feed lines through a fresh segmenter and return the collected units.
    fn run(lines: &[&str]) -> VecSink {
        let mut segmenter = Segmenter::new();
        let mut sink = VecSink::new();
        segmenter
            .segment(lines.iter().copied(), &mut sink)
            .expect("in-memory segmentation");
        sink
    }

    /// Lines that move a fresh segmenter into rules mode, past the start marker.
    fn rules_preamble() -> Vec<&'static str> {
        vec!["Contents", "100. General", "Glossary", "1. Game Concepts"]
    }

    #[test]
    fn test_index_collected_between_markers() {
        let sink = run(&[
            "Magic: The Gathering Comprehensive Rules",
            "",
            "Contents",
            "1. Game Concepts",
            "100. General",
            "Glossary",
        ]);

        assert_eq!(sink.units.len(), 1);
        let index = &sink.units[0];
        assert_eq!(index.kind, UnitKind::Index);
        assert_eq!(index.name, "index");
        assert_eq!(index.text, "1. Game Concepts\n100. General");
    }

    #[test]
    fn test_front_matter_before_contents_discarded() {
        let sink = run(&["Introduction", "Glossary", "Contents", "100. General", "Glossary"]);

        // The "Glossary" before "Contents" must not end the index early
        assert_eq!(sink.units.len(), 1);
        assert_eq!(sink.units[0].text, "100. General");
    }

    #[test]
    fn test_missing_contents_produces_nothing() {
        let mut segmenter = Segmenter::new();
        let mut sink = VecSink::new();
        segmenter
            .segment(["Some line", "Another line", "Glossary"], &mut sink)
            .expect("in-memory segmentation");

        assert!(sink.units.is_empty());
        assert_eq!(segmenter.mode_name(), "index");
    }

    #[test]
    fn test_rule_section_boundaries() {
        let mut lines = rules_preamble();
        lines.extend([
            "100. General",
            "100.1 First sub-rule.",
            "100.2a Nested sub-rule.",
            "101. Starting the Game",
            "101.1 Shuffle.",
            "Glossary",
        ]);
        let sink = run(&lines);

        let unit_100 = sink.find("100").expect("rule 100");
        assert_eq!(
            unit_100.text,
            "100. General\n100.1 First sub-rule.\n100.2a Nested sub-rule."
        );
        assert!(!unit_100.text.contains("101."));
    }

    // Regression guard: the line that triggers a rule boundary is dropped
    // and appears in neither unit.
    #[test]
    fn test_boundary_line_is_dropped() {
        let mut lines = rules_preamble();
        lines.extend([
            "100. First",
            "100.1 sub",
            "101. Second",
            "101.1 sub",
            "Glossary",
        ]);
        let sink = run(&lines);

        assert_eq!(sink.find("100").expect("rule 100").text, "100. First\n100.1 sub");
        assert_eq!(sink.find("101").expect("rule 101").text, "101.1 sub");
    }

    #[test]
    fn test_free_text_buffered_with_open_rule() {
        let mut lines = rules_preamble();
        lines.extend([
            "100. General",
            "Example: A wrapped continuation line.",
            "2. Parts of a Card",
            "100.1 More.",
            "Glossary",
        ]);
        let sink = run(&lines);

        assert_eq!(
            sink.find("100").expect("rule 100").text,
            "100. General\nExample: A wrapped continuation line.\n2. Parts of a Card\n100.1 More."
        );
    }

    #[test]
    fn test_rules_skipped_before_start_marker() {
        let sink = run(&[
            "Contents",
            "100. General",
            "Glossary",
            "100. Residual index noise",
            "1. Game Concepts",
            "100. General",
            "Glossary",
        ]);

        // The rule-shaped line before "1. Game Concepts" is discarded
        assert_eq!(sink.find("100").expect("rule 100").text, "100. General");
    }

    #[test]
    fn test_glossary_terms_split_on_blank_lines() {
        let mut lines = rules_preamble();
        lines.extend([
            "Glossary",
            "Term One",
            "Definition line A",
            "Definition line B",
            "",
            "Term Two",
            "Def C",
            "",
            "Credits",
        ]);
        let sink = run(&lines);

        assert_eq!(
            sink.find("term_one").expect("term one").text,
            "Definition line A\nDefinition line B"
        );
        assert_eq!(sink.find("term_two").expect("term two").text, "Def C");
    }

    // An empty-definition term still produces a unit, with empty text.
    #[test]
    fn test_empty_definition_term() {
        let mut lines = rules_preamble();
        lines.extend(["Glossary", "Term X", "", "Term Y", "Def", "", "Credits"]);
        let sink = run(&lines);

        assert_eq!(sink.find("term_x").expect("term x").text, "");
        assert_eq!(sink.find("term_y").expect("term y").text, "Def");
    }

    #[test]
    fn test_term_name_sanitized() {
        let mut lines = rules_preamble();
        lines.extend(["Glossary", "Mana Value", "Some definition.", "", "Credits"]);
        let sink = run(&lines);

        let unit = sink.find("mana_value").expect("sanitized name");
        assert!(unit
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '_'));
    }

    #[test]
    fn test_unflushed_term_dropped_at_credits() {
        let mut lines = rules_preamble();
        lines.extend(["Glossary", "Term Open", "Pending definition", "Credits"]);
        let sink = run(&lines);

        // Only the rule unit from the preamble; the open term never flushes
        assert!(sink.units.iter().all(|u| u.kind != UnitKind::GlossaryTerm));
    }

    #[test]
    fn test_finished_is_a_no_op() {
        let mut segmenter = Segmenter::new();
        let mut sink = VecSink::new();
        let mut lines = rules_preamble();
        lines.extend(["Glossary", "Credits"]);
        segmenter
            .segment(lines, &mut sink)
            .expect("in-memory segmentation");
        assert!(segmenter.is_finished());

        let written = sink.units.len();
        segmenter
            .segment(["100. General", "Term", "Def", "", "Credits"], &mut sink)
            .expect("in-memory segmentation");

        assert_eq!(sink.units.len(), written);
        assert!(segmenter.is_finished());
    }

    #[test]
    fn test_empty_lines_are_neutral() {
        let sink = run(&[
            "",
            "Contents",
            "",
            "100. General",
            "",
            "Glossary",
            "",
            "1. Game Concepts",
            "",
            "100. General",
            "",
            "100.1 Sub.",
            "Glossary",
        ]);

        assert_eq!(sink.find("index").expect("index").text, "100. General");
        assert_eq!(
            sink.find("100").expect("rule 100").text,
            "100. General\n100.1 Sub."
        );
    }

    #[test]
    fn test_segment_strips_lines() {
        let mut segmenter = Segmenter::new();
        let mut sink = VecSink::new();
        segmenter
            .segment(
                ["Contents\n", "  100. General  ", "Glossary\r\n"],
                &mut sink,
            )
            .expect("in-memory segmentation");

        assert_eq!(sink.find("index").expect("index").text, "100. General");
    }

    #[test]
    fn test_end_of_input_does_not_flush() {
        let mut segmenter = Segmenter::new();
        let mut sink = VecSink::new();
        let mut lines = rules_preamble();
        lines.extend(["100. General", "100.1 Sub."]);
        segmenter
            .segment(lines, &mut sink)
            .expect("in-memory segmentation");
        drop(segmenter);

        // Rule 100 never closed: no unit for it
        assert!(sink.find("100").is_none());
    }

    #[test]
    fn test_each_destination_written_once() {
        let mut lines = rules_preamble();
        lines.extend([
            "100. General",
            "101. Next",
            "102. After",
            "Glossary",
            "Ability",
            "A thing.",
            "",
            "Credits",
        ]);
        let sink = run(&lines);

        let mut names: Vec<&str> = sink.units.iter().map(|u| u.name.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}
