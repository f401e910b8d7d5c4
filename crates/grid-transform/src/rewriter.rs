//! Second pass: stream the grid file and rewrite recognised data blocks.
//!
//! Lines are copied verbatim except inside blocks whose header names a key of
//! the composed mapping. For every row of such a block the lookup cursor
//! yields the matching row of identifiers, and each identifier is written out
//! as its mapped value (or the sentinel when unmapped).

use std::io::{BufRead, Seek, Write};
use std::time::Instant;

use grid_model::grammar::{is_blank, is_comment, is_terminator};
use grid_model::{
    BlockMap, ComposedMapping, Diagnostics, MismatchPolicy, RemapOptions, Result,
    ReverseDictionary, mismatch_message, missing_mapping_message,
};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::cursor::LookupCursor;

/// Counters gathered during a rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RewriteStats {
    pub lines_read: u64,
    pub blocks_remapped: u64,
    pub rows_rewritten: u64,
    pub rows_mismatched: u64,
    pub values_mapped: u64,
    pub values_substituted: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    pub stats: RewriteStats,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Copy)]
enum RewriteState<'a> {
    Copy,
    Remap { block: &'a str, map: &'a BlockMap },
}

pub struct StreamingRewriter<'a, L> {
    mapping: &'a ComposedMapping,
    reverse: &'a ReverseDictionary,
    options: &'a RemapOptions,
    lookup: LookupCursor<L>,
    state: RewriteState<'a>,
    outcome: RewriteOutcome,
}

impl<'a, L: BufRead + Seek> StreamingRewriter<'a, L> {
    pub fn new(
        mapping: &'a ComposedMapping,
        reverse: &'a ReverseDictionary,
        options: &'a RemapOptions,
        lookup: LookupCursor<L>,
    ) -> Self {
        Self {
            mapping,
            reverse,
            options,
            lookup,
            state: RewriteState::Copy,
            outcome: RewriteOutcome::default(),
        }
    }

    /// Name of the block currently being rewritten.
    pub fn active_block(&self) -> Option<&'a str> {
        match self.state {
            RewriteState::Copy => None,
            RewriteState::Remap { block, .. } => Some(block),
        }
    }

    /// Processes one input line, including its line terminator.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or reading the lookup cursor fails.
    pub fn process_line<W: Write>(&mut self, line: &str, output: &mut W) -> Result<()> {
        self.outcome.stats.lines_read += 1;
        match self.state {
            RewriteState::Remap { block, .. } if is_terminator(line) => {
                output.write_all(line.as_bytes())?;
                self.lookup.rewind()?;
                self.state = RewriteState::Copy;
                debug!(block = %block, "block rewrite finished");
            }
            RewriteState::Remap { block, map } => self.rewrite_row(block, map, line, output)?,
            RewriteState::Copy if is_comment(line) || is_blank(line) => {
                output.write_all(line.as_bytes())?;
            }
            RewriteState::Copy => {
                output.write_all(line.as_bytes())?;
                let mapping = self.mapping;
                if let Some((block, map)) = mapping.block_for_header(line) {
                    self.lookup.rewind()?;
                    self.state = RewriteState::Remap { block, map };
                    self.outcome.stats.blocks_remapped += 1;
                    debug!(block = %block, identifiers = map.len(), "block rewrite started");
                }
            }
        }
        Ok(())
    }

    fn rewrite_row<W: Write>(
        &mut self,
        block: &'a str,
        map: &'a BlockMap,
        line: &str,
        output: &mut W,
    ) -> Result<()> {
        let lookup_line = self.lookup.next_line()?;
        let identifiers: Vec<&str> = lookup_line.split_whitespace().collect();
        let values = line.split_whitespace().count();
        if identifiers.len() != values {
            self.outcome.stats.rows_mismatched += 1;
            if self.outcome.diagnostics.record(mismatch_message(block)) {
                debug!(
                    block = %block,
                    expected = identifiers.len(),
                    actual = values,
                    "value count/types mismatch"
                );
            }
            if self.options.mismatch_policy == MismatchPolicy::PassThrough {
                output.write_all(line.as_bytes())?;
            }
            return Ok(());
        }
        for identifier in identifiers {
            output.write_all(b" ")?;
            match map.get(identifier) {
                Some(value) => {
                    output.write_all(value.as_bytes())?;
                    self.outcome.stats.values_mapped += 1;
                }
                None => {
                    output.write_all(self.options.sentinel.as_bytes())?;
                    self.outcome.stats.values_substituted += 1;
                    let message =
                        missing_mapping_message(self.reverse.category(identifier), identifier, block);
                    if self.outcome.diagnostics.record(message) {
                        trace!(block = %block, identifier, "identifier has no mapping");
                    }
                }
            }
        }
        output.write_all(b"\n")?;
        self.outcome.stats.rows_rewritten += 1;
        Ok(())
    }

    /// Streams `input` into `output` and returns the collected outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if any read or write fails.
    pub fn rewrite<R: BufRead, W: Write>(
        mut self,
        mut input: R,
        mut output: W,
    ) -> Result<RewriteOutcome> {
        let start = Instant::now();
        let mut line = String::new();
        loop {
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            self.process_line(&line, &mut output)?;
        }
        output.flush()?;
        if let Some(block) = self.active_block() {
            warn!(block = %block, "input ended inside a rewritten block");
        }
        let stats = self.outcome.stats;
        info!(
            lines = stats.lines_read,
            blocks = stats.blocks_remapped,
            rows = stats.rows_rewritten,
            mismatched = stats.rows_mismatched,
            substituted = stats.values_substituted,
            duration_ms = start.elapsed().as_millis(),
            "rewrite complete"
        );
        Ok(self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use grid_model::NameDictionary;

    use super::*;

    fn run(
        input: &str,
        lookup_start: u64,
        mapping: &ComposedMapping,
        reverse: &ReverseDictionary,
        options: &RemapOptions,
    ) -> (String, RewriteOutcome) {
        let lookup =
            LookupCursor::new(Cursor::new(input.as_bytes()), lookup_start).expect("cursor");
        let rewriter = StreamingRewriter::new(mapping, reverse, options, lookup);
        let mut output = Vec::new();
        let outcome = rewriter
            .rewrite(input.as_bytes(), &mut output)
            .expect("rewrite");
        (String::from_utf8(output).expect("utf8"), outcome)
    }

    #[test]
    fn rewrites_identifiers_through_block_map() {
        let input = "SATNUM\n1 1\n/\n";
        let mut mapping = ComposedMapping::new();
        mapping.insert("SATNUM", "1", "7");
        let reverse = NameDictionary::from_iter([("Sand", "1")]).reverse();
        let (output, outcome) = run(input, 7, &mapping, &reverse, &RemapOptions::default());
        assert_eq!(output, "SATNUM\n 7 7\n/\n");
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.stats.values_mapped, 2);
        assert_eq!(outcome.stats.blocks_remapped, 1);
    }

    #[test]
    fn unmapped_identifier_writes_sentinel() {
        let input = "SATNUM\n1 2\n/\n";
        let mut mapping = ComposedMapping::new();
        mapping.insert("SATNUM", "1", "7");
        let reverse = NameDictionary::from_iter([("Sand", "1"), ("Shale", "2")]).reverse();
        let (output, outcome) = run(input, 7, &mapping, &reverse, &RemapOptions::default());
        assert_eq!(output, "SATNUM\n 7 0\n/\n");
        assert!(outcome.diagnostics.contains("Mapping Shale - SATNUM missing"));
        assert_eq!(outcome.stats.values_substituted, 1);
    }

    #[test]
    fn uses_lookup_rows_not_data_values() {
        // PERMX values are replaced according to the SATNUM identifiers.
        let input = "SATNUM\n1 2\n/\nPERMX\n100.0 5.5\n/\n";
        let mut mapping = ComposedMapping::new();
        mapping.insert("PERMX", "1", "250");
        mapping.insert("PERMX", "2", "0.1");
        let reverse = ReverseDictionary::default();
        let (output, _) = run(input, 7, &mapping, &reverse, &RemapOptions::default());
        assert_eq!(output, "SATNUM\n1 2\n/\nPERMX\n 250 0.1\n/\n");
    }

    #[test]
    fn mismatched_row_passes_through_by_default() {
        let input = "SATNUM\n1 1\n/\nPERMX\n5 5 5\n/\n";
        let mut mapping = ComposedMapping::new();
        mapping.insert("PERMX", "1", "9");
        let reverse = ReverseDictionary::default();
        let (output, outcome) = run(input, 7, &mapping, &reverse, &RemapOptions::default());
        assert_eq!(output, input);
        assert_eq!(outcome.stats.rows_mismatched, 1);
        assert!(outcome.diagnostics.contains("Value count/types mismatch - PERMX"));
    }

    #[test]
    fn mismatched_row_dropped_when_requested() {
        let input = "SATNUM\n1 1\n/\nPERMX\n5 5 5\n/\n";
        let mut mapping = ComposedMapping::new();
        mapping.insert("PERMX", "1", "9");
        let reverse = ReverseDictionary::default();
        let options = RemapOptions::default().with_mismatch_policy(MismatchPolicy::Drop);
        let (output, _) = run(input, 7, &mapping, &reverse, &options);
        assert_eq!(output, "SATNUM\n1 1\n/\nPERMX\n/\n");
    }

    #[test]
    fn lookup_rewinds_for_each_block() {
        let input = "SATNUM\n1\n2\n/\nPERMX\na\nb\n/\nPERMX\nc\nd\n/\n";
        let mut mapping = ComposedMapping::new();
        mapping.insert("PERMX", "1", "10");
        mapping.insert("PERMX", "2", "20");
        let reverse = ReverseDictionary::default();
        let (output, outcome) = run(input, 7, &mapping, &reverse, &RemapOptions::default());
        assert_eq!(
            output,
            "SATNUM\n1\n2\n/\nPERMX\n 10\n 20\n/\nPERMX\n 10\n 20\n/\n"
        );
        assert_eq!(outcome.stats.blocks_remapped, 2);
    }

    #[test]
    fn unknown_identifier_without_category_is_reported_by_id() {
        let input = "SATNUM\n4\n/\n";
        let mut mapping = ComposedMapping::new();
        mapping.insert("SATNUM", "1", "7");
        let reverse = ReverseDictionary::default();
        let options = RemapOptions::default().with_sentinel("-1");
        let (output, outcome) = run(input, 7, &mapping, &reverse, &options);
        assert_eq!(output, "SATNUM\n -1\n/\n");
        assert!(outcome.diagnostics.contains("Mapping id 4 - SATNUM missing"));
    }

    #[test]
    fn comment_and_unrelated_lines_are_copied() {
        let input = "-- SATNUM\nSATNUM 1\n\nPORO\n0.2\n/";
        let mut mapping = ComposedMapping::new();
        mapping.insert("SATNUM", "1", "7");
        let reverse = ReverseDictionary::default();
        let (output, outcome) = run(input, 0, &mapping, &reverse, &RemapOptions::default());
        assert_eq!(output, input);
        assert_eq!(outcome.stats.blocks_remapped, 0);
    }
}
