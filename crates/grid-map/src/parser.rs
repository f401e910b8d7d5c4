//! Parser for the mapping file.
//!
//! The format is a minimal sectioned key/value text:
//!
//! ```text
//! # comment
//! [Sand]
//! SATNUM=1
//! PERMX=250
//! ```
//!
//! Lines that are neither comments, section headers nor `attribute=value`
//! pairs are skipped without failing the parse. They are returned in
//! [`ParsedMappingSpec::skipped`] so callers can surface them.

use std::io::BufRead;

use grid_model::MappingSpec;

/// A mapping file line that was not understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// Line content after trimming.
    pub text: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Line does not contain exactly one `=`.
    NotAPair,
    /// `attribute=value` line before any `[category]` header.
    NoOpenCategory,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::NotAPair => "expected exactly one '='",
            Self::NoOpenCategory => "no [category] header before this line",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMappingSpec {
    pub spec: MappingSpec,
    pub skipped: Vec<SkippedLine>,
}

/// Incremental line-by-line parser.
#[derive(Debug, Default)]
pub struct MappingSpecParser {
    parsed: ParsedMappingSpec,
    current: Option<String>,
    line_number: usize,
}

impl MappingSpecParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed_line(&mut self, raw: &str) {
        self.line_number += 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        if let Some(name) = section_name(line) {
            self.parsed.spec.open_category(name);
            self.current = Some(name.to_string());
            return;
        }
        let mut parts = line.split('=');
        let (Some(attribute), Some(value), None) = (parts.next(), parts.next(), parts.next())
        else {
            self.skip(line, SkipReason::NotAPair);
            return;
        };
        match &self.current {
            Some(category) => self.parsed.spec.set(category.as_str(), attribute, value),
            None => self.skip(line, SkipReason::NoOpenCategory),
        }
    }

    pub fn finish(self) -> ParsedMappingSpec {
        self.parsed
    }

    fn skip(&mut self, line: &str, reason: SkipReason) {
        self.parsed.skipped.push(SkippedLine {
            line_number: self.line_number,
            text: line.to_string(),
            reason,
        });
    }
}

fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Parses mapping file text.
pub fn parse_mapping_spec(text: &str) -> ParsedMappingSpec {
    let mut parser = MappingSpecParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Parses a mapping file from a reader.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid UTF-8.
pub fn read_mapping_spec<R: BufRead>(reader: R) -> std::io::Result<ParsedMappingSpec> {
    let mut parser = MappingSpecParser::new();
    for line in reader.lines() {
        parser.feed_line(&line?);
    }
    Ok(parser.finish())
}
