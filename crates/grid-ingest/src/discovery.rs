//! First pass over the grid file: find the identifier dictionary.
//!
//! The dictionary for a block type is declared in framed comments right
//! before the block header:
//!
//! ```text
//! -- 1 = Sand --
//! -- 2 = Shale --
//! SATNUM
//! 1 1 2
//! /
//! ```
//!
//! Scanning is a small state machine fed one line at a time so it can be
//! exercised without any I/O.

use std::io::BufRead;
use std::time::Instant;

use grid_model::grammar::{framed_comment, is_blank, is_comment, is_terminator};
use grid_model::{NameDictionary, PREAMBLE_SEPARATOR};
use tracing::{debug, info};

/// Scanner state between two lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryState {
    /// Still inside the leading comment header of the file.
    HeaderSkip,
    /// Between blocks with no pending preamble.
    Idle,
    /// Accumulating framed comment lines that may precede the target block.
    CollectingPreamble(Vec<String>),
    /// Inside a block body, waiting for its terminator.
    SkippingForeignBlock,
}

/// Line-driven dictionary discoverer.
#[derive(Debug)]
pub struct DictionaryDiscoverer {
    block_name: String,
    state: DiscoveryState,
    dictionary: Option<NameDictionary>,
    target_blocks: usize,
}

impl DictionaryDiscoverer {
    pub fn new(block_name: impl Into<String>) -> Self {
        Self {
            block_name: block_name.into(),
            state: DiscoveryState::HeaderSkip,
            dictionary: None,
            target_blocks: 0,
        }
    }

    pub fn state(&self) -> &DiscoveryState {
        &self.state
    }

    /// Number of target block headers seen so far.
    pub fn target_blocks(&self) -> usize {
        self.target_blocks
    }

    /// Advances the state machine by one line.
    pub fn feed_line(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, DiscoveryState::Idle);
        self.state = self.transition(state, line);
    }

    fn transition(&mut self, state: DiscoveryState, line: &str) -> DiscoveryState {
        match state {
            // The first non-comment line ends the header and is not examined.
            DiscoveryState::HeaderSkip if is_comment(line) => DiscoveryState::HeaderSkip,
            DiscoveryState::HeaderSkip => DiscoveryState::Idle,
            DiscoveryState::SkippingForeignBlock if is_terminator(line) => DiscoveryState::Idle,
            DiscoveryState::SkippingForeignBlock => DiscoveryState::SkippingForeignBlock,
            DiscoveryState::Idle => self.scan(Vec::new(), line),
            DiscoveryState::CollectingPreamble(preamble) => self.scan(preamble, line),
        }
    }

    fn scan(&mut self, mut preamble: Vec<String>, line: &str) -> DiscoveryState {
        if let Some(text) = framed_comment(line) {
            preamble.push(text.to_string());
            return DiscoveryState::CollectingPreamble(preamble);
        }
        if is_blank(line) {
            return collecting(preamble);
        }
        if !line.starts_with(self.block_name.as_str()) {
            return DiscoveryState::SkippingForeignBlock;
        }
        self.target_blocks += 1;
        let dictionary = build_dictionary(&preamble);
        debug!(
            block = %self.block_name,
            entries = dictionary.len(),
            occurrence = self.target_blocks,
            "dictionary block header found"
        );
        // A later header replaces the whole dictionary.
        self.dictionary = Some(dictionary);
        collecting(preamble)
    }

    /// Dictionary of the last target block, or `None` if no header was seen.
    pub fn finish(self) -> Option<NameDictionary> {
        self.dictionary
    }
}

fn collecting(preamble: Vec<String>) -> DiscoveryState {
    if preamble.is_empty() {
        DiscoveryState::Idle
    } else {
        DiscoveryState::CollectingPreamble(preamble)
    }
}

fn build_dictionary(preamble: &[String]) -> NameDictionary {
    let mut dictionary = NameDictionary::new();
    for entry in preamble {
        match entry.split_once(PREAMBLE_SEPARATOR) {
            Some((identifier, category)) => {
                dictionary.insert(category.trim(), identifier.trim());
            }
            None => debug!(entry = %entry, "preamble line is not a dictionary entry"),
        }
    }
    dictionary
}

/// Result of the discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Category -> identifier from the last target block preamble.
    pub dictionary: NameDictionary,
    /// Whether a target block header was found at all.
    pub found: bool,
    /// Number of target block headers seen.
    pub target_blocks: usize,
}

/// Scans a grid file for the dictionary preceding `block_name`.
///
/// A missing target block is not an error; the returned dictionary is empty
/// and [`Discovery::found`] is false.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn discover_dictionary<R: BufRead>(
    mut reader: R,
    block_name: &str,
) -> std::io::Result<Discovery> {
    let start = Instant::now();
    let mut discoverer = DictionaryDiscoverer::new(block_name);
    let mut line = String::new();
    let mut lines = 0usize;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        lines += 1;
        discoverer.feed_line(&line);
    }
    let target_blocks = discoverer.target_blocks();
    let dictionary = discoverer.finish();
    let found = dictionary.is_some();
    let dictionary = dictionary.unwrap_or_default();
    info!(
        block = %block_name,
        found,
        entries = dictionary.len(),
        lines,
        duration_ms = start.elapsed().as_millis(),
        "dictionary discovery complete"
    );
    Ok(Discovery {
        dictionary,
        found,
        target_blocks,
    })
}
