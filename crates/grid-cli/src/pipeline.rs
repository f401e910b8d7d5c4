//! End-to-end remap run: open files, discover, compose, rewrite.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Instant;

use grid_ingest::{discover_dictionary, locate_lookup_start};
use grid_map::{ParsedMappingSpec, compose_mapping, read_mapping_spec};
use grid_model::{Diagnostics, GridError, RemapOptions, Result};
use grid_transform::{LookupCursor, RewriteStats, StreamingRewriter};
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

/// Files taking part in one run.
#[derive(Debug, Clone)]
pub struct RemapPaths {
    pub input: PathBuf,
    pub map: PathBuf,
    pub output: PathBuf,
}

/// Everything reported at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub block_name: String,
    /// Whether the dictionary block was present in the input.
    pub dictionary_found: bool,
    pub dictionary_entries: usize,
    pub mapped_blocks: Vec<String>,
    /// Mapping file categories the grid does not declare.
    pub ignored_categories: Vec<String>,
    pub skipped_map_lines: usize,
    pub stats: RewriteStats,
    pub diagnostics: Diagnostics,
}

/// Runs the full remap.
///
/// Setup failures (unreadable map or input, existing or unwritable output)
/// abort before anything is written. Everything else ends up in
/// [`RunResult::diagnostics`].
///
/// # Errors
///
/// Returns a [`GridError`] for setup failures and for read/write failures
/// during the passes.
pub fn run_remap(paths: &RemapPaths, options: &RemapOptions) -> Result<RunResult> {
    let run_span = info_span!("remap", input = %paths.input.display(), block = %options.block_name);
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let parsed = load_mapping_spec(&paths.map)?;
    report_skipped_lines(&parsed, options);
    let mut reader = open_input(&paths.input)?;
    let mut lookup_reader = open_input(&paths.input)?;
    let writer = create_output(&paths.output)?;

    let discovery = discover_dictionary(&mut reader, &options.block_name)?;
    if !discovery.found {
        debug!(block = %options.block_name, "Unable to find mapping block {}", options.block_name);
    }
    let composition = compose_mapping(&parsed.spec, &discovery.dictionary);
    info!(
        categories = parsed.spec.len(),
        blocks = composition.mapping.len(),
        ignored = composition.dropped_categories.len(),
        "mapping composed"
    );

    let lookup_start = locate_lookup_start(&mut lookup_reader, &options.block_name)?;
    let lookup = LookupCursor::new(lookup_reader, lookup_start.offset)?;
    reader.seek(SeekFrom::Start(0))?;

    let rewriter = StreamingRewriter::new(
        &composition.mapping,
        &composition.reverse,
        options,
        lookup,
    );
    let outcome = rewriter.rewrite(reader, writer)?;
    info!(
        diagnostics = outcome.diagnostics.len(),
        duration_ms = start.elapsed().as_millis(),
        "remap complete"
    );

    Ok(RunResult {
        input: paths.input.clone(),
        output: paths.output.clone(),
        block_name: options.block_name.clone(),
        dictionary_found: discovery.found,
        dictionary_entries: discovery.dictionary.len(),
        mapped_blocks: composition.mapping.block_names().map(String::from).collect(),
        ignored_categories: composition.dropped_categories,
        skipped_map_lines: parsed.skipped.len(),
        stats: outcome.stats,
        diagnostics: outcome.diagnostics,
    })
}

fn load_mapping_spec(path: &Path) -> Result<ParsedMappingSpec> {
    let map_unreadable = |source: std::io::Error| GridError::MapUnreadable {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(map_unreadable)?;
    let parsed = read_mapping_spec(BufReader::new(file)).map_err(map_unreadable)?;
    debug!(
        path = %path.display(),
        categories = parsed.spec.len(),
        skipped = parsed.skipped.len(),
        "mapping file parsed"
    );
    Ok(parsed)
}

fn report_skipped_lines(parsed: &ParsedMappingSpec, options: &RemapOptions) {
    for skipped in &parsed.skipped {
        if options.warn_on_malformed_map_lines {
            warn!(
                line = skipped.line_number,
                text = %skipped.text,
                "skipping mapping line: {}",
                skipped.reason.describe()
            );
        } else {
            debug!(
                line = skipped.line_number,
                text = %skipped.text,
                "skipping mapping line: {}",
                skipped.reason.describe()
            );
        }
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| GridError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Creates the output file, refusing to replace an existing one.
fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == ErrorKind::AlreadyExists {
                GridError::OutputExists {
                    path: path.to_path_buf(),
                }
            } else {
                GridError::OutputUnwritable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
    Ok(BufWriter::new(file))
}
