use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use grid_cli::pipeline::{RemapPaths, RunResult, run_remap};
use grid_model::{MismatchPolicy, RemapOptions};

use crate::cli::Cli;

pub fn remap_options(cli: &Cli) -> RemapOptions {
    let policy = if cli.drop_mismatched_rows {
        MismatchPolicy::Drop
    } else {
        MismatchPolicy::PassThrough
    };
    RemapOptions::new()
        .with_block_name(cli.block_name.clone())
        .with_sentinel(cli.sentinel.clone())
        .with_mismatch_policy(policy)
        .with_malformed_warnings(cli.warn_malformed)
}

pub fn run_remap_command(cli: &Cli) -> Result<RunResult> {
    let paths = RemapPaths {
        input: cli.input.clone(),
        map: cli.map.clone(),
        output: cli.output.clone(),
    };
    let options = remap_options(cli);
    let result = run_remap(&paths, &options).context("remap grid file")?;
    if let Some(path) = &cli.summary_json {
        write_summary_json(path, &result)?;
    }
    Ok(result)
}

fn write_summary_json(path: &Path, result: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize run summary")?;
    fs::write(path, json).with_context(|| format!("write summary: {}", path.display()))?;
    Ok(())
}
