//! Configuration options for a remap run.

use serde::{Deserialize, Serialize};

use crate::grammar::{DEFAULT_BLOCK_NAME, DEFAULT_SENTINEL};

/// What to do with a data row whose value count differs from its lookup row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Copy the data row through unchanged.
    #[default]
    PassThrough,
    /// Omit the data row from the output.
    Drop,
}

/// Options controlling dictionary discovery and rewriting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemapOptions {
    /// Block whose preamble holds the identifier dictionary and whose data
    /// rows give the per-cell identifiers.
    pub block_name: String,

    /// Replacement written for identifiers without a mapping.
    pub sentinel: String,

    /// Handling of rows whose length differs from the lookup row.
    pub mismatch_policy: MismatchPolicy,

    /// Log skipped mapping file lines at warn level instead of debug.
    pub warn_on_malformed_map_lines: bool,
}

impl Default for RemapOptions {
    fn default() -> Self {
        Self {
            block_name: DEFAULT_BLOCK_NAME.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            mismatch_policy: MismatchPolicy::default(),
            warn_on_malformed_map_lines: false,
        }
    }
}

impl RemapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block_name(mut self, name: impl Into<String>) -> Self {
        self.block_name = name.into();
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    pub fn with_malformed_warnings(mut self, enable: bool) -> Self {
        self.warn_on_malformed_map_lines = enable;
        self
    }
}
