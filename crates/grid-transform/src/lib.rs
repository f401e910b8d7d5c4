//! Streaming rewrite of grid data blocks.

pub mod cursor;
pub mod rewriter;

pub use cursor::LookupCursor;
pub use rewriter::{RewriteOutcome, RewriteStats, StreamingRewriter};
