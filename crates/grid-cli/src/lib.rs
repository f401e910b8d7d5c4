//! Library components of the `grid-remap` CLI.

pub mod logging;
pub mod pipeline;
