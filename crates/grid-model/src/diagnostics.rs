//! Deferred, deduplicated diagnostics for end-of-run reporting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Distinct diagnostic messages with occurrence counts.
///
/// Recording the same message twice keeps a single entry. Iteration is in
/// sorted message order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    messages: BTreeMap<String, u64>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message. Returns true the first time a message is seen.
    pub fn record(&mut self, message: impl Into<String>) -> bool {
        let count = self.messages.entry(message.into()).or_insert(0);
        *count += 1;
        *count == 1
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.contains_key(message)
    }

    /// Number of times `message` was recorded.
    pub fn occurrences(&self, message: &str) -> u64 {
        self.messages.get(message).copied().unwrap_or(0)
    }

    /// Sorted distinct messages.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Sorted `(message, occurrences)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.messages
            .iter()
            .map(|(message, count)| (message.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drains all messages in sorted order.
    pub fn drain_sorted(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages).into_keys().collect()
    }
}

/// Message for a data row whose length differs from its lookup row.
pub fn mismatch_message(block: &str) -> String {
    format!("Value count/types mismatch - {block}")
}

/// Message for an identifier with no mapping in `block`.
pub fn missing_mapping_message(category: Option<&str>, identifier: &str, block: &str) -> String {
    match category {
        Some(category) => format!("Mapping {category} - {block} missing"),
        None => format!("Mapping id {identifier} - {block} missing"),
    }
}
