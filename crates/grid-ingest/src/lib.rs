//! Grid file scanning passes that run before rewriting.

pub mod discovery;
pub mod lookup;

pub use discovery::{DictionaryDiscoverer, Discovery, DiscoveryState, discover_dictionary};
pub use lookup::{LookupStart, locate_lookup_start};
