pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod mapping;
pub mod options;

pub use diagnostics::{Diagnostics, mismatch_message, missing_mapping_message};
pub use error::{GridError, Result};
pub use grammar::{
    BLOCK_TERMINATOR, COMMENT_PREFIX, DEFAULT_BLOCK_NAME, DEFAULT_SENTINEL, PREAMBLE_SEPARATOR,
};
pub use mapping::{
    BlockMap, CategoryAttributes, ComposedMapping, MappingSpec, NameDictionary, ReverseDictionary,
};
pub use options::{MismatchPolicy, RemapOptions};
