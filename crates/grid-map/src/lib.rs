//! Mapping file handling: parse the user's category table and compose it
//! with the identifier dictionary discovered in the grid file.

pub mod compose;
pub mod parser;

pub use compose::{Composition, compose_mapping};
pub use parser::{
    MappingSpecParser, ParsedMappingSpec, SkipReason, SkippedLine, parse_mapping_spec,
    read_mapping_spec,
};
