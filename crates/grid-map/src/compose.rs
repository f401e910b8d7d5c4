//! Joins the user mapping with the identifier dictionary found in the grid.

use grid_model::{ComposedMapping, MappingSpec, NameDictionary, ReverseDictionary};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    /// Block name -> identifier -> replacement value.
    pub mapping: ComposedMapping,
    /// Identifier -> category name, for diagnostics.
    pub reverse: ReverseDictionary,
    /// Categories from the mapping file that the grid does not declare.
    pub dropped_categories: Vec<String>,
}

/// Re-keys `category -> attribute -> value` into `attribute -> identifier -> value`.
///
/// Categories without an identifier in `dictionary` are left out.
pub fn compose_mapping(spec: &MappingSpec, dictionary: &NameDictionary) -> Composition {
    let mut composition = Composition {
        reverse: dictionary.reverse(),
        ..Composition::default()
    };
    for (category, attributes) in spec.iter() {
        let Some(identifier) = dictionary.identifier(category) else {
            debug!(category = %category, "category not declared in grid, ignoring");
            composition.dropped_categories.push(category.clone());
            continue;
        };
        for (attribute, value) in attributes {
            composition
                .mapping
                .insert(attribute.as_str(), identifier, value.as_str());
        }
    }
    composition
}
