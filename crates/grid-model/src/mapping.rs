//! Mapping tables shared by the parser, discoverer, composer and rewriter.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Attribute assignments for one category: attribute (block name) -> raw value.
pub type CategoryAttributes = BTreeMap<String, String>;

/// User-supplied mapping: category name -> attribute -> raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSpec {
    categories: BTreeMap<String, CategoryAttributes>,
}

impl MappingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `category` with an empty attribute table, discarding any
    /// attributes collected under an earlier declaration of the same name.
    pub fn open_category(&mut self, category: impl Into<String>) {
        self.categories.insert(category.into(), CategoryAttributes::new());
    }

    /// Sets an attribute, replacing an earlier value for the same pair.
    pub fn set(
        &mut self,
        category: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(attribute.into(), value.into());
    }

    pub fn category(&self, name: &str) -> Option<&CategoryAttributes> {
        self.categories.get(name)
    }

    pub fn get(&self, category: &str, attribute: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|attributes| attributes.get(attribute))
            .map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, CategoryAttributes> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Identifier dictionary declared in a block preamble.
///
/// Preamble lines have the shape `-- <identifier> = <category> --`; the table
/// is keyed by category so the composer can resolve a category to the token
/// used in data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDictionary {
    identifiers: BTreeMap<String, String>,
}

impl NameDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, identifier: impl Into<String>) {
        self.identifiers.insert(category.into(), identifier.into());
    }

    /// Identifier token used for `category` in data rows.
    pub fn identifier(&self, category: &str) -> Option<&str> {
        self.identifiers.get(category).map(String::as_str)
    }

    /// Iterates `(category, identifier)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.identifiers
            .iter()
            .map(|(category, identifier)| (category.as_str(), identifier.as_str()))
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Builds the identifier -> category table used for diagnostics.
    pub fn reverse(&self) -> ReverseDictionary {
        let mut reverse = ReverseDictionary::default();
        for (category, identifier) in &self.identifiers {
            reverse
                .categories
                .insert(identifier.clone(), category.clone());
        }
        reverse
    }
}

impl<C: Into<String>, I: Into<String>> FromIterator<(C, I)> for NameDictionary {
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for (category, identifier) in iter {
            dictionary.insert(category, identifier);
        }
        dictionary
    }
}

/// Identifier -> category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseDictionary {
    categories: BTreeMap<String, String>,
}

impl ReverseDictionary {
    pub fn category(&self, identifier: &str) -> Option<&str> {
        self.categories.get(identifier).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Replacement values for one data block: identifier -> replacement.
pub type BlockMap = BTreeMap<String, String>;

/// Final table consulted while rewriting: block name -> identifier -> value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedMapping {
    blocks: BTreeMap<String, BlockMap>,
}

impl ComposedMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        block: impl Into<String>,
        identifier: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.blocks
            .entry(block.into())
            .or_default()
            .insert(identifier.into(), value.into());
    }

    pub fn block(&self, name: &str) -> Option<&BlockMap> {
        self.blocks.get(name)
    }

    /// Looks up a block map by a header line, ignoring surrounding whitespace.
    pub fn block_for_header(&self, line: &str) -> Option<(&str, &BlockMap)> {
        self.blocks
            .get_key_value(line.trim())
            .map(|(name, map)| (name.as_str(), map))
    }

    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
