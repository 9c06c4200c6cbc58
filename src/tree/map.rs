//! Name-ordered attribute maps

use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};

use tracing::{debug, trace};

use super::{ArrayList, AttributeNode, ElementType, Value};
use crate::{Error, Result};

/// Map of uniquely named attributes, iterated in byte-wise name order.
///
/// Name order, not insertion order, drives both the size and encode passes, so two maps holding
/// the same attributes pack to identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    attributes: BTreeMap<String, AttributeNode>,
}

/// Rejected insertion: the attribute already in the map and the node handed back to the caller
#[derive(Debug)]
pub struct Duplicate<'a> {
    existing: &'a AttributeNode,
    rejected: AttributeNode,
}

impl<'a> Duplicate<'a> {
    /// Attribute that holds the name
    #[must_use]
    pub const fn existing(&self) -> &'a AttributeNode {
        self.existing
    }

    /// Node that was not inserted
    #[must_use]
    pub const fn rejected(&self) -> &AttributeNode {
        &self.rejected
    }

    /// Take back ownership of the node that was not inserted
    #[must_use]
    pub fn into_rejected(self) -> AttributeNode {
        self.rejected
    }
}

impl From<Duplicate<'_>> for Error {
    fn from(duplicate: Duplicate<'_>) -> Self {
        Self::DuplicateKey {
            name: duplicate.rejected.name().to_owned(),
        }
    }
}

impl ParameterMap {
    /// Create an empty map
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
        }
    }

    /// Insert an attribute under its name.
    ///
    /// On collision the map is left unchanged and the rejected node is returned inside
    /// [`Duplicate`] alongside the attribute already holding the name.
    pub fn insert(
        &mut self,
        node: AttributeNode,
    ) -> std::result::Result<&mut AttributeNode, Duplicate<'_>> {
        match self.attributes.entry(node.name().to_owned()) {
            Entry::Occupied(entry) => {
                debug!(name = node.name(), "rejecting duplicate attribute");
                Err(Duplicate {
                    existing: entry.into_mut(),
                    rejected: node,
                })
            }
            Entry::Vacant(entry) => {
                trace!(name = node.name(), kind = %node.attribute_type(), "insert attribute");
                Ok(entry.insert(node))
            }
        }
    }

    /// Insert a boolean attribute
    pub fn insert_bool(&mut self, name: impl Into<String>, value: bool) -> Result<()> {
        self.insert(AttributeNode::bool(name, value)?)?;
        Ok(())
    }

    /// Insert a number attribute
    pub fn insert_number(&mut self, name: impl Into<String>, value: u64) -> Result<()> {
        self.insert(AttributeNode::number(name, value)?)?;
        Ok(())
    }

    /// Insert a string attribute
    pub fn insert_string(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        self.insert(AttributeNode::string(name, value)?)?;
        Ok(())
    }

    /// Insert a null attribute
    pub fn insert_null(&mut self, name: impl Into<String>) -> Result<()> {
        self.insert(AttributeNode::null(name)?)?;
        Ok(())
    }

    /// Insert an empty child map and return it for filling
    pub fn create_nested(&mut self, name: impl Into<String>) -> Result<&mut ParameterMap> {
        let node = self.insert(AttributeNode::nested(name)?)?;
        Ok(node
            .as_nested_mut()
            .expect("freshly inserted nested attribute holds a map"))
    }

    /// Insert an empty array and return it for filling
    pub fn create_array(
        &mut self,
        name: impl Into<String>,
        element_type: ElementType,
    ) -> Result<&mut ArrayList> {
        let node = self.insert(AttributeNode::array(name, element_type)?)?;
        Ok(node
            .as_array_mut()
            .expect("freshly inserted array attribute holds an array"))
    }

    /// Get attribute by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeNode> {
        self.attributes.get(name)
    }

    /// Get mutable attribute by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttributeNode> {
        self.attributes.get_mut(name)
    }

    /// Check if an attribute named `name` exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Remove and return an attribute
    pub fn remove(&mut self, name: &str) -> Option<AttributeNode> {
        self.attributes.remove(name)
    }

    /// Number of direct attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the map holds no attributes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate attributes in name order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.attributes.values(),
        }
    }

    /// Iterate names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Get a boolean attribute's value
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)?.value() {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get a number attribute's value
    #[must_use]
    pub fn get_number(&self, name: &str) -> Option<u64> {
        match self.get(name)?.value() {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Get a string attribute's value
    #[must_use]
    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)?.value() {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Get a nested attribute's child map
    #[must_use]
    pub fn get_nested(&self, name: &str) -> Option<&ParameterMap> {
        match self.get(name)?.value() {
            Value::Nested(map) => Some(map),
            _ => None,
        }
    }

    /// Get an array attribute's elements
    #[must_use]
    pub fn get_array(&self, name: &str) -> Option<&ArrayList> {
        match self.get(name)?.value() {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Check if `name` holds a null attribute
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.get(name).map(AttributeNode::value), Some(Value::Null))
    }

    /// Boolean value, or `default` when absent or of another type
    #[must_use]
    pub fn get_bool_or(&self, name: &str, default: bool) -> bool {
        self.get_bool(name).unwrap_or(default)
    }

    /// Number value, or `default` when absent or of another type
    #[must_use]
    pub fn get_number_or(&self, name: &str, default: u64) -> u64 {
        self.get_number(name).unwrap_or(default)
    }

    /// String value, or `default` when absent or of another type
    #[must_use]
    pub fn get_string_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get_string(name).unwrap_or(default)
    }
}

/// Name-ordered iterator over a map's attributes
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: btree_map::Values<'a, String, AttributeNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a AttributeNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ParameterMap {
    type Item = &'a AttributeNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializes as an object keyed by attribute name, in name order
#[cfg(feature = "serde")]
impl serde::Serialize for ParameterMap {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|node| (node.name(), node.value())))
    }
}
