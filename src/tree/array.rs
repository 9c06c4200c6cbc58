//! Homogeneous, insertion-ordered arrays

use std::fmt;

use tracing::trace;

use super::node::validate_text;
use crate::wire::{BOOL_SIZE, NUMBER_SIZE, TypeTag};
use crate::{Error, Result};

/// Element type declared by an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ElementType {
    /// Booleans, one byte each
    Bool,
    /// Unsigned 64-bit integers
    Number,
    /// NUL-terminated strings
    String,
}

impl ElementType {
    /// Wire tag of an array holding this element type
    #[must_use]
    pub const fn array_tag(self) -> TypeTag {
        match self {
            Self::Bool => TypeTag::BoolArray,
            Self::Number => TypeTag::NumberArray,
            Self::String => TypeTag::StringArray,
        }
    }

    /// Encoded size of one element, if fixed
    #[must_use]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Bool => Some(BOOL_SIZE),
            Self::Number => Some(NUMBER_SIZE),
            Self::String => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
        };
        write!(f, "{name}")
    }
}

/// Unnamed array element
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Element {
    /// Boolean element
    Bool(bool),
    /// Numeric element
    Number(u64),
    /// String element
    String(String),
}

impl Element {
    /// Type of this element
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Bool(_) => ElementType::Bool,
            Self::Number(_) => ElementType::Number,
            Self::String(_) => ElementType::String,
        }
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u64> for Element {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// Array of elements sharing one declared type, kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrayList {
    element_type: ElementType,
    items: Vec<Element>,
}

impl ArrayList {
    /// Create an empty array of `element_type`
    #[must_use]
    pub const fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            items: Vec::new(),
        }
    }

    /// Append an element at the tail.
    ///
    /// Rejects elements of a different type than the declared one, and strings containing NUL.
    /// A rejected element leaves the array unchanged.
    pub fn append(&mut self, element: impl Into<Element>) -> Result<()> {
        let element = element.into();
        let found = element.element_type();
        if found != self.element_type {
            return Err(Error::TypeMismatch {
                expected: self.element_type,
                found,
            });
        }
        if let Element::String(text) = &element {
            validate_text(text)?;
        }

        self.items.push(element);
        trace!(len = self.items.len(), element_type = %self.element_type, "array append");
        Ok(())
    }

    /// Append every element of `elements`, stopping at the first rejected one
    pub fn extend<I>(&mut self, elements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        elements
            .into_iter()
            .try_for_each(|element| self.append(element))
    }

    /// Get declared element type
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the array holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.items.get(index)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ArrayList {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut array = ArrayList::new(ElementType::String);
        array.append("one").unwrap();
        array.append("two").unwrap();

        let items: Vec<_> = array.iter().cloned().collect();
        assert_eq!(
            items,
            vec![Element::String("one".into()), Element::String("two".into())]
        );
    }

    #[test]
    fn test_append_type_mismatch() {
        let mut array = ArrayList::new(ElementType::String);
        let result = array.append(7u64);

        assert!(matches!(
            result,
            Err(Error::TypeMismatch {
                expected: ElementType::String,
                found: ElementType::Number,
            })
        ));
        assert!(array.is_empty());
    }

    #[test]
    fn test_append_rejects_interior_nul() {
        let mut array = ArrayList::new(ElementType::String);
        assert!(matches!(
            array.append("a\0"),
            Err(Error::InteriorNul { position: 1 })
        ));
        assert!(array.is_empty());
    }

    #[test]
    fn test_extend_stops_at_first_rejection() {
        let mut array = ArrayList::new(ElementType::Number);
        array.extend([1u64, 2, 3]).unwrap();
        assert_eq!(array.len(), 3);

        let mixed = [Element::Number(4), Element::Bool(true), Element::Number(5)];
        assert!(array.extend(mixed).is_err());
        assert_eq!(array.len(), 4);
        assert_eq!(array.get(3), Some(&Element::Number(4)));
    }

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(ElementType::Bool.fixed_size(), Some(1));
        assert_eq!(ElementType::Number.fixed_size(), Some(8));
        assert_eq!(ElementType::String.fixed_size(), None);
    }
}
