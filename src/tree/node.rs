//! Named attributes and their values

use std::fmt;

use super::{ArrayList, ElementType, ParameterMap};
use crate::wire::{MAX_NAME_SIZE, TypeTag};
use crate::{Error, Result};

/// Kind of value held by an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AttributeType {
    /// Name only
    Null,
    /// Boolean
    Bool,
    /// Unsigned 64-bit integer
    Number,
    /// UTF-8 string without interior NUL
    String,
    /// Child map
    Nested,
    /// Homogeneous array of the given element type
    Array(ElementType),
}

impl AttributeType {
    /// Wire tag written in the pair header
    #[must_use]
    pub const fn type_tag(self) -> TypeTag {
        match self {
            Self::Null => TypeTag::Null,
            Self::Bool => TypeTag::Bool,
            Self::Number => TypeTag::Number,
            Self::String => TypeTag::String,
            Self::Nested => TypeTag::Nested,
            Self::Array(element) => element.array_tag(),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Nested => write!(f, "nested"),
            Self::Array(element) => write!(f, "{element} array"),
        }
    }
}

/// Attribute payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Value {
    /// No payload
    Null,
    /// Boolean payload
    Bool(bool),
    /// Numeric payload
    Number(u64),
    /// String payload
    String(String),
    /// Owned child map
    Nested(ParameterMap),
    /// Owned array
    Array(ArrayList),
}

impl Value {
    /// Kind of this value
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Null => AttributeType::Null,
            Self::Bool(_) => AttributeType::Bool,
            Self::Number(_) => AttributeType::Number,
            Self::String(_) => AttributeType::String,
            Self::Nested(_) => AttributeType::Nested,
            Self::Array(array) => AttributeType::Array(array.element_type()),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Self::String(text) = self {
            validate_text(text)?;
        }
        Ok(())
    }
}

/// Single named value in a [`ParameterMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeNode {
    name: String,
    value: Value,
}

impl AttributeNode {
    /// Create an attribute, rejecting names and strings the wire format cannot carry.
    ///
    /// Nested maps and arrays are assumed valid: their contents were checked when inserted.
    pub fn new(name: impl Into<String>, value: Value) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        value.validate()?;
        Ok(Self { name, value })
    }

    /// Create a null attribute
    pub fn null(name: impl Into<String>) -> Result<Self> {
        Self::new(name, Value::Null)
    }

    /// Create a boolean attribute
    pub fn bool(name: impl Into<String>, value: bool) -> Result<Self> {
        Self::new(name, Value::Bool(value))
    }

    /// Create a number attribute
    pub fn number(name: impl Into<String>, value: u64) -> Result<Self> {
        Self::new(name, Value::Number(value))
    }

    /// Create a string attribute
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Self::new(name, Value::String(value.into()))
    }

    /// Create an attribute owning an empty child map
    pub fn nested(name: impl Into<String>) -> Result<Self> {
        Self::new(name, Value::Nested(ParameterMap::new()))
    }

    /// Create an attribute owning an empty array
    pub fn array(name: impl Into<String>, element_type: ElementType) -> Result<Self> {
        Self::new(name, Value::Array(ArrayList::new(element_type)))
    }

    /// Get name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get value
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Get kind of value
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        self.value.attribute_type()
    }

    /// Get wire tag
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        self.attribute_type().type_tag()
    }

    /// Get mutable child map, if this is a nested attribute
    pub fn as_nested_mut(&mut self) -> Option<&mut ParameterMap> {
        match &mut self.value {
            Value::Nested(map) => Some(map),
            _ => None,
        }
    }

    /// Get mutable array, if this is an array attribute
    pub fn as_array_mut(&mut self) -> Option<&mut ArrayList> {
        match &mut self.value {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Split into name and value
    #[must_use]
    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name must not be empty"
    } else if name.contains('\0') {
        "name contains a NUL byte"
    } else if name.len() >= MAX_NAME_SIZE {
        "name does not fit the 16-bit name size"
    } else {
        return Ok(());
    };

    Err(Error::InvalidName {
        name: name.to_owned(),
        reason,
    })
}

pub(crate) fn validate_text(text: &str) -> Result<()> {
    match text.bytes().position(|byte| byte == 0) {
        Some(position) => Err(Error::InteriorNul { position }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_constructors() {
        let node = AttributeNode::number("a", 4).unwrap();
        assert_eq!(node.name(), "a");
        assert_eq!(node.value(), &Value::Number(4));
        assert_eq!(node.type_tag(), TypeTag::Number);

        let node = AttributeNode::array("na", ElementType::String).unwrap();
        assert_eq!(
            node.attribute_type(),
            AttributeType::Array(ElementType::String)
        );
        assert_eq!(node.type_tag(), TypeTag::StringArray);
    }

    #[test]
    fn test_rejects_unrepresentable_names() {
        assert!(matches!(
            AttributeNode::null(""),
            Err(Error::InvalidName { .. })
        ));
        assert!(matches!(
            AttributeNode::null("a\0b"),
            Err(Error::InvalidName { .. })
        ));

        let longest = "n".repeat(MAX_NAME_SIZE - 1);
        assert!(AttributeNode::null(longest).is_ok());
        let too_long = "n".repeat(MAX_NAME_SIZE);
        assert!(matches!(
            AttributeNode::null(too_long),
            Err(Error::InvalidName { .. })
        ));
    }

    #[test]
    fn test_rejects_interior_nul_in_string() {
        let result = AttributeNode::string("s", "ab\0c");
        assert!(matches!(result, Err(Error::InteriorNul { position: 2 })));
    }

    #[test]
    fn test_mutable_projections() {
        let mut nested = AttributeNode::nested("z").unwrap();
        assert!(nested.as_nested_mut().is_some());
        assert!(nested.as_array_mut().is_none());

        let mut array = AttributeNode::array("arr", ElementType::Bool).unwrap();
        assert!(array.as_array_mut().is_some());
        assert!(array.as_nested_mut().is_none());
    }
}
