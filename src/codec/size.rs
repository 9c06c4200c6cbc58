//! Size pass
//!
//! The encoder measures nested regions as it writes them and reads every other length from this
//! module, so a disagreement between the passes shows up as a size mismatch after encoding.

use crate::tree::{ArrayList, AttributeNode, Element, ParameterMap, Value};
use crate::wire::{BOOL_SIZE, LIST_HEADER_SIZE, NUMBER_SIZE, PAIR_HEADER_SIZE};
use crate::{Error, Result};

/// Exact length of `map` once packed, list header included.
pub fn packed_size(map: &ParameterMap) -> Result<usize> {
    body_size(map)?
        .checked_add(LIST_HEADER_SIZE)
        .ok_or(Error::SizeOverflow)
}

/// Length of a map's attributes without a list header
pub(crate) fn body_size(map: &ParameterMap) -> Result<usize> {
    map.iter().try_fold(0usize, |total, node| {
        total
            .checked_add(pair_size(node)?)
            .ok_or(Error::SizeOverflow)
    })
}

/// Pair header, terminated name and payload of one attribute
pub(crate) fn pair_size(node: &AttributeNode) -> Result<usize> {
    (PAIR_HEADER_SIZE + name_size(node))
        .checked_add(payload_size(node.value())?)
        .ok_or(Error::SizeOverflow)
}

/// Name length including the terminator
pub(crate) fn name_size(node: &AttributeNode) -> usize {
    node.name().len() + 1
}

/// Payload length of a value, as written in its pair header's data size
pub(crate) fn payload_size(value: &Value) -> Result<usize> {
    match value {
        Value::Null => Ok(0),
        Value::Bool(_) => Ok(BOOL_SIZE),
        Value::Number(_) => Ok(NUMBER_SIZE),
        Value::String(text) => Ok(text.len() + 1),
        Value::Nested(map) => body_size(map),
        Value::Array(array) => array_size(array),
    }
}

/// Item count written in a value's pair header
pub(crate) fn item_count(value: &Value) -> usize {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
        Value::Nested(map) => map.len(),
        Value::Array(array) => array.len(),
    }
}

fn array_size(array: &ArrayList) -> Result<usize> {
    if let Some(element_size) = array.element_type().fixed_size() {
        return array
            .len()
            .checked_mul(element_size)
            .ok_or(Error::SizeOverflow);
    }

    array.iter().try_fold(0usize, |total, element| {
        total
            .checked_add(element_size(element))
            .ok_or(Error::SizeOverflow)
    })
}

fn element_size(element: &Element) -> usize {
    match element {
        Element::Bool(_) => BOOL_SIZE,
        Element::Number(_) => NUMBER_SIZE,
        Element::String(text) => text.len() + 1,
    }
}
