//! nvpack - Attribute-tree codec for self-describing name/value list buffers
//!
//! Build a tree of named attributes, then pack it into a flat buffer that an independent
//! name/value list reader can consume. Packing is a two-pass transform: the size pass computes the
//! exact length, the encode pass fills a buffer of that length.
//!
//! # Quick Start
//!
//! ```rust
//! use nvpack::{ElementType, ParameterMap};
//!
//! let mut map = ParameterMap::new();
//! map.insert_number("a", 4)?;
//! map.insert_string("param", "value")?;
//! map.create_nested("z")?.insert_bool("enabled", true)?;
//!
//! let names = map.create_array("na", ElementType::String)?;
//! names.append("one")?;
//! names.append("two")?;
//!
//! let packed = nvpack::pack(&map)?;
//! assert_eq!(packed.len(), nvpack::packed_size(&map)?);
//! # Ok::<(), nvpack::Error>(())
//! ```
//!
//! # Features
//!
//! - **Deterministic output** - maps are packed in name order, arrays in insertion order
//! - **Exact sizing** - [`packed_size`] predicts the output length byte for byte
//! - **Closed value model** - every payload kind is a [`Value`] variant
//!
//! Multi-byte fields are written in host byte order; buffers packed on big-endian hosts carry
//! [`Flags::BIG_ENDIAN`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod codec;
mod error;
pub mod tree;
pub mod wire;

pub use codec::{pack, pack_into, packed_size};
pub use error::{Error, Result};
pub use tree::{
    ArrayList, AttributeNode, AttributeType, Duplicate, Element, ElementType, ParameterMap, Value,
};
pub use wire::{Flags, ListHeader, PairHeader, TypeTag};
