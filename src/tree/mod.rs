//! In-memory attribute tree
//!
//! A [`ParameterMap`] owns uniquely named [`AttributeNode`]s. Nested attributes own a child map and
//! array attributes own an [`ArrayList`], so dropping a map releases the whole tree below it.

mod array;
mod map;
mod node;

pub use array::{ArrayList, Element, ElementType};
pub use map::{Duplicate, Iter, ParameterMap};
pub use node::{AttributeNode, AttributeType, Value};
