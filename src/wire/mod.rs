//! Fixed-layout structures of the packed format
//!
//! A packed buffer is one [`ListHeader`] followed by the list's attributes in name order. Each
//! attribute is a [`PairHeader`], the NUL-terminated name, then the payload selected by the
//! header's [`TypeTag`]. A nested list is written inline as its own attributes, without a second
//! list header, and the enclosing pair header's data size covers exactly that region.

mod header;
mod types;

pub use header::{ListHeader, PairHeader};
pub use types::{Flags, TypeTag};

/// List header magic byte
pub const MAGIC: u8 = 0x6c;

/// Format version
pub const VERSION: u8 = 0x00;

/// List header size in bytes
pub const LIST_HEADER_SIZE: usize = 19;

/// Pair header size in bytes
pub const PAIR_HEADER_SIZE: usize = 19;

/// Encoded size of a boolean value
pub const BOOL_SIZE: usize = 1;

/// Encoded size of a number value
pub const NUMBER_SIZE: usize = 8;

/// Largest encodable name size, terminator included
pub const MAX_NAME_SIZE: usize = u16::MAX as usize;
