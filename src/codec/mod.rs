//! Attribute tree packing
//!
//! Packing runs two passes over the same borrowed tree: [`packed_size`] computes the exact
//! length, then the encoder fills a buffer of that length. Both passes walk maps in name order
//! and arrays in insertion order.

mod encode;
mod size;

use tracing::{debug, instrument};

use crate::tree::ParameterMap;
use crate::wire::LIST_HEADER_SIZE;
use crate::{Error, Result};

use encode::Encoder;

pub use size::packed_size;

/// Pack `map` into a newly allocated buffer of exactly [`packed_size`] bytes.
///
/// # Errors
///
/// Returns [`Error::Allocation`] if the buffer cannot be reserved; no partial buffer is returned.
#[instrument(level = "debug", skip(map), fields(attributes = map.len()))]
pub fn pack(map: &ParameterMap) -> Result<Vec<u8>> {
    let size = packed_size(map)?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|source| Error::Allocation { size, source })?;
    buffer.resize(size, 0);

    encode_exact(map, &mut buffer, size)?;
    Ok(buffer)
}

/// Pack `map` into the front of `out`, returning the number of bytes written.
///
/// Bytes of `out` past the returned length are left untouched.
///
/// # Errors
///
/// Returns [`Error::BufferTooSmall`] before writing anything if `out` is shorter than
/// [`packed_size`].
#[instrument(level = "debug", skip(map, out), fields(attributes = map.len(), capacity = out.len()))]
pub fn pack_into(map: &ParameterMap, out: &mut [u8]) -> Result<usize> {
    let size = packed_size(map)?;
    if out.len() < size {
        return Err(Error::BufferTooSmall {
            needed: size,
            got: out.len(),
        });
    }

    encode_exact(map, &mut out[..size], size)?;
    Ok(size)
}

fn encode_exact(map: &ParameterMap, out: &mut [u8], size: usize) -> Result<()> {
    let mut encoder = Encoder::new(out);
    encoder.list(map, size - LIST_HEADER_SIZE)?;

    let written = encoder.written();
    if written != size {
        return Err(Error::SizeMismatch {
            written,
            computed: size,
        });
    }

    debug!(size, "packed attribute list");
    Ok(())
}
