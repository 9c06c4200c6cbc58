//! Encode pass

use bytes::BufMut;
use tracing::trace;

use super::size::{item_count, name_size, payload_size};
use crate::tree::{ArrayList, AttributeNode, Element, ParameterMap, Value};
use crate::wire::{
    BOOL_SIZE, LIST_HEADER_SIZE, ListHeader, NUMBER_SIZE, PAIR_HEADER_SIZE, PairHeader,
};
use crate::{Error, Result};

/// Writes a packed list into a slice sized by the size pass.
///
/// Each pair's header and name are reserved first and filled in once the payload is written, so
/// a nested list's data size is the length of the region its attributes actually occupied. Every
/// write is preceded by a bounds check against the unwritten tail, so a disagreement with the size
/// pass surfaces as an error instead of a panic inside [`BufMut`].
pub(crate) struct Encoder<'a> {
    out: &'a mut [u8],
    capacity: usize,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(out: &'a mut [u8]) -> Self {
        let capacity = out.len();
        Self { out, capacity }
    }

    /// Bytes written or reserved so far
    pub(crate) fn written(&self) -> usize {
        self.capacity - self.out.len()
    }

    /// Write the list header followed by the attributes of `map`
    pub(crate) fn list(&mut self, map: &ParameterMap, body_size: usize) -> Result<()> {
        self.reserve(LIST_HEADER_SIZE)?;
        ListHeader::new(to_wire(body_size)?).put(&mut self.out);
        self.body(map)
    }

    fn body(&mut self, map: &ParameterMap) -> Result<()> {
        map.iter().try_for_each(|node| self.pair(node))
    }

    fn pair(&mut self, node: &AttributeNode) -> Result<()> {
        let name_size = u16::try_from(name_size(node)).map_err(|_| Error::InvalidName {
            name: node.name().to_owned(),
            reason: "name does not fit the 16-bit name size",
        })?;
        let prefix = PAIR_HEADER_SIZE + usize::from(name_size);
        self.reserve(prefix)?;

        let (mut head, tail) = std::mem::take(&mut self.out).split_at_mut(prefix);
        self.out = tail;
        let start = self.out.len();
        self.payload(node)?;
        let data_size = start - self.out.len();

        PairHeader::new(
            node.type_tag(),
            name_size,
            to_wire(data_size)?,
            to_wire(item_count(node.value()))?,
        )
        .put(&mut head);
        put_cstr(&mut head, node.name());
        Ok(())
    }

    fn payload(&mut self, node: &AttributeNode) -> Result<()> {
        match node.value() {
            Value::Null => {}
            Value::Bool(flag) => {
                self.reserve(BOOL_SIZE)?;
                self.out.put_u8(u8::from(*flag));
            }
            Value::Number(number) => {
                self.reserve(NUMBER_SIZE)?;
                self.out.put_u64_ne(*number);
            }
            Value::String(text) => {
                self.reserve(text.len() + 1)?;
                put_cstr(&mut self.out, text);
            }
            Value::Nested(map) => {
                trace!(name = node.name(), attributes = map.len(), "descending into nested list");
                self.body(map)?;
            }
            Value::Array(array) => {
                self.reserve(payload_size(node.value())?)?;
                self.array(array);
            }
        }
        Ok(())
    }

    fn array(&mut self, array: &ArrayList) {
        for element in array {
            match element {
                Element::Bool(flag) => self.out.put_u8(u8::from(*flag)),
                Element::Number(number) => self.out.put_u64_ne(*number),
                Element::String(text) => put_cstr(&mut self.out, text),
            }
        }
    }

    fn reserve(&self, needed: usize) -> Result<()> {
        let got = self.out.len();
        if needed > got {
            return Err(Error::BufferTooSmall { needed, got });
        }
        Ok(())
    }
}

fn put_cstr<B: BufMut>(buf: &mut B, text: &str) {
    buf.put_slice(text.as_bytes());
    buf.put_u8(0);
}

fn to_wire(size: usize) -> Result<u64> {
    u64::try_from(size).map_err(|_| Error::SizeOverflow)
}
