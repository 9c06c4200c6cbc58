//! List and pair headers
//!
//! Both headers are 19 bytes, packed without padding, with multi-byte fields in host byte order.
//! A buffer produced on a big-endian host carries [`Flags::BIG_ENDIAN`] in its list header.

use bytes::{Buf, BufMut};

use super::{Flags, LIST_HEADER_SIZE, MAGIC, PAIR_HEADER_SIZE, TypeTag, VERSION};
use crate::{Error, Result};

/// Header prefixing a packed list
///
/// # Wire Format
///
/// ```text
/// +-------+---------+-------+----------------------+----------------------+
/// | magic | version | flags | descriptor count (8) |       size (8)       |
/// +-------+---------+-------+----------------------+----------------------+
/// ```
///
/// `size` counts the bytes following the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    magic: u8,
    version: u8,
    flags: u8,
    descriptors: u64,
    size: u64,
}

impl ListHeader {
    /// Create a header for `size` payload bytes produced on this host
    #[must_use]
    pub const fn new(size: u64) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            flags: Flags::host().as_u8(),
            descriptors: 0,
            size,
        }
    }

    /// Get magic byte
    #[must_use]
    pub const fn magic(&self) -> u8 {
        self.magic
    }

    /// Get version byte
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Get flags
    #[must_use]
    pub fn flags(&self) -> Flags {
        Flags::from_u8(self.flags).unwrap_or_default()
    }

    /// Get descriptor count
    #[must_use]
    pub const fn descriptors(&self) -> u64 {
        self.descriptors
    }

    /// Get payload size
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Validate header
    pub fn validate(&self) -> Result<()> {
        if self.magic != MAGIC {
            return Err(Error::InvalidMagic { found: self.magic });
        }

        if self.version != VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
            });
        }

        if Flags::from_u8(self.flags).is_none() {
            return Err(Error::InvalidFlags { flags: self.flags });
        }

        Ok(())
    }

    /// Append the header to `buf`
    pub fn put<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.magic);
        buf.put_u8(self.version);
        buf.put_u8(self.flags);
        buf.put_u64_ne(self.descriptors);
        buf.put_u64_ne(self.size);
    }

    /// Convert to bytes (host order)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; LIST_HEADER_SIZE] {
        let mut bytes = [0u8; LIST_HEADER_SIZE];
        self.put(&mut &mut bytes[..]);
        bytes
    }

    /// Parse from bytes (host order)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < LIST_HEADER_SIZE {
            return Err(Error::BufferTooSmall {
                needed: LIST_HEADER_SIZE,
                got: bytes.len(),
            });
        }

        let mut buf = bytes;
        let header = Self {
            magic: buf.get_u8(),
            version: buf.get_u8(),
            flags: buf.get_u8(),
            descriptors: buf.get_u64_ne(),
            size: buf.get_u64_ne(),
        };

        header.validate()?;
        Ok(header)
    }
}

impl Default for ListHeader {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Header prefixing every attribute
///
/// # Wire Format
///
/// ```text
/// +-----+---------------+---------------------+---------------------+
/// | tag | name size (2) |    data size (8)    |    item count (8)   |
/// +-----+---------------+---------------------+---------------------+
/// ```
///
/// `name size` includes the NUL terminator of the name that follows the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairHeader {
    tag: u8,
    name_size: u16,
    data_size: u64,
    items: u64,
}

impl PairHeader {
    /// Create a new pair header
    #[must_use]
    pub const fn new(tag: TypeTag, name_size: u16, data_size: u64, items: u64) -> Self {
        Self {
            tag: tag.as_u8(),
            name_size,
            data_size,
            items,
        }
    }

    /// Get type tag byte
    #[must_use]
    pub const fn tag_byte(&self) -> u8 {
        self.tag
    }

    /// Get type tag
    #[must_use]
    pub fn tag(&self) -> Option<TypeTag> {
        TypeTag::from_u8(self.tag)
    }

    /// Get name size, terminator included
    #[must_use]
    pub const fn name_size(&self) -> u16 {
        self.name_size
    }

    /// Get payload size
    #[must_use]
    pub const fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Get item count
    #[must_use]
    pub const fn items(&self) -> u64 {
        self.items
    }

    /// Validate header
    pub fn validate(&self) -> Result<()> {
        if self.tag().is_none() {
            return Err(Error::InvalidTypeTag { tag: self.tag });
        }

        if self.name_size == 0 {
            return Err(Error::InvalidName {
                name: String::new(),
                reason: "name size must include a terminator",
            });
        }

        Ok(())
    }

    /// Append the header to `buf`
    pub fn put<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.tag);
        buf.put_u16_ne(self.name_size);
        buf.put_u64_ne(self.data_size);
        buf.put_u64_ne(self.items);
    }

    /// Convert to bytes (host order)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PAIR_HEADER_SIZE] {
        let mut bytes = [0u8; PAIR_HEADER_SIZE];
        self.put(&mut &mut bytes[..]);
        bytes
    }

    /// Parse from bytes (host order)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < PAIR_HEADER_SIZE {
            return Err(Error::BufferTooSmall {
                needed: PAIR_HEADER_SIZE,
                got: bytes.len(),
            });
        }

        let mut buf = bytes;
        let header = Self {
            tag: buf.get_u8(),
            name_size: buf.get_u16_ne(),
            data_size: buf.get_u64_ne(),
            items: buf.get_u64_ne(),
        };

        header.validate()?;
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_header_layout() {
        let bytes = ListHeader::new(0x0102).to_bytes();

        assert_eq!(bytes.len(), 19);
        assert_eq!(bytes[0], 0x6c);
        assert_eq!(bytes[1], 0x00);
        assert_eq!(bytes[2], Flags::host().as_u8());
        assert_eq!(&bytes[3..11], &0u64.to_ne_bytes());
        assert_eq!(&bytes[11..19], &0x0102u64.to_ne_bytes());
    }

    #[test]
    fn test_list_header_roundtrip() {
        let header = ListHeader::new(789);
        let decoded = ListHeader::from_bytes(&header.to_bytes()).unwrap();

        assert_eq!(decoded, header);
        assert_eq!(decoded.size(), 789);
        assert_eq!(decoded.descriptors(), 0);
    }

    #[test]
    fn test_list_header_invalid_magic() {
        let mut bytes = ListHeader::new(0).to_bytes();
        bytes[0] = 0xDE;

        let result = ListHeader::from_bytes(&bytes);
        assert!(matches!(result, Err(Error::InvalidMagic { found: 0xDE })));
    }

    #[test]
    fn test_list_header_truncated() {
        let result = ListHeader::from_bytes(&[MAGIC, VERSION]);
        assert!(matches!(
            result,
            Err(Error::BufferTooSmall { needed: 19, got: 2 })
        ));
    }

    #[test]
    fn test_pair_header_layout() {
        let header = PairHeader::new(TypeTag::StringArray, 3, 8, 2);
        let bytes = header.to_bytes();

        assert_eq!(bytes.len(), 19);
        assert_eq!(bytes[0], 0x0A);
        assert_eq!(&bytes[1..3], &3u16.to_ne_bytes());
        assert_eq!(&bytes[3..11], &8u64.to_ne_bytes());
        assert_eq!(&bytes[11..19], &2u64.to_ne_bytes());

        let decoded = PairHeader::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.tag(), Some(TypeTag::StringArray));
        assert_eq!(decoded.name_size(), 3);
    }

    #[test]
    fn test_pair_header_invalid_tag() {
        let mut bytes = PairHeader::new(TypeTag::Null, 2, 0, 0).to_bytes();
        bytes[0] = 0x06;

        let result = PairHeader::from_bytes(&bytes);
        assert!(matches!(result, Err(Error::InvalidTypeTag { tag: 0x06 })));
    }
}
