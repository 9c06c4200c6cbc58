//! Pair type tags and list header flags

use std::fmt;

/// Type tag carried in every pair header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum TypeTag {
    /// Name with no value
    Null = 0x01,
    /// Single byte, 0 or 1
    Bool = 0x02,
    /// Unsigned 64-bit integer
    Number = 0x03,
    /// NUL-terminated string
    String = 0x04,
    /// Nested list of pairs
    Nested = 0x05,

    /// Packed bytes, one per element
    BoolArray = 0x08,
    /// Packed unsigned 64-bit integers
    NumberArray = 0x09,
    /// Back-to-back NUL-terminated strings
    StringArray = 0x0A,
}

impl TypeTag {
    /// Convert from byte
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Null),
            0x02 => Some(Self::Bool),
            0x03 => Some(Self::Number),
            0x04 => Some(Self::String),
            0x05 => Some(Self::Nested),
            0x08 => Some(Self::BoolArray),
            0x09 => Some(Self::NumberArray),
            0x0A => Some(Self::StringArray),
            _ => None,
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this tag describes an array payload
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::BoolArray | Self::NumberArray | Self::StringArray)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "NULL",
            Self::Bool => "BOOL",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Nested => "NVLIST",
            Self::BoolArray => "BOOL_ARRAY",
            Self::NumberArray => "NUMBER_ARRAY",
            Self::StringArray => "STRING_ARRAY",
        };
        write!(f, "{name}")
    }
}

/// List header flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Flags(u8);

impl Flags {
    /// Valid flag bits mask
    pub const VALID_MASK: u8 = Self::IGNORE_CASE | Self::NO_UNIQUE | Self::BIG_ENDIAN;
    /// Reader should compare names case-insensitively
    pub const IGNORE_CASE: u8 = 1 << 0;
    /// List may carry repeated names
    pub const NO_UNIQUE: u8 = 1 << 1;
    /// Multi-byte fields are big-endian
    pub const BIG_ENDIAN: u8 = 1 << 7;

    /// Create empty flags
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Flags describing buffers produced on this host
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(target_endian = "big") {
            Self::new().with(Self::BIG_ENDIAN)
        } else {
            Self::new()
        }
    }

    /// Create from byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        if value & !Self::VALID_MASK == 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Set a flag
    #[must_use]
    pub const fn with(mut self, flag: u8) -> Self {
        debug_assert!(flag & !Self::VALID_MASK == 0, "invalid flag bit");
        self.0 |= flag;
        self
    }

    /// Check if flag is set
    #[must_use]
    pub const fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Check if names compare case-insensitively
    #[must_use]
    pub const fn ignores_case(self) -> bool {
        self.has(Self::IGNORE_CASE)
    }

    /// Check if names may repeat
    #[must_use]
    pub const fn allows_duplicates(self) -> bool {
        self.has(Self::NO_UNIQUE)
    }

    /// Check if multi-byte fields are big-endian
    #[must_use]
    pub const fn is_big_endian(self) -> bool {
        self.has(Self::BIG_ENDIAN)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ignores_case() {
            parts.push("IGNORE_CASE");
        }
        if self.allows_duplicates() {
            parts.push("NO_UNIQUE");
        }
        if self.is_big_endian() {
            parts.push("BIG_ENDIAN");
        }
        if parts.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", parts.join(" | "))
        }
    }
}
