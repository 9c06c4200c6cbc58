//! nvpack error types

use thiserror::Error;

use crate::tree::ElementType;

/// Attribute tree and codec errors
#[derive(Error, Debug)]
pub enum Error {
    /// An attribute with the same name already exists in the map
    #[error("duplicate attribute name: {name:?}")]
    DuplicateKey {
        /// Colliding name
        name: String,
    },

    /// Array element does not match the array's declared element type
    #[error("type mismatch: array holds {expected} elements, got {found}")]
    TypeMismatch {
        /// Declared element type
        expected: ElementType,
        /// Type of the rejected element
        found: ElementType,
    },

    /// Attribute name cannot be represented on the wire
    #[error("invalid attribute name {name:?}: {reason}")]
    InvalidName {
        /// Offending name
        name: String,
        /// Why the name was rejected
        reason: &'static str,
    },

    /// String value contains an interior NUL byte
    #[error("string value contains an interior NUL at byte {position}")]
    InteriorNul {
        /// Offset of the first NUL byte
        position: usize,
    },

    /// Requested header flags that callers may not set
    #[error("invalid flags: {flags:#04x}")]
    InvalidFlags {
        /// Offending flag bits
        flags: u8,
    },

    /// Encoded size does not fit the wire size fields
    #[error("encoded size overflow")]
    SizeOverflow,

    /// Encoder output diverged from the computed size
    #[error("encoder wrote {written} bytes, size pass computed {computed}")]
    SizeMismatch {
        /// Bytes produced by the encoder
        written: usize,
        /// Bytes predicted by the size pass
        computed: usize,
    },

    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },

    /// Output buffer could not be allocated
    #[error("failed to allocate {size} byte buffer: {source}")]
    Allocation {
        /// Requested size
        size: usize,
        /// Allocator error
        #[source]
        source: std::collections::TryReserveError,
    },

    /// Invalid magic byte in a list header
    #[error("invalid magic byte: expected 0x6c, got {found:#04x}")]
    InvalidMagic {
        /// Found magic byte
        found: u8,
    },

    /// Unsupported format version in a list header
    #[error("unsupported version: {found:#04x}")]
    UnsupportedVersion {
        /// Found version byte
        found: u8,
    },

    /// Unknown type tag in a pair header
    #[error("invalid type tag: {tag:#04x}")]
    InvalidTypeTag {
        /// Invalid tag byte
        tag: u8,
    },
}

impl Error {
    /// Whether the error leaves the tree untouched and the caller free to continue building.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// Whether the error reports a state the codec cannot represent.
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidName { .. }
                | Self::InteriorNul { .. }
                | Self::InvalidFlags { .. }
                | Self::SizeOverflow
                | Self::SizeMismatch { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let dup = Error::DuplicateKey { name: "a".into() };
        assert!(dup.is_recoverable());
        assert!(!dup.is_invariant_violation());

        let overflow = Error::SizeOverflow;
        assert!(!overflow.is_recoverable());
        assert!(overflow.is_invariant_violation());
    }

    #[test]
    fn test_error_display() {
        let err = Error::TypeMismatch {
            expected: ElementType::String,
            found: ElementType::Number,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: array holds string elements, got number"
        );
    }
}
