//! Format descriptors.
//!
//! A descriptor is an ordered list of [`Tag`]s, one per argument. It defines
//! both the shape of an argument list and the exact byte layout used to
//! encode it; sender and receiver agree on it out-of-band, per method, and
//! nothing about it travels on the wire.
//!
//! Descriptors also have a compact textual form, one character per tag,
//! shared with peer implementations in other languages:
//!
//! | char | tag       | layout                                |
//! |------|-----------|---------------------------------------|
//! | `B`  | `Bytes`   | 4-byte BE length prefix + raw bytes   |
//! | `s`  | `Str`     | UTF-8 bytes + one NUL terminator      |
//! | `i`  | `Int32`   | 4 bytes, BE two's complement          |
//! | `l`  | `Int64`   | 8 bytes, BE two's complement          |
//! | `f`  | `Float32` | 4 bytes, BE IEEE-754 bits             |
//! | `d`  | `Float64` | 8 bytes, BE IEEE-754 bits             |
//!
//! # Example
//!
//! ```
//! use wirecall::codec::Tag;
//!
//! let descriptor = Tag::parse_descriptor("isf").unwrap();
//! assert_eq!(descriptor, [Tag::Int32, Tag::Str, Tag::Float32]);
//! ```

use crate::error::CodecError;

/// One element of a format descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Length-prefixed raw bytes.
    Bytes,
    /// NUL-terminated UTF-8 string.
    Str,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit IEEE-754 float.
    Float32,
    /// 64-bit IEEE-754 float.
    Float64,
}

impl Tag {
    /// The tag's format character.
    pub const fn as_char(self) -> char {
        match self {
            Tag::Bytes => 'B',
            Tag::Str => 's',
            Tag::Int32 => 'i',
            Tag::Int64 => 'l',
            Tag::Float32 => 'f',
            Tag::Float64 => 'd',
        }
    }

    /// Parse a single format character.
    pub fn from_char(c: char) -> Result<Self, CodecError> {
        match c {
            'B' => Ok(Tag::Bytes),
            's' => Ok(Tag::Str),
            'i' => Ok(Tag::Int32),
            'l' => Ok(Tag::Int64),
            'f' => Ok(Tag::Float32),
            'd' => Ok(Tag::Float64),
            other => Err(CodecError::UnknownFormatChar(other)),
        }
    }

    /// Parse a whole format string into a descriptor.
    pub fn parse_descriptor(fmt: &str) -> Result<Vec<Tag>, CodecError> {
        fmt.chars().map(Tag::from_char).collect()
    }

    /// Encoded size for fixed-width tags, `None` for variable-width ones.
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            Tag::Int32 | Tag::Float32 => Some(4),
            Tag::Int64 | Tag::Float64 => Some(8),
            Tag::Bytes | Tag::Str => None,
        }
    }
}
