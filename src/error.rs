//! Error types for wirecall.

use thiserror::Error;

use crate::codec::Tag;

/// Main error type for all wirecall operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pack/unpack failure in the typed codec.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Registration would shadow an existing method with the same hash.
    #[error("method {name:?} hashes to the same value as registered method {existing:?}")]
    DuplicateMethod {
        /// Name being registered.
        name: String,
        /// Name already occupying the hash slot.
        existing: String,
    },

    /// No method registered under the given hash.
    #[error("no method registered for hash {0:#018x}")]
    UnknownMethod(u64),

    /// A handler looked at its decoded arguments and refused the call.
    #[error("call rejected: {0}")]
    Rejected(String),
}

impl Error {
    /// Convenience constructor for handler-side rejections.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Error::Rejected(reason.into())
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the typed codec.
///
/// Codec functions return these instead of panicking; callers must check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Descriptor and argument list have different lengths.
    #[error("descriptor expects {expected} arguments, got {got}")]
    ArityMismatch {
        /// Number of tags in the descriptor.
        expected: usize,
        /// Number of arguments supplied.
        got: usize,
    },

    /// An argument's runtime type does not match its descriptor tag.
    #[error("argument {index} should be {expected:?} but is {found:?}")]
    TypeMismatch {
        /// Zero-based argument position.
        index: usize,
        /// Tag demanded by the descriptor.
        expected: Tag,
        /// Tag of the value actually supplied.
        found: Tag,
    },

    /// Destination buffer cannot hold the encoded arguments.
    #[error("need {needed} bytes but only {available} are available")]
    BufferTooSmall {
        /// Total encoded length of the argument list.
        needed: usize,
        /// Bytes left in the destination from the given offset.
        available: usize,
    },

    /// Source buffer ran out before the value completed.
    #[error("buffer exhausted while decoding {0:?}")]
    Truncated(Tag),

    /// No NUL terminator before the end of the buffer.
    #[error("string value is missing its NUL terminator")]
    UnterminatedString,

    /// String bytes on the wire were not valid UTF-8.
    #[error("string value is not valid UTF-8")]
    InvalidUtf8,

    /// Interior NUL would truncate the string on the receiving side.
    #[error("string value contains an interior NUL byte")]
    StringContainsNul,

    /// Blob length prefix was negative or ran past the buffer.
    #[error("blob length prefix {0} is out of range")]
    BadBlobLength(i64),

    /// Encoded argument list does not fit the frame's signed 32-bit length.
    #[error("encoded payload of {0} bytes exceeds the wire limit")]
    PayloadTooLarge(usize),

    /// Format string contained a character with no tag mapping.
    #[error("unknown format character {0:?}")]
    UnknownFormatChar(char),
}
