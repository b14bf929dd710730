//! Wire format encoding and decoding.
//!
//! Implements the 12-byte call header:
//! ```text
//! ┌─────────────┬────────────────┐
//! │ Method Hash │ Payload Length │
//! │ 8 bytes     │ 4 bytes        │
//! │ uint64 BE   │ int32 BE       │
//! └─────────────┴────────────────┘
//! ```
//!
//! All multi-byte integers are Big Endian. The header carries no type tags
//! and no method name; the hash alone identifies the method, and the payload
//! layout is whatever format descriptor the two peers agreed on for it.

/// Header size in bytes (fixed, exactly 12).
pub const HEADER_SIZE: usize = 12;

/// Decoded call header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallHeader {
    /// FNV-1a hash of the method name.
    pub hash: u64,
    /// Payload length in bytes. Negative values are a protocol violation.
    pub payload_length: i32,
}

impl CallHeader {
    /// Create a new header.
    pub fn new(hash: u64, payload_length: i32) -> Self {
        Self {
            hash,
            payload_length,
        }
    }

    /// Encode the header to bytes (Big Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use wirecall::protocol::CallHeader;
    ///
    /// let header = CallHeader::new(0x4DC6_46FE_5E00_7740, 100);
    /// assert_eq!(header.encode().len(), 12);
    /// ```
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode the header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is smaller than [`HEADER_SIZE`].
    pub fn encode_into(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= HEADER_SIZE);
        buf[0..8].copy_from_slice(&self.hash.to_be_bytes());
        buf[8..12].copy_from_slice(&self.payload_length.to_be_bytes());
    }

    /// Decode a header from bytes (Big Endian).
    ///
    /// Returns `None` if the buffer is too short.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            hash: u64::from_be_bytes([
                buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
            ]),
            payload_length: i32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]),
        })
    }

    /// The payload length as a usable byte count.
    ///
    /// Returns `None` when the peer sent a negative length.
    #[inline]
    pub fn payload_len(&self) -> Option<usize> {
        usize::try_from(self.payload_length).ok()
    }
}
