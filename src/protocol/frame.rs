//! Call frames.
//!
//! A call frame is the wire unit: a 12-byte [`CallHeader`] followed by
//! `payload_length` payload bytes. Outbound frames are built contiguous so a
//! flush can write each one with a single call; inbound frames keep their
//! payload in `bytes::Bytes` for cheap hand-off to handlers.

use bytes::{Bytes, BytesMut};

use super::wire_format::{CallHeader, HEADER_SIZE};

/// A complete, received call frame.
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// Decoded header.
    pub header: CallHeader,
    /// Payload bytes.
    pub payload: Bytes,
}

impl CallFrame {
    /// Create a frame from header and payload.
    pub fn new(header: CallHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// The method hash from the header.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.header.hash
    }

    /// Borrow the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload length in bytes.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }
}

/// Build a complete frame as one contiguous buffer.
///
/// # Example
///
/// ```
/// use wirecall::protocol::{build_frame, CallHeader, HEADER_SIZE};
///
/// let header = CallHeader::new(0x5A8E_E66C_2774_B544, 5);
/// let frame = build_frame(&header, b"hello");
/// assert_eq!(frame.len(), HEADER_SIZE + 5);
/// ```
pub fn build_frame(header: &CallHeader, payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accessors() {
        let header = CallHeader::new(77, 5);
        let frame = CallFrame::new(header, Bytes::from_static(b"hello"));
        assert_eq!(frame.hash(), 77);
        assert_eq!(frame.payload(), b"hello");
        assert_eq!(frame.payload_len(), 5);
    }

    #[test]
    fn test_frame_empty_payload() {
        let frame = CallFrame::new(CallHeader::new(1, 0), Bytes::new());
        assert_eq!(frame.payload_len(), 0);
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn test_build_frame() {
        let header = CallHeader::new(0x0102_0304_0506_0708, 5);
        let bytes = build_frame(&header, b"hello");

        assert_eq!(bytes.len(), HEADER_SIZE + 5);
        let parsed = CallHeader::decode(&bytes[..HEADER_SIZE]).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(&bytes[HEADER_SIZE..], b"hello");
    }

    #[test]
    fn test_build_frame_empty_payload() {
        let header = CallHeader::new(1, 0);
        let bytes = build_frame(&header, b"");
        assert_eq!(bytes.len(), HEADER_SIZE);
    }
}
