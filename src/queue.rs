//! Outbound call queue.
//!
//! Calls are not written to the stream as they are made. Each call is
//! encoded into one contiguous frame and appended here; a connection flush
//! later writes every queued frame in FIFO order and empties the queue.
//! Handlers receive `&mut CallQueue` during dispatch, so a reply call ends
//! up in the same queue and goes out on the next flush.
//!
//! The queue is owned by exactly one [`Connection`](crate::Connection) and
//! is not safe for concurrent producers; enqueue and flush are separate
//! steps by design.

use bytes::{Bytes, BytesMut};

use crate::codec::{self, Tag, Value};
use crate::error::{CodecError, Result};
use crate::hash::method_hash;
use crate::protocol::{CallHeader, HEADER_SIZE};

/// Ordered buffer of fully-encoded call frames awaiting flush.
#[derive(Debug, Default)]
pub struct CallQueue {
    frames: Vec<Bytes>,
}

impl CallQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a call to `method` and append it as one frame.
    ///
    /// The descriptor/argument pairing is validated before anything is
    /// encoded; a mismatch is local misuse and fails here, with no frame
    /// queued and no network I/O anywhere in the path.
    pub fn enqueue_call(&mut self, method: &str, descriptor: &[Tag], args: &[Value]) -> Result<()> {
        let payload_len = codec::encoded_len(descriptor, args)?;
        let payload_length =
            i32::try_from(payload_len).map_err(|_| CodecError::PayloadTooLarge(payload_len))?;

        let header = CallHeader::new(method_hash(method), payload_length);

        let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload_len);
        buf.resize(HEADER_SIZE + payload_len, 0);
        header.encode_into(&mut buf[..HEADER_SIZE]);
        codec::encode_into(&mut buf[HEADER_SIZE..], 0, descriptor, args)?;

        self.frames.push(buf.freeze());
        Ok(())
    }

    /// Number of queued frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the queue holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Borrow the queued frames in FIFO order.
    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }

    /// Drop all queued frames without sending them.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Take every queued frame, leaving the queue empty.
    pub(crate) fn take(&mut self) -> Vec<Bytes> {
        std::mem::take(&mut self.frames)
    }
}
