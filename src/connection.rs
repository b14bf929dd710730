//! Connection - per-peer receive/dispatch and queued send.
//!
//! A connection wraps one duplex byte stream and drives the call protocol
//! over it, one frame at a time:
//!
//! ```text
//! caller ──enqueue_call──► CallQueue ──flush──► stream
//! stream ──receive──► header ► resolve ► payload ► handler
//! ```
//!
//! [`Connection::receive`] processes exactly one inbound call per
//! invocation and reports the outcome as a [`Status`] rather than an error:
//! a misbehaving peer must not tear down the receive loop, and the caller
//! decides from the status whether to keep driving the connection.
//!
//! Connections are independent of each other; the only shared state is the
//! read-only [`MethodTable`]. Run each connection on its own task and drive
//! it from a single owner.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::codec::{Tag, Value};
use crate::error::Result;
use crate::method::MethodTable;
use crate::protocol::{CallHeader, HEADER_SIZE};
use crate::queue::CallQueue;

/// Outcome of one receive cycle (or of local call setup).
///
/// `BadRemoteCall` leaves the connection usable; `BadConnection` and
/// `InternalError` mean the stream should no longer be driven.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The call was received, resolved and handled.
    Ok,
    /// Local misuse before any network I/O (descriptor/argument mismatch).
    BadCall,
    /// The peer violated the protocol, named an unknown method, or the
    /// handler rejected the call's arguments.
    BadRemoteCall,
    /// The stream could not complete a read or write; presumed disconnect.
    BadConnection,
    /// Unexpected fault while processing; the connection is unreliable.
    InternalError,
}

impl Status {
    /// Whether the cycle completed successfully.
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

/// Per-peer connection over one duplex byte stream.
pub struct Connection<S> {
    stream: S,
    table: Arc<MethodTable>,
    outbound: CallQueue,
}

impl<S> Connection<S> {
    /// Wrap a stream, resolving inbound calls against `table`.
    pub fn new(stream: S, table: Arc<MethodTable>) -> Self {
        Self {
            stream,
            table,
            outbound: CallQueue::new(),
        }
    }

    /// The outbound call queue.
    pub fn calls(&mut self) -> &mut CallQueue {
        &mut self.outbound
    }

    /// Build a call frame and append it to the outbound queue.
    ///
    /// Validates the descriptor/argument pairing before encoding; a
    /// mismatch fails here with nothing queued. Does not touch the network.
    pub fn enqueue_call(&mut self, method: &str, descriptor: &[Tag], args: &[Value]) -> Result<()> {
        self.outbound.enqueue_call(method, descriptor, args)
    }

    /// Consume the connection, returning the underlying stream.
    ///
    /// Queued but unflushed frames are dropped.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection<S> {
    /// Receive, resolve and dispatch exactly one call frame.
    ///
    /// Blocks (suspends) until a full frame arrives or the stream fails.
    /// The handler runs with the payload bytes and this connection's
    /// outbound queue, so it can enqueue reply calls; flushing them is the
    /// caller's job.
    pub async fn receive(&mut self) -> Status {
        let mut header_buf = [0u8; HEADER_SIZE];
        if let Err(e) = self.stream.read_exact(&mut header_buf).await {
            tracing::debug!(error = %e, "stream ended while reading call header");
            return Status::BadConnection;
        }

        let header = match CallHeader::decode(&header_buf) {
            Some(header) => header,
            None => return Status::InternalError,
        };

        let payload_len = match header.payload_len() {
            Some(len) => len,
            None => {
                tracing::warn!(
                    payload_length = header.payload_length,
                    "peer sent negative payload length"
                );
                return Status::BadRemoteCall;
            }
        };

        let table = Arc::clone(&self.table);
        let method = match table.resolve(header.hash) {
            Some(method) => method,
            None => {
                tracing::warn!("call to unknown method {:#018x}", header.hash);
                // Drain the payload so the next frame still parses; the
                // original design left it on the stream and desynchronized.
                return match self.drain_payload(payload_len).await {
                    Ok(()) => Status::BadRemoteCall,
                    Err(_) => Status::BadConnection,
                };
            }
        };

        let mut payload = vec![0u8; payload_len];
        if let Err(e) = self.stream.read_exact(&mut payload).await {
            tracing::debug!(
                error = %e,
                expected = payload_len,
                "stream ended while reading call payload"
            );
            return Status::BadConnection;
        }

        tracing::debug!(method = method.name(), len = payload_len, "dispatching call");

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            method.call(&payload, &mut self.outbound)
        }));
        match outcome {
            Ok(Ok(())) => Status::Ok,
            Ok(Err(e)) => {
                tracing::warn!(method = method.name(), error = %e, "handler rejected call");
                Status::BadRemoteCall
            }
            Err(_) => {
                tracing::error!(method = method.name(), "handler panicked");
                Status::InternalError
            }
        }
    }

    /// Write every queued frame to the stream in FIFO order.
    ///
    /// The queue is emptied at the start of the attempt: frames written
    /// before an I/O failure are not retransmitted and frames not yet
    /// written are dropped, so delivery is at-most-once per flush. A caller
    /// that needs the calls delivered resubmits them after an error.
    pub async fn flush(&mut self) -> Result<()> {
        let frames = self.outbound.take();
        for frame in &frames {
            self.stream.write_all(frame).await?;
        }
        self.stream.flush().await?;
        Ok(())
    }

    /// Read and discard exactly `remaining` payload bytes.
    async fn drain_payload(&mut self, mut remaining: usize) -> std::io::Result<()> {
        let mut scratch = [0u8; 4096];
        while remaining > 0 {
            let chunk = remaining.min(scratch.len());
            self.stream.read_exact(&mut scratch[..chunk]).await?;
            remaining -= chunk;
        }
        Ok(())
    }
}
