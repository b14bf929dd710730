//! Method module - handler trait and dispatch table.
//!
//! Provides:
//! - [`Handler`] - the callable behind a registered method
//! - [`RawHandler`] - wraps a closure that wants the payload bytes as-is
//! - [`FormatHandler`] - wraps a closure behind payload decoding against a
//!   fixed descriptor
//! - [`MethodTable`] - maps method hashes to handlers
//!
//! # Example
//!
//! ```
//! use wirecall::codec::Tag;
//! use wirecall::method::MethodTable;
//!
//! let mut table = MethodTable::new();
//! table
//!     .register_fmt("Echo", &[Tag::Int32, Tag::Str], |args, _replies| {
//!         println!("Echo({:?}, {:?})", args[0].as_i32(), args[1].as_str());
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert!(table.resolve_by_name("Echo").is_some());
//! ```

mod registry;

pub use registry::{MethodDescriptor, MethodTable};

use crate::codec::{self, Tag, Value};
use crate::queue::CallQueue;

/// Result type for handler invocations.
///
/// `Err` means the handler rejected the call (malformed or unacceptable
/// arguments); the connection maps it to a bad-remote-call outcome and keeps
/// running.
pub type HandlerResult = crate::error::Result<()>;

/// The callable behind a registered method.
///
/// Handlers get the raw payload bytes (the connection does not validate
/// payload shape before dispatch) and the connection's outbound queue, so a
/// handler can enqueue reply calls that go out on the next flush.
pub trait Handler: Send + Sync + 'static {
    /// Handle one call.
    fn call(&self, payload: &[u8], replies: &mut CallQueue) -> HandlerResult;
}

/// Adapter for closures that take the payload bytes as-is.
pub struct RawHandler<F> {
    inner: F,
}

impl<F> RawHandler<F>
where
    F: Fn(&[u8], &mut CallQueue) -> HandlerResult + Send + Sync + 'static,
{
    /// Wrap a raw-payload closure.
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F> Handler for RawHandler<F>
where
    F: Fn(&[u8], &mut CallQueue) -> HandlerResult + Send + Sync + 'static,
{
    fn call(&self, payload: &[u8], replies: &mut CallQueue) -> HandlerResult {
        (self.inner)(payload, replies)
    }
}

/// Adapter that decodes the payload against a fixed descriptor first.
///
/// The wrapped closure sees decoded [`Value`]s instead of raw bytes; a
/// payload that does not match the descriptor rejects the call before the
/// closure runs.
pub struct FormatHandler<F> {
    descriptor: Vec<Tag>,
    inner: F,
}

impl<F> FormatHandler<F>
where
    F: Fn(&[Value], &mut CallQueue) -> HandlerResult + Send + Sync + 'static,
{
    /// Wrap `inner` with payload decoding against `descriptor`.
    pub fn new(descriptor: Vec<Tag>, inner: F) -> Self {
        Self { descriptor, inner }
    }
}

impl<F> Handler for FormatHandler<F>
where
    F: Fn(&[Value], &mut CallQueue) -> HandlerResult + Send + Sync + 'static,
{
    fn call(&self, payload: &[u8], replies: &mut CallQueue) -> HandlerResult {
        let args = codec::decode(payload, 0, &self.descriptor)?;
        (self.inner)(&args, replies)
    }
}
