//! # wirecall
//!
//! Minimal hash-addressed RPC transport over raw byte streams.
//!
//! Two peers expose named methods to each other over one ordered, reliable
//! stream (TCP, a unix socket, an in-memory duplex, ...). On the wire a call
//! is a 12-byte header - the 64-bit FNV-1a hash of the method name plus the
//! payload length - followed by the arguments packed by a typed codec. The
//! method name itself never travels; both sides agree out-of-band on each
//! method's argument format.
//!
//! ## Architecture
//!
//! - [`codec`] - descriptor-driven packing of scalar/blob argument lists
//! - [`hash`] - the FNV-1a method-name digest used as the wire identifier
//! - [`protocol`] - call header layout and frame assembly
//! - [`method`] - the handler trait and the hash-keyed dispatch table
//! - [`connection`] - one-frame-at-a-time receive/dispatch plus the
//!   outbound append/flush queue
//! - [`transport`] - thin TCP sugar for the common case
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wirecall::codec::{Tag, Value};
//! use wirecall::{Connection, MethodTable};
//!
//! let mut table = MethodTable::new();
//! table.register_fmt("Echo", &[Tag::Int32, Tag::Str], |args, replies| {
//!     println!("Echo({:?}, {:?})", args[0].as_i32(), args[1].as_str());
//!     replies.enqueue_call("EchoReply", &[], &[])
//! })?;
//!
//! let stream = wirecall::transport::connect("127.0.0.1:11223").await?;
//! let mut conn = Connection::new(stream, Arc::new(table));
//!
//! conn.enqueue_call(
//!     "Echo",
//!     &[Tag::Int32, Tag::Str],
//!     &[Value::Int32(42), Value::Str("hi".into())],
//! )?;
//! conn.flush().await?;
//!
//! while conn.receive().await.is_ok() {
//!     conn.flush().await?;
//! }
//! ```

pub mod codec;
pub mod connection;
pub mod error;
pub mod hash;
pub mod method;
pub mod protocol;
pub mod queue;
pub mod transport;

pub use connection::{Connection, Status};
pub use error::{CodecError, Error, Result};
pub use hash::method_hash;
pub use method::{Handler, HandlerResult, MethodTable};
pub use queue::CallQueue;
