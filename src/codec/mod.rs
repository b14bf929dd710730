//! Codec module - typed, descriptor-driven payload packing.
//!
//! The codec losslessly converts between heterogeneous argument lists and
//! byte buffers, steered by a compact format descriptor (one [`Tag`] per
//! argument). It is pure and stateless: no I/O, no allocation beyond the
//! returned values, and no panics across the API boundary.
//!
//! # Design
//!
//! The descriptor approach keeps the codec generic over argument shapes
//! without per-message schema types. The cost is that callers must keep the
//! descriptor and argument list consistent, which [`encoded_len`] enforces
//! before any buffer is touched.
//!
//! # Example
//!
//! ```
//! use wirecall::codec::{decode, encode, Tag, Value};
//!
//! let descriptor = [Tag::Int32, Tag::Str];
//! let args = [Value::Int32(42), Value::Str("hi".into())];
//!
//! let bytes = encode(&descriptor, &args).unwrap();
//! let back = decode(&bytes, 0, &descriptor).unwrap();
//! assert_eq!(back, args);
//! ```

mod format;
mod pack;
mod value;

pub use format::Tag;
pub use pack::{decode, encode, encode_into, encoded_len};
pub use value::Value;
