//! Protocol module - wire format and call frames.
//!
//! This module implements the binary framing layer:
//! - 12-byte call header encoding/decoding (method hash + payload length)
//! - contiguous frame assembly for the outbound path
//! - a received-frame type with typed accessors

mod frame;
mod wire_format;

pub use frame::{build_frame, CallFrame};
pub use wire_format::{CallHeader, HEADER_SIZE};
