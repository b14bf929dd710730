//! Descriptor-driven packing and unpacking.
//!
//! All multi-byte quantities are Big Endian on the wire, regardless of host
//! byte order. Floats travel as their raw IEEE-754 bit pattern, so NaN
//! payloads survive a round trip untouched.
//!
//! [`encoded_len`] validates a descriptor/argument pairing and is always run
//! before any buffer is written, so a failing [`encode_into`] leaves the
//! destination untouched.

use crate::codec::{Tag, Value};
use crate::error::CodecError;

/// Total encoded byte length of `args` laid out per `descriptor`.
///
/// Fails if the descriptor and argument list differ in length, if any
/// argument's type does not match its tag, or if a string argument carries
/// an interior NUL (which would truncate it on the receiving side).
pub fn encoded_len(descriptor: &[Tag], args: &[Value]) -> Result<usize, CodecError> {
    if descriptor.len() != args.len() {
        return Err(CodecError::ArityMismatch {
            expected: descriptor.len(),
            got: args.len(),
        });
    }

    let mut len = 0usize;
    for (index, (tag, arg)) in descriptor.iter().zip(args).enumerate() {
        if arg.tag() != *tag {
            return Err(CodecError::TypeMismatch {
                index,
                expected: *tag,
                found: arg.tag(),
            });
        }
        len += match arg {
            Value::Bytes(b) => {
                if i32::try_from(b.len()).is_err() {
                    return Err(CodecError::BadBlobLength(b.len() as i64));
                }
                4 + b.len()
            }
            Value::Str(s) => {
                if s.bytes().any(|b| b == 0) {
                    return Err(CodecError::StringContainsNul);
                }
                s.len() + 1
            }
            Value::Int32(_) | Value::Float32(_) => 4,
            Value::Int64(_) | Value::Float64(_) => 8,
        };
    }
    Ok(len)
}

/// Encode `args` into `buf` starting at `offset`.
///
/// Returns the number of bytes written. The whole argument list is length-
/// checked up front; on any error nothing has been written.
pub fn encode_into(
    buf: &mut [u8],
    offset: usize,
    descriptor: &[Tag],
    args: &[Value],
) -> Result<usize, CodecError> {
    let needed = encoded_len(descriptor, args)?;
    let available = buf.len().saturating_sub(offset);
    if needed > available {
        return Err(CodecError::BufferTooSmall { needed, available });
    }

    let mut off = offset;
    for arg in args {
        off += write_value(buf, off, arg);
    }
    Ok(off - offset)
}

/// Encode `args` into a freshly allocated, exactly-sized buffer.
pub fn encode(descriptor: &[Tag], args: &[Value]) -> Result<Vec<u8>, CodecError> {
    let len = encoded_len(descriptor, args)?;
    let mut buf = vec![0u8; len];
    encode_into(&mut buf, 0, descriptor, args)?;
    Ok(buf)
}

/// Decode one value per descriptor tag from `buf`, starting at `offset`.
///
/// Consumes exactly the bytes the descriptor implies, left to right. Fails
/// without partial results if the buffer runs out mid-value, a string has no
/// NUL terminator before the buffer ends, or a blob's length prefix is
/// negative or larger than the remaining buffer.
pub fn decode(buf: &[u8], offset: usize, descriptor: &[Tag]) -> Result<Vec<Value>, CodecError> {
    let mut off = offset;
    let mut values = Vec::with_capacity(descriptor.len());
    for tag in descriptor {
        let (value, used) = read_value(buf, off, *tag)?;
        values.push(value);
        off += used;
    }
    Ok(values)
}

/// Write one value at `off`. Caller has already verified space and type.
fn write_value(buf: &mut [u8], off: usize, value: &Value) -> usize {
    match value {
        Value::Int32(i) => {
            buf[off..off + 4].copy_from_slice(&i.to_be_bytes());
            4
        }
        Value::Int64(i) => {
            buf[off..off + 8].copy_from_slice(&i.to_be_bytes());
            8
        }
        Value::Float32(f) => {
            buf[off..off + 4].copy_from_slice(&f.to_bits().to_be_bytes());
            4
        }
        Value::Float64(f) => {
            buf[off..off + 8].copy_from_slice(&f.to_bits().to_be_bytes());
            8
        }
        Value::Str(s) => {
            buf[off..off + s.len()].copy_from_slice(s.as_bytes());
            buf[off + s.len()] = 0;
            s.len() + 1
        }
        Value::Bytes(b) => {
            buf[off..off + 4].copy_from_slice(&(b.len() as i32).to_be_bytes());
            buf[off + 4..off + 4 + b.len()].copy_from_slice(b);
            4 + b.len()
        }
    }
}

/// Read one value at `off`, returning it with the number of bytes consumed.
fn read_value(buf: &[u8], off: usize, tag: Tag) -> Result<(Value, usize), CodecError> {
    let remaining = buf.len().saturating_sub(off);
    match tag {
        Tag::Int32 => {
            if remaining < 4 {
                return Err(CodecError::Truncated(tag));
            }
            Ok((Value::Int32(i32::from_be_bytes(take4(buf, off))), 4))
        }
        Tag::Int64 => {
            if remaining < 8 {
                return Err(CodecError::Truncated(tag));
            }
            Ok((Value::Int64(i64::from_be_bytes(take8(buf, off))), 8))
        }
        Tag::Float32 => {
            if remaining < 4 {
                return Err(CodecError::Truncated(tag));
            }
            let bits = u32::from_be_bytes(take4(buf, off));
            Ok((Value::Float32(f32::from_bits(bits)), 4))
        }
        Tag::Float64 => {
            if remaining < 8 {
                return Err(CodecError::Truncated(tag));
            }
            let bits = u64::from_be_bytes(take8(buf, off));
            Ok((Value::Float64(f64::from_bits(bits)), 8))
        }
        Tag::Str => {
            let tail = buf.get(off..).unwrap_or_default();
            let nul = tail
                .iter()
                .position(|&b| b == 0)
                .ok_or(CodecError::UnterminatedString)?;
            let text =
                std::str::from_utf8(&tail[..nul]).map_err(|_| CodecError::InvalidUtf8)?;
            Ok((Value::Str(text.to_owned()), nul + 1))
        }
        Tag::Bytes => {
            if remaining < 4 {
                return Err(CodecError::Truncated(tag));
            }
            let count = i32::from_be_bytes(take4(buf, off));
            if count < 0 {
                return Err(CodecError::BadBlobLength(i64::from(count)));
            }
            let count = count as usize;
            if count > remaining - 4 {
                return Err(CodecError::BadBlobLength(count as i64));
            }
            let data = buf[off + 4..off + 4 + count].to_vec();
            Ok((Value::Bytes(data), 4 + count))
        }
    }
}

fn take4(buf: &[u8], off: usize) -> [u8; 4] {
    [buf[off], buf[off + 1], buf[off + 2], buf[off + 3]]
}

fn take8(buf: &[u8], off: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&buf[off..off + 8]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(descriptor: &[Tag], args: &[Value]) -> Vec<Value> {
        let bytes = encode(descriptor, args).unwrap();
        assert_eq!(bytes.len(), encoded_len(descriptor, args).unwrap());
        decode(&bytes, 0, descriptor).unwrap()
    }

    #[test]
    fn test_int32_round_trip() {
        for v in [0, 1, -1, 42, i32::MIN, i32::MAX] {
            let out = round_trip(&[Tag::Int32], &[Value::Int32(v)]);
            assert_eq!(out, [Value::Int32(v)]);
        }
    }

    #[test]
    fn test_int64_round_trip() {
        for v in [0, -1, i64::MIN, i64::MAX, 0x0123_4567_89AB_CDEF] {
            let out = round_trip(&[Tag::Int64], &[Value::Int64(v)]);
            assert_eq!(out, [Value::Int64(v)]);
        }
    }

    #[test]
    fn test_int32_is_big_endian() {
        let bytes = encode(&[Tag::Int32], &[Value::Int32(0x0102_0304)]).unwrap();
        assert_eq!(bytes, [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_int64_is_big_endian() {
        let bytes = encode(&[Tag::Int64], &[Value::Int64(0x0102_0304_0506_0708)]).unwrap();
        assert_eq!(bytes, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn test_float_round_trip_bit_for_bit() {
        for v in [0.0f64, -0.0, 1.5, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let out = round_trip(&[Tag::Float64], &[Value::Float64(v)]);
            let decoded = out[0].as_f64().unwrap();
            assert_eq!(decoded.to_bits(), v.to_bits());
        }
        for v in [0.0f32, -0.0, 4.20002, f32::INFINITY, f32::NAN] {
            let out = round_trip(&[Tag::Float32], &[Value::Float32(v)]);
            let decoded = out[0].as_f32().unwrap();
            assert_eq!(decoded.to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_nan_payload_bits_preserved() {
        // A NaN with a non-default payload must cross the wire unchanged.
        let odd_nan = f64::from_bits(0x7FF8_0000_DEAD_BEEF);
        assert!(odd_nan.is_nan());
        let bytes = encode(&[Tag::Float64], &[Value::Float64(odd_nan)]).unwrap();
        let out = decode(&bytes, 0, &[Tag::Float64]).unwrap();
        assert_eq!(out[0].as_f64().unwrap().to_bits(), 0x7FF8_0000_DEAD_BEEF);
    }

    #[test]
    fn test_float64_wire_bytes_are_big_endian() {
        // 1.0f64 is 0x3FF0000000000000.
        let bytes = encode(&[Tag::Float64], &[Value::Float64(1.0)]).unwrap();
        assert_eq!(bytes, [0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_string_round_trip() {
        for s in ["", "hi", "héllo wörld", "日本語", "a\tb\nc"] {
            let out = round_trip(&[Tag::Str], &[Value::Str(s.into())]);
            assert_eq!(out[0].as_str(), Some(s));
        }
    }

    #[test]
    fn test_empty_string_is_single_nul() {
        let bytes = encode(&[Tag::Str], &[Value::Str(String::new())]).unwrap();
        assert_eq!(bytes, [0x00]);
    }

    #[test]
    fn test_string_layout_utf8_plus_nul() {
        let bytes = encode(&[Tag::Str], &[Value::Str("hi".into())]).unwrap();
        assert_eq!(bytes, [b'h', b'i', 0x00]);
    }

    #[test]
    fn test_blob_round_trip() {
        for b in [vec![], vec![0u8], vec![0xFF; 1000]] {
            let out = round_trip(&[Tag::Bytes], &[Value::Bytes(b.clone())]);
            assert_eq!(out[0].as_bytes(), Some(&b[..]));
        }
    }

    #[test]
    fn test_blob_layout_length_prefix() {
        let bytes = encode(&[Tag::Bytes], &[Value::Bytes(vec![0xAA, 0xBB])]).unwrap();
        assert_eq!(bytes, [0, 0, 0, 2, 0xAA, 0xBB]);
    }

    #[test]
    fn test_empty_blob_is_zero_prefix() {
        let bytes = encode(&[Tag::Bytes], &[Value::Bytes(vec![])]).unwrap();
        assert_eq!(bytes, [0, 0, 0, 0]);
    }

    #[test]
    fn test_mixed_descriptor_round_trip() {
        let descriptor = Tag::parse_descriptor("isfBld").unwrap();
        let args = [
            Value::Int32(-7),
            Value::Str("mixed".into()),
            Value::Float32(0.25),
            Value::Bytes(vec![1, 2, 3]),
            Value::Int64(i64::MIN),
            Value::Float64(-1e300),
        ];
        let out = round_trip(&descriptor, &args);
        assert_eq!(out, args);
    }

    #[test]
    fn test_arity_mismatch() {
        let err = encoded_len(&[Tag::Int32, Tag::Str], &[Value::Int32(1)]).unwrap_err();
        assert_eq!(
            err,
            CodecError::ArityMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_type_mismatch_reports_position() {
        let err = encoded_len(
            &[Tag::Int32, Tag::Int64],
            &[Value::Int32(1), Value::Str("not an int".into())],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                index: 1,
                expected: Tag::Int64,
                found: Tag::Str,
            }
        );
    }

    #[test]
    fn test_interior_nul_rejected() {
        let err = encoded_len(&[Tag::Str], &[Value::Str("a\0b".into())]).unwrap_err();
        assert_eq!(err, CodecError::StringContainsNul);
    }

    #[test]
    fn test_encode_into_rejects_small_buffer_untouched() {
        let mut buf = [0xEE; 8];
        let err = encode_into(
            &mut buf,
            2,
            &[Tag::Int64],
            &[Value::Int64(0x0102_0304_0506_0708)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                needed: 8,
                available: 6
            }
        );
        assert_eq!(buf, [0xEE; 8]);
    }

    #[test]
    fn test_encode_into_preserves_bytes_outside_region() {
        let mut buf = [0xEE; 10];
        let written = encode_into(&mut buf, 3, &[Tag::Int32], &[Value::Int32(-1)]).unwrap();
        assert_eq!(written, 4);
        assert_eq!(buf[..3], [0xEE; 3]);
        assert_eq!(buf[3..7], [0xFF; 4]);
        assert_eq!(buf[7..], [0xEE; 3]);
    }

    #[test]
    fn test_decode_truncated_int() {
        let err = decode(&[0x01, 0x02], 0, &[Tag::Int32]).unwrap_err();
        assert_eq!(err, CodecError::Truncated(Tag::Int32));
    }

    #[test]
    fn test_decode_string_without_terminator() {
        let err = decode(b"no terminator here", 0, &[Tag::Str]).unwrap_err();
        assert_eq!(err, CodecError::UnterminatedString);
    }

    #[test]
    fn test_decode_string_invalid_utf8() {
        let err = decode(&[0xFF, 0xFE, 0x00], 0, &[Tag::Str]).unwrap_err();
        assert_eq!(err, CodecError::InvalidUtf8);
    }

    #[test]
    fn test_decode_blob_prefix_past_buffer() {
        // Prefix claims 100 bytes, only 2 follow.
        let err = decode(&[0, 0, 0, 100, 1, 2], 0, &[Tag::Bytes]).unwrap_err();
        assert_eq!(err, CodecError::BadBlobLength(100));
    }

    #[test]
    fn test_decode_blob_negative_prefix() {
        let err = decode(&[0xFF, 0xFF, 0xFF, 0xFF], 0, &[Tag::Bytes]).unwrap_err();
        assert_eq!(err, CodecError::BadBlobLength(-1));
    }

    #[test]
    fn test_decode_consumes_exactly_descriptor_bytes() {
        // Two argument lists packed back to back decode independently.
        let descriptor = [Tag::Int32, Tag::Str];
        let first = encode(&descriptor, &[Value::Int32(1), Value::Str("one".into())]).unwrap();
        let second = encode(&descriptor, &[Value::Int32(2), Value::Str("two".into())]).unwrap();

        let mut joined = first.clone();
        joined.extend_from_slice(&second);

        let head = decode(&joined, 0, &descriptor).unwrap();
        assert_eq!(head[0].as_i32(), Some(1));
        let tail = decode(&joined, first.len(), &descriptor).unwrap();
        assert_eq!(tail[1].as_str(), Some("two"));
    }

    #[test]
    fn test_decode_at_offset() {
        let mut buf = vec![0xAB, 0xCD];
        buf.extend(encode(&[Tag::Int32], &[Value::Int32(9)]).unwrap());
        let out = decode(&buf, 2, &[Tag::Int32]).unwrap();
        assert_eq!(out[0].as_i32(), Some(9));
    }

    #[test]
    fn test_decode_offset_past_buffer_is_error() {
        let buf = [0u8; 2];
        assert_eq!(
            decode(&buf, 10, &[Tag::Int32]).unwrap_err(),
            CodecError::Truncated(Tag::Int32)
        );
        assert_eq!(
            decode(&buf, 10, &[Tag::Str]).unwrap_err(),
            CodecError::UnterminatedString
        );
        assert_eq!(
            decode(&buf, 10, &[Tag::Bytes]).unwrap_err(),
            CodecError::Truncated(Tag::Bytes)
        );
    }

    #[test]
    fn test_empty_descriptor_encodes_nothing() {
        assert_eq!(encoded_len(&[], &[]).unwrap(), 0);
        assert!(encode(&[], &[]).unwrap().is_empty());
        assert!(decode(&[], 0, &[]).unwrap().is_empty());
    }
}
