//! Hex codec for trace and span ids.
//!
//! Ids travel as hex text of up to twice their byte width. Shorter input is
//! normalized by padding it on the left with `'0'` before decoding, which is
//! how the Jaeger format drops leading zeros on the wire.
use crate::error::IdError;
use opentelemetry::trace::{SpanId, TraceId};

/// Width of a trace id in bytes.
pub const TRACE_ID_WIDTH: usize = 16;
/// Width of a span id in bytes.
pub const SPAN_ID_WIDTH: usize = 8;

/// Decode `1..=2 * N` hex characters into `N` bytes, left padding with zeros.
///
/// Both upper and lower case digits are accepted; callers that need a stricter
/// alphabet check it before calling.
pub fn decode_id<const N: usize>(hex: &str) -> Result<[u8; N], IdError> {
    let width = N * 2;
    if hex.is_empty() || hex.len() > width || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IdError::Malformed);
    }

    let padded = format!("{hex:0>width$}");
    const_hex::decode_to_array(padded).map_err(|_| IdError::Malformed)
}

/// Decode a trace id, see [`decode_id`].
pub fn decode_trace_id(hex: &str) -> Result<TraceId, IdError> {
    decode_id::<TRACE_ID_WIDTH>(hex).map(TraceId::from_bytes)
}

/// Decode a span id, see [`decode_id`].
pub fn decode_span_id(hex: &str) -> Result<SpanId, IdError> {
    decode_id::<SPAN_ID_WIDTH>(hex).map(SpanId::from_bytes)
}

/// True iff every byte is zero.
pub fn is_all_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| *b == 0)
}

/// True iff `hex` is non-empty and made only of `'0'` characters.
pub(crate) fn is_zero_text(hex: &str) -> bool {
    !hex.is_empty() && hex.bytes().all(|b| b == b'0')
}
