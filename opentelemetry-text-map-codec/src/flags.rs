//! Trace flag bits for the supported wire formats.
use opentelemetry::trace::TraceFlags;

const SAMPLED_BIT: u8 = 0b01;
const DEBUG_BIT: u8 = 0b10;

/// Jaeger sampling flags.
///
/// The first bit requests sampling and the second bit marks a debug trace. The
/// debug bit never lands in [`TraceFlags`]; it travels as a context marker
/// instead, see [`crate::jaeger::context_with_debug`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JaegerFlags {
    /// Whether the trace is sampled.
    pub sampled: bool,
    /// Whether the trace was forced into debug mode.
    pub debug: bool,
}

impl JaegerFlags {
    /// Read the flag bits of a Jaeger header. Unknown bits are ignored.
    pub fn decode(bits: u8) -> Self {
        JaegerFlags {
            sampled: bits & SAMPLED_BIT != 0,
            debug: bits & DEBUG_BIT != 0,
        }
    }

    /// Bits to put on the wire. Debug is only emitted together with sampled.
    pub fn encode(self) -> u8 {
        match (self.sampled, self.debug) {
            (false, _) => 0,
            (true, false) => SAMPLED_BIT,
            (true, true) => SAMPLED_BIT | DEBUG_BIT,
        }
    }

    /// Span level flags, sampled bit only.
    pub fn trace_flags(self) -> TraceFlags {
        if self.sampled {
            TraceFlags::SAMPLED
        } else {
            TraceFlags::default()
        }
    }
}

/// Trace flags of a `traceparent` header: bit 0 is sampled, the rest is ignored.
pub fn trace_context_flags(bits: u8) -> TraceFlags {
    TraceFlags::new(bits) & TraceFlags::SAMPLED
}
