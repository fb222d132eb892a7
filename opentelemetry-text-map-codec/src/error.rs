use thiserror::Error;

/// Reasons a carrier could not be turned into a remote span context.
///
/// The public `extract` methods never surface these; they fall back to the
/// input [`Context`](opentelemetry::Context). `try_extract` keeps the reason
/// for callers that want to know which rule rejected the carrier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// The carrier has no value under the given key.
    #[error("header {0:?} is absent")]
    AbsentHeader(String),

    /// The header value does not match the format grammar.
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    /// The versioned header carries a version this codec does not speak.
    #[error("unsupported traceparent version {0:#04x}")]
    UnsupportedVersion(u8),

    /// The header is well formed but its trace id or span id is all zero.
    #[error("trace id or span id is all zero")]
    InvalidIdentity,

    /// A baggage side-channel value is not valid form encoding.
    #[error("malformed baggage value under {0:?}")]
    MalformedBaggage(String),
}

/// Error returned by the id codec.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    /// Empty, too long, or containing a non-hex character.
    #[error("malformed hex id")]
    Malformed,
}

impl From<IdError> for ExtractError {
    fn from(_: IdError) -> Self {
        ExtractError::MalformedHeader("id is not valid hex")
    }
}
