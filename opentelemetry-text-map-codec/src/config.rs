//! Header names used by each codec.
//!
//! A configuration is built once, then cloned into the extractor and injector
//! of its format. Empty or blank overrides fall back to the default names.
use std::borrow::Cow;

pub(crate) const JAEGER_HEADER: &str = "uber-trace-id";
pub(crate) const JAEGER_BAGGAGE_PREFIX: &str = "uberctx-";
pub(crate) const TRACEPARENT_HEADER: &str = "traceparent";
pub(crate) const TRACESTATE_HEADER: &str = "tracestate";

/// Keys of the Jaeger identity header and baggage entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JaegerConfig {
    header_name: Cow<'static, str>,
    baggage_prefix: Cow<'static, str>,
}

impl Default for JaegerConfig {
    fn default() -> Self {
        JaegerConfig {
            header_name: Cow::Borrowed(JAEGER_HEADER),
            baggage_prefix: Cow::Borrowed(JAEGER_BAGGAGE_PREFIX),
        }
    }
}

impl JaegerConfig {
    /// Default `uber-trace-id` header with `uberctx-` baggage prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and write the identity under `header_name` instead of `uber-trace-id`.
    pub fn with_header_name(mut self, header_name: impl Into<Cow<'static, str>>) -> Self {
        self.header_name = non_blank(header_name.into(), JAEGER_HEADER);
        self
    }

    /// Prefix baggage keys with `baggage_prefix` instead of `uberctx-`.
    pub fn with_baggage_prefix(mut self, baggage_prefix: impl Into<Cow<'static, str>>) -> Self {
        self.baggage_prefix = non_blank(baggage_prefix.into(), JAEGER_BAGGAGE_PREFIX);
        self
    }

    /// The identity header name.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// The baggage key prefix.
    pub fn baggage_prefix(&self) -> &str {
        &self.baggage_prefix
    }
}

/// Keys of the `traceparent` and `tracestate` headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceContextConfig {
    traceparent_key: Cow<'static, str>,
    tracestate_key: Cow<'static, str>,
}

impl Default for TraceContextConfig {
    fn default() -> Self {
        TraceContextConfig {
            traceparent_key: Cow::Borrowed(TRACEPARENT_HEADER),
            tracestate_key: Cow::Borrowed(TRACESTATE_HEADER),
        }
    }
}

impl TraceContextConfig {
    /// Default `traceparent` / `tracestate` keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `key` for the version-tagged header.
    pub fn with_traceparent_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.traceparent_key = non_blank(key.into(), TRACEPARENT_HEADER);
        self
    }

    /// Use `key` for the vendor state header.
    pub fn with_tracestate_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.tracestate_key = non_blank(key.into(), TRACESTATE_HEADER);
        self
    }

    /// The version-tagged header name.
    pub fn traceparent_key(&self) -> &str {
        &self.traceparent_key
    }

    /// The vendor state header name.
    pub fn tracestate_key(&self) -> &str {
        &self.tracestate_key
    }
}

fn non_blank(value: Cow<'static, str>, default: &'static str) -> Cow<'static, str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Cow::Borrowed(default)
    } else if trimmed.len() == value.len() {
        value
    } else {
        Cow::Owned(trimmed.to_owned())
    }
}
