use super::context_with_debug;
use crate::baggage;
use crate::carrier::{TextMapAccessor, TextMapGetter};
use crate::config::JaegerConfig;
use crate::error::ExtractError;
use crate::flags::JaegerFlags;
use crate::id::{decode_span_id, decode_trace_id, is_zero_text};
use opentelemetry::{
    otel_debug, otel_warn,
    trace::{SpanContext, TraceContextExt, TraceState},
    Context,
};
use std::borrow::Cow;

/// Reads a remote span context and baggage from Jaeger headers.
///
/// The identity header has the form
/// `{trace-id}:{span-id}:{parent-span-id}:{flags}` where the ids are 1 to 32
/// (trace) or 1 to 16 (span, parent) lower case hex digits with leading zeros
/// optionally dropped, and flags is 1 or 2 hex digits. Baggage travels in
/// separate `uberctx-{name}` entries with form encoded values.
///
/// Extraction is total: whenever the carrier cannot be read the input context
/// is handed back unchanged. [`JaegerExtractor::try_extract`] reports why.
#[derive(Clone, Debug, Default)]
pub struct JaegerExtractor<G = TextMapAccessor> {
    config: JaegerConfig,
    default_getter: G,
}

impl JaegerExtractor {
    /// Extractor reading the default `uber-trace-id` / `uberctx-` keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor reading the keys of `config`.
    pub fn with_config(config: JaegerConfig) -> Self {
        JaegerExtractor {
            config,
            default_getter: TextMapAccessor,
        }
    }
}

impl<G> JaegerExtractor<G> {
    /// Extractor that reads carriers through `getter` unless a call provides
    /// its own.
    pub fn with_getter(config: JaegerConfig, getter: G) -> Self {
        JaegerExtractor {
            config,
            default_getter: getter,
        }
    }

    /// The header names in use.
    pub fn config(&self) -> &JaegerConfig {
        &self.config
    }

    /// Extract with the default getter.
    pub fn extract<C>(&self, carrier: &C, cx: &Context) -> Context
    where
        C: ?Sized,
        G: TextMapGetter<C>,
    {
        self.extract_with(carrier, cx, &self.default_getter)
    }

    /// Extract reading the carrier through `getter`.
    pub fn extract_with<C, H>(&self, carrier: &C, cx: &Context, getter: &H) -> Context
    where
        C: ?Sized,
        H: TextMapGetter<C> + ?Sized,
    {
        match self.try_extract(carrier, cx, getter) {
            Ok(context) => context,
            Err(ExtractError::AbsentHeader(_)) => cx.clone(),
            Err(err @ ExtractError::MalformedBaggage(_)) => {
                let reason = err.to_string();
                otel_warn!(
                    name: "JaegerExtractor.Extract.InvalidBaggage",
                    reason = reason.as_str(),
                );
                cx.clone()
            }
            Err(err) => {
                let reason = err.to_string();
                otel_debug!(
                    name: "JaegerExtractor.Extract.Rejected",
                    reason = reason.as_str(),
                );
                cx.clone()
            }
        }
    }

    /// Extract, keeping the reason when the carrier is rejected.
    ///
    /// On success the returned context carries the remote span context as its
    /// active span, the debug marker when the debug bit is set, and any
    /// baggage entries layered over the baggage of `cx`.
    pub fn try_extract<C, H>(
        &self,
        carrier: &C,
        cx: &Context,
        getter: &H,
    ) -> Result<Context, ExtractError>
    where
        C: ?Sized,
        H: TextMapGetter<C> + ?Sized,
    {
        let header_name = self.config.header_name();
        let header_value = getter
            .get(carrier, header_name)
            .ok_or_else(|| ExtractError::AbsentHeader(header_name.to_owned()))?;
        let header_value = unescape_separators(header_value);
        let identity = Identity::parse(&header_value)?;

        if is_zero_text(identity.trace_id) || is_zero_text(identity.span_id) {
            return Err(ExtractError::InvalidIdentity);
        }

        let flags = JaegerFlags::decode(identity.flags);
        let span_context = SpanContext::new(
            decode_trace_id(identity.trace_id)?,
            decode_span_id(identity.span_id)?,
            flags.trace_flags(),
            true,
            TraceState::default(),
        );

        let context = if flags.debug {
            context_with_debug(cx)
        } else {
            cx.clone()
        };
        let context =
            baggage::extract_prefixed(&context, carrier, getter, self.config.baggage_prefix())?;

        Ok(context.with_remote_span_context(span_context))
    }
}

/// Jaeger clients may send the header url encoded, e.g. in a query string.
fn unescape_separators(value: &str) -> Cow<'_, str> {
    if value.contains(':') || !value.contains("%3") {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.replace("%3A", ":").replace("%3a", ":"))
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Identity<'a> {
    trace_id: &'a str,
    span_id: &'a str,
    flags: u8,
}

impl<'a> Identity<'a> {
    fn parse(value: &'a str) -> Result<Self, ExtractError> {
        let mut fields = value.split(':');
        let (Some(trace_id), Some(span_id), Some(parent_id), Some(flags), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return Err(ExtractError::MalformedHeader(
                "expected four colon separated fields",
            ));
        };

        if !is_lower_hex(trace_id, 32) {
            return Err(ExtractError::MalformedHeader("invalid trace id"));
        }
        if !is_lower_hex(span_id, 16) {
            return Err(ExtractError::MalformedHeader("invalid span id"));
        }
        // Deprecated, only its shape is checked.
        if !is_lower_hex(parent_id, 16) {
            return Err(ExtractError::MalformedHeader("invalid parent span id"));
        }
        if !is_lower_hex(flags, 2) {
            return Err(ExtractError::MalformedHeader("invalid flags"));
        }
        // Hex, so "10" is 0x10 and carries neither bit.
        let flags = u8::from_str_radix(flags, 16)
            .map_err(|_| ExtractError::MalformedHeader("invalid flags"))?;

        Ok(Identity {
            trace_id,
            span_id,
            flags,
        })
    }
}

fn is_lower_hex(field: &str, max_len: usize) -> bool {
    (1..=max_len).contains(&field.len())
        && field
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
