use super::SUPPORTED_VERSION;
use crate::carrier::{TextMapAccessor, TextMapGetter};
use crate::config::TraceContextConfig;
use crate::error::ExtractError;
use crate::flags::trace_context_flags;
use crate::id::{decode_id, is_all_zero, SPAN_ID_WIDTH, TRACE_ID_WIDTH};
use opentelemetry::{
    otel_debug, otel_warn,
    trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState},
    Context,
};
use std::str::FromStr;

/// Reads a remote span context from `traceparent` and `tracestate` headers.
///
/// `traceparent` must be exactly `{version:2}-{trace-id:32}-{span-id:16}-{flags:2}`
/// in hex digits of either case, with version `00`. Only the sampled bit of
/// the flags is kept. A `tracestate` that cannot be parsed is dropped without
/// rejecting the `traceparent`.
///
/// Extraction is total: whenever the carrier cannot be read the input context
/// is handed back unchanged. [`TraceContextExtractor::try_extract`] reports
/// why.
#[derive(Clone, Debug, Default)]
pub struct TraceContextExtractor<G = TextMapAccessor> {
    config: TraceContextConfig,
    default_getter: G,
}

impl TraceContextExtractor {
    /// Extractor reading the default `traceparent` / `tracestate` keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor reading the keys of `config`.
    pub fn with_config(config: TraceContextConfig) -> Self {
        TraceContextExtractor {
            config,
            default_getter: TextMapAccessor,
        }
    }
}

impl<G> TraceContextExtractor<G> {
    /// Extractor that reads carriers through `getter` unless a call provides
    /// its own.
    pub fn with_getter(config: TraceContextConfig, getter: G) -> Self {
        TraceContextExtractor {
            config,
            default_getter: getter,
        }
    }

    /// The header names in use.
    pub fn config(&self) -> &TraceContextConfig {
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
            Err(err) => {
                let reason = err.to_string();
                otel_debug!(
                    name: "TraceContextExtractor.Extract.Rejected",
                    reason = reason.as_str(),
                );
                cx.clone()
            }
        }
    }

    /// Extract, keeping the reason when the carrier is rejected.
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
        let traceparent_key = self.config.traceparent_key();
        let traceparent = getter.get(carrier, traceparent_key);
        let tracestate = getter.get(carrier, self.config.tracestate_key());

        let traceparent = TraceParent::parse(
            traceparent.ok_or_else(|| ExtractError::AbsentHeader(traceparent_key.to_owned()))?,
        )?;

        let trace_state = match tracestate {
            Some(value) => TraceState::from_str(value).unwrap_or_else(|_| {
                otel_warn!(
                    name: "TraceContextExtractor.Extract.InvalidTraceState",
                    tracestate = value,
                );
                TraceState::default()
            }),
            None => TraceState::default(),
        };

        let span_context = SpanContext::new(
            traceparent.trace_id,
            traceparent.span_id,
            traceparent.trace_flags,
            true,
            trace_state,
        );

        Ok(cx.with_remote_span_context(span_context))
    }
}

#[derive(Debug, PartialEq)]
struct TraceParent {
    trace_id: TraceId,
    span_id: SpanId,
    trace_flags: TraceFlags,
}

impl TraceParent {
    fn parse(value: &str) -> Result<Self, ExtractError> {
        let mut fields = value.split('-');
        let (Some(version), Some(trace_id), Some(span_id), Some(flags), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return Err(ExtractError::MalformedHeader(
                "expected four dash separated fields",
            ));
        };

        if !is_hex(version, 2) {
            return Err(ExtractError::MalformedHeader("invalid version"));
        }
        if !is_hex(trace_id, TRACE_ID_WIDTH * 2) {
            return Err(ExtractError::MalformedHeader("invalid trace id"));
        }
        if !is_hex(span_id, SPAN_ID_WIDTH * 2) {
            return Err(ExtractError::MalformedHeader("invalid span id"));
        }
        if !is_hex(flags, 2) {
            return Err(ExtractError::MalformedHeader("invalid flags"));
        }

        let version = u8::from_str_radix(version, 16)
            .map_err(|_| ExtractError::MalformedHeader("invalid version"))?;
        if version != SUPPORTED_VERSION {
            return Err(ExtractError::UnsupportedVersion(version));
        }

        let trace_id = decode_id::<TRACE_ID_WIDTH>(trace_id)?;
        let span_id = decode_id::<SPAN_ID_WIDTH>(span_id)?;
        if is_all_zero(&trace_id) || is_all_zero(&span_id) {
            return Err(ExtractError::InvalidIdentity);
        }

        let flags = u8::from_str_radix(flags, 16)
            .map_err(|_| ExtractError::MalformedHeader("invalid flags"))?;

        Ok(TraceParent {
            trace_id: TraceId::from_bytes(trace_id),
            span_id: SpanId::from_bytes(span_id),
            trace_flags: trace_context_flags(flags),
        })
    }
}

fn is_hex(field: &str, len: usize) -> bool {
    field.len() == len && field.bytes().all(|b| b.is_ascii_hexdigit())
}
