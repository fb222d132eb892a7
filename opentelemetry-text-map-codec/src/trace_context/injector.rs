use super::SUPPORTED_VERSION;
use crate::carrier::{TextMapAccessor, TextMapSetter};
use crate::config::TraceContextConfig;
use opentelemetry::{
    trace::{TraceContextExt, TraceFlags},
    Context,
};

/// Writes the active span context of a [`Context`] as `traceparent` and
/// `tracestate` headers.
#[derive(Clone, Debug, Default)]
pub struct TraceContextInjector<S = TextMapAccessor> {
    config: TraceContextConfig,
    default_setter: S,
}

impl TraceContextInjector {
    /// Injector writing the default `traceparent` / `tracestate` keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Injector writing the keys of `config`.
    pub fn with_config(config: TraceContextConfig) -> Self {
        TraceContextInjector {
            config,
            default_setter: TextMapAccessor,
        }
    }
}

impl<S> TraceContextInjector<S> {
    /// Injector that writes carriers through `setter` unless a call provides
    /// its own.
    pub fn with_setter(config: TraceContextConfig, setter: S) -> Self {
        TraceContextInjector {
            config,
            default_setter: setter,
        }
    }

    /// The header names in use.
    pub fn config(&self) -> &TraceContextConfig {
        &self.config
    }

    /// Inject with the default setter.
    pub fn inject<C>(&self, cx: &Context, carrier: &mut C)
    where
        C: ?Sized,
        S: TextMapSetter<C>,
    {
        self.inject_with(cx, carrier, &self.default_setter)
    }

    /// Inject writing the carrier through `setter`.
    ///
    /// Nothing is written when the active span context is invalid, and
    /// `tracestate` is skipped when the trace state is empty.
    pub fn inject_with<C, T>(&self, cx: &Context, carrier: &mut C, setter: &T)
    where
        C: ?Sized,
        T: TextMapSetter<C> + ?Sized,
    {
        let span = cx.span();
        let span_context = span.span_context();
        if !span_context.is_valid() {
            return;
        }

        let header_value = format!(
            "{:02x}-{}-{}-{:02x}",
            SUPPORTED_VERSION,
            span_context.trace_id(),
            span_context.span_id(),
            (span_context.trace_flags() & TraceFlags::SAMPLED).to_u8(),
        );
        setter.set(carrier, self.config.traceparent_key(), header_value);

        let trace_state = span_context.trace_state().header();
        if !trace_state.is_empty() {
            setter.set(carrier, self.config.tracestate_key(), trace_state);
        }
    }
}
