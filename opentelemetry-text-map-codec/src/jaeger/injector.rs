use super::is_debug;
use crate::baggage;
use crate::carrier::{TextMapAccessor, TextMapSetter};
use crate::config::JaegerConfig;
use crate::flags::JaegerFlags;
use opentelemetry::{trace::TraceContextExt, Context};

const DEPRECATED_PARENT_SPAN: &str = "0";

/// Writes the active span context and baggage of a [`Context`] as Jaeger
/// headers.
///
/// The identity is always written at full width
/// (`{trace-id:032x}:{span-id:016x}:0:{flags:x}`). The debug bit comes from the
/// context's debug marker, not from the span's trace flags. Baggage values are
/// written without percent encoding.
#[derive(Clone, Debug, Default)]
pub struct JaegerInjector<S = TextMapAccessor> {
    config: JaegerConfig,
    default_setter: S,
}

impl JaegerInjector {
    /// Injector writing the default `uber-trace-id` / `uberctx-` keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Injector writing the keys of `config`.
    pub fn with_config(config: JaegerConfig) -> Self {
        JaegerInjector {
            config,
            default_setter: TextMapAccessor,
        }
    }
}

impl<S> JaegerInjector<S> {
    /// Injector that writes carriers through `setter` unless a call provides
    /// its own.
    pub fn with_setter(config: JaegerConfig, setter: S) -> Self {
        JaegerInjector {
            config,
            default_setter: setter,
        }
    }

    /// The header names in use.
    pub fn config(&self) -> &JaegerConfig {
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
    /// Nothing is written when the active span context is invalid.
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

        let flags = JaegerFlags {
            sampled: span_context.is_sampled(),
            debug: is_debug(cx),
        };
        let header_value = format!(
            "{}:{}:{}:{:x}",
            span_context.trace_id(),
            span_context.span_id(),
            DEPRECATED_PARENT_SPAN,
            flags.encode(),
        );
        setter.set(carrier, self.config.header_name(), header_value);
        baggage::inject_prefixed(cx, carrier, setter, self.config.baggage_prefix());
    }
}
