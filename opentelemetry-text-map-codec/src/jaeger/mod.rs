//! # Jaeger Propagation
//!
//! Jaeger carries the span identity in a single header,
//!
//! `uber-trace-id: {trace-id}:{span-id}:{parent-span-id}:{flags}`
//!
//! and each baggage item in its own `uberctx-{name}` header. The parent span
//! id is deprecated and always written as `0`.
//!
//! The second flag bit requests debug mode. It is not a span level flag, so it
//! is kept on the [`Context`] as a marker: extraction sets it with
//! [`context_with_debug`] and injection reads it back with [`is_debug`].
//!
//! See the [jaeger propagation format] for details.
//!
//! [jaeger propagation format]: https://www.jaegertracing.io/docs/1.18/client-libraries/#propagation-format
use crate::config::JaegerConfig;
use opentelemetry::{
    propagation::{text_map_propagator::FieldIter, Extractor, Injector, TextMapPropagator},
    Context,
};

mod extractor;
mod injector;

pub use extractor::JaegerExtractor;
pub use injector::JaegerInjector;

#[derive(Clone, Copy, Debug)]
struct JaegerDebug;

/// Returns a copy of `cx` marked as a Jaeger debug trace.
pub fn context_with_debug(cx: &Context) -> Context {
    cx.with_value(JaegerDebug)
}

/// Whether `cx` is marked as a Jaeger debug trace.
pub fn is_debug(cx: &Context) -> bool {
    cx.get::<JaegerDebug>().is_some()
}

/// [`TextMapPropagator`] in the [jaeger propagation format], pairing a
/// [`JaegerExtractor`] with a [`JaegerInjector`] over the same header names.
///
/// ## Examples
/// ```
/// use opentelemetry::{global, propagation::TextMapPropagator};
/// use opentelemetry_text_map_codec::{jaeger::JaegerPropagator, JaegerConfig};
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert(
///     "uber-trace-id".to_string(),
///     "4d0000000000000016:17c29:0:1".to_string(),
/// );
///
/// let propagator = JaegerPropagator::new();
/// let cx = propagator.extract(&headers);
///
/// let mut outgoing: HashMap<String, String> = HashMap::new();
/// propagator.inject_context(&cx, &mut outgoing);
/// assert_eq!(
///     outgoing.get("uber-trace-id").map(String::as_str),
///     Some("000000000000004d0000000000000016:0000000000017c29:0:1")
/// );
///
/// // or register it globally, optionally with a custom header name
/// global::set_text_map_propagator(JaegerPropagator::with_config(
///     JaegerConfig::new().with_header_name("x-trace-id"),
/// ));
/// ```
///
/// [jaeger propagation format]: https://www.jaegertracing.io/docs/1.18/client-libraries/#propagation-format
#[derive(Clone, Debug)]
pub struct JaegerPropagator {
    extractor: JaegerExtractor,
    injector: JaegerInjector,
    fields: [String; 1],
}

impl Default for JaegerPropagator {
    fn default() -> Self {
        JaegerPropagator::new()
    }
}

impl JaegerPropagator {
    /// Create a Jaeger propagator with the default header names.
    pub fn new() -> Self {
        Self::with_config(JaegerConfig::default())
    }

    /// Create a Jaeger propagator reading and writing the keys of `config`.
    pub fn with_config(config: JaegerConfig) -> Self {
        JaegerPropagator {
            fields: [config.header_name().to_owned()],
            extractor: JaegerExtractor::with_config(config.clone()),
            injector: JaegerInjector::with_config(config),
        }
    }

    /// The extracting half.
    pub fn extractor(&self) -> &JaegerExtractor {
        &self.extractor
    }

    /// The injecting half.
    pub fn injector(&self) -> &JaegerInjector {
        &self.injector
    }
}

impl TextMapPropagator for JaegerPropagator {
    fn inject_context(&self, cx: &Context, injector: &mut dyn Injector) {
        self.injector.inject(cx, injector)
    }

    fn extract_with_context(&self, cx: &Context, extractor: &dyn Extractor) -> Context {
        self.extractor.extract(extractor, cx)
    }

    fn fields(&self) -> FieldIter<'_> {
        FieldIter::new(self.fields.as_ref())
    }
}
