//! # W3C Trace Context
//!
//! The `traceparent` header identifies the incoming request in a tracing
//! system. It has four fixed width fields:
//!
//! `traceparent: 00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01`
//!
//!    - version
//!    - trace-id
//!    - parent-id
//!    - trace-flags
//!
//! The `tracestate` header carries vendor specific identification as an
//! ordered list, e.g. `tracestate: vendorname1=opaqueValue1,vendorname2=opaqueValue2`.
//! It is passed through opaquely as a [`TraceState`].
//!
//! See the [w3c trace-context docs] for more details.
//!
//! [w3c trace-context docs]: https://w3c.github.io/trace-context/
//! [`TraceState`]: opentelemetry::trace::TraceState
use crate::config::TraceContextConfig;
use opentelemetry::{
    propagation::{text_map_propagator::FieldIter, Extractor, Injector, TextMapPropagator},
    Context,
};

mod extractor;
mod injector;

pub use extractor::TraceContextExtractor;
pub use injector::TraceContextInjector;

const SUPPORTED_VERSION: u8 = 0;

/// [`TextMapPropagator`] for the [W3C TraceContext] headers, pairing a
/// [`TraceContextExtractor`] with a [`TraceContextInjector`].
///
/// [W3C TraceContext]: https://www.w3.org/TR/trace-context/
#[derive(Clone, Debug)]
pub struct TraceContextPropagator {
    extractor: TraceContextExtractor,
    injector: TraceContextInjector,
    fields: [String; 2],
}

impl Default for TraceContextPropagator {
    fn default() -> Self {
        TraceContextPropagator::new()
    }
}

impl TraceContextPropagator {
    /// Create a propagator with the default header names.
    pub fn new() -> Self {
        Self::with_config(TraceContextConfig::default())
    }

    /// Create a propagator reading and writing the keys of `config`.
    pub fn with_config(config: TraceContextConfig) -> Self {
        TraceContextPropagator {
            fields: [
                config.traceparent_key().to_owned(),
                config.tracestate_key().to_owned(),
            ],
            extractor: TraceContextExtractor::with_config(config.clone()),
            injector: TraceContextInjector::with_config(config),
        }
    }

    /// The extracting half.
    pub fn extractor(&self) -> &TraceContextExtractor {
        &self.extractor
    }

    /// The injecting half.
    pub fn injector(&self) -> &TraceContextInjector {
        &self.injector
    }
}

impl TextMapPropagator for TraceContextPropagator {
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

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::TraceContextExt;
    use std::collections::HashMap;

    #[test]
    fn fields() {
        assert_eq!(
            TraceContextPropagator::new().fields().collect::<Vec<_>>(),
            vec!["traceparent", "tracestate"]
        );
    }

    #[test]
    fn propagator_round_trip() {
        let propagator = TraceContextPropagator::new();
        let mut incoming = HashMap::new();
        incoming.insert(
            "traceparent".to_string(),
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01".to_string(),
        );
        incoming.insert("tracestate".to_string(), "foo=bar".to_string());

        let cx = propagator.extract(&incoming);
        assert!(cx.span().span_context().is_remote());

        let mut outgoing: HashMap<String, String> = HashMap::new();
        propagator.inject_context(&cx, &mut outgoing);
        assert_eq!(outgoing, incoming);
    }
}
