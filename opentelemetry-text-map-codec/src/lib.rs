//! Text map codecs that carry an OpenTelemetry trace identity across process
//! boundaries.
//!
//! Two wire formats are supported:
//!
//! - [Jaeger propagation format]: a single `uber-trace-id` header
//!   (`{trace-id}:{span-id}:{parent-span-id}:{flags}`) plus one
//!   `uberctx-{name}` header per baggage item. See [`jaeger`].
//! - [W3C TraceContext]: fixed width `traceparent` and the vendor
//!   `tracestate` list. See [`trace_context`].
//!
//! Each format is split into an extractor (carrier to [`Context`]) and an
//! injector ([`Context`] to carrier). Both are immutable once built, read and
//! write carriers through the capabilities in [`carrier`], and can be shared
//! between threads freely. Extraction never fails: a carrier that cannot be
//! read yields the input context unchanged, and `try_extract` reports which
//! rule rejected it.
//!
//! The pairs are also available as [`TextMapPropagator`]s for use with
//! `opentelemetry::global` and composite propagators.
//!
//! ## Examples
//! ```
//! use opentelemetry::{trace::TraceContextExt, Context};
//! use opentelemetry_text_map_codec::jaeger::{is_debug, JaegerExtractor, JaegerInjector};
//! use std::collections::HashMap;
//!
//! let mut headers = HashMap::new();
//! headers.insert(
//!     "uber-trace-id".to_string(),
//!     "1234567890abcdef1234567890abcdef:1234567890abcdef:0:3".to_string(),
//! );
//!
//! let cx = JaegerExtractor::new().extract(&headers, &Context::new());
//! assert!(cx.span().span_context().is_sampled());
//! assert!(is_debug(&cx));
//!
//! let mut outgoing: HashMap<String, String> = HashMap::new();
//! JaegerInjector::new().inject(&cx, &mut outgoing);
//! assert_eq!(outgoing, headers);
//! ```
//!
//! [Jaeger propagation format]: https://www.jaegertracing.io/docs/1.18/client-libraries/#propagation-format
//! [W3C TraceContext]: https://www.w3.org/TR/trace-context/
//! [`Context`]: opentelemetry::Context
//! [`TextMapPropagator`]: opentelemetry::propagation::TextMapPropagator
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(
    docsrs,
    feature(doc_cfg, doc_auto_cfg),
    deny(rustdoc::broken_intra_doc_links)
)]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/open-telemetry/opentelemetry-rust/main/assets/logo.svg"
)]

pub mod baggage;
pub mod carrier;
mod config;
mod error;
pub mod flags;
pub mod id;
pub mod jaeger;
pub mod trace_context;

pub use carrier::{TextMapAccessor, TextMapGetter, TextMapSetter};
pub use config::{JaegerConfig, TraceContextConfig};
pub use error::{ExtractError, IdError};
pub use jaeger::{JaegerExtractor, JaegerInjector, JaegerPropagator};
pub use trace_context::{TraceContextExtractor, TraceContextInjector, TraceContextPropagator};
