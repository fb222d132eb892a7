//! # Carrier access
//!
//! Codecs never touch a carrier directly. They read through a
//! [`TextMapGetter`] and write through a [`TextMapSetter`], so the same codec
//! works over a `HashMap`, an `http::HeaderMap` wrapper, gRPC metadata, or any
//! other transport that can look up, list, and store string values by key.
//!
//! [`TextMapAccessor`] is the default capability. It indexes a
//! `HashMap<String, String>` by the exact key, so mixed case baggage names
//! survive a round trip. Host carriers that only implement the OpenTelemetry
//! [`Extractor`] / [`Injector`] traits are read and written through
//! `dyn Extractor` / `dyn Injector`, with whatever key policy they apply.
//! [`getter_fn`] and [`setter_fn`] wrap a closure when a one-off accessor is
//! needed for a single call.
use opentelemetry::propagation::{Extractor, Injector};
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

/// Read capability over a carrier of type `C`.
pub trait TextMapGetter<C: ?Sized> {
    /// Value stored under `key`, if any.
    fn get<'a>(&self, carrier: &'a C, key: &str) -> Option<&'a str>;

    /// Every key present in the carrier.
    fn keys<'a>(&self, carrier: &'a C) -> Vec<&'a str>;
}

/// Write capability over a carrier of type `C`.
pub trait TextMapSetter<C: ?Sized> {
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, carrier: &mut C, key: &str, value: String);
}

/// Default accessor: exact key indexing for header maps, delegation for
/// OpenTelemetry [`Extractor`] / [`Injector`] trait objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextMapAccessor;

impl<S: BuildHasher> TextMapGetter<HashMap<String, String, S>> for TextMapAccessor {
    fn get<'a>(&self, carrier: &'a HashMap<String, String, S>, key: &str) -> Option<&'a str> {
        carrier.get(key).map(String::as_str)
    }

    fn keys<'a>(&self, carrier: &'a HashMap<String, String, S>) -> Vec<&'a str> {
        carrier.keys().map(String::as_str).collect()
    }
}

impl<S: BuildHasher> TextMapSetter<HashMap<String, String, S>> for TextMapAccessor {
    fn set(&self, carrier: &mut HashMap<String, String, S>, key: &str, value: String) {
        carrier.insert(key.to_owned(), value);
    }
}

impl<'c> TextMapGetter<dyn Extractor + 'c> for TextMapAccessor {
    fn get<'a>(&self, carrier: &'a (dyn Extractor + 'c), key: &str) -> Option<&'a str> {
        carrier.get(key)
    }

    fn keys<'a>(&self, carrier: &'a (dyn Extractor + 'c)) -> Vec<&'a str> {
        carrier.keys()
    }
}

impl<'c> TextMapSetter<dyn Injector + 'c> for TextMapAccessor {
    fn set(&self, carrier: &mut (dyn Injector + 'c), key: &str, value: String) {
        carrier.set(key, value);
    }
}

/// Getter backed by a closure, see [`getter_fn`].
///
/// A closure only answers lookups: [`TextMapGetter::keys`] is always empty, so
/// key scans such as the Jaeger baggage side channel find nothing through it.
#[derive(Clone, Copy)]
pub struct FnGetter<F>(F);

/// Build a [`TextMapGetter`] from a closure that is handed the carrier and the
/// requested key.
///
/// ```
/// use opentelemetry_text_map_codec::carrier::{getter_fn, TextMapGetter};
/// use std::collections::HashMap;
///
/// let getter = getter_fn::<HashMap<String, String>, _>(|carrier, key| {
///     carrier.get(&format!("x-{key}")).map(String::as_str)
/// });
///
/// let mut headers = HashMap::new();
/// headers.insert("x-traceparent".to_string(), "value".to_string());
/// assert_eq!(getter.get(&headers, "traceparent"), Some("value"));
/// ```
pub fn getter_fn<C, F>(f: F) -> FnGetter<F>
where
    C: ?Sized,
    F: for<'a> Fn(&'a C, &str) -> Option<&'a str>,
{
    FnGetter(f)
}

impl<C, F> TextMapGetter<C> for FnGetter<F>
where
    C: ?Sized,
    F: for<'a> Fn(&'a C, &str) -> Option<&'a str>,
{
    fn get<'a>(&self, carrier: &'a C, key: &str) -> Option<&'a str> {
        (self.0)(carrier, key)
    }

    fn keys<'a>(&self, _carrier: &'a C) -> Vec<&'a str> {
        Vec::new()
    }
}

impl<F> fmt::Debug for FnGetter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnGetter")
    }
}

/// Setter backed by a closure, see [`setter_fn`].
#[derive(Clone, Copy)]
pub struct FnSetter<F>(F);

/// Build a [`TextMapSetter`] from a closure that is handed the carrier, the key
/// and the value to store.
pub fn setter_fn<C, F>(f: F) -> FnSetter<F>
where
    C: ?Sized,
    F: Fn(&mut C, &str, String),
{
    FnSetter(f)
}

impl<C, F> TextMapSetter<C> for FnSetter<F>
where
    C: ?Sized,
    F: Fn(&mut C, &str, String),
{
    fn set(&self, carrier: &mut C, key: &str, value: String) {
        (self.0)(carrier, key, value)
    }
}

impl<F> fmt::Debug for FnSetter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSetter")
    }
}
