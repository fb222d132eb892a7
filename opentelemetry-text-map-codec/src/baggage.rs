//! Baggage carried as one carrier entry per item under a key prefix, the way
//! Jaeger clients send it (`uberctx-<name>: <value>`).
use crate::carrier::{TextMapGetter, TextMapSetter};
use crate::error::ExtractError;
use opentelemetry::{
    baggage::{BaggageExt, KeyValueMetadata},
    Context,
};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Collect every `prefix`ed carrier entry into the baggage of `cx`.
///
/// Items already in `cx` are kept; an extracted item replaces one with the
/// same name.
///
/// Values are form decoded: `+` is a space and `%XX` an escaped byte. A stray
/// `%` or a value that does not decode to UTF-8 fails the whole scan.
pub fn extract_prefixed<C, G>(
    cx: &Context,
    carrier: &C,
    getter: &G,
    prefix: &str,
) -> Result<Context, ExtractError>
where
    C: ?Sized,
    G: TextMapGetter<C> + ?Sized,
{
    let mut extracted = Vec::new();
    for carrier_key in getter.keys(carrier) {
        let Some(baggage_key) = carrier_key.strip_prefix(prefix) else {
            continue;
        };
        if baggage_key.is_empty() {
            continue;
        }
        let Some(raw_value) = getter.get(carrier, carrier_key) else {
            continue;
        };
        let value = form_decode(raw_value)
            .ok_or_else(|| ExtractError::MalformedBaggage(carrier_key.to_owned()))?;
        extracted.push(KeyValueMetadata::new(
            baggage_key.to_owned(),
            value.into_owned(),
            "",
        ));
    }

    if extracted.is_empty() {
        return Ok(cx.clone());
    }

    let merged: Vec<KeyValueMetadata> = cx
        .baggage()
        .iter()
        .map(|(name, (value, metadata))| {
            KeyValueMetadata::new(name.clone(), value.clone(), metadata.clone())
        })
        .chain(extracted)
        .collect();
    Ok(cx.with_baggage(merged))
}

/// Write every baggage item of `cx` under `prefix + name`.
///
/// Values are written as they are, without percent encoding.
pub fn inject_prefixed<C, S>(cx: &Context, carrier: &mut C, setter: &S, prefix: &str)
where
    C: ?Sized,
    S: TextMapSetter<C> + ?Sized,
{
    for (name, (value, _metadata)) in cx.baggage().iter() {
        setter.set(
            carrier,
            &format!("{prefix}{}", name.as_str()),
            value.as_str().to_owned(),
        );
    }
}

fn form_decode(raw: &str) -> Option<Cow<'_, str>> {
    let escapes_complete = raw.match_indices('%').all(|(at, _)| {
        raw.as_bytes()
            .get(at + 1..at + 3)
            .is_some_and(|escape| escape.iter().all(u8::is_ascii_hexdigit))
    });
    if !escapes_complete {
        return None;
    }

    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        percent_decode_str(&spaced)
            .decode_utf8()
            .ok()
            .map(|decoded| Cow::Owned(decoded.into_owned()))
    } else {
        percent_decode_str(raw).decode_utf8().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::{getter_fn, TextMapAccessor};
    use opentelemetry::{baggage::Baggage, KeyValue};
    use rstest::rstest;
    use std::collections::HashMap;

    const PREFIX: &str = "uberctx-";

    fn carrier(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case("alice%40example.com", "alice@example.com")]
    #[case("hello+world", "hello world")]
    #[case("a%2Bb", "a+b")]
    #[case("plain", "plain")]
    #[case("", "")]
    #[case("caf%C3%A9", "café")]
    fn decodes_form_values(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(form_decode(raw).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("%")]
    #[case("abc%4")]
    #[case("%ZZ")]
    #[case("%FF")]
    fn rejects_bad_escapes(#[case] raw: &str) {
        assert_eq!(form_decode(raw), None);
    }

    #[test]
    fn extracts_only_prefixed_keys() {
        let carrier = carrier(&[
            ("uberctx-userId", "alice%40example.com"),
            ("uberctx-tier", "gold"),
            ("uber-trace-id", "1:1:0:1"),
            ("x-uberctx-other", "ignored"),
            ("uberctx-", "no name"),
        ]);

        let cx = extract_prefixed(&Context::new(), &carrier, &TextMapAccessor, PREFIX).unwrap();
        let baggage = cx.baggage();

        assert_eq!(baggage.len(), 2);
        assert_eq!(
            baggage.get("userId").map(|v| v.as_str().to_string()),
            Some("alice@example.com".to_string())
        );
        assert_eq!(
            baggage.get("tier").map(|v| v.as_str().to_string()),
            Some("gold".to_string())
        );
    }

    #[test]
    fn no_prefixed_keys_returns_input_context() {
        let cx = Context::new().with_baggage(vec![KeyValue::new("existing", "1")]);
        let carrier = carrier(&[("traceparent", "x")]);

        let extracted = extract_prefixed(&cx, &carrier, &TextMapAccessor, PREFIX).unwrap();

        assert_eq!(extracted.baggage().len(), 1);
        assert!(extracted.baggage().get("existing").is_some());
    }

    #[test]
    fn extracted_entries_merge_with_existing_baggage() {
        let cx = Context::new().with_baggage(vec![KeyValue::new("existing", "1")]);
        let carrier = carrier(&[("uberctx-added", "2")]);

        let extracted = extract_prefixed(&cx, &carrier, &TextMapAccessor, PREFIX).unwrap();

        assert_eq!(extracted.baggage().len(), 2);
        assert!(extracted.baggage().get("existing").is_some());
    }

    #[test]
    fn extracted_entries_replace_same_name() {
        let cx = Context::new().with_baggage(vec![KeyValue::new("user", "old")]);
        let carrier = carrier(&[("uberctx-user", "new")]);

        let extracted = extract_prefixed(&cx, &carrier, &TextMapAccessor, PREFIX).unwrap();

        assert_eq!(extracted.baggage().len(), 1);
        assert_eq!(
            extracted.baggage().get("user").map(|v| v.as_str().to_string()),
            Some("new".to_string())
        );
    }

    #[test]
    fn malformed_value_fails_the_scan() {
        let carrier = carrier(&[("uberctx-bad", "100%"), ("uberctx-good", "ok")]);

        assert_eq!(
            extract_prefixed(&Context::new(), &carrier, &TextMapAccessor, PREFIX).unwrap_err(),
            ExtractError::MalformedBaggage("uberctx-bad".to_string())
        );
    }

    #[test]
    fn closure_getter_finds_no_entries() {
        let carrier = carrier(&[("uberctx-session", "abc")]);
        let getter =
            getter_fn::<HashMap<String, String>, _>(|c, key| c.get(key).map(String::as_str));

        let cx = extract_prefixed(&Context::new(), &carrier, &getter, PREFIX).unwrap();

        assert_eq!(cx.baggage().len(), 0);
    }

    #[test]
    fn mixed_case_names_round_trip() {
        let cx = Context::new().with_baggage(vec![KeyValue::new("userId", "alice")]);
        let mut carrier: HashMap<String, String> = HashMap::new();

        inject_prefixed(&cx, &mut carrier, &TextMapAccessor, PREFIX);
        let extracted =
            extract_prefixed(&Context::new(), &carrier, &TextMapAccessor, PREFIX).unwrap();

        assert_eq!(
            extracted.baggage().get("userId").map(|v| v.as_str().to_string()),
            Some("alice".to_string())
        );
        assert!(extracted.baggage().get("userid").is_none());
    }

    #[test]
    fn injects_raw_values() {
        let mut baggage = Baggage::new();
        let _ = baggage.insert("userId", "alice@example.com");
        let _ = baggage.insert("note", "a b");
        let cx = Context::new().with_baggage(baggage);

        let mut carrier: HashMap<String, String> = HashMap::new();
        inject_prefixed(&cx, &mut carrier, &TextMapAccessor, PREFIX);

        assert_eq!(carrier.len(), 2);
        assert_eq!(
            carrier.get("uberctx-userId").map(String::as_str),
            Some("alice@example.com")
        );
        assert_eq!(carrier.get("uberctx-note").map(String::as_str), Some("a b"));
    }
}
