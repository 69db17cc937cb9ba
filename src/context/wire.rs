//! Header-based context propagation.
//!
//! # Responsibilities
//! - Derive wire keys from parser names (`to_wire_key`)
//! - Serialize a resolved context into `podium-*` header fields (layout side)
//! - Deserialize `podium-*` header fields back into a context (podlet side)
//!
//! # Design Decisions
//! - Wire keys embed only the fact name, never the producing component
//! - The component name passed to `serialize` is the receiver's name, used to
//!   resolve deferred values such as the public pathname
//! - Deserialized keys stay in wire form with the prefix stripped
//! - Missing headers are not an error: a direct request has no upstream context

use std::collections::BTreeMap;

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use crate::context::error::{ContextError, ContextResult};
use crate::context::value::Context;

/// Prefix of every propagated header field and context key.
pub const PREFIX: &str = "podium";

/// Convert a name to its kebab-case wire form.
///
/// A dash is inserted between a lowercase letter or digit and a following
/// uppercase letter, and before the last uppercase letter of an uppercase run
/// that is followed by a lowercase letter (`XMLHttp` becomes `xml-http`).
/// Underscores become dashes and the result is lowercased.
pub fn to_wire_key(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut key = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            key.push('-');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                key.push('-');
            }
        }
        key.extend(c.to_lowercase());
    }
    key
}

/// Context key under which the registry stores the fact of `parser`.
pub fn context_key(parser: &str) -> String {
    to_wire_key(&format!("{}-{}", PREFIX, parser))
}

fn header_key(key: &str) -> String {
    let key = to_wire_key(key);
    if key.starts_with(&format!("{}-", PREFIX)) {
        key
    } else {
        format!("{}-{}", PREFIX, key)
    }
}

/// Flatten a context into wire names and canonical string values.
pub fn encode(context: &Context, component: &str) -> BTreeMap<String, String> {
    context
        .iter()
        .map(|(key, value)| (header_key(key), value.to_wire(component)))
        .collect()
}

/// Write `context` into `headers` as `podium-*` fields for a call to `component`.
pub fn serialize(headers: &mut HeaderMap, context: &Context, component: &str) -> ContextResult<()> {
    for (key, value) in encode(context, component) {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|_| ContextError::InvalidHeader { name: key.clone() })?;
        let value = HeaderValue::from_str(&value)
            .map_err(|_| ContextError::InvalidHeader { name: key.clone() })?;
        headers.insert(name, value);
    }
    Ok(())
}

/// Read every `<prefix>-*` header field into a map keyed by the remainder.
pub fn deserialize(headers: &HeaderMap, prefix: &str) -> BTreeMap<String, String> {
    let prefix = format!("{}-", prefix.to_ascii_lowercase());
    let mut context = BTreeMap::new();

    for (name, value) in headers.iter() {
        let Some(key) = name.as_str().strip_prefix(&prefix) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        match value.to_str() {
            Ok(value) => {
                context.insert(key.to_string(), value.to_string());
            }
            Err(_) => tracing::warn!(header = %name, "Skipping non-ASCII context header"),
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::value::{AssetPathname, ContextValue};

    #[test]
    fn test_to_wire_key() {
        assert_eq!(to_wire_key("deviceType"), "device-type");
        assert_eq!(to_wire_key("podium-publicPathname"), "podium-public-pathname");
        assert_eq!(to_wire_key("XMLHttpRequest"), "xml-http-request");
        assert_eq!(to_wire_key("locale"), "locale");
        assert_eq!(to_wire_key("mount_origin"), "mount-origin");
        assert_eq!(to_wire_key("v2Api"), "v2-api");
        assert_eq!(to_wire_key("already-kebab"), "already-kebab");
    }

    #[test]
    fn test_context_key() {
        assert_eq!(context_key("mountOrigin"), "podium-mount-origin");
        assert_eq!(context_key("debug"), "podium-debug");
    }

    #[test]
    fn test_serialize_resolves_pathname_for_receiver() {
        let mut context = Context::new();
        context.insert(
            "podium-public-pathname".into(),
            ContextValue::from(AssetPathname::new("/home", "podium-resource")),
        );
        context.insert("podium-debug".into(), ContextValue::from("true"));

        let mut headers = HeaderMap::new();
        serialize(&mut headers, &context, "header").unwrap();

        assert_eq!(headers["podium-public-pathname"], "/home/podium-resource/header");
        assert_eq!(headers["podium-debug"], "true");
    }

    #[test]
    fn test_serialize_adds_missing_prefix() {
        let mut context = Context::new();
        context.insert("deviceType".into(), ContextValue::from("mobile"));
        context.insert("visits".into(), ContextValue::from(3i64));

        let encoded = encode(&context, "mycomp");
        assert_eq!(encoded["podium-device-type"], "mobile");
        assert_eq!(encoded["podium-visits"], "3");
    }

    #[test]
    fn test_serialize_rejects_control_characters() {
        let mut context = Context::new();
        context.insert("podium-locale".into(), ContextValue::from("en\nUS"));

        let mut headers = HeaderMap::new();
        let err = serialize(&mut headers, &context, "mycomp").unwrap_err();
        assert!(matches!(err, ContextError::InvalidHeader { name } if name == "podium-locale"));
    }

    #[test]
    fn test_round_trip() {
        let mut context = Context::new();
        for (key, value) in [
            ("podium-locale", "nb-NO"),
            ("podium-device-type", "tablet"),
            ("podium-mount-origin", "https://example.com:8080"),
            ("podium-requested-by", "layout"),
        ] {
            context.insert(key.into(), ContextValue::from(value));
        }

        let mut headers = HeaderMap::new();
        serialize(&mut headers, &context, "mycomp").unwrap();
        let restored = deserialize(&headers, PREFIX);

        assert_eq!(restored.len(), context.len());
        for (key, value) in &context {
            let suffix = key.strip_prefix("podium-").unwrap();
            assert_eq!(restored[suffix], value.to_wire("mycomp"));
        }
    }

    #[test]
    fn test_deserialize_ignores_foreign_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/html"));
        headers.insert("podiumx", HeaderValue::from_static("nope"));
        headers.insert("podium-", HeaderValue::from_static("empty"));
        assert!(deserialize(&headers, PREFIX).is_empty());

        headers.insert(
            HeaderName::from_bytes(b"Podium-Locale").unwrap(),
            HeaderValue::from_static("de-DE"),
        );
        let restored = deserialize(&headers, "Podium");
        assert_eq!(restored.len(), 1);
        assert_eq!(restored["locale"], "de-DE");
    }
}
