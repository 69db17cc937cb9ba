//! Inbound request view handed to parsers.
//!
//! # Responsibilities
//! - Expose URL, headers, route parameters and component name to parsers
//! - Carry the mutable context map written by the registry
//! - Carry upstream context deserialized from propagation headers
//!
//! # Design Decisions
//! - Built once per HTTP call by the context middleware
//! - The absolute URL is reconstructed from the URI, `Host` and
//!   `X-Forwarded-Proto`, since servers usually only see origin-form URIs

use std::collections::BTreeMap;

use axum::http::{header, request::Parts, HeaderMap};
use url::Url;

use crate::context::error::{ContextError, ContextResult};
use crate::context::value::{Context, ContextValue};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Request-derived input of a parser sweep.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    /// Absolute request URL.
    pub url: Url,
    /// Request headers (case-insensitive lookup).
    pub headers: HeaderMap,
    /// Route parameters of the matched route.
    pub params: BTreeMap<String, String>,
    /// Facts resolved for this request.
    pub context: Context,
    /// Context received from an upstream layout, keyed in wire form.
    pub upstream: BTreeMap<String, String>,
    /// Name of the component handling the request.
    pub name: String,
}

impl InboundRequest {
    /// Create a request for `url` with no headers or parameters.
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
            params: BTreeMap::new(),
            context: Context::new(),
            upstream: BTreeMap::new(),
            name: name.into(),
        }
    }

    /// Build a request from HTTP request parts.
    pub fn from_parts(name: impl Into<String>, parts: &Parts) -> ContextResult<Self> {
        let url = request_url(parts)?;
        let mut incoming = Self::new(name, url);
        incoming.headers = parts.headers.clone();
        Ok(incoming)
    }

    /// Set a route parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up a header value as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Look up a resolved fact by context key.
    pub fn fact(&self, key: &str) -> Option<&ContextValue> {
        self.context.get(key)
    }
}

fn request_url(parts: &Parts) -> ContextResult<Url> {
    let uri = &parts.uri;

    // Absolute-form URIs (proxies, tests) already carry everything.
    if uri.scheme().is_some() && uri.authority().is_some() {
        return Url::parse(&uri.to_string()).map_err(|e| ContextError::InvalidRequest(e.to_string()));
    }

    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ContextError::InvalidRequest("missing Host header".into()))?;

    let scheme = parts
        .headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "http".to_string());

    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    Url::parse(&format!("{}://{}{}", scheme, host, path))
        .map_err(|e| ContextError::InvalidRequest(format!("{}: {}", host, e)))
}
