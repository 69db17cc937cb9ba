//! Layout page composition.
//!
//! # Responsibilities
//! - Fetch every configured podlet concurrently, propagating the resolved
//!   context as `podium-*` headers
//! - Compose the fragments into one HTML document
//!
//! # Design Decisions
//! - A failing or slow podlet is replaced by an empty fragment; the page
//!   still renders
//! - Each podlet call has its own timeout
//! - Locale and title come from the request and are escaped; fragments are
//!   trusted podlet markup and inserted as-is

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::Html,
    Extension,
};
use futures_util::future::join_all;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use thiserror::Error;

use crate::config::PodletConfig;
use crate::context::{wire, Context, ContextError, InboundRequest};
use crate::http::server::AppState;

/// Upper bound on a podlet response body.
const MAX_FRAGMENT_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot serialize context: {0}")]
    Context(#[from] ContextError),

    #[error("invalid request: {0}")]
    Http(#[from] axum::http::Error),

    #[error("upstream error: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("timed out after {0} ms")]
    Timeout(u64),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("cannot read body: {0}")]
    Body(#[from] axum::Error),
}

/// Fetch one podlet's content with `context` propagated as headers.
pub async fn fetch_podlet(
    client: &Client<HttpConnector, Body>,
    podlet: &PodletConfig,
    context: &Context,
) -> Result<String, FetchError> {
    let mut request = Request::get(podlet.uri.as_str()).body(Body::empty())?;
    wire::serialize(request.headers_mut(), context, &podlet.name)?;

    let response = tokio::time::timeout(Duration::from_millis(podlet.timeout_ms), client.request(request))
        .await
        .map_err(|_| FetchError::Timeout(podlet.timeout_ms))??;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let bytes = axum::body::to_bytes(Body::new(response.into_body()), MAX_FRAGMENT_BYTES).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn layout_handler(
    State(state): State<AppState>,
    Extension(incoming): Extension<InboundRequest>,
) -> Html<String> {
    let client = &state.client;
    let context = &incoming.context;
    let fragments = join_all(state.podlets.iter().map(|podlet| async move {
        match fetch_podlet(client, podlet, context).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(podlet = %podlet.name, uri = %podlet.uri, error = %e, "Podlet fetch failed, using fallback");
                String::new()
            }
        }
    }))
    .await;

    let locale = incoming
        .fact(&wire::context_key("locale"))
        .and_then(|v| v.as_text())
        .unwrap_or("en-US");

    Html(compose(&incoming.name, locale, &fragments))
}

/// Escape text for use in HTML content and quoted attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Render the page document around podlet fragments.
pub fn compose(title: &str, locale: &str, fragments: &[String]) -> String {
    let mut page = format!(
        "<!doctype html>\n<html lang=\"{}\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n",
        escape_html(locale),
        escape_html(title)
    );
    for fragment in fragments {
        page.push_str("<section>");
        page.push_str(fragment);
        page.push_str("</section>\n");
    }
    page.push_str("</body>\n</html>\n");
    page
}
