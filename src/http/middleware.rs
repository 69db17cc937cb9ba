//! Context resolution middleware.
//!
//! # Responsibilities
//! - Build an `InboundRequest` from the request and its route parameters
//! - In podlet role, deserialize upstream `podium-*` headers first
//! - Run the parser sweep and attach the result to request extensions
//!
//! # Design Decisions
//! - Installed as a route layer so path parameters (`locale`) are available
//! - Unresolvable request URLs are client errors (400), parser failures are
//!   server errors (500)

use axum::{
    body::Body,
    extract::{FromRequestParts, RawPathParams, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::Role;
use crate::context::{wire, InboundRequest};
use crate::http::server::AppState;

pub async fn context_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    // 1. Build the inbound request
    let mut incoming = match InboundRequest::from_parts(state.registry.name(), &parts) {
        Ok(incoming) => incoming,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Cannot build inbound request");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    if let Ok(params) = RawPathParams::from_request_parts(&mut parts, &state).await {
        incoming.params = params
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
    }

    // 2. Upstream context from the requesting layout
    if state.role == Role::Podlet {
        incoming.upstream = wire::deserialize(&parts.headers, wire::PREFIX);
        tracing::debug!(upstream = incoming.upstream.len(), "Deserialized upstream context");
    }

    // 3. Local sweep
    parts.extensions.insert(incoming);
    if let Err(e) = state.registry.process_extensions(&mut parts.extensions).await {
        tracing::error!(path = %parts.uri.path(), error = %e, "Context resolution failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "Context resolution failed").into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}
