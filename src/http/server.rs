//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router for the configured role (layout or podlet)
//! - Wire up middleware (context resolution, timeout, tracing)
//! - Bind server to listener and stop on shutdown signal

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    middleware,
    routing::get,
    Json, Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{AppConfig, PodletConfig, Role};
use crate::context::parsers::CacheStatistics;
use crate::context::pathname::pathname_builder;
use crate::context::ParserRegistry;
use crate::http::layout::layout_handler;
use crate::http::middleware::context_middleware;
use crate::http::podlet::podlet_handler;

/// Path of the context introspection endpoint.
pub const INTROSPECTION_PATH: &str = "/_podium/context";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ParserRegistry>,
    pub role: Role,
    pub podlets: Arc<Vec<PodletConfig>>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for a layout or podlet.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and registry.
    pub fn new(config: AppConfig, registry: Arc<ParserRegistry>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            registry,
            role: config.server.role,
            podlets: Arc::new(config.podlets.clone()),
            client,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mount = pathname_builder([config.context.mount_pathname.pathname.as_str()]);

        let routes = match config.server.role {
            Role::Layout => Router::new()
                .route(&mount, get(layout_handler))
                .route(&pathname_builder([mount.as_str(), "{locale}"]), get(layout_handler)),
            Role::Podlet => Router::new()
                .route(&mount, get(podlet_handler))
                .route(&pathname_builder([mount.as_str(), "{*rest}"]), get(podlet_handler)),
        };

        routes
            .route_layer(middleware::from_fn_with_state(state.clone(), context_middleware))
            .route(INTROSPECTION_PATH, get(introspection_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            role = ?self.config.server.role,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

}

#[derive(Debug, Serialize)]
pub struct Introspection {
    pub name: String,
    pub role: Role,
    pub parsers: Vec<String>,
    pub device_cache: CacheStatistics,
}

async fn introspection_handler(State(state): State<AppState>) -> Json<Introspection> {
    Json(Introspection {
        name: state.registry.name().to_string(),
        role: state.role,
        parsers: state.registry.parser_names(),
        device_cache: state.registry.device_type().statistics(),
    })
}
