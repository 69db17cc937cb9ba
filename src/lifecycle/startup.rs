//! Startup orchestration.
//!
//! Builds the parser registry from a validated configuration and wires it
//! into the HTTP server. Any error here is fatal.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::context::{ContextError, ParserRegistry};
use crate::http::HttpServer;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Context setup failed: {0}")]
    Context(#[from] ContextError),
}

/// Build the server for `config`.
pub fn startup(config: AppConfig) -> Result<HttpServer, StartupError> {
    let registry = Arc::new(ParserRegistry::new(&config.context)?);

    tracing::info!(
        name = %registry.name(),
        role = ?config.server.role,
        parsers = ?registry.parser_names(),
        podlets = config.podlets.len(),
        "Context registry ready"
    );

    Ok(HttpServer::new(config, registry))
}
