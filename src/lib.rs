//! Podium context propagation.
//!
//! Resolves request-derived facts (locale, device type, mount paths,
//! requesting component, debug flag) with a registry of concurrent parsers,
//! and carries them from a composing layout to its podlets as `podium-*`
//! HTTP header fields.

pub mod config;
pub mod context;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use context::{ContextError, InboundRequest, ParserRegistry};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
