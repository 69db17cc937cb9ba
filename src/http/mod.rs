//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes per role)
//!     → middleware.rs (InboundRequest, upstream context, parser sweep)
//!     → layout.rs (fetch podlets with podium-* headers, compose page)
//!       or podlet.rs (render fragment from resolved context)
//!     → Send to client
//! ```

pub mod layout;
pub mod middleware;
pub mod podlet;
pub mod server;

pub use server::{AppState, HttpServer, INTROSPECTION_PATH};
