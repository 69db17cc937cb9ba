//! Context propagation subsystem.
//!
//! # Data Flow
//! ```text
//! Layout:
//!     HTTP request
//!     → incoming.rs (InboundRequest: url, headers, params, name)
//!     → registry.rs (all parsers concurrently → request.context)
//!     → wire.rs serialize (podium-* headers on each podlet call)
//!
//! Podlet:
//!     podium-* headers
//!     → wire.rs deserialize (InboundRequest.upstream)
//!     → registry.rs (local sweep)
//! ```
//!
//! # Design Decisions
//! - Parsers are independent; no parser reads another parser's output
//! - Only the device type parser holds mutable state (its LRU cache)
//! - Configuration errors surface at construction, never per request

pub mod bcp47;
pub mod cache;
pub mod error;
pub mod incoming;
pub mod name;
pub mod parsers;
pub mod pathname;
pub mod registry;
pub mod value;
pub mod wire;

pub use error::{BoxError, ContextError, ContextResult};
pub use incoming::InboundRequest;
pub use parsers::Parser;
pub use registry::ParserRegistry;
pub use value::{AssetPathname, Context, ContextValue};
pub use wire::{deserialize, serialize, to_wire_key, PREFIX};
