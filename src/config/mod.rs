//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → ParserRegistry / HttpServer built from it at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the parser set is fixed at startup
//! - All fields have defaults to allow minimal configs (only `context.name`
//!   is required)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AppConfig, ContextConfig, DebugConfig, DeviceTypeConfig, LocaleConfig, MountOriginConfig,
    MountPathnameConfig, ObservabilityConfig, PodletConfig, PublicPathnameConfig, Role, ServerConfig,
};
pub use validation::{validate_config, ValidationError};
