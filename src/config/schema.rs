//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a layout or
//! podlet. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Context parser settings.
    pub context: ContextConfig,

    /// Podlets composed by a layout (ignored in podlet role).
    pub podlets: Vec<PodletConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Role of the running component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Composes podlets into a page.
    #[default]
    Layout,
    /// Serves a fragment to layouts.
    Podlet,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:7100").
    pub bind_address: String,

    pub role: Role,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7100".to_string(),
            role: Role::Layout,
            request_timeout_secs: 30,
        }
    }
}

/// Context parser configuration.
///
/// `name` is required; every other section has defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContextConfig {
    /// Component name (lowercase letters, digits, dashes).
    pub name: String,
    pub public_pathname: PublicPathnameConfig,
    pub mount_pathname: MountPathnameConfig,
    pub mount_origin: MountOriginConfig,
    pub device_type: DeviceTypeConfig,
    pub locale: LocaleConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublicPathnameConfig {
    pub pathname: String,
    /// Path segment under which public resources live.
    pub prefix: String,
}

impl Default for PublicPathnameConfig {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            prefix: "podium-resource".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MountPathnameConfig {
    pub pathname: String,
}

impl Default for MountPathnameConfig {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MountOriginConfig {
    /// Public origin (e.g., "https://www.example.com"). Derived from the
    /// request when unset.
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceTypeConfig {
    /// Maximum number of cached user-agent classifications.
    pub cache_size: usize,
}

impl Default for DeviceTypeConfig {
    fn default() -> Self {
        Self { cache_size: 10_000 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Default BCP-47 locale.
    pub locale: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
}

/// A podlet fetched by a layout.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PodletConfig {
    /// Podlet name; public pathnames are resolved against it.
    pub name: String,

    /// Content URI (e.g., "http://localhost:7001/").
    pub uri: String,

    /// Fetch timeout in milliseconds.
    #[serde(default = "default_podlet_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_podlet_timeout_ms() -> u64 {
    1000
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
