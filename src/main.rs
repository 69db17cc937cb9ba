//! Podium layout / podlet server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser                 LAYOUT                               PODLET(s)
//!   ───────▶ middleware: InboundRequest
//!            → ParserRegistry.process (7 parsers, concurrent)
//!            → context { podium-locale, podium-device-type, ... }
//!            → layout handler ── GET + podium-* headers ──▶ middleware:
//!                                                            deserialize headers
//!                                                            → own parser sweep
//!                                                            → fragment
//!   ◀─────── composed page ◀──────────────────────────────── fragment
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use podium_context::config::{load_config, validate_config, AppConfig, ConfigError, Role};
use podium_context::lifecycle::{signals, startup, Shutdown};
use podium_context::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "podium-context")]
#[command(about = "Podium layout/podlet server with context propagation", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the component role.
    #[arg(short, long, value_enum)]
    role: Option<Role>,

    /// Override the component name.
    #[arg(short, long)]
    name: Option<String>,

    /// Override the bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(cli: Cli) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(role) = cli.role {
        config.server.role = role;
    }
    if let Some(name) = cli.name {
        config.context.name = name;
    }
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("podium-context v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        name = %config.context.name,
        role = ?config.server.role,
        bind_address = %config.server.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = startup(config)?;

    let shutdown = Shutdown::new();
    let stopped = shutdown.signal();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, stopped).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
